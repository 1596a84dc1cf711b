//! Account list, balance and portfolio payloads.

use serde_json::{Map, Value};

use super::collapse_wrapper;
use super::orders::product;
use crate::entity_schema;
use crate::mapping::{EntitySchema, FieldDescriptor};

entity_schema! {
    /// One brokerage account.
    pub fn account() => EntitySchema::new("Account").fields([
        FieldDescriptor::string("accountId"),
        FieldDescriptor::string("accountIdKey"),
        FieldDescriptor::string("accountMode"),
        FieldDescriptor::string("accountDesc"),
        FieldDescriptor::string("accountName"),
        FieldDescriptor::string("accountType"),
        FieldDescriptor::string("institutionType"),
        FieldDescriptor::string("accountStatus"),
        FieldDescriptor::temporal("closedDate"),
    ])
}

/// Pre-hydrate hook: `Accounts.Account` → `Accounts`.
fn unwrap_accounts(raw: &mut Map<String, Value>) {
    collapse_wrapper(raw, "Accounts", "Account");
}

entity_schema! {
    /// Accounts visible to the authenticated user.
    pub fn account_list_response() => EntitySchema::new("AccountListResponse")
        .field(FieldDescriptor::list("accounts", account).wire_key("Accounts"))
        .with_pre_hydrate(unwrap_accounts)
}

entity_schema! {
    /// Live valuation block inside the computed balance.
    pub fn real_time_values() => EntitySchema::new("RealTimeValues").fields([
        FieldDescriptor::float("totalAccountValue"),
        FieldDescriptor::float("netMv"),
        FieldDescriptor::float("netMvLong"),
        FieldDescriptor::float("netMvShort"),
        FieldDescriptor::float("totalLongValue").nullable(),
    ])
}

entity_schema! {
    /// Derived balances.
    pub fn balance_computed() => EntitySchema::new("Computed").fields([
        FieldDescriptor::float("cashAvailableForInvestment"),
        FieldDescriptor::float("cashAvailableForWithdrawal"),
        FieldDescriptor::float("totalAvailableForWithdrawal"),
        FieldDescriptor::float("netCash"),
        FieldDescriptor::float("cashBalance"),
        FieldDescriptor::float("settledCashForInvestment"),
        FieldDescriptor::float("unSettledCashForInvestment"),
        FieldDescriptor::float("fundsWithheldFromPurchasePower"),
        FieldDescriptor::float("fundsWithheldFromWithdrawal"),
        FieldDescriptor::float("marginBuyingPower"),
        FieldDescriptor::float("cashBuyingPower"),
        FieldDescriptor::float("dtMarginBuyingPower"),
        FieldDescriptor::float("dtCashBuyingPower"),
        FieldDescriptor::float("shortAdjustBalance"),
        FieldDescriptor::float("accountBalance"),
        FieldDescriptor::entity("realTimeValues", real_time_values).wire_key("RealTimeValues"),
    ])
}

entity_schema! {
    /// Account balance snapshot.
    pub fn balance_response() => EntitySchema::new("BalanceResponse").fields([
        FieldDescriptor::string("accountId"),
        FieldDescriptor::string("institutionType"),
        FieldDescriptor::temporal("asOfDate"),
        FieldDescriptor::string("accountType"),
        FieldDescriptor::string("optionLevel"),
        FieldDescriptor::string("accountDescription"),
        FieldDescriptor::int("quoteMode").nullable(),
        FieldDescriptor::string("dayTraderStatus").nullable(),
        FieldDescriptor::string("accountMode"),
        FieldDescriptor::entity("computed", balance_computed).wire_key("Computed"),
    ])
}

entity_schema! {
    /// One holding.
    pub fn position() => EntitySchema::new("Position").fields([
        FieldDescriptor::int("positionId"),
        FieldDescriptor::entity("product", product).wire_key("Product"),
        FieldDescriptor::string("symbolDescription"),
        FieldDescriptor::temporal("dateAcquired"),
        FieldDescriptor::float("pricePaid"),
        FieldDescriptor::float("commissions"),
        FieldDescriptor::float("otherFees"),
        FieldDescriptor::float("quantity"),
        FieldDescriptor::string("positionIndicator"),
        FieldDescriptor::string("positionType"),
        FieldDescriptor::float("daysGain"),
        FieldDescriptor::float("daysGainPct"),
        FieldDescriptor::float("marketValue"),
        FieldDescriptor::float("totalCost"),
        FieldDescriptor::float("totalGain"),
        FieldDescriptor::float("totalGainPct"),
        FieldDescriptor::float("pctOfPortfolio"),
        FieldDescriptor::float("costPerShare"),
        FieldDescriptor::float("todayCommissions"),
        FieldDescriptor::float("todayFees"),
        FieldDescriptor::float("todayPricePaid"),
        FieldDescriptor::float("todayQuantity"),
        FieldDescriptor::float("adjPrevClose"),
        FieldDescriptor::string("lotsDetails").nullable(),
        FieldDescriptor::string("quoteDetails").nullable(),
    ])
}

entity_schema! {
    /// Positions held in one account.
    pub fn account_portfolio() => EntitySchema::new("AccountPortfolio").fields([
        FieldDescriptor::string("accountId"),
        FieldDescriptor::string("next").nullable(),
        FieldDescriptor::int("totalNoOfPages").nullable(),
        FieldDescriptor::string("nextPageNo").nullable(),
        FieldDescriptor::list("position", position).wire_key("Position"),
    ])
}

entity_schema! {
    /// Portfolio listing.
    pub fn portfolio_response() => EntitySchema::new("PortfolioResponse").field(
        FieldDescriptor::list("accountPortfolio", account_portfolio).wire_key("AccountPortfolio"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::hydrate;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn account_list_unwraps_accounts_wrapper() {
        let raw = json!({
            "Accounts": {
                "Account": [
                    {"accountId": "835649790", "accountIdKey": "dBZOKt9xDrtRSAOl4MSiiA", "accountStatus": "ACTIVE"},
                    {"accountId": "840104290", "accountIdKey": "JIdOIAcSpwR1Jva7RQBraQ", "accountStatus": "CLOSED",
                     "closedDate": 1_700_000_000}
                ]
            }
        });
        let entity = hydrate(account_list_response(), &raw);
        let accounts = entity.list("accounts");
        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[0].str("accountIdKey"), Some("dBZOKt9xDrtRSAOl4MSiiA"));
        assert!(accounts[0].temporal("closedDate").is_none());
        assert!(accounts[1].temporal("closedDate").is_some());
    }

    #[test]
    fn single_account_is_still_a_list() {
        let raw = json!({"accounts": {"account": {"accountId": "1"}}});
        assert_eq!(hydrate(account_list_response(), &raw).list("accounts").len(), 1);
    }

    #[test]
    fn balance_nests_computed_and_real_time_values() {
        let raw = json!({
            "accountId": "835649790",
            "asOfDate": "20240621",
            "Computed": {
                "cashAvailableForInvestment": "1250.75",
                "netCash": 93921.44,
                "RealTimeValues": {"totalAccountValue": 100_500.25, "netMv": 0}
            }
        });
        let entity = hydrate(balance_response(), &raw);
        let computed = entity.entity("computed").unwrap();
        assert_eq!(computed.decimal("cashAvailableForInvestment"), Some(dec!(1250.75)));
        assert_eq!(computed.decimal("marginBuyingPower"), Some(dec!(0)));
        let rtv = computed.entity("realTimeValues").unwrap();
        assert_eq!(rtv.decimal("totalAccountValue"), Some(dec!(100500.25)));
        assert!(entity.temporal("asOfDate").is_some());
    }

    #[test]
    fn portfolio_positions() {
        let raw = json!({
            "AccountPortfolio": [{
                "accountId": "835649790",
                "totalNoOfPages": 1,
                "Position": {
                    "positionId": 140_357_348_131_i64,
                    "Product": {"symbol": "TWTR", "securityType": "EQ"},
                    "quantity": 2,
                    "marketValue": "74.5"
                }
            }]
        });
        let entity = hydrate(portfolio_response(), &raw);
        let portfolio = &entity.list("accountPortfolio")[0];
        let positions = portfolio.list("position");
        assert_eq!(positions.len(), 1);
        assert_eq!(positions[0].decimal("marketValue"), Some(dec!(74.5)));
        assert_eq!(
            positions[0].entity("product").and_then(|p| p.str("symbol")),
            Some("TWTR")
        );
    }
}
