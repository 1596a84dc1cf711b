//! Quote payloads.

use super::messages::{messages_field, unwrap_messages};
use super::orders::product;
use crate::entity_schema;
use crate::mapping::{EntitySchema, FieldDescriptor};

entity_schema! {
    /// Full quote detail (`All`).
    pub fn quote_detail() => EntitySchema::new("All").fields([
        FieldDescriptor::bool("adjustedFlag"),
        FieldDescriptor::float("ask"),
        FieldDescriptor::int("askSize"),
        FieldDescriptor::temporal("askTime"),
        FieldDescriptor::float("bid"),
        FieldDescriptor::int("bidSize"),
        FieldDescriptor::temporal("bidTime"),
        FieldDescriptor::float("changeClose"),
        FieldDescriptor::float("changeClosePercentage"),
        FieldDescriptor::string("companyName"),
        FieldDescriptor::int("daysToExpiration").nullable(),
        FieldDescriptor::string("dirLast"),
        FieldDescriptor::float("dividend"),
        FieldDescriptor::float("eps"),
        FieldDescriptor::float("estEarnings"),
        FieldDescriptor::temporal("exDividendDate"),
        FieldDescriptor::float("high"),
        FieldDescriptor::float("high52"),
        FieldDescriptor::float("lastTrade"),
        FieldDescriptor::float("low"),
        FieldDescriptor::float("low52"),
        FieldDescriptor::float("open"),
        FieldDescriptor::int("openInterest").nullable(),
        FieldDescriptor::string("optionStyle").nullable(),
        FieldDescriptor::string("optionUnderlier").nullable(),
        FieldDescriptor::float("previousClose"),
        FieldDescriptor::int("previousDayVolume"),
        FieldDescriptor::string("primaryExchange"),
        FieldDescriptor::string("symbolDescription"),
        FieldDescriptor::int("totalVolume"),
        FieldDescriptor::float("marketCap"),
        FieldDescriptor::float("sharesOutstanding"),
        FieldDescriptor::string("nextEarningDate").nullable(),
        FieldDescriptor::float("beta"),
        FieldDescriptor::float("yield"),
        FieldDescriptor::float("declaredDividend"),
        FieldDescriptor::temporal("dividendPayableDate"),
        FieldDescriptor::float("pe"),
        FieldDescriptor::temporal("week52HiDate"),
        FieldDescriptor::temporal("week52LowDate"),
    ])
}

entity_schema! {
    /// Quote for one symbol.
    pub fn quote_data() => EntitySchema::new("QuoteData").fields([
        FieldDescriptor::temporal("dateTime"),
        FieldDescriptor::temporal("dateTimeUTC"),
        FieldDescriptor::string("quoteStatus"),
        FieldDescriptor::bool("ahFlag"),
        FieldDescriptor::bool("hasMiniOptions"),
        FieldDescriptor::entity("all", quote_detail).wire_key("All"),
        FieldDescriptor::entity("product", product).wire_key("Product"),
    ])
}

entity_schema! {
    /// Quotes for one or more symbols.
    pub fn quote_response() => EntitySchema::new("QuoteResponse")
        .fields([
            FieldDescriptor::list("quoteData", quote_data).wire_key("QuoteData"),
            messages_field(),
        ])
        .with_pre_hydrate(unwrap_messages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::{TemporalValue, hydrate};
    use chrono::{NaiveDate, TimeZone, Utc};
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn quote_with_zoned_and_epoch_times() {
        let raw = json!({
            "QuoteData": {
                "dateTime": "15:17:00 EDT 06-20-2024",
                "dateTimeUTC": 1_718_911_020,
                "quoteStatus": "DELAYED",
                "ahFlag": "false",
                "All": {
                    "ask": 139.64,
                    "askSize": "100",
                    "lastTrade": 139.6,
                    "exDividendDate": 20_240_509,
                    "companyName": "INTERNATIONAL BUSINESS MACHINES"
                },
                "Product": {"symbol": "IBM", "securityType": "EQ"}
            }
        });
        let entity = hydrate(quote_response(), &raw);
        let quote = &entity.list("quoteData")[0];

        let expected = Utc.with_ymd_and_hms(2024, 6, 20, 19, 17, 0).unwrap();
        assert_eq!(quote.temporal("dateTime"), Some(TemporalValue::Instant(expected)));
        assert_eq!(quote.temporal("dateTimeUTC"), Some(TemporalValue::Instant(expected)));
        assert_eq!(quote.bool("ahFlag"), Some(false));

        let all = quote.entity("all").unwrap();
        assert_eq!(all.decimal("ask"), Some(dec!(139.64)));
        assert_eq!(all.int("askSize"), Some(100));
        assert_eq!(
            all.temporal("exDividendDate"),
            Some(TemporalValue::Date(NaiveDate::from_ymd_opt(2024, 5, 9).unwrap()))
        );
        assert!(all.temporal("week52HiDate").is_none());
    }

    #[test]
    fn quote_messages_for_unknown_symbol() {
        let raw = json!({
            "Messages": {"Message": {"description": "Invalid Symbol: XXXX", "code": 10033, "type": "WARNING"}}
        });
        let entity = hydrate(quote_response(), &raw);
        assert!(entity.list("quoteData").is_empty());
        assert_eq!(entity.list("messages")[0].int("code"), Some(10033));
    }
}
