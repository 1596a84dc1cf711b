//! Order-level enumerations.

wire_enum! {
    /// Order structure (single equity, option, multi-leg strategy, fund).
    pub enum OrderType as "orderType" {
        /// Equity.
        Equity => "EQ",
        /// Single option.
        Option => "OPTN",
        /// Option spread.
        Spreads => "SPREADS",
        /// Covered call (stock plus short call).
        BuyWrites => "BUY_WRITES",
        /// Butterfly.
        Butterfly => "BUTTERFLY",
        /// Iron butterfly.
        IronButterfly => "IRON_BUTTERFLY",
        /// Condor.
        Condor => "CONDOR",
        /// Iron condor.
        IronCondor => "IRON_CONDOR",
        /// Mutual fund.
        MutualFund => "MF",
        /// Money market fund.
        MoneyMarketFund => "MMF",
    }
}

wire_enum! {
    /// Pricing instruction for an order.
    pub enum PriceType as "priceType" {
        /// Best available price.
        Market => "MARKET",
        /// Limit price or better.
        Limit => "LIMIT",
        /// Market once the stop triggers.
        Stop => "STOP",
        /// Limit once the stop triggers.
        StopLimit => "STOP_LIMIT",
        /// Trailing stop, constant offset, lower trigger.
        TrailingStopCnstByLowerTrigger => "TRAILING_STOP_CNST_BY_LOWER_TRIGGER",
        /// Upper trigger by trailing stop, constant offset.
        UpperTriggerByTrailingStopCnst => "UPPER_TRIGGER_BY_TRAILING_STOP_CNST",
        /// Trailing stop, percent offset, lower trigger.
        TrailingStopPrctByLowerTrigger => "TRAILING_STOP_PRCT_BY_LOWER_TRIGGER",
        /// Upper trigger by trailing stop, percent offset.
        UpperTriggerByTrailingStopPrct => "UPPER_TRIGGER_BY_TRAILING_STOP_PRCT",
        /// Trailing stop, constant offset.
        TrailingStopCnst => "TRAILING_STOP_CNST",
        /// Trailing stop, percent offset.
        TrailingStopPrct => "TRAILING_STOP_PRCT",
        /// Stop not shown to the market.
        HiddenStop => "HIDDEN_STOP",
        /// Hidden stop, lower trigger.
        HiddenStopByLowerTrigger => "HIDDEN_STOP_BY_LOWER_TRIGGER",
        /// Upper trigger by hidden stop.
        UpperTriggerByHiddenStop => "UPPER_TRIGGER_BY_HIDDEN_STOP",
        /// Multi-leg order paying a net debit.
        NetDebit => "NET_DEBIT",
        /// Multi-leg order receiving a net credit.
        NetCredit => "NET_CREDIT",
        /// Multi-leg order at even money.
        NetEven => "NET_EVEN",
        /// Market on open.
        MarketOnOpen => "MARKET_ON_OPEN",
        /// Market on close.
        MarketOnClose => "MARKET_ON_CLOSE",
        /// Limit on close.
        LimitOnClose => "LIMIT_ON_CLOSE",
    }
}

wire_enum! {
    /// How long an order stays working.
    pub enum OrderTerm as "orderTerm" {
        /// Good until cancelled.
        GoodUntilCancel => "GOOD_UNTIL_CANCEL",
        /// Good for the trading day.
        GoodForDay => "GOOD_FOR_DAY",
        /// Good until a given date.
        GoodTillDate => "GOOD_TILL_DATE",
        /// Fill what is possible now, cancel the rest.
        ImmediateOrCancel => "IMMEDIATE_OR_CANCEL",
        /// Fill entirely now or cancel.
        FillOrKill => "FILL_OR_KILL",
    }
}

wire_enum! {
    /// Trading session.
    pub enum MarketSession as "marketSession" {
        /// Regular hours.
        Regular => "REGULAR",
        /// Extended hours.
        Extended => "EXTENDED",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn there_are_nineteen_price_types() {
        assert_eq!(PriceType::ALL.len(), 19);
    }

    #[test]
    fn parses_exact_wire_spelling() {
        assert_eq!("EQ".parse::<OrderType>(), Ok(OrderType::Equity));
        assert_eq!("NET_CREDIT".parse::<PriceType>(), Ok(PriceType::NetCredit));
        assert_eq!("GOOD_FOR_DAY".parse::<OrderTerm>(), Ok(OrderTerm::GoodForDay));
        assert_eq!("EXTENDED".parse::<MarketSession>(), Ok(MarketSession::Extended));
    }

    #[test]
    fn parsing_is_case_sensitive() {
        assert!("limit".parse::<PriceType>().is_err());
        assert!("Regular".parse::<MarketSession>().is_err());
    }

    #[test]
    fn rejection_lists_every_allowed_value() {
        let err = "INVALID".parse::<OrderType>().unwrap_err();
        assert_eq!(err.field, "orderType");
        assert_eq!(err.value, "INVALID");
        assert_eq!(
            err.allowed,
            "EQ, OPTN, SPREADS, BUY_WRITES, BUTTERFLY, IRON_BUTTERFLY, CONDOR, IRON_CONDOR, MF, MMF"
        );
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for term in OrderTerm::ALL {
            assert_eq!(term.to_string().parse::<OrderTerm>(), Ok(*term));
        }
    }

    #[test]
    fn serde_uses_wire_spelling() {
        let json = serde_json::to_string(&PriceType::StopLimit).unwrap();
        assert_eq!(json, "\"STOP_LIMIT\"");
        let parsed: OrderType = serde_json::from_str("\"IRON_CONDOR\"").unwrap();
        assert_eq!(parsed, OrderType::IronCondor);
    }
}
