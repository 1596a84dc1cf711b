//! Leg-level enumerations.

wire_enum! {
    /// What a leg does.
    pub enum OrderAction as "orderAction" {
        /// Buy.
        Buy => "BUY",
        /// Sell.
        Sell => "SELL",
        /// Buy to cover a short.
        BuyToCover => "BUY_TO_COVER",
        /// Sell short.
        SellShort => "SELL_SHORT",
        /// Buy to open an option position.
        BuyOpen => "BUY_OPEN",
        /// Buy to close an option position.
        BuyClose => "BUY_CLOSE",
        /// Sell to open an option position.
        SellOpen => "SELL_OPEN",
        /// Sell to close an option position.
        SellClose => "SELL_CLOSE",
        /// Fund exchange.
        Exchange => "EXCHANGE",
    }
}

wire_enum! {
    /// Security class of a leg's product.
    pub enum SecurityType as "securityType" {
        /// Equity.
        Equity => "EQ",
        /// Option.
        Option => "OPTN",
        /// Mutual fund.
        MutualFund => "MF",
        /// Money market fund.
        MoneyMarketFund => "MMF",
    }
}

wire_enum! {
    /// Unit a leg's quantity is expressed in.
    pub enum QuantityType as "quantityType" {
        /// Shares or contracts.
        Quantity => "QUANTITY",
        /// Dollar amount.
        Dollar => "DOLLAR",
        /// Entire position.
        AllIOwn => "ALL_I_OWN",
    }
}

wire_enum! {
    /// Option right.
    pub enum CallPut as "callPut" {
        /// Call.
        Call => "CALL",
        /// Put.
        Put => "PUT",
    }
}
