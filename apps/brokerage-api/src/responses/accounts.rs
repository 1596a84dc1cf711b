//! Account and market response views.

use super::message::Message;
use super::response_view;
use crate::mapping::Entity;
use crate::schemas;

response_view! {
    /// Accounts visible to the user.
    AccountListResponse => schemas::account_list_response
}

impl AccountListResponse {
    /// Accounts, in response order.
    #[must_use]
    pub fn accounts(&self) -> &[Entity] {
        self.0.list("accounts")
    }

    /// Key to use in account-scoped paths for the account with `account_id`.
    #[must_use]
    pub fn account_id_key(&self, account_id: &str) -> Option<&str> {
        self.accounts()
            .iter()
            .find(|account| account.str("accountId") == Some(account_id))
            .and_then(|account| account.str("accountIdKey"))
            .filter(|key| !key.is_empty())
    }
}

response_view! {
    /// Balance snapshot.
    BalanceResponse => schemas::balance_response
}

impl BalanceResponse {
    /// The `Computed` block, if present.
    #[must_use]
    pub fn computed(&self) -> Option<&Entity> {
        self.0.entity("computed")
    }

    /// The `Computed.RealTimeValues` block, if present.
    #[must_use]
    pub fn real_time_values(&self) -> Option<&Entity> {
        self.computed().and_then(|c| c.entity("realTimeValues"))
    }
}

response_view! {
    /// Portfolio listing.
    PortfolioResponse => schemas::portfolio_response
}

impl PortfolioResponse {
    /// Positions across every account portfolio in the response.
    pub fn positions(&self) -> impl Iterator<Item = &Entity> {
        self.0
            .list("accountPortfolio")
            .iter()
            .flat_map(|portfolio| portfolio.list("position"))
    }
}

response_view! {
    /// Quotes.
    QuoteResponse => schemas::quote_response
}

impl QuoteResponse {
    /// One entry per quoted symbol.
    #[must_use]
    pub fn quotes(&self) -> &[Entity] {
        self.0.list("quoteData")
    }

    /// Messages, e.g. for unknown symbols.
    #[must_use]
    pub fn messages(&self) -> Vec<Message> {
        Message::list(&self.0)
    }
}
