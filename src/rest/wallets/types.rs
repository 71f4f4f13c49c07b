//! Types for wallet endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::Currency;

/// A trading wallet.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    /// Wallet id.
    pub id: String,
    /// Owning user id.
    pub user_id: String,
    /// Wallet name.
    pub name: String,
    /// Balance per currency.
    #[serde(default)]
    pub balances: Vec<WalletBalance>,
}

impl Wallet {
    /// Balance for a currency, if the wallet holds it.
    pub fn balance(&self, currency: &Currency) -> Option<&WalletBalance> {
        self.balances.iter().find(|b| &b.currency == currency)
    }
}

/// Balance of one currency in a wallet.
#[derive(Debug, Clone, Deserialize)]
pub struct WalletBalance {
    /// Currency code.
    pub currency: Currency,
    /// Amount not reserved by open orders.
    #[serde(rename = "availableBalance")]
    pub available: Decimal,
    /// Total amount.
    #[serde(rename = "totalBalance")]
    pub total: Decimal,
}

/// Query parameters for listing wallets.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletsRequest {
    /// User id whose wallets to list.
    pub user_id: String,
    /// 1-based page number.
    pub page: u32,
    /// Wallets per page.
    pub per_page: u32,
}

impl WalletsRequest {
    /// First page for a user, with the default page size.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            page: 1,
            per_page: crate::rest::endpoints::wallets::WALLETS_PER_PAGE,
        }
    }

    /// Select a page.
    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Set the page size.
    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wallets_request_query() {
        let query = serde_urlencoded::to_string(WalletsRequest::new("abc").page(2)).unwrap();
        assert_eq!(query, "userId=abc&page=2&perPage=50");
    }

    #[test]
    fn test_wallet_balance_lookup() {
        let wallet: Wallet = serde_json::from_str(
            r#"{
                "id": "w1",
                "userId": "u1",
                "name": "Main",
                "balances": [
                    {"currency": "USD", "availableBalance": "10.5", "totalBalance": "12"},
                    {"currency": "XBT", "availableBalance": "0.1", "totalBalance": "0.1"}
                ]
            }"#,
        )
        .unwrap();
        let xbt = wallet.balance(&Currency::xbt()).unwrap();
        assert_eq!(xbt.total, "0.1".parse::<Decimal>().unwrap());
        assert!(wallet.balance(&Currency::new("EUR")).is_none());
    }
}
