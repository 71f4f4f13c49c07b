//! Wallet endpoints (authentication required).

mod types;

pub use types::*;

use reqwest::Method;

use crate::error::ItbitError;
use crate::rest::ItbitClient;
use crate::rest::endpoints::wallets;

impl ItbitClient {
    /// Get one page of wallets.
    pub async fn get_wallets(&self, request: &WalletsRequest) -> Result<Vec<Wallet>, ItbitError> {
        let query = serde_urlencoded::to_string(request)?;
        let path = format!("{}?{}", wallets::WALLETS, query);
        self.signed_request::<_, ()>(Method::GET, &path, None).await
    }

    /// Get every wallet of the configured user, following pagination.
    ///
    /// Requires a user id on the client. Pages are fetched until one comes
    /// back with fewer than a full page of wallets.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use itbit_api_client::auth::EnvCredentials;
    /// use itbit_api_client::rest::ItbitClient;
    /// use std::sync::Arc;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = ItbitClient::builder()
    ///         .credentials(Arc::new(EnvCredentials::from_env()?))
    ///         .user_id("user-id")
    ///         .build();
    ///
    ///     for wallet in client.get_all_wallets().await? {
    ///         for balance in &wallet.balances {
    ///             println!("{}: {} {}", wallet.name, balance.total, balance.currency);
    ///         }
    ///     }
    ///     Ok(())
    /// }
    /// ```
    pub async fn get_all_wallets(&self) -> Result<Vec<Wallet>, ItbitError> {
        let user_id = self
            .user_id()
            .ok_or_else(|| ItbitError::Config("no user id configured on the client".to_string()))?;

        let mut request = WalletsRequest::new(user_id);
        let mut all = Vec::new();
        loop {
            let page = self.get_wallets(&request).await?;
            tracing::debug!(page = request.page, count = page.len(), "fetched wallets page");

            let full_page = page.len() >= request.per_page as usize;
            all.extend(page);
            if !full_page {
                return Ok(all);
            }
            request.page += 1;
        }
    }

    /// Get a single wallet by id.
    pub async fn get_wallet(&self, wallet_id: &str) -> Result<Wallet, ItbitError> {
        self.signed_request::<_, ()>(Method::GET, &wallets::wallet(wallet_id), None)
            .await
    }
}
