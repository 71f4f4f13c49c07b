//! Trading endpoints (authentication required).

mod types;

pub use types::*;

use reqwest::Method;

use crate::error::ItbitError;
use crate::rest::ItbitClient;
use crate::rest::endpoints::trading;

impl ItbitClient {
    /// Place an order in a wallet.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use itbit_api_client::auth::StaticCredentials;
    /// use itbit_api_client::rest::ItbitClient;
    /// use itbit_api_client::rest::trading::OrderRequest;
    /// use itbit_api_client::types::{Currency, OrderSide, Symbol};
    /// use std::sync::Arc;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = ItbitClient::builder()
    ///         .credentials(Arc::new(StaticCredentials::new("key", "secret")))
    ///         .build();
    ///
    ///     let order = OrderRequest::limit(
    ///         OrderSide::Buy,
    ///         Symbol::xbt_usd(),
    ///         Currency::xbt(),
    ///         "0.01".parse()?,
    ///         "25000".parse()?,
    ///     );
    ///     let placed = client.new_order("wallet-id", &order).await?;
    ///     println!("{} {}", placed.id, placed.status);
    ///     Ok(())
    /// }
    /// ```
    pub async fn new_order(
        &self,
        wallet_id: &str,
        order: &OrderRequest,
    ) -> Result<OrderResponse, ItbitError> {
        self.signed_request(Method::POST, &trading::orders(wallet_id), Some(order))
            .await
    }

    /// Get an order by id.
    pub async fn get_order(
        &self,
        wallet_id: &str,
        order_id: &str,
    ) -> Result<OrderResponse, ItbitError> {
        self.signed_request::<_, ()>(Method::GET, &trading::order(wallet_id, order_id), None)
            .await
    }

    /// Request cancellation of an order.
    ///
    /// itBit acknowledges with `202 Accepted`; the order moves to
    /// `cancelled` asynchronously.
    pub async fn cancel_order(&self, wallet_id: &str, order_id: &str) -> Result<(), ItbitError> {
        self.signed_send::<()>(Method::DELETE, &trading::order(wallet_id, order_id), None)
            .await?;
        Ok(())
    }
}
