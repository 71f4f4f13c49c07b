//! Public market data endpoints (no authentication required).

mod types;

pub use types::*;

use crate::error::ItbitError;
use crate::rest::ItbitClient;
use crate::rest::endpoints::market;
use crate::types::Symbol;

impl ItbitClient {
    /// Get the market data snapshot for a symbol.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use itbit_api_client::rest::ItbitClient;
    /// use itbit_api_client::types::Symbol;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = ItbitClient::new();
    ///     let ticker = client.get_ticker(&Symbol::xbt_usd()).await?;
    ///     println!("{ticker}");
    ///     Ok(())
    /// }
    /// ```
    pub async fn get_ticker(&self, symbol: &Symbol) -> Result<Ticker, ItbitError> {
        self.public_get(&market::ticker(symbol)).await
    }

    /// Get the order book for a symbol.
    pub async fn get_order_book(&self, symbol: &Symbol) -> Result<OrderBook, ItbitError> {
        self.public_get(&market::order_book(symbol)).await
    }
}
