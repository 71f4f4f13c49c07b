//! Trait definition for the itBit REST API client.
//!
//! [`ItbitApi`] abstracts the endpoint operations so downstream code can be
//! written against a mock or a decorated client.
//!
//! # Example
//!
//! ```rust,ignore
//! use itbit_api_client::rest::ItbitApi;
//! use itbit_api_client::types::Symbol;
//!
//! async fn spread<C: ItbitApi>(client: &C) -> Result<(), itbit_api_client::ItbitError> {
//!     let ticker = client.get_ticker(&Symbol::xbt_usd()).await?;
//!     println!("spread: {}", ticker.ask - ticker.bid);
//!     Ok(())
//! }
//! ```

use std::future::Future;

use crate::error::ItbitError;
use crate::rest::ItbitClient;
use crate::rest::market::{OrderBook, Ticker};
use crate::rest::trading::{OrderRequest, OrderResponse};
use crate::rest::wallets::{Wallet, WalletsRequest};
use crate::types::Symbol;

/// Trait defining the itBit REST API operations.
pub trait ItbitApi: Send + Sync {
    // ========== Market Data ==========

    /// Get the market data snapshot for a symbol.
    fn get_ticker(
        &self,
        symbol: &Symbol,
    ) -> impl Future<Output = Result<Ticker, ItbitError>> + Send;

    /// Get the order book for a symbol.
    fn get_order_book(
        &self,
        symbol: &Symbol,
    ) -> impl Future<Output = Result<OrderBook, ItbitError>> + Send;

    // ========== Wallets ==========

    /// Get one page of wallets.
    fn get_wallets(
        &self,
        request: &WalletsRequest,
    ) -> impl Future<Output = Result<Vec<Wallet>, ItbitError>> + Send;

    /// Get every wallet of the configured user.
    fn get_all_wallets(&self) -> impl Future<Output = Result<Vec<Wallet>, ItbitError>> + Send;

    /// Get a single wallet.
    fn get_wallet(
        &self,
        wallet_id: &str,
    ) -> impl Future<Output = Result<Wallet, ItbitError>> + Send;

    // ========== Trading ==========

    /// Place an order.
    fn new_order(
        &self,
        wallet_id: &str,
        order: &OrderRequest,
    ) -> impl Future<Output = Result<OrderResponse, ItbitError>> + Send;

    /// Get an order.
    fn get_order(
        &self,
        wallet_id: &str,
        order_id: &str,
    ) -> impl Future<Output = Result<OrderResponse, ItbitError>> + Send;

    /// Cancel an order.
    fn cancel_order(
        &self,
        wallet_id: &str,
        order_id: &str,
    ) -> impl Future<Output = Result<(), ItbitError>> + Send;
}

impl ItbitApi for ItbitClient {
    async fn get_ticker(&self, symbol: &Symbol) -> Result<Ticker, ItbitError> {
        ItbitClient::get_ticker(self, symbol).await
    }

    async fn get_order_book(&self, symbol: &Symbol) -> Result<OrderBook, ItbitError> {
        ItbitClient::get_order_book(self, symbol).await
    }

    async fn get_wallets(&self, request: &WalletsRequest) -> Result<Vec<Wallet>, ItbitError> {
        ItbitClient::get_wallets(self, request).await
    }

    async fn get_all_wallets(&self) -> Result<Vec<Wallet>, ItbitError> {
        ItbitClient::get_all_wallets(self).await
    }

    async fn get_wallet(&self, wallet_id: &str) -> Result<Wallet, ItbitError> {
        ItbitClient::get_wallet(self, wallet_id).await
    }

    async fn new_order(
        &self,
        wallet_id: &str,
        order: &OrderRequest,
    ) -> Result<OrderResponse, ItbitError> {
        ItbitClient::new_order(self, wallet_id, order).await
    }

    async fn get_order(
        &self,
        wallet_id: &str,
        order_id: &str,
    ) -> Result<OrderResponse, ItbitError> {
        ItbitClient::get_order(self, wallet_id, order_id).await
    }

    async fn cancel_order(&self, wallet_id: &str, order_id: &str) -> Result<(), ItbitError> {
        ItbitClient::cancel_order(self, wallet_id, order_id).await
    }
}
