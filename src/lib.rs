//! # itBit Client
//!
//! An async Rust client library for the itBit exchange REST API.
//!
//! ## Features
//!
//! - Market data, wallet listing and order placement
//! - HMAC-SHA512 request signing with a replay-safe nonce counter
//! - Strong typing for all request/response types
//! - Financial precision with `rust_decimal`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use itbit_api_client::rest::ItbitClient;
//! use itbit_api_client::types::Symbol;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ItbitClient::new();
//!     let book = client.get_order_book(&Symbol::xbt_usd()).await?;
//!     println!("Best bid: {:?}", book.best_bid());
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod error;
pub mod rest;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{ApiError, ItbitError};
pub use rest::ItbitClient;
pub use types::common::{Currency, OrderSide, OrderStatus, OrderType, Symbol};

/// Result type alias using ItbitError
pub type Result<T> = std::result::Result<T, ItbitError>;
