//! itBit REST API client.
//!
//! Public market data goes out unsigned; wallet and trading endpoints are
//! signed with the credentials configured on the client (see [`crate::auth`]).
//!
//! The [`ItbitApi`] trait abstracts the operations for mocking and
//! decoration.

mod client;
mod endpoints;
pub mod market;
pub mod trading;
mod traits;
pub mod wallets;

pub use client::{ItbitClient, ItbitClientBuilder};
pub use endpoints::ITBIT_BASE_URL;
pub use traits::ItbitApi;
