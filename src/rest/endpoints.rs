//! itBit REST API endpoint paths, relative to the base URL.

/// Base URL for the itBit REST API.
pub const ITBIT_BASE_URL: &str = "https://api.itbit.com/v1";

/// Public market data endpoints (no authentication required).
pub mod market {
    use crate::types::Symbol;

    /// Ticker for a symbol.
    pub fn ticker(symbol: &Symbol) -> String {
        format!("/markets/{symbol}/ticker")
    }

    /// Order book for a symbol.
    pub fn order_book(symbol: &Symbol) -> String {
        format!("/markets/{symbol}/order_book")
    }
}

/// Wallet endpoints (authentication required).
pub mod wallets {
    /// List wallets, paginated.
    pub const WALLETS: &str = "/wallets";
    /// Wallets returned per page by the pagination loop.
    pub const WALLETS_PER_PAGE: u32 = 50;

    /// A single wallet.
    pub fn wallet(wallet_id: &str) -> String {
        format!("/wallets/{wallet_id}")
    }
}

/// Trading endpoints (authentication required).
pub mod trading {
    /// Orders of a wallet.
    pub fn orders(wallet_id: &str) -> String {
        format!("/wallets/{wallet_id}/orders")
    }

    /// A single order of a wallet.
    pub fn order(wallet_id: &str, order_id: &str) -> String {
        format!("/wallets/{wallet_id}/orders/{order_id}")
    }
}
