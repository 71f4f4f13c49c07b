//! Types for public market data endpoints.

use rust_decimal::Decimal;
use serde::Deserialize;
use time::OffsetDateTime;

use crate::types::Symbol;

/// Market data snapshot for a symbol.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticker {
    /// Trading pair.
    pub pair: Symbol,
    /// Best bid price.
    pub bid: Decimal,
    /// Amount available at the best bid.
    pub bid_amt: Decimal,
    /// Best ask price.
    pub ask: Decimal,
    /// Amount available at the best ask.
    pub ask_amt: Decimal,
    /// Last traded price.
    pub last_price: Decimal,
    /// Last traded amount.
    pub last_amt: Decimal,
    /// Volume over the last 24 hours.
    pub volume_24h: Decimal,
    /// Volume since the start of the trading day.
    pub volume_today: Decimal,
    /// High over the last 24 hours.
    pub high_24h: Decimal,
    /// Low over the last 24 hours.
    pub low_24h: Decimal,
    /// High since the start of the trading day.
    pub high_today: Decimal,
    /// Low since the start of the trading day.
    pub low_today: Decimal,
    /// Opening price of the trading day.
    pub open_today: Decimal,
    /// Volume-weighted average price of the trading day.
    pub vwap_today: Decimal,
    /// Volume-weighted average price over the last 24 hours.
    pub vwap_24h: Decimal,
    /// Server time of the snapshot.
    #[serde(rename = "serverTimeUTC", with = "time::serde::rfc3339")]
    pub server_time_utc: OffsetDateTime,
}

impl std::fmt::Display for Ticker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} - {:.2} {}", self.bid, self.ask, self.pair)
    }
}

/// A price level: `[price, amount]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct OrderBookEntry(pub Decimal, pub Decimal);

impl OrderBookEntry {
    /// Price of the level.
    pub fn price(&self) -> Decimal {
        self.0
    }

    /// Amount resting at the level.
    pub fn amount(&self) -> Decimal {
        self.1
    }
}

/// Open orders for a symbol, best levels first.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderBook {
    /// Sell side.
    #[serde(default)]
    pub asks: Vec<OrderBookEntry>,
    /// Buy side.
    #[serde(default)]
    pub bids: Vec<OrderBookEntry>,
}

impl OrderBook {
    /// Best (lowest) ask, if any.
    pub fn best_ask(&self) -> Option<&OrderBookEntry> {
        self.asks.first()
    }

    /// Best (highest) bid, if any.
    pub fn best_bid(&self) -> Option<&OrderBookEntry> {
        self.bids.first()
    }
}
