//! Types for trading endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use serde_with::skip_serializing_none;
use time::OffsetDateTime;

use crate::types::{Currency, OrderSide, OrderStatus, OrderType, Symbol};

/// Request to place an order.
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    /// Buy or sell.
    pub side: OrderSide,
    /// Order type.
    #[serde(rename = "type")]
    pub order_type: OrderType,
    /// Currency the amount is denominated in.
    pub currency: Currency,
    /// Order amount.
    pub amount: Decimal,
    /// Amount shown on the public book, defaults to the full amount.
    pub display: Option<Decimal>,
    /// Limit price.
    pub price: Decimal,
    /// Trading pair.
    pub instrument: Symbol,
    /// Free-form metadata echoed back on the order.
    pub metadata: Option<Map<String, Value>>,
    /// Client-chosen order id.
    pub client_order_identifier: Option<String>,
}

impl OrderRequest {
    /// Create a limit order.
    pub fn limit(
        side: OrderSide,
        instrument: Symbol,
        currency: Currency,
        amount: Decimal,
        price: Decimal,
    ) -> Self {
        Self {
            side,
            order_type: OrderType::Limit,
            currency,
            amount,
            display: None,
            price,
            instrument,
            metadata: None,
            client_order_identifier: None,
        }
    }

    /// Show only part of the amount on the book.
    pub fn display(mut self, display: Decimal) -> Self {
        self.display = Some(display);
        self
    }

    /// Attach a client order id.
    pub fn client_order_identifier(mut self, id: impl Into<String>) -> Self {
        self.client_order_identifier = Some(id.into());
        self
    }

    /// Attach a metadata entry.
    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }
}

/// An order as reported by itBit.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    /// Order id.
    pub id: String,
    /// Wallet the order belongs to.
    pub wallet_id: String,
    /// Buy or sell.
    pub side: OrderSide,
    /// Order type.
    #[serde(rename = "type")]
    pub order_type: OrderType,
    /// Trading pair.
    pub instrument: Symbol,
    /// Currency the amount is denominated in.
    pub currency: Currency,
    /// Order amount.
    pub amount: Decimal,
    /// Displayed amount.
    #[serde(default, alias = "displayAmount")]
    pub display: Option<Decimal>,
    /// Limit price.
    pub price: Decimal,
    /// Amount filled so far.
    #[serde(default)]
    pub amount_filled: Decimal,
    /// Average fill price.
    #[serde(default)]
    pub volume_weighted_average_price: Decimal,
    /// Creation time.
    #[serde(with = "time::serde::rfc3339")]
    pub created_time: OffsetDateTime,
    /// Current status.
    pub status: OrderStatus,
    /// Metadata supplied at placement.
    #[serde(default)]
    pub metadata: Option<Map<String, Value>>,
    /// Client order id supplied at placement.
    #[serde(default)]
    pub client_order_identifier: Option<String>,
}

impl OrderResponse {
    /// Amount still open.
    pub fn remaining(&self) -> Decimal {
        self.amount - self.amount_filled
    }
}
