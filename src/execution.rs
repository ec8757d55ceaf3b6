//! Engine output: trades and book snapshots.
//!
//! [`Trade`] is emitted for each match between an incoming and a resting order.
//! [`BookSnapshot`] is the aggregated per-price view produced on `PRINT`.

use crate::order_book::PriceLevelView;
use crate::types::{OrderId, Side};

/// One match between a resting order and an incoming order.
///
/// The economic fill price is `resting_price`. `incoming_price` is the
/// incoming order's own limit, carried so the trade line can restate it.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Trade {
    pub resting_order_id: OrderId,
    pub resting_price: i64,
    pub incoming_order_id: OrderId,
    pub incoming_price: i64,
    pub quantity: i64,
    pub aggressor_side: Side,
}

/// Aggregated book view: each side's price levels, highest price first.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BookSnapshot {
    pub asks: Vec<PriceLevelView>,
    pub bids: Vec<PriceLevelView>,
}

/// Something the engine hands back to its caller for rendering.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EngineEvent {
    Trade(Trade),
    Book(BookSnapshot),
}
