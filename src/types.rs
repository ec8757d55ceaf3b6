//! Core types for the matching engine.
//!
//! [`Order`], [`Side`], and [`TimeInForce`] describe an order; [`OrderId`] is the
//! externally supplied identifier.

use crate::error::OrderError;
use std::fmt;

/// Externally supplied order identifier. Unique only among resting orders.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub String);

impl OrderId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for OrderId {
    fn from(s: &str) -> Self {
        OrderId(s.to_string())
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Order side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }

    /// Parses the wire keyword (`BUY` / `SELL`).
    pub fn from_keyword(s: &str) -> Option<Side> {
        match s {
            "BUY" => Some(Side::Buy),
            "SELL" => Some(Side::Sell),
            _ => None,
        }
    }
}

/// Time-in-force: whether an unfilled remainder rests on the book.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TimeInForce {
    /// Good-For-Day: remainder rests until filled, canceled, or modified away.
    GFD,
    /// Immediate-or-Cancel: fill what you can immediately; discard the rest.
    IOC,
}

impl TimeInForce {
    pub fn from_keyword(s: &str) -> Option<TimeInForce> {
        match s {
            "GFD" => Some(TimeInForce::GFD),
            "IOC" => Some(TimeInForce::IOC),
            _ => None,
        }
    }
}

/// Limit order. `price` and `quantity` are strictly positive once validated.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Order {
    pub order_id: OrderId,
    pub side: Side,
    pub time_in_force: TimeInForce,
    pub price: i64,
    pub quantity: i64,
}

impl Order {
    pub fn new(
        order_id: impl Into<OrderId>,
        side: Side,
        time_in_force: TimeInForce,
        price: i64,
        quantity: i64,
    ) -> Self {
        Self {
            order_id: order_id.into(),
            side,
            time_in_force,
            price,
            quantity,
        }
    }

    /// Checks the values an order needs before it may match or rest.
    pub fn validate(&self) -> Result<(), OrderError> {
        if self.price <= 0 {
            return Err(OrderError::NonPositivePrice(self.price));
        }
        if self.quantity <= 0 {
            return Err(OrderError::NonPositiveQuantity(self.quantity));
        }
        Ok(())
    }

    /// True if this order may trade against a resting order at `resting_price`.
    pub fn crosses(&self, resting_price: i64) -> bool {
        match self.side {
            Side::Buy => resting_price <= self.price,
            Side::Sell => resting_price >= self.price,
        }
    }
}
