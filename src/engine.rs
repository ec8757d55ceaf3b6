//! Single-entry matching engine facade.
//!
//! Owns the order book so the dispatcher can submit, cancel, modify, and print
//! without managing [`OrderBook`] and [`match_order`] directly.

use crate::command::Command;
use crate::error::OrderError;
use crate::execution::{BookSnapshot, EngineEvent, Trade};
use crate::matching::match_order;
use crate::order_book::OrderBook;
use crate::types::{Order, OrderId, Side};
use log::{debug, info};

/// Change to apply to a resting order found by id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Amendment {
    Cancel,
    /// Reinserted only when `side` is known and `price` and `quantity` are positive.
    Replace {
        side: Option<Side>,
        price: i64,
        quantity: i64,
    },
}

/// Single-instrument matching engine.
///
/// Use [`MatchingEngine::submit`] to send orders; the engine runs matching and
/// returns trades. Use [`MatchingEngine::cancel`] and [`MatchingEngine::modify`]
/// to change resting orders, and [`MatchingEngine::snapshot`] to read the book.
#[derive(Debug, Default)]
pub struct MatchingEngine {
    book: OrderBook,
}

impl MatchingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs one parsed command and returns the events it produced.
    pub fn execute(&mut self, command: Command) -> Vec<EngineEvent> {
        match command {
            Command::Submit(order) => match self.submit(order) {
                Ok(trades) => trades.into_iter().map(EngineEvent::Trade).collect(),
                Err(err) => {
                    debug!("order rejected: {}", err);
                    Vec::new()
                }
            },
            Command::Cancel { order_id } => {
                self.cancel(&order_id);
                Vec::new()
            }
            Command::Modify {
                order_id,
                side,
                price,
                quantity,
            } => {
                self.modify_or_cancel(
                    &order_id,
                    Amendment::Replace {
                        side,
                        price,
                        quantity,
                    },
                );
                Vec::new()
            }
            Command::Print => vec![EngineEvent::Book(self.snapshot())],
        }
    }

    /// Submits an order: runs matching and returns trades in match order.
    ///
    /// Returns `Err` without touching the book if price or quantity is not positive.
    pub fn submit(&mut self, order: Order) -> Result<Vec<Trade>, OrderError> {
        info!(
            "order submitted order_id={} side={:?} tif={:?} quantity={} price={}",
            order.order_id, order.side, order.time_in_force, order.quantity, order.price
        );
        let outcome = match_order(&mut self.book, &order)?;
        for trade in &outcome.trades {
            info!(
                "trade resting_order={} incoming_order={} price={} quantity={}",
                trade.resting_order_id, trade.incoming_order_id, trade.resting_price, trade.quantity
            );
        }
        if outcome.rested {
            info!(
                "order rested order_id={} filled={} quantity={} price={}",
                order.order_id,
                outcome.filled_quantity(),
                outcome.remaining,
                order.price
            );
        } else if outcome.remaining > 0 {
            debug!(
                "ioc remainder discarded order_id={} quantity={}",
                order.order_id, outcome.remaining
            );
        }
        Ok(outcome.trades)
    }

    /// Finds the first resting order with `order_id` (bids before asks) and
    /// cancels or replaces it. Returns `false` if no such order rests.
    ///
    /// A replacement is removed-then-reinserted at the back of its new price
    /// level and never matches against the opposite side. The removal always
    /// happens; reinsertion needs a known side and positive price and quantity.
    pub fn modify_or_cancel(&mut self, order_id: &OrderId, amendment: Amendment) -> bool {
        let Some(existing) = self.book.cancel_order(order_id) else {
            debug!("no resting order with id {}", order_id);
            return false;
        };
        match amendment {
            Amendment::Cancel => {
                info!("order canceled order_id={}", order_id);
            }
            Amendment::Replace {
                side: None,
                ..
            } => {
                info!("order removed by modify with unknown side order_id={}", order_id);
            }
            Amendment::Replace {
                side: Some(side),
                price,
                quantity,
            } => {
                let replacement = Order {
                    side,
                    price,
                    quantity,
                    ..existing
                };
                match self.book.add_order(&replacement) {
                    Ok(()) => info!(
                        "order modified order_id={} side={:?} quantity={} price={}",
                        order_id, side, quantity, price
                    ),
                    Err(err) => info!("order removed by modify order_id={}: {}", order_id, err),
                }
            }
        }
        true
    }

    /// Cancels a resting order by id. Returns `true` if the order was found and removed.
    pub fn cancel(&mut self, order_id: &OrderId) -> bool {
        self.modify_or_cancel(order_id, Amendment::Cancel)
    }

    /// Replaces a resting order's side, price, and quantity, keeping its id.
    pub fn modify(&mut self, order_id: &OrderId, side: Side, price: i64, quantity: i64) -> bool {
        self.modify_or_cancel(
            order_id,
            Amendment::Replace {
                side: Some(side),
                price,
                quantity,
            },
        )
    }

    /// Aggregated view of both sides, each highest price first. Read-only.
    pub fn snapshot(&self) -> BookSnapshot {
        BookSnapshot {
            asks: self.book.levels(Side::Sell),
            bids: self.book.levels(Side::Buy),
        }
    }

    /// Read access to the book.
    pub fn book(&self) -> &OrderBook {
        &self.book
    }

    /// Best bid price, if any.
    pub fn best_bid(&self) -> Option<i64> {
        self.book.best_bid()
    }

    /// Best ask price, if any.
    pub fn best_ask(&self) -> Option<i64> {
        self.book.best_ask()
    }

    /// Total resting quantity on one side.
    pub fn resting_quantity(&self, side: Side) -> i128 {
        self.book.total_quantity(side)
    }

    pub fn order_count(&self) -> usize {
        self.book.order_count()
    }

    pub fn contains(&self, order_id: &OrderId) -> bool {
        self.book.contains(order_id)
    }
}
