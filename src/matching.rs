//! Price-time priority matching.
//!
//! [`match_order`] runs one incoming order against the book: takes liquidity,
//! produces trades, and rests the remainder for GFD.

use crate::error::OrderError;
use crate::execution::Trade;
use crate::order_book::{Fill, OrderBook};
use crate::types::{Order, TimeInForce};

/// What happened to one incoming order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchOutcome {
    /// One trade per resting order touched, in match order.
    pub trades: Vec<Trade>,
    /// Quantity left after matching (rested for GFD, discarded for IOC).
    pub remaining: i64,
    /// True if the remainder now rests on the book.
    pub rested: bool,
}

impl MatchOutcome {
    pub fn filled_quantity(&self) -> i64 {
        self.trades.iter().map(|t| t.quantity).sum()
    }
}

/// Run matching for one order against the book.
///
/// Trades execute at the resting order's price. A GFD remainder rests at the
/// tail of its price level; an IOC remainder is dropped. An order that fails
/// [`Order::validate`] is rejected before the book is touched.
pub fn match_order(book: &mut OrderBook, order: &Order) -> Result<MatchOutcome, OrderError> {
    order.validate()?;
    let mut incoming = order.clone();
    let fills: Vec<Fill> = book.take_liquidity(&mut incoming);

    let trades: Vec<Trade> = fills
        .into_iter()
        .map(|f| Trade {
            resting_order_id: f.resting_order_id,
            resting_price: f.price,
            incoming_order_id: order.order_id.clone(),
            incoming_price: order.price,
            quantity: f.quantity,
            aggressor_side: order.side,
        })
        .collect();

    let remaining = incoming.quantity;
    let rested = remaining > 0 && matches!(order.time_in_force, TimeInForce::GFD);
    if rested {
        book.add_order(&incoming)?;
    }

    Ok(MatchOutcome {
        trades,
        remaining,
        rested,
    })
}
