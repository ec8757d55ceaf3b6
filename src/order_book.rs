//! Single-instrument order book: bids and asks, price-time priority.
//!
//! Supports add, cancel by id, and taking liquidity (used by [`crate::matching`]).
//! Each price level is FIFO; best bid is highest price, best ask is lowest.
//! Ids are only unique among resting orders and the book does not enforce it:
//! lookups resolve to the earliest-inserted bid carrying the id, then the
//! earliest-inserted ask.

use crate::error::OrderError;
use crate::types::{Order, OrderId, Side, TimeInForce};
use std::collections::{BTreeMap, HashMap, VecDeque};

/// One resting order at a price level. `seq` is the insertion sequence number.
#[derive(Clone, Debug)]
struct BookEntry {
    seq: u64,
    order_id: OrderId,
    quantity: i64,
    time_in_force: TimeInForce,
}

/// Price -> FIFO queue of resting orders.
type PriceLevels = BTreeMap<i64, VecDeque<BookEntry>>;

/// Where a resting order lives, for cancel/modify by id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Locator {
    side: Side,
    price: i64,
    seq: u64,
}

/// Result of taking liquidity from the book (one per resting order touched).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fill {
    pub resting_order_id: OrderId,
    pub price: i64,
    pub quantity: i64,
    /// True if the resting order was fully filled (removed from book).
    pub resting_fully_filled: bool,
}

/// Aggregated quantity at one price. Widened so sums of `i64` quantities cannot overflow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PriceLevelView {
    pub price: i64,
    pub quantity: i128,
}

/// Single-instrument order book.
#[derive(Debug, Default)]
pub struct OrderBook {
    bids: PriceLevels,
    asks: PriceLevels,
    /// Locators per id, in insertion order.
    index: HashMap<OrderId, Vec<Locator>>,
    next_seq: u64,
}

impl OrderBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rest an order at the tail of its price level. Does not run matching.
    pub fn add_order(&mut self, order: &Order) -> Result<(), OrderError> {
        order.validate()?;
        let seq = self.next_seq;
        self.next_seq += 1;
        self.side_mut(order.side)
            .entry(order.price)
            .or_default()
            .push_back(BookEntry {
                seq,
                order_id: order.order_id.clone(),
                quantity: order.quantity,
                time_in_force: order.time_in_force,
            });
        self.index
            .entry(order.order_id.clone())
            .or_default()
            .push(Locator {
                side: order.side,
                price: order.price,
                seq,
            });
        Ok(())
    }

    /// Remove an order by id. Returns the removed order, or `None` if no such id rests.
    pub fn cancel_order(&mut self, order_id: &OrderId) -> Option<Order> {
        let locator = self.locate(order_id)?;
        unindex(&mut self.index, order_id, locator.seq);
        let levels = self.side_mut(locator.side);
        let queue = levels.get_mut(&locator.price)?;
        let pos = queue.iter().position(|e| e.seq == locator.seq)?;
        let entry = queue.remove(pos)?;
        if queue.is_empty() {
            levels.remove(&locator.price);
        }
        Some(Order {
            order_id: entry.order_id,
            side: locator.side,
            time_in_force: entry.time_in_force,
            price: locator.price,
            quantity: entry.quantity,
        })
    }

    /// Look up a resting order by id without removing it.
    pub fn get(&self, order_id: &OrderId) -> Option<Order> {
        let locator = self.locate(order_id)?;
        let entry = self
            .side(locator.side)
            .get(&locator.price)?
            .iter()
            .find(|e| e.seq == locator.seq)?;
        Some(Order {
            order_id: entry.order_id.clone(),
            side: locator.side,
            time_in_force: entry.time_in_force,
            price: locator.price,
            quantity: entry.quantity,
        })
    }

    pub fn contains(&self, order_id: &OrderId) -> bool {
        self.index.contains_key(order_id)
    }

    /// Take liquidity from the side opposite `incoming` in price-time priority.
    ///
    /// Walks until the next resting order no longer crosses or `incoming` is
    /// exhausted. Trades happen at the resting price. Decrements
    /// `incoming.quantity` by the total filled and returns one fill per
    /// resting order touched, in match order.
    pub fn take_liquidity(&mut self, incoming: &mut Order) -> Vec<Fill> {
        let mut fills = Vec::new();
        let levels = match incoming.side {
            Side::Buy => &mut self.asks,
            Side::Sell => &mut self.bids,
        };
        while incoming.quantity > 0 {
            let best = match incoming.side {
                Side::Buy => levels.keys().next().copied(),
                Side::Sell => levels.keys().next_back().copied(),
            };
            let Some(price) = best else {
                break;
            };
            if !incoming.crosses(price) {
                break;
            }
            let Some(queue) = levels.get_mut(&price) else {
                break;
            };
            while incoming.quantity > 0 {
                let Some(front) = queue.front_mut() else {
                    break;
                };
                let fill_qty = incoming.quantity.min(front.quantity);
                front.quantity -= fill_qty;
                incoming.quantity -= fill_qty;
                let fully_filled = front.quantity == 0;
                fills.push(Fill {
                    resting_order_id: front.order_id.clone(),
                    price,
                    quantity: fill_qty,
                    resting_fully_filled: fully_filled,
                });
                if fully_filled {
                    if let Some(done) = queue.pop_front() {
                        unindex(&mut self.index, &done.order_id, done.seq);
                    }
                }
            }
            if queue.is_empty() {
                levels.remove(&price);
            }
        }
        fills
    }

    /// Aggregated quantity per price on one side, highest price first.
    pub fn levels(&self, side: Side) -> Vec<PriceLevelView> {
        self.side(side)
            .iter()
            .rev()
            .map(|(&price, queue)| PriceLevelView {
                price,
                quantity: queue.iter().map(|e| i128::from(e.quantity)).sum(),
            })
            .collect()
    }

    /// Resting orders on one side in matching priority (best price, then oldest).
    pub fn resting_orders(&self, side: Side) -> Vec<Order> {
        let to_order = |(&price, queue): (&i64, &VecDeque<BookEntry>)| {
            queue
                .iter()
                .map(move |e| Order {
                    order_id: e.order_id.clone(),
                    side,
                    time_in_force: e.time_in_force,
                    price,
                    quantity: e.quantity,
                })
                .collect::<Vec<_>>()
        };
        match side {
            Side::Buy => self.bids.iter().rev().flat_map(to_order).collect(),
            Side::Sell => self.asks.iter().flat_map(to_order).collect(),
        }
    }

    /// Total resting quantity on one side.
    pub fn total_quantity(&self, side: Side) -> i128 {
        self.side(side)
            .values()
            .flat_map(|queue| queue.iter().map(|e| i128::from(e.quantity)))
            .sum()
    }

    /// Number of resting orders across both sides.
    pub fn order_count(&self) -> usize {
        self.index.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Best bid price (None if empty).
    pub fn best_bid(&self) -> Option<i64> {
        self.bids.keys().next_back().copied()
    }

    /// Best ask price (None if empty).
    pub fn best_ask(&self) -> Option<i64> {
        self.asks.keys().next().copied()
    }

    fn locate(&self, order_id: &OrderId) -> Option<Locator> {
        let locators = self.index.get(order_id)?;
        locators
            .iter()
            .find(|l| l.side == Side::Buy)
            .or_else(|| locators.iter().find(|l| l.side == Side::Sell))
            .copied()
    }

    fn side(&self, side: Side) -> &PriceLevels {
        match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        }
    }

    fn side_mut(&mut self, side: Side) -> &mut PriceLevels {
        match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        }
    }
}

/// Drop one locator; drop the id entirely once nothing with it rests.
fn unindex(index: &mut HashMap<OrderId, Vec<Locator>>, order_id: &OrderId, seq: u64) {
    if let Some(locators) = index.get_mut(order_id) {
        locators.retain(|l| l.seq != seq);
        if locators.is_empty() {
            index.remove(order_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(id: &str, side: Side, qty: i64, price: i64) -> Order {
        Order::new(id, side, TimeInForce::GFD, price, qty)
    }

    #[test]
    fn add_and_cancel_order() {
        let mut book = OrderBook::new();
        book.add_order(&order("1", Side::Buy, 10, 100)).unwrap();
        assert_eq!(book.best_bid(), Some(100));
        let removed = book.cancel_order(&"1".into()).unwrap();
        assert_eq!(removed.quantity, 10);
        assert!(book.best_bid().is_none());
        assert!(book.is_empty());
    }

    #[test]
    fn cancel_unknown_id_returns_none() {
        let mut book = OrderBook::new();
        book.add_order(&order("1", Side::Sell, 10, 100)).unwrap();
        assert!(book.cancel_order(&"2".into()).is_none());
        assert_eq!(book.order_count(), 1);
    }

    #[test]
    fn add_order_rejects_non_positive_values() {
        let mut book = OrderBook::new();
        assert_eq!(
            book.add_order(&order("1", Side::Buy, 10, 0)),
            Err(OrderError::NonPositivePrice(0))
        );
        assert_eq!(
            book.add_order(&order("1", Side::Buy, -1, 10)),
            Err(OrderError::NonPositiveQuantity(-1))
        );
        assert!(book.is_empty());
    }

    #[test]
    fn duplicate_id_resolves_to_bid_before_ask() {
        let mut book = OrderBook::new();
        book.add_order(&order("X", Side::Sell, 3, 105)).unwrap();
        book.add_order(&order("X", Side::Buy, 4, 95)).unwrap();
        book.add_order(&order("X", Side::Buy, 5, 96)).unwrap();
        let first = book.cancel_order(&"X".into()).unwrap();
        assert_eq!((first.side, first.price, first.quantity), (Side::Buy, 95, 4));
        let second = book.cancel_order(&"X".into()).unwrap();
        assert_eq!((second.side, second.price), (Side::Buy, 96));
        let third = book.cancel_order(&"X".into()).unwrap();
        assert_eq!(third.side, Side::Sell);
        assert!(!book.contains(&"X".into()));
    }

    #[test]
    fn take_liquidity_respects_price_then_time() {
        let mut book = OrderBook::new();
        book.add_order(&order("A", Side::Sell, 5, 10)).unwrap();
        book.add_order(&order("B", Side::Sell, 5, 10)).unwrap();
        book.add_order(&order("C", Side::Sell, 5, 9)).unwrap();
        let mut buy = order("D", Side::Buy, 12, 10);
        let fills = book.take_liquidity(&mut buy);
        let seen: Vec<_> = fills
            .iter()
            .map(|f| (f.resting_order_id.as_str(), f.price, f.quantity))
            .collect();
        assert_eq!(seen, vec![("C", 9, 5), ("A", 10, 5), ("B", 10, 2)]);
        assert_eq!(buy.quantity, 0);
        assert_eq!(book.levels(Side::Sell), vec![PriceLevelView { price: 10, quantity: 3 }]);
        assert!(book.contains(&"B".into()));
        assert!(!book.contains(&"A".into()));
    }

    #[test]
    fn take_liquidity_stops_at_first_non_crossing_level() {
        let mut book = OrderBook::new();
        book.add_order(&order("1", Side::Buy, 5, 100)).unwrap();
        book.add_order(&order("2", Side::Buy, 5, 98)).unwrap();
        let mut sell = order("3", Side::Sell, 20, 99);
        let fills = book.take_liquidity(&mut sell);
        assert_eq!(fills.len(), 1);
        assert_eq!(fills[0].resting_order_id, OrderId::from("1"));
        assert!(fills[0].resting_fully_filled);
        assert_eq!(sell.quantity, 15);
        assert_eq!(book.best_bid(), Some(98));
    }

    #[test]
    fn levels_aggregate_and_sort_descending() {
        let mut book = OrderBook::new();
        book.add_order(&order("1", Side::Sell, 3, 100)).unwrap();
        book.add_order(&order("2", Side::Sell, 2, 101)).unwrap();
        book.add_order(&order("3", Side::Sell, 4, 100)).unwrap();
        assert_eq!(
            book.levels(Side::Sell),
            vec![
                PriceLevelView { price: 101, quantity: 2 },
                PriceLevelView { price: 100, quantity: 7 },
            ]
        );
        assert_eq!(book.total_quantity(Side::Sell), 9);
        assert!(book.levels(Side::Buy).is_empty());
    }

    #[test]
    fn levels_do_not_overflow_on_huge_quantities() {
        let mut book = OrderBook::new();
        book.add_order(&order("a", Side::Sell, i64::MAX, 100)).unwrap();
        book.add_order(&order("b", Side::Sell, i64::MAX, 100)).unwrap();
        book.add_order(&order("c", Side::Sell, i64::MAX, 101)).unwrap();
        let doubled = 2 * i128::from(i64::MAX);
        assert_eq!(
            book.levels(Side::Sell),
            vec![
                PriceLevelView { price: 101, quantity: i128::from(i64::MAX) },
                PriceLevelView { price: 100, quantity: doubled },
            ]
        );
        assert_eq!(book.total_quantity(Side::Sell), 3 * i128::from(i64::MAX));
    }

    #[test]
    fn resting_orders_in_priority_order() {
        let mut book = OrderBook::new();
        book.add_order(&order("1", Side::Buy, 1, 99)).unwrap();
        book.add_order(&order("2", Side::Buy, 1, 101)).unwrap();
        book.add_order(&order("3", Side::Buy, 1, 101)).unwrap();
        let ids: Vec<_> = book
            .resting_orders(Side::Buy)
            .into_iter()
            .map(|o| o.order_id.0)
            .collect();
        assert_eq!(ids, vec!["2", "3", "1"]);
    }

    #[test]
    fn partial_fill_keeps_time_priority() {
        let mut book = OrderBook::new();
        book.add_order(&order("1", Side::Sell, 10, 100)).unwrap();
        book.add_order(&order("2", Side::Sell, 10, 100)).unwrap();
        let mut buy = order("3", Side::Buy, 4, 100);
        book.take_liquidity(&mut buy);
        assert_eq!(book.get(&"1".into()).map(|o| o.quantity), Some(6));
        let mut buy = order("4", Side::Buy, 6, 100);
        let fills = book.take_liquidity(&mut buy);
        assert_eq!(fills.len(), 1);
        assert_eq!(fills[0].resting_order_id, OrderId::from("1"));
    }
}
