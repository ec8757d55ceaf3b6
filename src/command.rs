//! Text command parsing.
//!
//! One command per line, fields separated by whitespace:
//!
//! ```text
//! BUY <GFD|IOC> <price> <quantity> <id>
//! SELL <GFD|IOC> <price> <quantity> <id>
//! CANCEL <id>
//! MODIFY <id> <BUY|SELL> <price> <quantity>
//! PRINT
//! ```

use crate::error::{CommandError, OrderError};
use crate::types::{Order, OrderId, Side, TimeInForce};
use std::fmt;

/// A parsed command, ready for [`crate::MatchingEngine::execute`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Validated BUY or SELL.
    Submit(Order),
    Cancel {
        order_id: OrderId,
    },
    /// Replace a resting order. The order is removed first; it is only
    /// reinserted when `side` is recognized and `price` and `quantity` are
    /// both positive.
    Modify {
        order_id: OrderId,
        side: Option<Side>,
        price: i64,
        quantity: i64,
    },
    Print,
}

/// Parse one input line.
///
/// Fails with [`CommandError::InvalidOrder`] for a well-formed BUY/SELL whose
/// values can never rest; every other error means the line is malformed.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let Some(&keyword) = fields.first() else {
        return Err(CommandError::Empty);
    };
    match keyword {
        "BUY" => parse_submit(&fields, "BUY", Side::Buy),
        "SELL" => parse_submit(&fields, "SELL", Side::Sell),
        "CANCEL" => {
            expect_fields(&fields, "CANCEL", 2)?;
            Ok(Command::Cancel {
                order_id: fields[1].into(),
            })
        }
        "MODIFY" => {
            expect_fields(&fields, "MODIFY", 5)?;
            Ok(Command::Modify {
                order_id: fields[1].into(),
                side: Side::from_keyword(fields[2]),
                price: parse_int("price", fields[3])?,
                quantity: parse_int("quantity", fields[4])?,
            })
        }
        "PRINT" => {
            expect_fields(&fields, "PRINT", 1)?;
            Ok(Command::Print)
        }
        other => Err(CommandError::UnknownKeyword(other.to_string())),
    }
}

fn parse_submit(fields: &[&str], keyword: &'static str, side: Side) -> Result<Command, CommandError> {
    expect_fields(fields, keyword, 5)?;
    let time_in_force = TimeInForce::from_keyword(fields[1])
        .ok_or_else(|| OrderError::UnknownTimeInForce(fields[1].to_string()))?;
    let price = parse_int("price", fields[2])?;
    let quantity = parse_int("quantity", fields[3])?;
    let order = Order::new(fields[4], side, time_in_force, price, quantity);
    order.validate()?;
    Ok(Command::Submit(order))
}

fn expect_fields(fields: &[&str], keyword: &'static str, expected: usize) -> Result<(), CommandError> {
    if fields.len() != expected {
        return Err(CommandError::FieldCount {
            keyword,
            expected,
            actual: fields.len(),
        });
    }
    Ok(())
}

fn parse_int(field: &'static str, value: &str) -> Result<i64, CommandError> {
    value.parse().map_err(|_| CommandError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Submit(o) => {
                let side = match o.side {
                    Side::Buy => "BUY",
                    Side::Sell => "SELL",
                };
                write!(f, "{} {:?} {} {} {}", side, o.time_in_force, o.price, o.quantity, o.order_id)
            }
            Command::Cancel { order_id } => write!(f, "CANCEL {}", order_id),
            Command::Modify {
                order_id,
                side,
                price,
                quantity,
            } => {
                let side = match side {
                    Some(Side::Buy) => "BUY",
                    Some(Side::Sell) => "SELL",
                    None => "-",
                };
                write!(f, "MODIFY {} {} {} {}", order_id, side, price, quantity)
            }
            Command::Print => f.write_str("PRINT"),
        }
    }
}
