//! # crossbook
//!
//! Deterministic single-instrument limit order matching engine: order book,
//! price-time priority matching, GFD/IOC time-in-force, and a text command
//! protocol.
//!
//! ## Entry point
//!
//! Use [`MatchingEngine`] as the single entry point: create with
//! [`MatchingEngine::new`], then [`MatchingEngine::submit`],
//! [`MatchingEngine::cancel`], [`MatchingEngine::modify`], and
//! [`MatchingEngine::snapshot`]. [`Dispatcher`] drives an engine from text
//! input.
//!
//! ## Example
//!
//! ```rust
//! use crossbook::{MatchingEngine, Order, Side, TimeInForce};
//!
//! let mut engine = MatchingEngine::new();
//! let sell = Order::new("s1", Side::Sell, TimeInForce::GFD, 100, 10);
//! assert!(engine.submit(sell).unwrap().is_empty());
//!
//! let buy = Order::new("b1", Side::Buy, TimeInForce::IOC, 101, 4);
//! let trades = engine.submit(buy).unwrap();
//! assert_eq!(trades[0].resting_price, 100);
//! assert_eq!(trades[0].quantity, 4);
//! assert_eq!(engine.snapshot().asks[0].quantity, 6);
//! ```
//!
//! ## Text protocol
//!
//! ```rust
//! use crossbook::{run, OutputFormat};
//!
//! let input = "SELL GFD 100 3 a\nSELL GFD 100 4 b\nBUY GFD 100 5 c\nPRINT\n";
//! let mut out = Vec::new();
//! run(input.as_bytes(), &mut out, OutputFormat::Text).unwrap();
//! assert_eq!(
//!     String::from_utf8(out).unwrap(),
//!     "TRADE a 100 3 c 100 3\nTRADE b 100 2 c 100 2\nSELL:\n100 2\nBUY:\n"
//! );
//! ```

pub mod command;
pub mod config;
pub mod dispatcher;
pub mod engine;
pub mod error;
pub mod execution;
pub mod market_data_gen;
pub mod matching;
pub mod order_book;
pub mod render;
pub mod types;

pub use command::{parse_command, Command};
pub use config::EngineConfig;
pub use dispatcher::{run, Dispatcher, RunSummary};
pub use engine::{Amendment, MatchingEngine};
pub use error::{CommandError, ConfigError, OrderError};
pub use execution::{BookSnapshot, EngineEvent, Trade};
pub use market_data_gen::{replay_into_engine, Generator, GeneratorConfig};
pub use matching::{match_order, MatchOutcome};
pub use order_book::{Fill, OrderBook, PriceLevelView};
pub use render::{render_event, OutputFormat};
pub use types::{Order, OrderId, Side, TimeInForce};
