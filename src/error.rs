//! Error taxonomy for command parsing, order validation, and configuration.
//!
//! None of these are fatal to the engine: the dispatcher logs them and drops
//! the offending line without touching the book.

use thiserror::Error;

/// Order values that can never enter the book.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    #[error("price must be positive, got {0}")]
    NonPositivePrice(i64),

    #[error("quantity must be positive, got {0}")]
    NonPositiveQuantity(i64),

    #[error("unknown time-in-force: {0}")]
    UnknownTimeInForce(String),
}

/// A raw input line that does not describe a usable command.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty line")]
    Empty,

    #[error("unknown command keyword: {0}")]
    UnknownKeyword(String),

    #[error("{keyword} expects {expected} fields, got {actual}")]
    FieldCount {
        keyword: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("invalid integer for {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("invalid order: {0}")]
    InvalidOrder(#[from] OrderError),
}

/// Bad environment configuration for the binary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unsupported output format: {0} (expected `text` or `json`)")]
    OutputFormat(String),
}
