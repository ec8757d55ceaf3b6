//! Runtime configuration for the binary, read from the environment.
//!
//! | Variable | Values | Default |
//! |---|---|---|
//! | `CROSSBOOK_OUTPUT` | `text`, `json` | `text` |
//! | `CROSSBOOK_INPUT` | path to a command file | stdin |
//!
//! Logging is configured separately through `RUST_LOG` (see `env_logger`).

use crate::error::ConfigError;
use crate::render::OutputFormat;
use std::path::PathBuf;

pub const OUTPUT_VAR: &str = "CROSSBOOK_OUTPUT";
pub const INPUT_VAR: &str = "CROSSBOOK_INPUT";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EngineConfig {
    pub output: OutputFormat,
    /// Command file; `None` reads stdin.
    pub input: Option<PathBuf>,
}

impl EngineConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup (the process environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let output = match lookup(OUTPUT_VAR).as_deref().map(str::trim) {
            None | Some("") => OutputFormat::default(),
            Some(s) if s.eq_ignore_ascii_case("text") => OutputFormat::Text,
            Some(s) if s.eq_ignore_ascii_case("json") => OutputFormat::Json,
            Some(other) => return Err(ConfigError::OutputFormat(other.to_string())),
        };
        let input = lookup(INPUT_VAR)
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);
        Ok(Self { output, input })
    }
}
