//! Display configuration
//!
//! Board wiring and chip settings, parsed from a small TOML subset and
//! persisted as postcard binary data.

pub mod parse;
#[cfg(feature = "serde")]
pub mod store;
pub mod types;

pub use parse::{parse_config, ParseError};
#[cfg(feature = "serde")]
pub use store::{ConfigError, CONFIG_MAGIC, CONFIG_MAX_SIZE, CONFIG_VERSION};
pub use types::*;
