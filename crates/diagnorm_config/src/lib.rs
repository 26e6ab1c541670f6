//! Parsing and validation of `diagnorm.toml` engine configuration files.
//!
//! This crate reads the optional configuration file and produces a
//! strongly-typed [`EngineConfig`] controlling path normalization, noise
//! filtering, suggestion rules, and the output policy for informational
//! diagnostics. Every section has defaults, so an absent file is valid.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{find_config_file, load_config, load_config_from_str, CONFIG_FILE_NAME};
pub use types::*;
