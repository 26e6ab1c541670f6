//! Configuration file discovery, loading, and validation.

use crate::error::ConfigError;
use crate::types::EngineConfig;
use std::path::{Path, PathBuf};

/// The configuration file name looked up in a directory.
pub const CONFIG_FILE_NAME: &str = "diagnorm.toml";

/// Loads and validates a configuration from a file or a directory.
///
/// A directory is resolved to `<dir>/diagnorm.toml`.
pub fn load_config(path: &Path) -> Result<EngineConfig, ConfigError> {
    let config_path = if path.is_dir() {
        path.join(CONFIG_FILE_NAME)
    } else {
        path.to_path_buf()
    };
    let content = std::fs::read_to_string(&config_path)?;
    load_config_from_str(&content)
}

/// Parses and validates a `diagnorm.toml` configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<EngineConfig, ConfigError> {
    let config: EngineConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Walks up from `start` looking for a `diagnorm.toml`.
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Rejects blank entries that would match every path, line, or code.
fn validate_config(config: &EngineConfig) -> Result<(), ConfigError> {
    if config.paths.source_roots.iter().any(|r| r.trim().is_empty()) {
        return Err(ConfigError::ValidationError(
            "paths.source_roots contains an empty entry".to_string(),
        ));
    }
    if config.noise.patterns.iter().any(|p| p.trim().is_empty()) {
        return Err(ConfigError::ValidationError(
            "noise.patterns contains an empty entry".to_string(),
        ));
    }
    if let Some((code, _)) = config
        .suggest
        .codes
        .iter()
        .find(|(code, hint)| code.trim().is_empty() || hint.trim().is_empty())
    {
        return Err(ConfigError::ValidationError(format!(
            "suggest.codes entry '{code}' must have a non-empty code and hint"
        )));
    }
    if config.suggest.toolchain.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "suggest.toolchain must not be empty".to_string(),
        ));
    }
    Ok(())
}
