//! Shared helpers for CLI commands: logging setup, configuration
//! resolution, and reading compiler responses.

use std::io::Read;
use std::path::{Path, PathBuf};

use diagnorm_config::{find_config_file, load_config, EngineConfig};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::GlobalArgs;

/// Installs the stderr log subscriber.
///
/// `RUST_LOG` wins when set; otherwise the level is `warn`, or `debug` with
/// `--verbose`.
pub fn init_tracing(global: &GlobalArgs) {
    let default = if global.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Resolves the engine configuration from global CLI args.
///
/// `--config` names a file or a directory and must exist. Otherwise the
/// nearest `diagnorm.toml` at or above the current directory is used, and
/// without one the defaults apply.
pub fn resolve_config(global: &GlobalArgs) -> Result<EngineConfig, Box<dyn std::error::Error>> {
    if let Some(ref config_path) = global.config {
        return Ok(load_config(Path::new(config_path))?);
    }
    let cwd = std::env::current_dir()?;
    Ok(load_discovered(find_config_file(&cwd))?)
}

fn load_discovered(path: Option<PathBuf>) -> Result<EngineConfig, diagnorm_config::ConfigError> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "using configuration file");
            load_config(&path)
        }
        None => {
            debug!("no configuration file found, using defaults");
            Ok(EngineConfig::default())
        }
    }
}

/// Reads one compiler response; `-` is standard input.
pub fn read_input(input: &str) -> Result<String, Box<dyn std::error::Error>> {
    if input == "-" {
        let mut body = String::new();
        std::io::stdin().read_to_string(&mut body)?;
        return Ok(body);
    }
    std::fs::read_to_string(input).map_err(|e| format!("cannot read {input}: {e}").into())
}
