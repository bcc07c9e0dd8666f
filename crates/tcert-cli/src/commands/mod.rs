//! Subcommand implementations.

pub mod config;
pub mod extract;
pub mod generate;

use std::path::Path;

use tcert_core::TcertConfig;
use tracing::debug;

/// Load the explicit config file, else the default one if present, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<TcertConfig> {
    if let Some(path) = config_path {
        return Ok(TcertConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        debug!("Using config from {}", default_path.display());
        Ok(TcertConfig::from_file(&default_path)?)
    } else {
        Ok(TcertConfig::default())
    }
}
