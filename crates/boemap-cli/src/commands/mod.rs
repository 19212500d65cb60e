//! Subcommands and the configuration loading they share.

pub mod config;
pub mod extract;
pub mod populate;
pub mod process;

use std::path::{Path, PathBuf};

use boemap_core::BoemapConfig;
use tracing::debug;

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("boemap")
        .join("config.json")
}

/// The file named by `--config`, or the default location.
pub fn config_file(config_path: Option<&str>) -> PathBuf {
    config_path.map(PathBuf::from).unwrap_or_else(default_config_path)
}

/// Load the configuration named by `--config`.
///
/// Without `--config` the default file is used when it exists, built-in
/// defaults otherwise.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<BoemapConfig> {
    if let Some(path) = config_path {
        return Ok(BoemapConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Using config from {}", default_path.display());
        Ok(BoemapConfig::from_file(&default_path)?)
    } else {
        Ok(BoemapConfig::default())
    }
}
