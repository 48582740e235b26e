//! Subcommand implementations.

pub mod config;
pub mod list;
pub mod output;
pub mod parse;
pub mod process;

use std::path::{Path, PathBuf};

use cardscan_core::CardscanConfig;

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cardscan")
        .join("config.json")
}

/// Load configuration from an explicit path, the default path, or defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<CardscanConfig> {
    if let Some(path) = config_path {
        return Ok(CardscanConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        Ok(CardscanConfig::from_file(&default_path)?)
    } else {
        Ok(CardscanConfig::default())
    }
}
