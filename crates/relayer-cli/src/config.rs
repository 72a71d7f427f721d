//! Cli Config
//!
//! The relayer configuration is read from the file given with `--config`,
//! or from `~/.nft-relayer/config.toml` otherwise.

use std::path::PathBuf;

pub use nft_relayer::config::Config;

use crate::application::app_reader;
use crate::DEFAULT_CONFIG_PATH;

/// Get the path to configuration file
pub fn config_path() -> Option<PathBuf> {
    let app = app_reader();
    app.config_path().cloned()
}

/// Default configuration file path
pub fn default_config_file() -> Option<PathBuf> {
    dirs_next::home_dir().map(|home| home.join(DEFAULT_CONFIG_PATH))
}
