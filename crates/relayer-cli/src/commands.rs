//! Cli Subcommands
//!
//! This is where you specify the subcommands of your application.
//!
//! See the `impl Configurable` below for how to specify the path to the
//! application's configuration file.

use std::path::PathBuf;

use abscissa_core::{clap::Parser, Command, Configurable, Runnable};
use tracing::{error, info};

use nft_relayer::config::Config;

use crate::config::default_config_file;
use crate::DEFAULT_CONFIG_PATH;

pub use self::config::ConfigCmd;
use self::{query::QueryCmd, relay_once::RelayOnceCmd, start::StartCmd, version::VersionCmd};

mod config;
mod query;
mod relay_once;
mod start;
mod version;

/// Cli Subcommands
#[derive(Command, Debug, Parser, Runnable)]
pub enum CliCmd {
    /// Validate the relayer configuration file
    #[clap(subcommand)]
    Config(ConfigCmd),

    /// Relay packets until interrupted
    Start(StartCmd),

    /// Run a single relay cycle and report its outcome
    RelayOnce(RelayOnceCmd),

    /// Query the state of the relayed channel
    #[clap(subcommand)]
    Query(QueryCmd),

    /// Display version information
    Version(VersionCmd),
}

/// This trait allows you to define how application configuration is loaded.
impl Configurable<Config> for CliCmd {
    /// Location of the configuration file
    /// This is called only when the `--config` command-line option is omitted.
    fn config_path(&self) -> Option<PathBuf> {
        let path = default_config_file();

        match path {
            Some(path) if path.exists() => {
                info!("using default configuration from '{}'", path.display());
                Some(path)
            }
            Some(path) => {
                // No file exists at the config path
                error!("could not find configuration file at '{}'", path.display());
                None
            }
            None => {
                // The path to the default config file could not be found
                error!("could not find default configuration file");
                error!(
                    "please create one at '~/{}' or specify it with the '--config' flag",
                    DEFAULT_CONFIG_PATH
                );
                None
            }
        }
    }
}
