//! Errors raised by the CLI before or while driving the relayer.

use thiserror::Error;

use nft_relayer::config::Error as ConfigError;
use nft_relayer::error::Error as RelayerError;

/// Failures of the command-line layer
#[derive(Debug, Error)]
pub enum Error {
    /// The configuration is incomplete or inconsistent
    #[error("invalid configuration: {0}")]
    Config(ConfigError),

    /// The relayer could not be set up
    #[error("failed to initialize relayer: {0}")]
    Relayer(RelayerError),

    /// A query issued on behalf of the user failed
    #[error("query failed: {0}")]
    Query(RelayerError),

    /// Refusing to overwrite an existing configuration file
    #[error("configuration file '{}' already exists, pass --force to overwrite it", .0.display())]
    ConfigExists(std::path::PathBuf),

    /// A file system operation failed
    #[error("I/O error: {0}")]
    Io(std::io::Error),

    /// The async runtime could not be started
    #[error("failed to start the async runtime: {0}")]
    Runtime(std::io::Error),

    /// The `RUST_LOG` directive could not be parsed
    #[error("invalid log filtering directive '{0}': {1}")]
    InvalidLogDirective(String, String),
}
