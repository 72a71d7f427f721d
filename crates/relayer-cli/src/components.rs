//! Various components for internal use by the Abscissa subsystem.

use abscissa_core::{Component, FrameworkError, FrameworkErrorKind};
use tracing_subscriber::{filter::EnvFilter, util::SubscriberInitExt, FmtSubscriber};

use nft_relayer::config::{GlobalConfig, LogLevel};

use crate::error::Error;

/// The name of the environment variable through which one can override
/// the tracing filter built in [`build_tracing_filter`].
const LOG_VAR: &str = "RUST_LOG";

/// A custom component for parametrizing `tracing` in the relayer.
/// Primarily used for:
///
/// - Customizing the log output level, for filtering the output produced via tracing macros
///   (`debug!`, `info!`, etc.) or abscissa macros (`status_err`, `status_info`, etc.).
/// - Enabling JSON-formatted output without coloring
#[derive(Component, Debug)]
pub struct JsonTracing;

impl JsonTracing {
    /// Creates a new [`JsonTracing`] component
    pub fn new(cfg: GlobalConfig) -> Result<Self, FrameworkError> {
        let filter = build_tracing_filter(cfg.log_level)?;

        // Note: JSON formatter is un-affected by ANSI 'color' option. Set to 'false'.
        let subscriber = FmtSubscriber::builder()
            .with_target(false)
            .with_env_filter(filter)
            .with_writer(std::io::stdout)
            .with_ansi(false)
            .with_thread_ids(true)
            .json()
            .finish();

        subscriber.init();

        Ok(Self)
    }
}

/// A custom component for parametrizing `tracing` in the relayer, printing
/// human-readable lines to stderr, colored when attached to a terminal.
#[derive(Component, Debug)]
pub struct PrettyTracing;

impl PrettyTracing {
    /// Creates a new [`PrettyTracing`] component
    pub fn new(cfg: GlobalConfig) -> Result<Self, FrameworkError> {
        let filter = build_tracing_filter(cfg.log_level)?;

        let subscriber = FmtSubscriber::builder()
            .with_target(false)
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_ansi(enable_ansi())
            .with_thread_ids(true)
            .finish();

        subscriber.init();

        Ok(Self)
    }
}

/// Check if both stdout and stderr are proper terminal (tty),
/// so that we know whether or not to enable colored output,
/// using ANSI escape codes. If either is not, eg. because
/// stdout is redirected to a file, we don't enable colored output.
pub fn enable_ansi() -> bool {
    use std::io::IsTerminal;
    std::io::stdout().is_terminal() && std::io::stderr().is_terminal()
}

/// The relayer crates targeted by the default log level.
const TARGET_CRATES: [&str; 2] = ["nft_relayer", "nft_relayer_cli"];

/// Build a tracing directive setting the log level for the relayer crates to the
/// given `log_level`.
pub fn default_directive(log_level: LogLevel) -> String {
    use itertools::Itertools;

    TARGET_CRATES
        .iter()
        .map(|&c| format!("{c}={log_level}"))
        .join(",")
}

/// Builds a tracing filter based on the input `log_level`.
/// Enables tracing exclusively for the relayer crates, unless overridden
/// through `RUST_LOG`.
fn build_tracing_filter(default_level: LogLevel) -> Result<EnvFilter, FrameworkError> {
    let directive = std::env::var(LOG_VAR).unwrap_or_else(|_| default_directive(default_level));

    EnvFilter::try_new(&directive).map_err(|e| {
        eprintln!("ERROR: unable to initialize the relayer with log filtering directive {directive:?}: {e}");

        FrameworkErrorKind::ConfigError
            .context(Error::InvalidLogDirective(directive.clone(), e.to_string()))
            .into()
    })
}
