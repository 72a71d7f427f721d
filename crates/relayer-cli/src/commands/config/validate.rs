use abscissa_core::{clap::Parser, Command, Runnable};

use crate::cli_utils::ChannelArgs;
use crate::conclude::Output;
use crate::config::config_path;
use crate::prelude::*;

/// Check the configuration file, including the channel to relay.
///
/// Syntax and consistency have already been checked when the file was
/// loaded; this additionally requires a fully specified channel.
#[derive(Clone, Command, Debug, Parser, PartialEq, Eq)]
pub struct ValidateCmd {
    #[clap(flatten)]
    channel: ChannelArgs,
}

impl Runnable for ValidateCmd {
    /// Validate the loaded configuration.
    fn run(&self) {
        let config = app_config();

        if config_path().is_none() {
            Output::error("no configuration file found".to_string()).exit();
        }

        debug!("loaded configuration: {:?}", *config);

        match self.channel.resolve(&config) {
            Ok(channel) => Output::success(format!(
                "configuration is valid, relaying channel {channel} from {} to {}",
                config.source.id, config.destination.id
            ))
            .exit(),
            Err(e) => Output::error(e.to_string()).exit(),
        }
    }
}
