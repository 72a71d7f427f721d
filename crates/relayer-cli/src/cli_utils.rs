//! Helpers shared by the relayer commands.

use core::future::Future;

use abscissa_core::clap::Args;
use tokio::runtime::Runtime;

use nft_relayer::config::Config;
use nft_relayer_types::core::host::identifier::{ChannelId, ChannelIdentity, ConnectionId};

use crate::error::Error;

/// Command-line overrides of the `[relay]` section.
#[derive(Clone, Debug, Default, Args, PartialEq, Eq)]
pub struct ChannelArgs {
    /// Connection the channel runs over
    #[clap(long = "connection-id", value_name = "CONNECTION_ID")]
    pub connection_id: Option<ConnectionId>,

    /// Channel whose packets to relay
    #[clap(long = "channel-id", value_name = "CHANNEL_ID")]
    pub channel_id: Option<ChannelId>,
}

impl ChannelArgs {
    /// The channel to work on: the flags given on the command line take
    /// precedence over the configuration file.
    pub fn resolve(&self, config: &Config) -> Result<ChannelIdentity, Error> {
        let mut relay = config.relay.clone();

        if let Some(connection_id) = &self.connection_id {
            relay.connection_id = Some(connection_id.clone());
        }

        if let Some(channel_id) = &self.channel_id {
            relay.channel_id = Some(channel_id.clone());
        }

        relay.channel().map_err(Error::Config)
    }
}

/// Runs `fut` to completion on a fresh multi-threaded runtime.
pub fn block_on<F: Future>(fut: F) -> Result<F::Output, Error> {
    let rt = Runtime::new().map_err(Error::Runtime)?;
    Ok(rt.block_on(fut))
}
