use std::sync::Arc;

use abscissa_core::clap::Parser;
use abscissa_core::{Command, Runnable};
use serde::Serialize;

use nft_relayer::chain::cosmos::CosmosChain;
use nft_relayer::sequence::{next_pending, SequenceTracker};
use nft_relayer_types::core::channel::packet::Sequence;
use nft_relayer_types::core::host::identifier::{ChainId, ChannelIdentity};

use crate::cli_utils::{block_on, ChannelArgs};
use crate::conclude::Output;
use crate::error::Error;
use crate::prelude::*;

/// A summary of the relay state of the channel, as seen from a fresh
/// relayer.
#[derive(Debug, Serialize)]
struct Summary {
    src_chain: ChainId,
    dst_chain: ChainId,
    channel: ChannelIdentity,
    /// Packets ever sent on the source.
    sent: Sequence,
    /// Packets ever received on the destination.
    received: Sequence,
    /// Sequence a relayer started now would relay first.
    next: Option<Sequence>,
}

/// Report the channel counters and the packet a relayer would relay next.
#[derive(Clone, Command, Debug, Parser, PartialEq, Eq)]
pub struct QueryPendingCmd {
    #[clap(flatten)]
    channel: ChannelArgs,
}

impl QueryPendingCmd {
    async fn execute(&self) -> Result<Summary, Error> {
        let config = (*app_config()).clone();
        let channel = self.channel.resolve(&config)?;

        let src = CosmosChain::new(config.source.clone()).map_err(Error::Relayer)?;
        let dst = CosmosChain::new(config.destination.clone()).map_err(Error::Relayer)?;

        let tracker = SequenceTracker::new(Arc::new(src), Arc::new(dst), channel.clone());

        let counters = tracker.counters().await.map_err(Error::Query)?;

        // A new relayer starts from what the destination has received.
        let next = next_pending(counters.sent, counters.received, counters.received)
            .map_err(Error::Query)?;

        Ok(Summary {
            src_chain: config.source.id.clone(),
            dst_chain: config.destination.id.clone(),
            channel,
            sent: counters.sent,
            received: counters.received,
            next,
        })
    }
}

impl Runnable for QueryPendingCmd {
    fn run(&self) {
        match block_on(self.execute()).and_then(|result| result) {
            Ok(summary) => Output::success(summary).exit(),
            Err(e) => Output::error(e.to_string()).exit(),
        }
    }
}
