use abscissa_core::clap::Parser;
use abscissa_core::{Command, Runnable};
use serde::Serialize;

use nft_relayer::chain::cosmos::CosmosChain;
use nft_relayer::chain::endpoint::ChainQuery;
use nft_relayer::packet::{decode_packet, fetch_packet};
use nft_relayer_types::applications::nft::packet::SellTokenPacket;
use nft_relayer_types::core::channel::packet::Sequence;
use nft_relayer_types::Height;

use crate::cli_utils::{block_on, ChannelArgs};
use crate::conclude::Output;
use crate::error::Error;
use crate::prelude::*;

#[derive(Debug, Serialize)]
struct PacketView {
    sequence: Sequence,
    height: Height,
    data_len: usize,
    proof_ops: usize,
    packet: SellTokenPacket,
}

/// Fetch the packet stored at a sequence and decode its payload.
#[derive(Clone, Command, Debug, Parser, PartialEq, Eq)]
pub struct QueryPacketCmd {
    #[clap(flatten)]
    channel: ChannelArgs,

    #[clap(
        long = "sequence",
        visible_alias = "seq",
        required = true,
        value_name = "SEQUENCE",
        help_heading = "REQUIRED",
        help = "Sequence of the packet to fetch"
    )]
    sequence: Sequence,
}

impl QueryPacketCmd {
    async fn execute(&self) -> Result<PacketView, Error> {
        let config = (*app_config()).clone();
        let channel = self.channel.resolve(&config)?;

        let src = CosmosChain::new(config.source.clone()).map_err(Error::Relayer)?;
        let height = src.query_latest_height().await.map_err(Error::Query)?;

        let (packet, proof) = fetch_packet(&src, &channel, self.sequence, height)
            .await
            .map_err(Error::Query)?;

        debug!(%packet, proof_height = %proof.height, "fetched packet");

        let sell = decode_packet(&packet.data).map_err(Error::Query)?;

        Ok(PacketView {
            sequence: packet.sequence,
            height: proof.height,
            data_len: packet.data.len(),
            proof_ops: proof.proof.as_ref().map_or(0, |p| p.ops.len()),
            packet: sell,
        })
    }
}

impl Runnable for QueryPacketCmd {
    fn run(&self) {
        match block_on(self.execute()).and_then(|result| result) {
            Ok(view) => Output::success(view).exit(),
            Err(e) => Output::error(e.to_string()).exit(),
        }
    }
}
