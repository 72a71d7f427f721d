//! `query` subcommand

use abscissa_core::clap::Parser;
use abscissa_core::{Command, Runnable};

mod packet;
mod pending;

/// `query` subcommand
#[derive(Command, Debug, Parser, Runnable)]
pub enum QueryCmd {
    /// Query the channel counters and the next packet to relay
    Pending(pending::QueryPendingCmd),

    /// Fetch and decode the packet stored at a given sequence
    Packet(packet::QueryPacketCmd),
}
