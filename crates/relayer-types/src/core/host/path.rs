//! Keys under which the channel object stores its state.
//!
//! All paths live in the `ibc` store of the chain and are queried through
//! [`IBC_QUERY_PATH`]. Counters are stored as ASCII decimal integers; packets
//! are indexed by their decimal sequence number.

use core::fmt::{Display, Formatter, Result};

use crate::core::channel::packet::Sequence;
use crate::core::host::identifier::{ChannelId, ConnectionId};

/// Query path of the store holding the channel state, for the default
/// store prefix.
pub const IBC_QUERY_PATH: &str = "/store/ibc/key";

/// The ABCI query path for the given store prefix.
pub fn query_path(store_prefix: &str) -> String {
    format!("/store/{store_prefix}/key")
}

/// The different sub-paths of a channel object.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Path {
    /// Number of packets ever sent on the channel.
    SeqSend(ConnectionId, ChannelId),
    /// Number of packets ever received on the channel.
    SeqRecv(ConnectionId, ChannelId),
    /// Packet commitment stored at the given sequence.
    Packet(ConnectionId, ChannelId, Sequence),
}

impl Path {
    pub fn into_bytes(self) -> Vec<u8> {
        self.to_string().into_bytes()
    }
}

impl Display for Path {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Path::SeqSend(conn, chan) => {
                write!(f, "connections/{conn}/channels/{chan}/nextSequenceSend")
            }
            Path::SeqRecv(conn, chan) => {
                write!(f, "connections/{conn}/channels/{chan}/nextSequenceRecv")
            }
            Path::Packet(conn, chan, seq) => {
                write!(f, "connections/{conn}/channels/{chan}/packets/{seq}")
            }
        }
    }
}
