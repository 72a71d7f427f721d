//! Detection of packets the source has sent but the relayer has not yet
//! processed.

use std::sync::Arc;

use tracing::trace;

use nft_relayer_types::core::channel::packet::{decode_counter, Sequence};
use nft_relayer_types::core::host::identifier::ChannelIdentity;
use nft_relayer_types::core::host::path::Path;
use nft_relayer_types::Height;

use crate::chain::endpoint::ChainQuery;
use crate::chain::requests::QueryHeight;
use crate::error::Error;

/// A packet waiting to be relayed, together with the source state it was
/// detected in.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PendingPacket {
    pub sequence: Sequence,
    /// Source height at which `sent` was read; the packet is fetched at
    /// the same height.
    pub src_height: Height,
    pub sent: Sequence,
    pub received: Sequence,
}

/// Both channel counters, read in one pass.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Counters {
    pub sent: Sequence,
    pub received: Sequence,
    /// Source height at which `sent` was read.
    pub src_height: Height,
}

/// Computes the next sequence to relay.
///
/// Packets are numbered from `1`, so after `n` sends the store holds
/// packets `1..=n`. Progress is the larger of the destination's `received`
/// counter and the relayer's own `cursor`: the next pending sequence is
/// the one right after it, if the source has sent it.
pub fn next_pending(
    sent: Sequence,
    received: Sequence,
    cursor: Sequence,
) -> Result<Option<Sequence>, Error> {
    if received > sent || cursor > sent {
        return Err(Error::inconsistent_counters(sent, received, cursor));
    }

    let done = received.max(cursor);

    if done == sent {
        Ok(None)
    } else {
        Ok(Some(done.increment()))
    }
}

/// Read a channel counter at the given height.
pub async fn query_counter(
    chain: &dyn ChainQuery,
    path: Path,
    height: QueryHeight,
) -> Result<Sequence, Error> {
    let key = path.to_string();
    let response = chain.query(key.clone().into_bytes(), height).await?;

    let counter = decode_counter(&response.value)
        .map_err(|e| Error::invalid_counter(chain.id().clone(), key.clone(), e))?;

    trace!(chain = %chain.id(), path = %key, %counter, height = %response.height, "read counter");

    Ok(counter)
}

/// Number of packets the destination has recorded as received on the
/// channel, at its latest height.
pub async fn query_received(
    dst: &dyn ChainQuery,
    channel: &ChannelIdentity,
) -> Result<Sequence, Error> {
    query_counter(
        dst,
        Path::SeqRecv(channel.connection_id.clone(), channel.channel_id.clone()),
        QueryHeight::Latest,
    )
    .await
}

/// Reads the counters of a channel on both ends.
#[derive(Clone)]
pub struct SequenceTracker {
    src: Arc<dyn ChainQuery>,
    dst: Arc<dyn ChainQuery>,
    channel: ChannelIdentity,
}

impl SequenceTracker {
    pub fn new(src: Arc<dyn ChainQuery>, dst: Arc<dyn ChainQuery>, channel: ChannelIdentity) -> Self {
        Self { src, dst, channel }
    }

    /// Read `sent` on the source, at a freshly pinned height, and `received`
    /// on the destination.
    pub async fn counters(&self) -> Result<Counters, Error> {
        let src_height = self.src.query_latest_height().await?;

        let sent = query_counter(
            self.src.as_ref(),
            Path::SeqSend(
                self.channel.connection_id.clone(),
                self.channel.channel_id.clone(),
            ),
            QueryHeight::Specific(src_height),
        )
        .await?;

        let received = query_received(self.dst.as_ref(), &self.channel).await?;

        Ok(Counters {
            sent,
            received,
            src_height,
        })
    }

    /// The next packet to relay, if any, given the relayer's cursor.
    pub async fn pending(&self, cursor: Sequence) -> Result<Option<PendingPacket>, Error> {
        let Counters {
            sent,
            received,
            src_height,
        } = self.counters().await?;

        let pending = next_pending(sent, received, cursor)?.map(|sequence| PendingPacket {
            sequence,
            src_height,
            sent,
            received,
        });

        Ok(pending)
    }
}
