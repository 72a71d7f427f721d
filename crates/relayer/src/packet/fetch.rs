use tracing::debug;

use nft_relayer_types::core::channel::packet::{Packet, Sequence};
use nft_relayer_types::core::host::identifier::ChannelIdentity;
use nft_relayer_types::core::host::path::Path;
use nft_relayer_types::proofs::Proof;
use nft_relayer_types::Height;

use crate::chain::endpoint::ChainQuery;
use crate::chain::requests::QueryHeight;
use crate::error::Error;

/// Fetch the packet stored at `sequence` in the source packet store, as of
/// `height`.
///
/// An empty value means the packet is not visible at that height, which
/// is reported as [`Error::missing_packet`] so the caller retries later.
pub async fn fetch_packet(
    src: &dyn ChainQuery,
    channel: &ChannelIdentity,
    sequence: Sequence,
    height: Height,
) -> Result<(Packet, Proof), Error> {
    let path = Path::Packet(
        channel.connection_id.clone(),
        channel.channel_id.clone(),
        sequence,
    );

    let response = src
        .query(path.into_bytes(), QueryHeight::Specific(height))
        .await?;

    if response.value.is_empty() {
        return Err(Error::missing_packet(sequence, height));
    }

    let packet = Packet::new(sequence, response.value);
    debug!(chain = %src.id(), %packet, %height, "fetched packet");

    Ok((packet, response.proof))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::mock::MockChain;

    use test_log::test;

    fn channel() -> ChannelIdentity {
        ChannelIdentity::new("connab".parse().unwrap(), "chanab".parse().unwrap())
    }

    #[test(tokio::test)]
    async fn fetch_stored_packet_with_proof() {
        let src = MockChain::new("zonea");
        src.set_packet(&channel(), 1, br#"{"price":{"denom":"hh","amount":"1"}}"#);
        let height = src.latest_height();

        let (packet, proof) = fetch_packet(&src, &channel(), Sequence::from(1), height)
            .await
            .unwrap();

        assert_eq!(packet.sequence, Sequence::from(1));
        assert!(!packet.data.is_empty());
        assert_eq!(proof.height, height);
        assert!(!proof.is_empty());
        assert_eq!(
            src.queried_keys(),
            vec!["connections/connab/channels/chanab/packets/1".to_string()]
        );
    }

    #[test(tokio::test)]
    async fn empty_slot_is_missing_packet() {
        let src = MockChain::new("zonea");

        let err = fetch_packet(&src, &channel(), Sequence::from(2), src.latest_height())
            .await
            .unwrap_err();

        assert!(err.is_missing_packet());
    }

    #[test(tokio::test)]
    async fn packet_written_after_height_is_not_visible() {
        let src = MockChain::new("zonea");
        let pinned = src.latest_height();
        src.set_packet(&channel(), 1, b"{}");

        let err = fetch_packet(&src, &channel(), Sequence::from(1), pinned)
            .await
            .unwrap_err();

        assert!(err.is_missing_packet());
    }
}
