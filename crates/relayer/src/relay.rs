//! The relay worker: one pass over the pipeline per tick.

pub mod error;

use core::time::Duration;
use std::sync::Arc;

use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, error_span, info, warn, Instrument};

use nft_relayer_types::core::channel::packet::Sequence;
use nft_relayer_types::core::host::identifier::ChannelIdentity;

use crate::chain::cosmos::CosmosChain;
use crate::chain::endpoint::ChainQuery;
use crate::config::Config;
use crate::error::Error;
use crate::hub::{Confirmation, Forwarder};
use crate::packet::{decode_packet, fetch_packet};
use crate::sequence::{query_received, SequenceTracker};

pub use self::error::RelayError;

/// What a relay cycle did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RelayOutcome {
    /// The relayer is caught up with the source.
    NoPacket,
    /// The packet carried no token; it was acknowledged without contacting
    /// the hub.
    Skipped(Sequence),
    /// The sell order was accepted by the hub.
    Forwarded(Sequence, Confirmation),
}

impl RelayOutcome {
    /// The sequence the cursor moved to, if it moved.
    pub fn sequence(&self) -> Option<Sequence> {
        match self {
            RelayOutcome::NoPacket => None,
            RelayOutcome::Skipped(sequence) | RelayOutcome::Forwarded(sequence, _) => {
                Some(*sequence)
            }
        }
    }
}

/// Relays the packets of one channel from the source to the hub.
///
/// The relayer owns the cursor: the last sequence it processed, either by
/// forwarding it or by skipping it. The cursor only moves once a cycle has
/// fully succeeded, so a failed cycle is retried from the same packet.
pub struct Relayer {
    channel: ChannelIdentity,
    src: Arc<dyn ChainQuery>,
    dst: Arc<dyn ChainQuery>,
    tracker: SequenceTracker,
    forwarder: Forwarder,
    poll_interval: Duration,
    cursor: Sequence,
}

impl Relayer {
    /// Set up a relayer, starting from what the destination has received.
    pub async fn init(
        src: Arc<dyn ChainQuery>,
        dst: Arc<dyn ChainQuery>,
        forwarder: Forwarder,
        channel: ChannelIdentity,
        poll_interval: Duration,
    ) -> Result<Self, Error> {
        let cursor = query_received(dst.as_ref(), &channel).await?;

        info!(
            src_chain = %src.id(),
            dst_chain = %dst.id(),
            %channel,
            %cursor,
            "initialized relay cursor from destination",
        );

        Ok(Self {
            tracker: SequenceTracker::new(src.clone(), dst.clone(), channel.clone()),
            channel,
            src,
            dst,
            forwarder,
            poll_interval,
            cursor,
        })
    }

    /// Set up a relayer talking to the nodes and the hub named in `config`.
    pub async fn from_config(config: &Config, channel: ChannelIdentity) -> Result<Self, Error> {
        let src = Arc::new(CosmosChain::new(config.source.clone())?);
        let dst = Arc::new(CosmosChain::new(config.destination.clone())?);
        let forwarder = Forwarder::new(config.hub.clone())?;

        Self::init(src, dst, forwarder, channel, config.relay.poll_interval).await
    }

    pub fn cursor(&self) -> Sequence {
        self.cursor
    }

    /// Run a single relay cycle.
    ///
    /// On error the cursor is left untouched.
    pub async fn relay_once(&mut self) -> Result<RelayOutcome, RelayError> {
        let pending = match self
            .tracker
            .pending(self.cursor)
            .await
            .map_err(RelayError::query)?
        {
            Some(pending) => pending,
            None => return Ok(RelayOutcome::NoPacket),
        };

        let sequence = pending.sequence;
        debug!(
            %sequence,
            sent = %pending.sent,
            received = %pending.received,
            cursor = %self.cursor,
            "found pending packet"
        );

        let (packet, _proof) = fetch_packet(
            self.src.as_ref(),
            &self.channel,
            sequence,
            pending.src_height,
        )
        .await
        .map_err(|e| RelayError::fetch(sequence, e))?;

        let sell = decode_packet(&packet.data).map_err(|e| RelayError::decode(sequence, e))?;

        let outcome = match sell.token {
            None => RelayOutcome::Skipped(sequence),
            Some(token) => {
                let confirmation = self
                    .forwarder
                    .forward(&token, &sell.price)
                    .await
                    .map_err(|e| RelayError::forward(sequence, e))?;

                RelayOutcome::Forwarded(sequence, confirmation)
            }
        };

        self.cursor = sequence;

        Ok(outcome)
    }

    /// Relay every `poll_interval` until `shutdown` is cancelled.
    ///
    /// Cycle failures are logged and retried on the next tick. A cycle
    /// interrupted by the shutdown leaves the cursor where it was.
    pub async fn run(&mut self, shutdown: CancellationToken) {
        let span = error_span!(
            "worker.relay",
            src_chain = %self.src.id(),
            dst_chain = %self.dst.id(),
            connection = %self.channel.connection_id,
            channel = %self.channel.channel_id,
        );

        self.run_loop(shutdown).instrument(span).await
    }

    async fn run_loop(&mut self, shutdown: CancellationToken) {
        let mut interval = tokio::time::interval(self.poll_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(cursor = %self.cursor, poll_interval = ?self.poll_interval, "relayer started");

        loop {
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                _ = interval.tick() => {}
            }

            let result = tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                result = self.relay_once() => result,
            };

            self.report(result);
        }

        info!(cursor = %self.cursor, "relayer stopped");
    }

    fn report(&self, result: Result<RelayOutcome, RelayError>) {
        match result {
            Ok(RelayOutcome::NoPacket) => {
                debug!(cursor = %self.cursor, "no pending packet");
            }
            Ok(RelayOutcome::Skipped(sequence)) => {
                info!(%sequence, "packet carries no token, skipped");
            }
            Ok(RelayOutcome::Forwarded(sequence, confirmation)) => {
                info!(
                    %sequence,
                    status = confirmation.status,
                    account_sequence = confirmation.account_sequence,
                    "forwarded sell order to hub"
                );
            }
            Err(e) if e.is_inconsistent_counters() => {
                warn!(cursor = %self.cursor, "will retry: {e}");
            }
            Err(e) => match e.sequence() {
                Some(sequence) => error!(%sequence, "will retry: {e}"),
                None => error!("will retry: {e}"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::mock::MockChain;
    use crate::error::ErrorDetail;
    use crate::hub::mock::{hub_config, mount_account, mount_sell, sell_requests};
    use crate::relay::error::RelayErrorDetail;

    use serde_json::json;
    use test_log::test;
    use wiremock::MockServer;

    const TOKEN_PACKET: &[u8] = br#"{
        "token": {
            "id": "nft-6",
            "owner": "zone1owner",
            "name": "Shield",
            "description": "A sturdy one",
            "image": "https://img/6.png",
            "token_uri": "https://meta/6"
        },
        "price": {"denom": "hhcoin", "amount": "40"}
    }"#;

    const EMPTY_PACKET: &[u8] = br#"{"token":null,"price":{"denom":"hhcoin","amount":"0"}}"#;

    fn channel() -> ChannelIdentity {
        ChannelIdentity::new(
            "connectionzoneab".parse().unwrap(),
            "channelzoneab".parse().unwrap(),
        )
    }

    struct Harness {
        src: Arc<MockChain>,
        dst: Arc<MockChain>,
        hub: MockServer,
    }

    impl Harness {
        async fn new(sent: u64, received: u64) -> Self {
            let src = Arc::new(MockChain::new("zonea"));
            let dst = Arc::new(MockChain::new("zoneb"));
            src.set_sent(&channel(), sent);
            dst.set_received(&channel(), received);

            Self {
                src,
                dst,
                hub: MockServer::start().await,
            }
        }

        async fn relayer(&self) -> Relayer {
            Relayer::init(
                self.src.clone(),
                self.dst.clone(),
                Forwarder::new(hub_config(&self.hub.uri())).unwrap(),
                channel(),
                Duration::from_millis(10),
            )
            .await
            .unwrap()
        }
    }

    #[test(tokio::test)]
    async fn caught_up_relayer_does_nothing() {
        let h = Harness::new(5, 5).await;
        let mut relayer = h.relayer().await;

        assert_eq!(relayer.relay_once().await.unwrap(), RelayOutcome::NoPacket);
        assert_eq!(relayer.cursor(), Sequence::from(5));
        assert!(h.hub.received_requests().await.unwrap().is_empty());
    }

    #[test(tokio::test)]
    async fn packet_without_token_is_skipped() {
        let h = Harness::new(6, 5).await;
        h.src.set_packet(&channel(), 6, EMPTY_PACKET);
        let mut relayer = h.relayer().await;

        assert_eq!(
            relayer.relay_once().await.unwrap(),
            RelayOutcome::Skipped(Sequence::from(6))
        );
        assert_eq!(relayer.cursor(), Sequence::from(6));
        assert!(h.hub.received_requests().await.unwrap().is_empty());
    }

    #[test(tokio::test)]
    async fn skipped_packet_is_not_revisited() {
        let h = Harness::new(6, 5).await;
        h.src.set_packet(&channel(), 6, EMPTY_PACKET);
        let mut relayer = h.relayer().await;

        relayer.relay_once().await.unwrap();

        // `received` is still 5 on the destination.
        assert_eq!(relayer.relay_once().await.unwrap(), RelayOutcome::NoPacket);
        assert_eq!(relayer.cursor(), Sequence::from(6));
    }

    #[test(tokio::test)]
    async fn packet_with_token_is_forwarded() {
        let h = Harness::new(6, 5).await;
        h.src.set_packet(&channel(), 6, TOKEN_PACKET);
        mount_account(&h.hub, json!({"sequence": "2"})).await;
        mount_sell(&h.hub, 200).await;
        let mut relayer = h.relayer().await;

        let outcome = relayer.relay_once().await.unwrap();

        assert!(matches!(outcome, RelayOutcome::Forwarded(seq, _) if seq == Sequence::from(6)));
        assert_eq!(relayer.cursor(), Sequence::from(6));

        let sent = sell_requests(&h.hub).await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0]["token"]["owner"], "zone1owner");
        assert_eq!(sent[0]["token"]["id"], "nft-6");
        assert_eq!(sent[0]["price"], json!({"denom": "hhcoin", "amount": "40"}));
        assert_eq!(sent[0]["base_req"]["sequence"], "2");
    }

    #[test(tokio::test)]
    async fn sparse_token_is_forwarded() {
        let h = Harness::new(6, 5).await;
        h.src.set_packet(
            &channel(),
            6,
            br#"{"token":{"id":"nft-6","owner":"o"},"price":{"denom":"hh","amount":"1"}}"#,
        );
        mount_account(&h.hub, json!({"sequence": "2"})).await;
        mount_sell(&h.hub, 200).await;
        let mut relayer = h.relayer().await;

        let outcome = relayer.relay_once().await.unwrap();

        assert!(matches!(outcome, RelayOutcome::Forwarded(seq, _) if seq == Sequence::from(6)));
        assert_eq!(relayer.cursor(), Sequence::from(6));

        let sent = sell_requests(&h.hub).await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0]["token"]["id"], "nft-6");
        assert_eq!(sent[0]["token"]["name"], "");
        assert_eq!(sent[0]["token"]["image"], "");
    }

    #[test(tokio::test)]
    async fn rejected_forward_is_retried_next_cycle() {
        let h = Harness::new(6, 5).await;
        h.src.set_packet(&channel(), 6, TOKEN_PACKET);
        mount_account(&h.hub, json!({"sequence": "2"})).await;
        mount_sell(&h.hub, 500).await;
        let mut relayer = h.relayer().await;

        let err = relayer.relay_once().await.unwrap_err();
        assert!(matches!(err.detail(), RelayErrorDetail::Forward(_)));
        assert_eq!(err.sequence(), Some(Sequence::from(6)));
        assert_eq!(relayer.cursor(), Sequence::from(5));

        h.hub.reset().await;
        mount_account(&h.hub, json!({"sequence": "2"})).await;
        mount_sell(&h.hub, 200).await;

        let outcome = relayer.relay_once().await.unwrap();
        assert_eq!(outcome.sequence(), Some(Sequence::from(6)));
        assert_eq!(relayer.cursor(), Sequence::from(6));
    }

    #[test(tokio::test)]
    async fn unresolvable_nonce_skips_submission() {
        let h = Harness::new(6, 5).await;
        h.src.set_packet(&channel(), 6, TOKEN_PACKET);
        mount_account(&h.hub, json!({"sequence": "not-a-number"})).await;
        mount_sell(&h.hub, 200).await;
        let mut relayer = h.relayer().await;

        let err = relayer.relay_once().await.unwrap_err();

        assert!(matches!(err.cause(), ErrorDetail::NonceResolution(_)));
        assert!(sell_requests(&h.hub).await.is_empty());
        assert_eq!(relayer.cursor(), Sequence::from(5));
    }

    #[test(tokio::test)]
    async fn restart_resubmits_same_packet() {
        // Current behaviour, not safe for production: restarting re-derives
        // the cursor from `received`, which the hub never moves, so the
        // packet is submitted again and the hub sees a duplicate sell order.
        let h = Harness::new(6, 5).await;
        h.src.set_packet(&channel(), 6, TOKEN_PACKET);
        mount_account(&h.hub, json!({"sequence": "2"})).await;
        mount_sell(&h.hub, 200).await;

        h.relayer().await.relay_once().await.unwrap();
        h.relayer().await.relay_once().await.unwrap();

        let sent = sell_requests(&h.hub).await;
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0], sent[1]);
    }

    #[test(tokio::test)]
    async fn first_packet_lives_at_index_one() {
        let h = Harness::new(1, 0).await;
        h.src.set_packet(&channel(), 1, EMPTY_PACKET);
        let mut relayer = h.relayer().await;

        assert_eq!(relayer.cursor(), Sequence::from(0));
        assert_eq!(
            relayer.relay_once().await.unwrap(),
            RelayOutcome::Skipped(Sequence::from(1))
        );

        let keys = h.src.queried_keys();
        assert!(keys.contains(&"connections/connectionzoneab/channels/channelzoneab/packets/1".to_string()));
        assert!(!keys.iter().any(|k| k.ends_with("/packets/0")));
    }

    #[test(tokio::test)]
    async fn missing_packet_leaves_cursor() {
        let h = Harness::new(6, 5).await;
        let mut relayer = h.relayer().await;

        let err = relayer.relay_once().await.unwrap_err();

        assert!(matches!(err.detail(), RelayErrorDetail::Fetch(_)));
        assert!(matches!(err.cause(), ErrorDetail::MissingPacket(_)));
        assert_eq!(relayer.cursor(), Sequence::from(5));
    }

    #[test(tokio::test)]
    async fn undecodable_packet_leaves_cursor() {
        let h = Harness::new(6, 5).await;
        h.src.set_packet(&channel(), 6, b"\x0a\x02garbage");
        let mut relayer = h.relayer().await;

        let err = relayer.relay_once().await.unwrap_err();

        assert!(matches!(err.detail(), RelayErrorDetail::Decode(_)));
        assert_eq!(relayer.cursor(), Sequence::from(5));
    }

    #[test(tokio::test)]
    async fn inconsistent_counters_are_reported() {
        let h = Harness::new(6, 5).await;
        let mut relayer = h.relayer().await;
        h.dst.set_received(&channel(), 7);

        let err = relayer.relay_once().await.unwrap_err();

        assert!(err.is_inconsistent_counters());
        assert_eq!(err.sequence(), None);
        assert_eq!(relayer.cursor(), Sequence::from(5));
    }

    #[test(tokio::test)]
    async fn unreachable_source_is_a_query_error() {
        let h = Harness::new(6, 5).await;
        let mut relayer = h.relayer().await;
        h.src.set_failing(true);

        let err = relayer.relay_once().await.unwrap_err();

        assert!(matches!(err.detail(), RelayErrorDetail::Query(_)));
        assert_eq!(relayer.cursor(), Sequence::from(5));
    }

    #[test(tokio::test)]
    async fn init_fails_when_destination_is_unreachable() {
        let h = Harness::new(6, 5).await;
        h.dst.set_failing(true);

        let result = Relayer::init(
            h.src.clone(),
            h.dst.clone(),
            Forwarder::new(hub_config(&h.hub.uri())).unwrap(),
            channel(),
            Duration::from_millis(10),
        )
        .await;

        assert!(result.is_err());
    }

    #[test(tokio::test)]
    async fn run_relays_until_cancelled() {
        let h = Harness::new(7, 5).await;
        h.src.set_packet(&channel(), 6, TOKEN_PACKET);
        h.src.set_packet(&channel(), 7, EMPTY_PACKET);
        mount_account(&h.hub, json!({"sequence": "2"})).await;
        mount_sell(&h.hub, 200).await;

        let mut relayer = h.relayer().await;
        let shutdown = CancellationToken::new();

        let worker = tokio::spawn({
            let shutdown = shutdown.clone();
            async move {
                relayer.run(shutdown).await;
                relayer
            }
        });

        // Let the worker go through a few ticks.
        tokio::time::sleep(Duration::from_millis(200)).await;
        shutdown.cancel();

        let relayer = tokio::time::timeout(Duration::from_secs(5), worker)
            .await
            .expect("worker did not stop")
            .unwrap();

        assert_eq!(relayer.cursor(), Sequence::from(7));
        assert_eq!(sell_requests(&h.hub).await.len(), 1);
    }

    #[test(tokio::test)]
    async fn run_survives_failing_cycles() {
        let h = Harness::new(6, 5).await;
        let mut relayer = h.relayer().await;
        h.src.set_failing(true);

        let shutdown = CancellationToken::new();
        let worker = tokio::spawn({
            let shutdown = shutdown.clone();
            async move {
                relayer.run(shutdown).await;
                relayer
            }
        });

        tokio::time::sleep(Duration::from_millis(100)).await;
        shutdown.cancel();

        let relayer = worker.await.unwrap();
        assert_eq!(relayer.cursor(), Sequence::from(5));
        assert!(h.src.query_count() > 1);
    }

    #[test(tokio::test)]
    async fn run_returns_when_already_cancelled() {
        let h = Harness::new(5, 5).await;
        let mut relayer = h.relayer().await;

        let shutdown = CancellationToken::new();
        shutdown.cancel();

        tokio::time::timeout(Duration::from_secs(1), relayer.run(shutdown))
            .await
            .expect("run did not return");
    }
}
