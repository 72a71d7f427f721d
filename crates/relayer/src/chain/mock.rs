//! In-memory chain used by the relayer tests.

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use async_trait::async_trait;
use tendermint::merkle::proof::{ProofOp, ProofOps};

use nft_relayer_types::core::channel::packet::Sequence;
use nft_relayer_types::core::host::identifier::{ChainId, ChannelIdentity};
use nft_relayer_types::core::host::path::Path;
use nft_relayer_types::proofs::Proof;
use nft_relayer_types::Height;

use crate::chain::endpoint::{ChainQuery, QueryResponse};
use crate::chain::requests::QueryHeight;
use crate::error::Error;

#[derive(Default)]
struct State {
    height: u64,
    /// Every version of every key, indexed by the height it was written at.
    store: HashMap<Vec<u8>, BTreeMap<u64, Vec<u8>>>,
    queried: Vec<String>,
    calls: usize,
    failing: bool,
}

/// A chain whose store is a versioned key-value map.
///
/// Each write commits a new block, so reads at an older height see the
/// store as it was then.
pub struct MockChain {
    id: ChainId,
    state: Mutex<State>,
}

impl MockChain {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.parse().unwrap(),
            state: Mutex::new(State {
                height: 1,
                ..State::default()
            }),
        }
    }

    /// Write `value` under `key` in a new block.
    pub fn set(&self, key: Vec<u8>, value: Vec<u8>) {
        let mut state = self.state.lock().unwrap();
        state.height += 1;
        let height = state.height;
        state.store.entry(key).or_default().insert(height, value);
    }

    pub fn set_sent(&self, channel: &ChannelIdentity, sent: u64) {
        self.set(
            Path::SeqSend(channel.connection_id.clone(), channel.channel_id.clone()).into_bytes(),
            sent.to_string().into_bytes(),
        );
    }

    pub fn set_received(&self, channel: &ChannelIdentity, received: u64) {
        self.set(
            Path::SeqRecv(channel.connection_id.clone(), channel.channel_id.clone()).into_bytes(),
            received.to_string().into_bytes(),
        );
    }

    pub fn set_packet(&self, channel: &ChannelIdentity, sequence: u64, data: &[u8]) {
        self.set(
            Path::Packet(
                channel.connection_id.clone(),
                channel.channel_id.clone(),
                Sequence::from(sequence),
            )
            .into_bytes(),
            data.to_vec(),
        );
    }

    /// Make every subsequent query fail as if the node were unreachable.
    pub fn set_failing(&self, failing: bool) {
        self.state.lock().unwrap().failing = failing;
    }

    pub fn latest_height(&self) -> Height {
        Height::try_from(self.state.lock().unwrap().height).unwrap()
    }

    /// Keys queried so far, in order.
    pub fn queried_keys(&self) -> Vec<String> {
        self.state.lock().unwrap().queried.clone()
    }

    /// Number of calls made through [`ChainQuery`], failed ones included.
    pub fn query_count(&self) -> usize {
        self.state.lock().unwrap().calls
    }
}

#[async_trait]
impl ChainQuery for MockChain {
    fn id(&self) -> &ChainId {
        &self.id
    }

    async fn query_latest_height(&self) -> Result<Height, Error> {
        let mut state = self.state.lock().unwrap();
        state.calls += 1;

        if state.failing {
            return Err(Error::abci_query(
                self.id.clone(),
                1,
                "node unavailable".to_string(),
            ));
        }

        Ok(Height::try_from(state.height).unwrap())
    }

    async fn query(&self, key: Vec<u8>, height: QueryHeight) -> Result<QueryResponse, Error> {
        let mut state = self.state.lock().unwrap();
        state.calls += 1;
        state.queried.push(String::from_utf8_lossy(&key).into_owned());

        if state.failing {
            return Err(Error::abci_query(
                self.id.clone(),
                1,
                "node unavailable".to_string(),
            ));
        }

        let at = match height {
            QueryHeight::Latest => state.height,
            QueryHeight::Specific(h) => h.value(),
        };

        let value = state
            .store
            .get(&key)
            .and_then(|versions| versions.range(..=at).next_back())
            .map(|(_, value)| value.clone())
            .unwrap_or_default();

        let height = Height::try_from(at).unwrap();
        let proof = ProofOps {
            ops: vec![ProofOp {
                field_type: "ics23:iavl".to_string(),
                key: key.clone(),
                data: vec![],
            }],
        };

        Ok(QueryResponse {
            value,
            proof: Proof::new(key, Some(proof), height),
            height,
        })
    }
}
