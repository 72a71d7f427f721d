use async_trait::async_trait;

use nft_relayer_types::core::host::identifier::ChainId;
use nft_relayer_types::proofs::Proof;
use nft_relayer_types::Height;

use crate::chain::requests::QueryHeight;
use crate::error::Error;

/// Generic query response type
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryResponse {
    /// Raw value stored under the key; empty when the key is absent.
    pub value: Vec<u8>,
    pub proof: Proof,
    pub height: Height,
}

/// Point reads of a chain's committed state.
///
/// Every read is proven: the node is asked for a Merkle proof of the value
/// at the height it answers for. The proof is carried along, not verified.
#[async_trait]
pub trait ChainQuery: Send + Sync {
    /// Identifier of the chain this endpoint reads from.
    fn id(&self) -> &ChainId;

    /// Latest committed height of the chain.
    async fn query_latest_height(&self) -> Result<Height, Error>;

    /// Read the value stored under `key`, with its proof.
    async fn query(&self, key: Vec<u8>, height: QueryHeight) -> Result<QueryResponse, Error>;
}
