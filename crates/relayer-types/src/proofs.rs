use tendermint::merkle::proof::ProofOps;

use crate::Height;

/// Proof envelope returned with every remote read.
///
/// The relayer does not verify the proof itself; it trusts the queried node
/// and only carries the proof along with the value it vouches for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Proof {
    /// The key the proof was requested for.
    pub key: Vec<u8>,
    /// Merkle proof operations, as returned by the node.
    pub proof: Option<ProofOps>,
    /// Height of the state the proof was generated against.
    pub height: Height,
}

impl Proof {
    pub fn new(key: Vec<u8>, proof: Option<ProofOps>, height: Height) -> Self {
        Self { key, proof, height }
    }

    /// Whether the node produced any proof operation.
    pub fn is_empty(&self) -> bool {
        self.proof.as_ref().map_or(true, |p| p.ops.is_empty())
    }
}
