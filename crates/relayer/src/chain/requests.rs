use nft_relayer_types::Height;

/// Defines a type to be used in select requests to specify whether the
/// caller wants the latest state of the chain, or the state at a given height.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum QueryHeight {
    Latest,
    Specific(Height),
}

impl QueryHeight {
    /// The height to pass to the node, `None` meaning latest.
    pub fn to_rpc_height(self) -> Option<Height> {
        match self {
            QueryHeight::Latest => None,
            QueryHeight::Specific(height) => Some(height),
        }
    }
}

impl core::fmt::Display for QueryHeight {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            QueryHeight::Latest => write!(f, "latest"),
            QueryHeight::Specific(height) => write!(f, "{height}"),
        }
    }
}
