use serde_derive::{Deserialize, Serialize};

/// Description of the NFT being put up for sale.
///
/// The relayer never interprets these fields: they are read from the source
/// packet and handed to the hub unchanged. Fields missing from the packet
/// read as empty strings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct NftDescriptor {
    pub id: String,
    /// Address of the token owner on the source zone.
    pub owner: String,
    pub name: String,
    pub description: String,
    /// URI of the token image.
    pub image: String,
    pub token_uri: String,
}
