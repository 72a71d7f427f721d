use serde_derive::{Deserialize, Serialize};

use super::coin::Coin;
use super::token::NftDescriptor;

/// The payload a zone commits when it puts a token up for sale on the hub.
///
/// `token` may legitimately be absent. Such a packet carries nothing to sell
/// and is acknowledged by the relayer without contacting the hub.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellTokenPacket {
    #[serde(default)]
    pub token: Option<NftDescriptor>,
    #[serde(default)]
    pub price: Coin,
}

impl SellTokenPacket {
    /// Whether this packet carries a token to put up for sale.
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }
}
