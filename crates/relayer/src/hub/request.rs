use core::fmt::{Debug, Error as FmtError, Formatter};

use serde::Serializer;
use serde_derive::Serialize;

use nft_relayer_types::applications::nft::coin::Coin;
use nft_relayer_types::applications::nft::token::NftDescriptor;

/// Common envelope of every hub REST transaction request.
///
/// Integers are written as decimal strings, like the hub's JSON codec does.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BaseReq {
    pub from: String,
    pub chain_id: String,
    #[serde(serialize_with = "as_decimal_string")]
    pub sequence: u64,
    #[serde(serialize_with = "as_decimal_string")]
    pub account_number: u64,
}

/// Request putting a token up for sale on the hub marketplace.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct SellRequest {
    pub base_req: BaseReq,
    pub owner: String,
    pub token: NftDescriptor,
    pub price: Coin,
    /// Key name of the signer in the hub's keybase.
    pub name: String,
    pub password: String,
}

impl Debug for SellRequest {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        f.debug_struct("SellRequest")
            .field("base_req", &self.base_req)
            .field("owner", &self.owner)
            .field("token", &self.token.id)
            .field("price", &self.price)
            .field("name", &self.name)
            .field("password", &"<redacted>")
            .finish()
    }
}

fn as_decimal_string<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}
