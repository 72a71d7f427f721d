use nft_relayer_types::applications::nft::packet::SellTokenPacket;

use crate::error::Error;

/// Decode the JSON payload of a sell-token packet.
pub fn decode_packet(data: &[u8]) -> Result<SellTokenPacket, Error> {
    serde_json::from_slice(data).map_err(Error::packet_decode)
}
