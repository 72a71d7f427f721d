//! The NFT marketplace application: a zone puts a token up for sale by
//! committing a [`SellTokenPacket`](packet::SellTokenPacket) to its channel.

pub mod coin;
pub mod error;
pub mod packet;
pub mod token;
