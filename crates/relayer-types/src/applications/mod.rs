//! Application-level payloads carried over the channel.

pub mod nft;
