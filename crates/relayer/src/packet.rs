//! Retrieval and decoding of the packets found pending on the source.

pub mod decode;
pub mod fetch;

pub use decode::decode_packet;
pub use fetch::fetch_packet;
