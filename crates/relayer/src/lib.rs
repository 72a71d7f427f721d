#![forbid(unsafe_code)]
#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    rust_2018_idioms
)]

//! Sell-token packet relayer.
//!
//! Watches the send counter of one channel on a source zone, fetches every
//! new packet from the source packet store through proven queries and
//! submits the sell order it carries to the marketplace hub.

pub mod chain;
pub mod config;
pub mod error;
pub mod hub;
pub mod packet;
pub mod relay;
pub mod sequence;
