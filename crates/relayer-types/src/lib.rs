#![forbid(unsafe_code)]
#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    rust_2018_idioms
)]

//! Domain types for the sell-token packet relayer.
//!
//! The relayer watches a single channel on a source zone and forwards the
//! `SellTokenPacket`s committed there to a marketplace hub. This crate holds
//! the data model shared by the relayer library and its CLI:
//!
//! - [`core::host`]: validated identifiers and the layout of the keys under
//!   which channel counters and packets are stored.
//! - [`core::channel`]: sequence numbers and raw packets.
//! - [`proofs`]: the proof envelope that accompanies every remote read.
//! - [`applications::nft`]: the decoded application payload.

pub mod applications;
pub mod core;
pub mod proofs;

/// Block height of a chain, as reported by its node.
pub type Height = tendermint::block::Height;
