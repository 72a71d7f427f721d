//! Host-side naming: identifiers for chains, connections and channels, and
//! the paths under which the channel object keeps its state.

pub mod error;
pub mod identifier;
pub mod path;
