//! Read access to the chains the relayer observes.

pub mod cosmos;
pub mod endpoint;
pub mod requests;

#[cfg(test)]
pub mod mock;
