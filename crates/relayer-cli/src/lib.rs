//! Cli for the sell-token packet relayer
//!
//! Application based on the [Abscissa] framework.
//!
//! [Abscissa]: https://github.com/iqlusioninc/abscissa

#![forbid(unsafe_code)]
#![deny(missing_docs, rust_2018_idioms, trivial_casts, unused_lifetimes)]

pub mod application;
pub mod cli_utils;
pub mod commands;
pub mod components;
pub mod conclude;
pub mod config;
pub mod entry;
pub mod error;
pub mod prelude;

/// The path to the default configuration file, relative to the home directory.
pub const DEFAULT_CONFIG_PATH: &str = ".nft-relayer/config.toml";
