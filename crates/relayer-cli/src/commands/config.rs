//! `config` subcommand

use abscissa_core::{clap::Parser, Command, Runnable};

mod init;
mod validate;

/// `config` subcommand
#[derive(Command, Debug, Parser, Runnable)]
pub enum ConfigCmd {
    /// Write a configuration template
    Init(init::InitCmd),

    /// Validate the relayer configuration file
    Validate(validate::ValidateCmd),
}
