//! `version` subcommand

use abscissa_core::{clap::Parser, Command, Runnable};

use super::CliCmd;

/// `version` subcommand
///
/// Behaves like the `--version` flag, which is handled internally by clap.
#[derive(Command, Debug, Default, Parser)]
pub struct VersionCmd {}

impl Runnable for VersionCmd {
    /// Print version message
    fn run(&self) {
        println!("{} {}", CliCmd::name(), clap::crate_version!());
    }
}
