use std::fs;
use std::path::{Path, PathBuf};

use abscissa_core::{clap::Parser, Command, Runnable};

use nft_relayer::config::{store, Config};

use crate::conclude::Output;
use crate::error::Error;

/// Write a configuration template to be filled in.
///
/// The template holds the defaults and leaves the channel, the hub address
/// and the signer empty, so it does not pass validation until edited.
#[derive(Clone, Command, Debug, Parser, PartialEq, Eq)]
pub struct InitCmd {
    #[clap(
        long = "path",
        short = 'p',
        required = true,
        value_name = "PATH",
        help_heading = "REQUIRED",
        help = "Path of the configuration file to create"
    )]
    path: PathBuf,

    #[clap(long = "force", help = "Overwrite an existing file")]
    force: bool,
}

/// Store the default configuration at `path`, creating missing parent
/// directories.
pub fn write_template(path: &Path, force: bool) -> Result<(), Error> {
    if path.exists() && !force {
        return Err(Error::ConfigExists(path.to_path_buf()));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(Error::Io)?;
    }

    store(&Config::default(), path).map_err(Error::Config)
}

impl Runnable for InitCmd {
    fn run(&self) {
        match write_template(&self.path, self.force) {
            Ok(()) => Output::success(format!(
                "wrote configuration template to '{}'",
                self.path.display()
            ))
            .exit(),
            Err(e) => Output::error(e.to_string()).exit(),
        }
    }
}
