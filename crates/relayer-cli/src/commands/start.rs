use abscissa_core::{clap::Parser, Command, Runnable};
use tokio_util::sync::CancellationToken;

use nft_relayer::relay::Relayer;

use crate::cli_utils::{block_on, ChannelArgs};
use crate::conclude::{exit_with_unrecoverable_error, Output};
use crate::error::Error;
use crate::prelude::*;

/// Relay the channel's packets until interrupted with Ctrl-C or SIGTERM.
#[derive(Clone, Command, Debug, Parser, PartialEq, Eq)]
pub struct StartCmd {
    #[clap(flatten)]
    channel: ChannelArgs,
}

impl StartCmd {
    async fn execute(&self) -> Result<u64, Error> {
        let config = (*app_config()).clone();
        let channel = self.channel.resolve(&config)?;

        let mut relayer = Relayer::from_config(&config, channel)
            .await
            .map_err(Error::Relayer)?;

        let shutdown = CancellationToken::new();
        tokio::spawn(cancel_on_signal(shutdown.clone()));

        relayer.run(shutdown).await;

        Ok(relayer.cursor().as_u64())
    }
}

impl Runnable for StartCmd {
    fn run(&self) {
        let cursor = block_on(self.execute())
            .and_then(|result| result)
            .unwrap_or_else(exit_with_unrecoverable_error);

        Output::success(serde_json::json!({ "cursor": cursor })).exit()
    }
}

/// Cancel `shutdown` on the first Ctrl-C or SIGTERM.
async fn cancel_on_signal(shutdown: CancellationToken) {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = sigterm.recv() => {}
                }
            }
            Err(e) => {
                warn!("failed to install SIGTERM handler: {e}");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }

    info!("shutdown requested, stopping relayer");
    shutdown.cancel();
}
