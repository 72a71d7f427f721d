use abscissa_core::{clap::Parser, Command, Runnable};
use serde::Serialize;

use nft_relayer::relay::{RelayOutcome, Relayer};
use nft_relayer_types::core::channel::packet::Sequence;

use crate::cli_utils::{block_on, ChannelArgs};
use crate::conclude::{exit_with_unrecoverable_error, Output};
use crate::error::Error;
use crate::prelude::*;

/// What a single cycle did, as reported to the user.
#[derive(Debug, Serialize)]
struct Report {
    outcome: &'static str,
    sequence: Option<Sequence>,
    cursor: Sequence,
    hub_status: Option<u16>,
    hub_response: Option<String>,
}

/// Run one relay cycle: relay the next pending packet, if any, and exit.
#[derive(Clone, Command, Debug, Parser, PartialEq, Eq)]
pub struct RelayOnceCmd {
    #[clap(flatten)]
    channel: ChannelArgs,
}

impl RelayOnceCmd {
    async fn execute(&self) -> Result<Result<Report, String>, Error> {
        let config = (*app_config()).clone();
        let channel = self.channel.resolve(&config)?;

        let mut relayer = Relayer::from_config(&config, channel)
            .await
            .map_err(Error::Relayer)?;

        let result = relayer.relay_once().await;
        let cursor = relayer.cursor();

        let report = match result {
            Ok(RelayOutcome::NoPacket) => Report {
                outcome: "no_packet",
                sequence: None,
                cursor,
                hub_status: None,
                hub_response: None,
            },
            Ok(RelayOutcome::Skipped(sequence)) => Report {
                outcome: "skipped",
                sequence: Some(sequence),
                cursor,
                hub_status: None,
                hub_response: None,
            },
            Ok(RelayOutcome::Forwarded(sequence, confirmation)) => Report {
                outcome: "forwarded",
                sequence: Some(sequence),
                cursor,
                hub_status: Some(confirmation.status),
                hub_response: Some(confirmation.body),
            },
            Err(e) => return Ok(Err(e.to_string())),
        };

        Ok(Ok(report))
    }
}

impl Runnable for RelayOnceCmd {
    fn run(&self) {
        let result = block_on(self.execute())
            .and_then(|result| result)
            .unwrap_or_else(exit_with_unrecoverable_error);

        match result {
            Ok(report) => {
                info!(outcome = report.outcome, cursor = %report.cursor, "relay cycle done");
                Output::success(report).exit()
            }
            Err(e) => Output::error(e).exit(),
        }
    }
}
