//! This module defines the various errors that be raised in the relayer.

use core::time::Duration;

use flex_error::{define_error, TraceError};
use tendermint_rpc::Error as TendermintRpcError;

use nft_relayer_types::core::channel::error::Error as ChannelError;
use nft_relayer_types::core::channel::packet::Sequence;
use nft_relayer_types::core::host::identifier::ChainId;
use nft_relayer_types::Height;

define_error! {
    Error {
        Rpc
            { url: tendermint_rpc::Url }
            [ TraceError<TendermintRpcError> ]
            |e| { format!("RPC error to endpoint {}", e.url) },

        AbciQuery
            {
                chain_id: ChainId,
                code: u32,
                log: String,
            }
            |e| {
                format!("ABCI query on chain '{}' failed with code {}: {}",
                    e.chain_id, e.code, e.log)
            },

        EmptyResponseProof
            { chain_id: ChainId }
            |e| { format!("node of chain '{}' returned no proof for a proven query", e.chain_id) },

        Timeout
            {
                operation: String,
                timeout: Duration,
            }
            |e| { format!("{} timed out after {:?}", e.operation, e.timeout) },

        InvalidCounter
            {
                chain_id: ChainId,
                path: String,
            }
            [ ChannelError ]
            |e| { format!("invalid counter at '{}' on chain '{}'", e.path, e.chain_id) },

        InconsistentCounters
            {
                sent: Sequence,
                received: Sequence,
                cursor: Sequence,
            }
            |e| {
                format!("inconsistent channel counters: sent={}, received={}, relay cursor={} \
                    (neither received nor cursor may exceed sent)",
                    e.sent, e.received, e.cursor)
            },

        MissingPacket
            {
                sequence: Sequence,
                height: Height,
            }
            |e| {
                format!("packet {} is not visible in the packet store at height {}",
                    e.sequence, e.height)
            },

        PacketDecode
            [ TraceError<serde_json::Error> ]
            |_| { "failed to decode sell-token packet" },

        HttpClientBuild
            [ TraceError<reqwest::Error> ]
            |_| { "failed to build HTTP client" },

        HttpRequest
            { url: String }
            [ TraceError<reqwest::Error> ]
            |e| { format!("HTTP request to '{}' failed", e.url) },

        NonceResolution
            {
                address: String,
                reason: String,
            }
            |e| { format!("failed to resolve account sequence of '{}': {}", e.address, e.reason) },

        Forward
            {
                status: u16,
                body: String,
            }
            |e| { format!("hub rejected submission with status {}: {}", e.status, e.body) },
    }
}

impl Error {
    /// The node could not be reached or rejected the query.
    pub fn is_query_error(&self) -> bool {
        matches!(
            self.detail(),
            ErrorDetail::Rpc(_)
                | ErrorDetail::AbciQuery(_)
                | ErrorDetail::EmptyResponseProof(_)
                | ErrorDetail::Timeout(_)
                | ErrorDetail::InvalidCounter(_)
        )
    }

    pub fn is_inconsistent_counters(&self) -> bool {
        matches!(self.detail(), ErrorDetail::InconsistentCounters(_))
    }

    pub fn is_missing_packet(&self) -> bool {
        matches!(self.detail(), ErrorDetail::MissingPacket(_))
    }

    pub fn is_decode_error(&self) -> bool {
        matches!(self.detail(), ErrorDetail::PacketDecode(_))
    }

    pub fn is_nonce_resolution_error(&self) -> bool {
        matches!(self.detail(), ErrorDetail::NonceResolution(_))
    }

    /// The hub refused or never answered the submission.
    pub fn is_forward_error(&self) -> bool {
        matches!(
            self.detail(),
            ErrorDetail::Forward(_) | ErrorDetail::HttpRequest(_)
        )
    }
}
