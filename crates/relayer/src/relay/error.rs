use flex_error::define_error;

use nft_relayer_types::core::channel::packet::Sequence;

use crate::error::{Error, ErrorDetail};

// Failure of a single relay cycle, tagged with the stage it failed in.
define_error! {
    RelayError {
        Query
            [ Error ]
            |_| { "failed to determine the next pending packet" },

        Fetch
            { sequence: Sequence }
            [ Error ]
            |e| { format!("failed to fetch packet {}", e.sequence) },

        Decode
            { sequence: Sequence }
            [ Error ]
            |e| { format!("failed to decode packet {}", e.sequence) },

        Forward
            { sequence: Sequence }
            [ Error ]
            |e| { format!("failed to forward packet {} to the hub", e.sequence) },
    }
}

impl RelayError {
    /// The sequence the cycle was working on, if it got that far.
    pub fn sequence(&self) -> Option<Sequence> {
        match self.detail() {
            RelayErrorDetail::Query(_) => None,
            RelayErrorDetail::Fetch(e) => Some(e.sequence),
            RelayErrorDetail::Decode(e) => Some(e.sequence),
            RelayErrorDetail::Forward(e) => Some(e.sequence),
        }
    }

    /// Detail of the underlying relayer error.
    pub fn cause(&self) -> &ErrorDetail {
        match self.detail() {
            RelayErrorDetail::Query(e) => &e.source,
            RelayErrorDetail::Fetch(e) => &e.source,
            RelayErrorDetail::Decode(e) => &e.source,
            RelayErrorDetail::Forward(e) => &e.source,
        }
    }

    /// The channel counters contradict each other.
    pub fn is_inconsistent_counters(&self) -> bool {
        matches!(self.cause(), ErrorDetail::InconsistentCounters(_))
    }
}
