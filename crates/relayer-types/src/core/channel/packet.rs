use core::fmt::{Display, Error as FmtError, Formatter};
use core::str::FromStr;

use serde_derive::{Deserialize, Serialize};

use super::error::Error;

/// The sequence number of a packet enforces ordering among packets from the
/// same source channel. Packets are numbered from `1` in send order.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize,
)]
#[serde(transparent)]
pub struct Sequence(u64);

impl FromStr for Sequence {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.parse::<u64>().map_err(|e| {
            Error::invalid_string_as_sequence(s.to_string(), e)
        })?))
    }
}

impl Sequence {
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn increment(&self) -> Sequence {
        Sequence(self.0 + 1)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for Sequence {
    fn from(seq: u64) -> Self {
        Sequence(seq)
    }
}

impl From<Sequence> for u64 {
    fn from(s: Sequence) -> u64 {
        s.0
    }
}

impl Display for Sequence {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}", self.0)
    }
}

impl core::ops::Add<u64> for Sequence {
    type Output = Self;

    fn add(self, rhs: u64) -> Self {
        Self(self.0 + rhs)
    }
}

/// Decode a channel counter as stored by the host chain.
///
/// Counters are kept as ASCII decimal strings. A key that was never written
/// comes back as an empty value and reads as zero.
pub fn decode_counter(value: &[u8]) -> Result<Sequence, Error> {
    if value.is_empty() {
        return Ok(Sequence::default());
    }

    core::str::from_utf8(value)
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .map(Sequence::from)
        .ok_or_else(|| Error::invalid_counter_encoding(value.to_vec()))
}

/// A packet as read from the packet store of the source chain.
#[derive(Clone, Default, Hash, PartialEq, Eq, Deserialize, Serialize)]
pub struct Packet {
    pub sequence: Sequence,
    /// The commitment bytes stored under the packet's index.
    pub data: Vec<u8>,
}

impl Packet {
    pub fn new(sequence: Sequence, data: Vec<u8>) -> Self {
        Self { sequence, data }
    }
}

impl core::fmt::Debug for Packet {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        // Avoid dumping the full payload into logs.
        f.debug_struct("Packet")
            .field("sequence", &self.sequence)
            .field("data_len", &self.data.len())
            .finish()
    }
}

impl Display for Packet {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "seq:{}, data_len:{}", self.sequence, self.data.len())
    }
}
