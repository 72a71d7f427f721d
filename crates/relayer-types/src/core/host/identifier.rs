use core::fmt::{Display, Error as FmtError, Formatter};
use core::str::FromStr;

use serde_derive::{Deserialize, Serialize};

use super::error::ValidationError as Error;

/// Path separator, never allowed inside an identifier.
const PATH_SEPARATOR: char = '/';
const VALID_SPECIAL_CHARS: &str = "._+-#[]<>";

/// Default validator function for identifiers.
///
/// A valid identifier only contain lowercase or uppercase alphabetic
/// characters, digits or one of `._+-#[]<>`, is not empty, and has a
/// length in `min..=max`.
pub fn validate_identifier(id: &str, min: usize, max: usize) -> Result<(), Error> {
    assert!(max >= min);

    if id.is_empty() {
        return Err(Error::empty());
    }

    if id.contains(PATH_SEPARATOR) {
        return Err(Error::contain_separator(id.to_string()));
    }

    let length = id.len();
    if length < min || length > max {
        return Err(Error::invalid_length(id.to_string(), length, min, max));
    }

    if !id
        .chars()
        .all(|c| c.is_alphanumeric() || VALID_SPECIAL_CHARS.contains(c))
    {
        return Err(Error::invalid_character(id.to_string()));
    }

    Ok(())
}

/// Identifier of a chain, as found in its genesis file.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ChainId(String);

impl ChainId {
    /// Builds a chain identifier without validating it.
    ///
    /// Meant for identifiers known at compile time; use [`FromStr`] for
    /// anything coming from user input.
    pub fn from_string(id: &str) -> Self {
        Self(id.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ChainId {
    type Err = Error;

    fn from_str(id: &str) -> Result<Self, Self::Err> {
        validate_identifier(id, 1, 64)?;
        Ok(Self(id.to_string()))
    }
}

impl TryFrom<String> for ChainId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ChainId> for String {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

impl Display for ChainId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}", self.0)
    }
}

/// Identifier of the connection a channel runs over.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ConnectionId(String);

impl ConnectionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ConnectionId {
    type Err = Error;

    fn from_str(id: &str) -> Result<Self, Self::Err> {
        validate_identifier(id, 2, 64)?;
        Ok(Self(id.to_string()))
    }
}

impl TryFrom<String> for ConnectionId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ConnectionId> for String {
    fn from(id: ConnectionId) -> Self {
        id.0
    }
}

impl Display for ConnectionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a channel within a connection.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ChannelId(String);

impl ChannelId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ChannelId {
    type Err = Error;

    fn from_str(id: &str) -> Result<Self, Self::Err> {
        validate_identifier(id, 2, 64)?;
        Ok(Self(id.to_string()))
    }
}

impl TryFrom<String> for ChannelId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ChannelId> for String {
    fn from(id: ChannelId) -> Self {
        id.0
    }
}

impl Display for ChannelId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}", self.0)
    }
}

/// The `(connection, channel)` pair naming the one logical pipe this
/// relayer serves. Immutable once the relayer starts.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelIdentity {
    pub connection_id: ConnectionId,
    pub channel_id: ChannelId,
}

impl ChannelIdentity {
    pub fn new(connection_id: ConnectionId, channel_id: ChannelId) -> Self {
        Self {
            connection_id,
            channel_id,
        }
    }
}

impl Display for ChannelIdentity {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}/{}", self.connection_id, self.channel_id)
    }
}
