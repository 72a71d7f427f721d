use core::fmt::{self, Formatter};
use core::str::FromStr;

use derive_more::{Display, From, Into};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

use super::error::Error;

/// A token amount. Encoded on the wire as a decimal string, the way the
/// Cosmos SDK encodes `sdk.Int`.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, PartialOrd, Ord, Hash, Display, From, Into)]
pub struct Amount(u128);

impl From<u64> for Amount {
    fn from(v: u64) -> Self {
        Self(v.into())
    }
}

impl FromStr for Amount {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount = s.parse::<u128>().map_err(Error::invalid_amount)?;
        Ok(Self(amount))
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AmountVisitor;

        impl<'de> Visitor<'de> for AmountVisitor {
            type Value = Amount;

            fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
                f.write_str("a decimal string or a non-negative integer")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Amount, E> {
                v.parse().map_err(|e: Error| E::custom(e))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Amount, E> {
                Ok(Amount::from(v))
            }
        }

        deserializer.deserialize_any(AmountVisitor)
    }
}

/// A coin: an amount of a given denomination.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: Amount,
}

impl Coin {
    pub fn new(denom: impl Into<String>, amount: impl Into<Amount>) -> Self {
        Self {
            denom: denom.into(),
            amount: amount.into(),
        }
    }
}

impl FromStr for Coin {
    type Err = Error;

    /// Parses a coin in the `<amount><denom>` form, e.g. `100stake`.
    fn from_str(coin_str: &str) -> Result<Self, Self::Err> {
        let split = coin_str
            .find(|c: char| !c.is_ascii_digit())
            .filter(|&pos| pos > 0)
            .ok_or_else(|| Error::invalid_coin(coin_str.to_string()))?;

        let (amount, denom) = coin_str.split_at(split);

        Ok(Coin {
            amount: amount.parse()?,
            denom: denom.to_string(),
        })
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}
