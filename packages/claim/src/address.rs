use std::{fmt, str::FromStr};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// A 20-byte EVM account or contract address.
///
/// Parsed from and displayed as `0x`-prefixed lowercase hex. Checksum casing is
/// accepted on input but not validated.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address([u8; 20]);

impl Address {
    /// The all-zero address
    pub const ZERO: Address = Address([0; 20]);
}

impl FromStr for Address {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .with_context(|| format!("Address is missing its 0x prefix: {s}"))?;
        let bytes = hex::decode(digits).with_context(|| format!("Invalid hex in address: {s}"))?;
        let bytes = <[u8; 20]>::try_from(bytes.as_slice()).map_err(|_| {
            anyhow::anyhow!("Address must be 20 bytes, got {} from {s}", bytes.len())
        })?;
        Ok(Address(bytes))
    }
}

impl TryFrom<String> for Address {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.to_string()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
