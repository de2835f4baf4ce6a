//! Static configuration of the drop being displayed

use std::num::NonZeroU64;

use serde::{Deserialize, Serialize};

use crate::address::Address;

/// Which drop contract to read and how many tokens a single claim requests.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct DropConfig {
    /// Token drop contract address
    pub contract: Address,
    /// Tokens requested per claim
    pub quantity: NonZeroU64,
}

impl DropConfig {
    /// Used when no contract address is provided by the environment
    pub const FALLBACK_CONTRACT: Address = Address::ZERO;

    /// Config for the given contract, claiming a single token at a time
    pub fn new(contract: Address) -> Self {
        DropConfig {
            contract,
            quantity: NonZeroU64::MIN,
        }
    }

    /// Use the given contract or fall back to [Self::FALLBACK_CONTRACT]
    pub fn from_optional(contract: Option<Address>) -> Self {
        Self::new(contract.unwrap_or(Self::FALLBACK_CONTRACT))
    }

    /// Override the quantity requested per claim
    pub fn with_quantity(mut self, quantity: NonZeroU64) -> Self {
        self.quantity = quantity;
        self
    }
}

impl Default for DropConfig {
    fn default() -> Self {
        Self::from_optional(None)
    }
}
