//! Read-only snapshots of drop contract state.
//!
//! Numeric fields are kept as the raw strings the chain reports. Interpretation
//! and default substitution happen in [crate::calculator].

use chrono::{DateTime, Utc};
use cosmwasm_std::Uint256;
use serde::{Deserialize, Serialize};

use crate::amount::parse_amount;

/// One phase of the drop: when it opens, how much can be claimed and at what price.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ClaimCondition {
    /// When this phase opens
    pub start_time: DateTime<Utc>,
    /// Remaining claimable supply in this phase, in whole tokens.
    ///
    /// The contract reports `"unlimited"` for phases without a cap.
    #[serde(default)]
    pub available_supply: Option<String>,
    /// Total supply this phase allows to be claimed
    pub max_claimable_supply: String,
    /// Currency charged per token
    pub currency: CurrencyMetadata,
}

impl ClaimCondition {
    /// Whether this phase was configured with a zero cap
    pub fn has_zero_cap(&self) -> bool {
        parse_amount(&self.max_claimable_supply).is_ok_and(|cap| cap.is_zero())
    }
}

/// Price per token along with the currency's display metadata.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct CurrencyMetadata {
    /// Price per token in the currency's base units
    #[serde(default)]
    pub value: Option<String>,
    /// Decimal places of the currency, 18 when absent
    #[serde(default)]
    pub decimals: Option<u8>,
    #[serde(default)]
    /// Ticker shown after formatted prices
    pub symbol: Option<String>,
}

#[allow(missing_docs)]
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct TokenSupply {
    /// Total tokens claimed so far
    #[serde(default)]
    pub value: Option<String>,
}

impl TokenSupply {
    /// Convenience constructor for a known amount
    pub fn new(value: impl Into<Uint256>) -> Self {
        TokenSupply {
            value: Some(value.into().to_string()),
        }
    }
}

/// Display metadata of the drop contract itself
#[allow(missing_docs)]
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ContractMetadata {
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
}
