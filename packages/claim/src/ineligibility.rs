//! Reasons a wallet cannot claim, and the message shown for them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A cause preventing a wallet from claiming under the current condition.
///
/// Reported by the chain reader; this crate only interprets them. Codes that
/// are not recognised are preserved in [IneligibilityReason::Other].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IneligibilityReason {
    /// Remaining supply is below the requested quantity
    NotEnoughSupply,
    /// Wallet is not on the allowlist for this phase
    AddressNotAllowed,
    /// Wallet claimed too recently
    WaitBeforeNextClaimTransaction,
    /// Wallet already used its claim
    AlreadyClaimed,
    /// Wallet cannot pay for the claim
    NotEnoughTokens,
    /// No phase is currently open
    NoActiveClaimPhase,
    /// The contract has no phases configured
    NoClaimConditionSet,
    /// No wallet is connected
    NoWallet,
    /// The reader could not determine a reason
    Unknown,
    /// Unrecognised code, kept verbatim
    Other(String),
}

impl IneligibilityReason {
    /// Every recognised reason
    pub const KNOWN: [IneligibilityReason; 9] = [
        IneligibilityReason::NotEnoughSupply,
        IneligibilityReason::AddressNotAllowed,
        IneligibilityReason::WaitBeforeNextClaimTransaction,
        IneligibilityReason::AlreadyClaimed,
        IneligibilityReason::NotEnoughTokens,
        IneligibilityReason::NoActiveClaimPhase,
        IneligibilityReason::NoClaimConditionSet,
        IneligibilityReason::NoWallet,
        IneligibilityReason::Unknown,
    ];

    /// Wire code for this reason
    pub fn code(&self) -> &str {
        match self {
            IneligibilityReason::NotEnoughSupply => "not-enough-supply",
            IneligibilityReason::AddressNotAllowed => "address-not-allowed",
            IneligibilityReason::WaitBeforeNextClaimTransaction => {
                "wait-before-next-claim-transaction"
            }
            IneligibilityReason::AlreadyClaimed => "already-claimed",
            IneligibilityReason::NotEnoughTokens => "not-enough-tokens",
            IneligibilityReason::NoActiveClaimPhase => "no-active-claim-phase",
            IneligibilityReason::NoClaimConditionSet => "no-claim-condition-set",
            IneligibilityReason::NoWallet => "no-wallet",
            IneligibilityReason::Unknown => "unknown",
            IneligibilityReason::Other(code) => code,
        }
    }

    /// Long-form explanation of the reason
    pub fn description(&self) -> &str {
        match self {
            IneligibilityReason::NotEnoughSupply => "There is not enough supply to claim.",
            IneligibilityReason::AddressNotAllowed => "This address is not on the allowlist.",
            IneligibilityReason::WaitBeforeNextClaimTransaction => {
                "Not enough time since last claim transaction. Please wait."
            }
            IneligibilityReason::AlreadyClaimed => "You have already claimed the token.",
            IneligibilityReason::NotEnoughTokens => {
                "There are not enough tokens in the wallet to pay for the claim."
            }
            IneligibilityReason::NoActiveClaimPhase => {
                "There is no active claim phase at the moment. Please check back in later."
            }
            IneligibilityReason::NoClaimConditionSet => "There is no claim condition set.",
            IneligibilityReason::NoWallet => "No wallet connected.",
            IneligibilityReason::Unknown => "No claim conditions found.",
            IneligibilityReason::Other(code) => code,
        }
    }
}

impl From<&str> for IneligibilityReason {
    fn from(code: &str) -> Self {
        match code.trim() {
            "not-enough-supply" => IneligibilityReason::NotEnoughSupply,
            "address-not-allowed" | "not-allowlisted" => IneligibilityReason::AddressNotAllowed,
            "wait-before-next-claim-transaction" => {
                IneligibilityReason::WaitBeforeNextClaimTransaction
            }
            "already-claimed" => IneligibilityReason::AlreadyClaimed,
            "not-enough-tokens" => IneligibilityReason::NotEnoughTokens,
            "no-active-claim-phase" => IneligibilityReason::NoActiveClaimPhase,
            "no-claim-condition-set" => IneligibilityReason::NoClaimConditionSet,
            "no-wallet" => IneligibilityReason::NoWallet,
            "unknown" => IneligibilityReason::Unknown,
            _ => IneligibilityReason::Other(code.to_owned()),
        }
    }
}

impl From<String> for IneligibilityReason {
    fn from(code: String) -> Self {
        code.as_str().into()
    }
}

impl From<IneligibilityReason> for String {
    fn from(reason: IneligibilityReason) -> Self {
        match reason {
            IneligibilityReason::Other(code) => code,
            known => known.code().to_owned(),
        }
    }
}

impl fmt::Display for IneligibilityReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Message shown when a code carries no text at all
const BLANK_REASON_MESSAGE: &str = "Claiming not available";

/// Produce the single message to show for a list of ineligibility reasons.
///
/// Only the first reason is considered. Returns [None] for an empty list, which
/// means no blocking reason is known. Rules, first match wins:
///
/// 1. No phase available (unknown, no active phase, no condition set): the drop is not ready.
/// 2. Not enough tokens: the wallet cannot pay.
/// 3. Not on the allowlist: mentions the quantity when more than one token was requested.
/// 4. Anything else: the reason's [IneligibilityReason::description].
pub fn format_ineligibility(reasons: &[IneligibilityReason], quantity: u64) -> Option<String> {
    let reason = reasons.first()?;
    Some(match reason {
        IneligibilityReason::Unknown
        | IneligibilityReason::NoActiveClaimPhase
        | IneligibilityReason::NoClaimConditionSet => {
            "This drop is not ready to be minted.".to_owned()
        }
        IneligibilityReason::NotEnoughTokens => "You don't have enough currency to mint.".to_owned(),
        IneligibilityReason::AddressNotAllowed if quantity > 1 => {
            format!("You are not eligible to mint {quantity} tokens.")
        }
        IneligibilityReason::AddressNotAllowed => {
            "You are not eligible to mint at this time.".to_owned()
        }
        IneligibilityReason::Other(code) if code.trim().is_empty() => {
            BLANK_REASON_MESSAGE.to_owned()
        }
        other => other.description().to_owned(),
    })
}
