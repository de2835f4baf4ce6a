//! Result of the delegated claim transaction.

use serde::{Deserialize, Serialize};

/// What the wallet reported after the user pressed the claim button.
///
/// The transaction itself is submitted and retried by the wallet; this only
/// drives the one-shot notification shown afterwards.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum ClaimOutcome {
    /// The claim transaction was confirmed
    Success,
    /// The wallet or chain rejected the claim
    Error {
        /// Error text from the wallet, shown as-is
        message: String,
    },
}

impl ClaimOutcome {
    /// Text of the notification shown to the user
    pub fn notification(&self) -> &str {
        match self {
            ClaimOutcome::Success => "Claimed!",
            ClaimOutcome::Error { message } => message,
        }
    }

    #[allow(missing_docs)]
    pub fn is_success(&self) -> bool {
        matches!(self, ClaimOutcome::Success)
    }
}
