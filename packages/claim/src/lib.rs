//! Claim eligibility and pricing derivation for a token drop contract

#![deny(missing_docs)]

/// EVM address helpers
pub mod address;
/// Token amount parsing and formatting
pub mod amount;
pub mod calculator;
pub mod condition;
pub mod config;
pub mod ineligibility;
pub mod outcome;
/// Exports very commonly used items into the prelude glob
pub mod prelude;
pub mod query;
