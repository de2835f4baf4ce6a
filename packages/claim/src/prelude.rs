pub use crate::address::Address;
pub use crate::amount::{format_units, parse_amount, AmountError, SUPPLY_SENTINEL};
pub use crate::calculator::{ButtonState, ClaimCalculator, ClaimView, DropNotice, SupplyState};
pub use crate::condition::{ClaimCondition, ContractMetadata, CurrencyMetadata, TokenSupply};
pub use crate::config::DropConfig;
pub use crate::ineligibility::{format_ineligibility, IneligibilityReason};
pub use crate::outcome::ClaimOutcome;
pub use crate::query::{fetch_snapshots, DropQueries, DropSnapshots, QueryState};
pub use anyhow::{anyhow, bail, Context, Result};
pub use cosmwasm_std::Uint256;
pub use std::fmt::Display;
pub use std::str::FromStr;
