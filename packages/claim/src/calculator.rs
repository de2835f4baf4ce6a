//! Derive the claim button and supply display from raw query states.
//!
//! Everything here is pure: the same [DropSnapshots] and `now` always give the
//! same [ClaimView]. Malformed upstream numbers never produce an error; each
//! one is replaced with the default documented on the function reading it.

use chrono::{DateTime, Utc};
use cosmwasm_std::Uint256;
use serde::Serialize;

use crate::{
    amount::{format_units, parse_amount, AmountError, SUPPLY_SENTINEL},
    condition::{ClaimCondition, ContractMetadata},
    config::DropConfig,
    ineligibility::format_ineligibility,
    query::{DropSnapshots, QueryState},
};

/// Decimals assumed when the currency does not report any
pub const DEFAULT_CURRENCY_DECIMALS: u8 = 18;

/// State of the claim control.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct ButtonState {
    /// Text on the button
    pub label: String,
    /// True unless the wallet can claim right now
    pub disabled: bool,
    /// True while eligibility is still being checked
    pub loading: bool,
}

/// Supply figures shown alongside the button.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct SupplyState {
    /// Tokens claimed so far
    pub claimed: Uint256,
    /// Tokens still claimable, never negative
    pub available: Uint256,
    /// Claimed plus available, [None] when unbounded
    pub total: Option<Uint256>,
}

impl SupplyState {
    /// Total for display, empty when unbounded
    pub fn total_display(&self) -> String {
        self.total.map(|total| total.to_string()).unwrap_or_default()
    }
}

/// Banner shown above the claim card.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DropNotice {
    /// The active phase has not opened yet
    StartingSoon,
    /// No phase with a non-zero cap is configured
    NoClaimConditionSet,
}

impl DropNotice {
    /// Text of the banner
    pub fn message(self) -> &'static str {
        match self {
            DropNotice::StartingSoon => "Drop is starting soon. Please check back later.",
            DropNotice::NoClaimConditionSet => {
                "This drop is not ready to be minted yet. (No claim condition set)"
            }
        }
    }
}

/// Everything the claim page displays.
#[allow(missing_docs)]
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct ClaimView {
    pub button: ButtonState,
    pub supply: SupplyState,
    /// Price of one token in base units
    pub price_per_unit: Uint256,
    /// Formatted price for the configured quantity, e.g. `0.5 AVAX`
    pub price_to_claim: String,
    pub sold_out: bool,
    pub can_claim: bool,
    /// The active phase is still loading
    pub is_loading: bool,
    pub notices: Vec<DropNotice>,
    pub metadata: Option<ContractMetadata>,
}

/// How the active phase reports its remaining supply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AvailableSupply {
    /// Zero, absent or negative
    Exhausted,
    Remaining(Uint256),
    /// Not an integer, which is how unlimited phases are reported
    Unparsable,
}

impl AvailableSupply {
    fn read(condition: &ClaimCondition) -> Self {
        let Some(raw) = condition.available_supply.as_deref() else {
            return AvailableSupply::Exhausted;
        };
        match parse_amount(raw) {
            Ok(amount) if amount.is_zero() => AvailableSupply::Exhausted,
            Ok(amount) => AvailableSupply::Remaining(amount),
            Err(AmountError::Empty | AmountError::Negative { .. }) => AvailableSupply::Exhausted,
            Err(e @ (AmountError::Invalid { .. } | AmountError::Overflow { .. })) => {
                tracing::debug!("Treating available supply as unbounded: {e}");
                AvailableSupply::Unparsable
            }
        }
    }

    fn bounded_amount(self) -> Uint256 {
        match self {
            AvailableSupply::Exhausted => Uint256::zero(),
            AvailableSupply::Remaining(amount) => amount,
            AvailableSupply::Unparsable => Uint256::from(SUPPLY_SENTINEL),
        }
    }
}

/// Computes a [ClaimView] for one configured drop.
#[derive(Clone, Debug)]
pub struct ClaimCalculator {
    config: DropConfig,
}

impl ClaimCalculator {
    #[allow(missing_docs)]
    pub fn new(config: DropConfig) -> Self {
        ClaimCalculator { config }
    }

    #[allow(missing_docs)]
    pub fn config(&self) -> &DropConfig {
        &self.config
    }

    /// Derive the full view from the current query states.
    pub fn derive(&self, snapshots: &DropSnapshots, now: DateTime<Utc>) -> ClaimView {
        let active = &snapshots.active_claim_condition;
        let reasons = &snapshots.ineligibility_reasons;

        let supply = self.supply(snapshots);
        let sold_out = self.is_sold_out(active);
        let can_claim = active.is_success()
            && reasons.data().is_some_and(|reasons| reasons.is_empty())
            && !sold_out;
        let price_per_unit = self.price_per_unit(active);
        let price_to_claim = self.price_to_claim(active, price_per_unit);

        let is_loading = active.is_loading();
        let button_loading = is_loading || reasons.is_loading();

        let label = if sold_out {
            "Sold Out".to_owned()
        } else if can_claim {
            if price_per_unit.is_zero() {
                "Claim (Free)".to_owned()
            } else {
                format!("Claim ({price_to_claim})")
            }
        } else if let Some(message) = reasons
            .data()
            .and_then(|reasons| format_ineligibility(reasons, self.config.quantity.get()))
        {
            message
        } else if button_loading {
            "Checking eligibility...".to_owned()
        } else {
            "Claiming not available".to_owned()
        };

        ClaimView {
            button: ButtonState {
                label,
                disabled: !can_claim,
                loading: button_loading,
            },
            supply,
            price_per_unit,
            price_to_claim,
            sold_out,
            can_claim,
            is_loading,
            notices: self.notices(snapshots, now),
            metadata: snapshots.contract_metadata.data().cloned(),
        }
    }

    /// Available supply is 0 until the active phase loads. Claimed defaults to 0.
    fn supply(&self, snapshots: &DropSnapshots) -> SupplyState {
        let available = snapshots
            .active_claim_condition
            .data()
            .map_or(Uint256::zero(), |condition| {
                AvailableSupply::read(condition).bounded_amount()
            });
        let claimed = snapshots
            .claimed_supply
            .data()
            .and_then(|supply| supply.value.as_deref())
            .map_or(Uint256::zero(), |raw| {
                parse_amount(raw).unwrap_or_else(|e| {
                    tracing::debug!("Treating claimed supply as zero: {e}");
                    Uint256::zero()
                })
            });
        let total = available
            .checked_add(claimed)
            .ok()
            .filter(|total| *total < Uint256::from(SUPPLY_SENTINEL));
        SupplyState {
            claimed,
            available,
            total,
        }
    }

    /// Only a loaded phase can report the drop as sold out.
    ///
    /// With a loaded phase, claimed can only equal a bounded total when nothing
    /// is available, so the available supply alone decides. An unparsable
    /// available supply never counts as sold out.
    fn is_sold_out(&self, active: &QueryState<ClaimCondition>) -> bool {
        active.data().is_some_and(|condition| {
            AvailableSupply::read(condition) == AvailableSupply::Exhausted
        })
    }

    /// Zero when absent or malformed.
    fn price_per_unit(&self, active: &QueryState<ClaimCondition>) -> Uint256 {
        active
            .data()
            .and_then(|condition| condition.currency.value.as_deref())
            .map_or(Uint256::zero(), |raw| {
                parse_amount(raw).unwrap_or_else(|e| {
                    tracing::debug!("Treating price as zero: {e}");
                    Uint256::zero()
                })
            })
    }

    fn price_to_claim(
        &self,
        active: &QueryState<ClaimCondition>,
        price_per_unit: Uint256,
    ) -> String {
        let currency = active.data().map(|condition| &condition.currency);
        let decimals = currency
            .and_then(|currency| currency.decimals)
            .unwrap_or(DEFAULT_CURRENCY_DECIMALS);
        let symbol = currency
            .and_then(|currency| currency.symbol.as_deref())
            .unwrap_or_default();
        let total = price_per_unit.saturating_mul(Uint256::from(self.config.quantity.get()));
        let amount = format_units(total, decimals);
        if symbol.is_empty() {
            amount
        } else {
            format!("{amount} {symbol}")
        }
    }

    fn notices(&self, snapshots: &DropSnapshots, now: DateTime<Utc>) -> Vec<DropNotice> {
        let active = &snapshots.active_claim_condition;
        let conditions = snapshots.claim_conditions.data();

        let mut notices = vec![];
        let phase_pending = conditions.is_some_and(|conditions| !conditions.is_empty())
            && active.is_error();
        let phase_not_open = active
            .data()
            .is_some_and(|condition| condition.start_time > now);
        if phase_pending || phase_not_open {
            notices.push(DropNotice::StartingSoon);
        }
        if conditions.is_some_and(|conditions| {
            conditions.is_empty() || conditions.iter().all(ClaimCondition::has_zero_cap)
        }) {
            notices.push(DropNotice::NoClaimConditionSet);
        }
        notices
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU64;

    use chrono::TimeZone;

    use super::*;
    use crate::{
        condition::{CurrencyMetadata, TokenSupply},
        ineligibility::IneligibilityReason,
    };

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn condition(available: &str, price: &str) -> ClaimCondition {
        ClaimCondition {
            start_time: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            available_supply: Some(available.to_owned()),
            max_claimable_supply: "1000000".to_owned(),
            currency: CurrencyMetadata {
                value: Some(price.to_owned()),
                decimals: Some(18),
                symbol: Some("AVAX".to_owned()),
            },
        }
    }

    fn snapshots(
        active: QueryState<ClaimCondition>,
        reasons: QueryState<Vec<IneligibilityReason>>,
        claimed: u64,
    ) -> DropSnapshots {
        let conditions = match &active {
            QueryState::Success(condition) => QueryState::Success(vec![condition.clone()]),
            _ => QueryState::Loading,
        };
        DropSnapshots {
            active_claim_condition: active,
            claim_conditions: conditions,
            ineligibility_reasons: reasons,
            claimed_supply: QueryState::Success(TokenSupply::new(claimed)),
            contract_metadata: QueryState::Success(ContractMetadata {
                name: "GURS".to_owned(),
                image: Some("/hero.png".to_owned()),
            }),
        }
    }

    fn derive(snapshots: &DropSnapshots) -> ClaimView {
        ClaimCalculator::new(DropConfig::default()).derive(snapshots, now())
    }

    #[test]
    fn sold_out_when_nothing_available() {
        let view = derive(&snapshots(
            QueryState::Success(condition("0", "0")),
            QueryState::Success(vec![]),
            500,
        ));
        assert!(view.sold_out);
        assert!(!view.can_claim);
        assert_eq!(view.button.label, "Sold Out");
        assert!(view.button.disabled);
        assert_eq!(view.supply.total_display(), "500");
    }

    #[test]
    fn sold_out_beats_everything() {
        for available in ["0", "-3", ""] {
            let view = derive(&snapshots(
                QueryState::Success(condition(available, "5")),
                QueryState::Success(vec![IneligibilityReason::AlreadyClaimed]),
                2_000_000_000,
            ));
            assert!(view.sold_out, "available {available:?}");
            assert_eq!(view.button.label, "Sold Out");
            assert_eq!(view.supply.available, Uint256::zero());
        }
    }

    #[test]
    fn missing_available_supply_is_sold_out() {
        let mut active = condition("0", "0");
        active.available_supply = None;
        let view = derive(&snapshots(
            QueryState::Success(active),
            QueryState::Success(vec![]),
            1,
        ));
        assert!(view.sold_out);
    }

    #[test]
    fn free_claim_just_below_sentinel() {
        let view = derive(&snapshots(
            QueryState::Success(condition("999999999", "0")),
            QueryState::Success(vec![]),
            1,
        ));
        assert!(!view.sold_out);
        assert!(view.can_claim);
        assert_eq!(view.button.label, "Claim (Free)");
        assert!(!view.button.disabled);
        assert!(!view.button.loading);
        assert_eq!(view.supply.total, None);
        assert_eq!(view.supply.total_display(), "");
    }

    #[test]
    fn paid_claim_shows_price() {
        let view = derive(&snapshots(
            QueryState::Success(condition("100", "500000000000000000")),
            QueryState::Success(vec![]),
            20,
        ));
        assert!(view.can_claim);
        assert_eq!(view.price_to_claim, "0.5 AVAX");
        assert_eq!(view.button.label, "Claim (0.5 AVAX)");
        assert_eq!(view.supply.total_display(), "120");
    }

    #[test]
    fn price_scales_with_quantity() {
        let config = DropConfig::default().with_quantity(NonZeroU64::new(4).unwrap());
        let view = ClaimCalculator::new(config).derive(
            &snapshots(
                QueryState::Success(condition("100", "500000000000000000")),
                QueryState::Success(vec![]),
                0,
            ),
            now(),
        );
        assert_eq!(view.button.label, "Claim (2.0 AVAX)");
    }

    #[test]
    fn unlimited_supply_is_unbounded_and_not_sold_out() {
        let view = derive(&snapshots(
            QueryState::Success(condition("unlimited", "0")),
            QueryState::Success(vec![]),
            42,
        ));
        assert!(!view.sold_out);
        assert_eq!(view.supply.available, Uint256::from(SUPPLY_SENTINEL));
        assert_eq!(view.supply.total_display(), "");
        assert_eq!(view.button.label, "Claim (Free)");
    }

    #[test]
    fn ineligible_wallet_gets_reason() {
        let view = derive(&snapshots(
            QueryState::Success(condition("100", "0")),
            QueryState::Success(vec!["not-allowlisted".into()]),
            1,
        ));
        assert!(!view.sold_out);
        assert!(!view.can_claim);
        assert_eq!(view.button.label, "You are not eligible to mint at this time.");
        assert!(view.button.disabled);
    }

    #[test]
    fn checking_eligibility_while_loading() {
        let view = derive(&snapshots(QueryState::Loading, QueryState::Loading, 1));
        assert!(!view.sold_out);
        assert!(view.is_loading);
        assert!(view.button.loading);
        assert_eq!(view.button.label, "Checking eligibility...");
    }

    #[test]
    fn reasons_loading_alone_still_checks() {
        let view = derive(&snapshots(
            QueryState::Success(condition("100", "0")),
            QueryState::Loading,
            1,
        ));
        assert!(!view.is_loading);
        assert!(view.button.loading);
        assert_eq!(view.button.label, "Checking eligibility...");
    }

    #[test]
    fn not_available_when_reads_fail() {
        let view = derive(&snapshots(
            QueryState::Error("rpc down".to_owned()),
            QueryState::Error("rpc down".to_owned()),
            1,
        ));
        assert!(!view.sold_out);
        assert!(!view.can_claim);
        assert!(!view.button.loading);
        assert_eq!(view.button.label, "Claiming not available");
    }

    #[test]
    fn errored_phase_is_not_sold_out() {
        let view = derive(&snapshots(
            QueryState::Error("no active phase".to_owned()),
            QueryState::Success(vec![]),
            500,
        ));
        assert_eq!(view.supply.total, Some(Uint256::from(500u64)));
        assert!(!view.sold_out);
        assert!(!view.can_claim);
        assert_eq!(view.button.label, "Claiming not available");
    }

    #[test]
    fn failed_reasons_block_claim() {
        let view = derive(&snapshots(
            QueryState::Success(condition("100", "0")),
            QueryState::Error("rpc down".to_owned()),
            1,
        ));
        assert!(!view.can_claim);
        assert_eq!(view.button.label, "Claiming not available");
    }

    #[test]
    fn malformed_claimed_supply_defaults_to_zero() {
        let mut snapshots = snapshots(
            QueryState::Success(condition("10", "0")),
            QueryState::Success(vec![]),
            0,
        );
        snapshots.claimed_supply = QueryState::Success(TokenSupply {
            value: Some("lots".to_owned()),
        });
        let view = derive(&snapshots);
        assert_eq!(view.supply.claimed, Uint256::zero());
        assert_eq!(view.supply.total_display(), "10");
        assert!(view.can_claim);
    }

    #[test]
    fn malformed_price_is_free() {
        let view = derive(&snapshots(
            QueryState::Success(condition("10", "a few")),
            QueryState::Success(vec![]),
            0,
        ));
        assert_eq!(view.price_per_unit, Uint256::zero());
        assert_eq!(view.button.label, "Claim (Free)");
    }

    #[test]
    fn currency_defaults() {
        let mut active = condition("10", "1000000000000000000");
        active.currency.decimals = None;
        active.currency.symbol = None;
        let view = derive(&snapshots(
            QueryState::Success(active),
            QueryState::Success(vec![]),
            0,
        ));
        assert_eq!(view.price_to_claim, "1.0");
        assert_eq!(view.button.label, "Claim (1.0)");
    }

    #[test]
    fn zero_decimals_are_kept() {
        let mut active = condition("10", "25");
        active.currency.decimals = Some(0);
        let view = derive(&snapshots(
            QueryState::Success(active),
            QueryState::Success(vec![]),
            0,
        ));
        assert_eq!(view.price_to_claim, "25.0 AVAX");
    }

    #[test]
    fn starting_soon_notice() {
        let mut active = condition("10", "0");
        active.start_time = now() + chrono::Duration::hours(1);
        let view = derive(&snapshots(
            QueryState::Success(active),
            QueryState::Success(vec![]),
            0,
        ));
        assert_eq!(view.notices, vec![DropNotice::StartingSoon]);

        let mut snapshots = snapshots(
            QueryState::Error("no active phase".to_owned()),
            QueryState::Success(vec![]),
            0,
        );
        snapshots.claim_conditions = QueryState::Success(vec![condition("10", "0")]);
        assert_eq!(derive(&snapshots).notices, vec![DropNotice::StartingSoon]);
    }

    #[test]
    fn no_claim_condition_notice() {
        let mut snapshots = snapshots(QueryState::Loading, QueryState::Loading, 0);
        snapshots.claim_conditions = QueryState::Success(vec![]);
        assert_eq!(derive(&snapshots).notices, vec![DropNotice::NoClaimConditionSet]);

        let mut zero_cap = condition("0", "0");
        zero_cap.max_claimable_supply = "0".to_owned();
        snapshots.claim_conditions = QueryState::Success(vec![zero_cap.clone(), zero_cap]);
        assert_eq!(derive(&snapshots).notices, vec![DropNotice::NoClaimConditionSet]);

        snapshots.claim_conditions = QueryState::Success(vec![condition("10", "0")]);
        assert!(derive(&snapshots).notices.is_empty());
    }

    #[test]
    fn derive_is_idempotent() {
        let snapshots = snapshots(
            QueryState::Success(condition("100", "7")),
            QueryState::Success(vec![IneligibilityReason::NoWallet]),
            3,
        );
        assert_eq!(derive(&snapshots), derive(&snapshots));
    }

    mod properties {
        use super::*;
        use quickcheck::quickcheck;

        quickcheck! {
            fn non_positive_available_is_sold_out(negative: bool, magnitude: u64, claimed: u64, price: u64, reason: bool) -> bool {
                let available = if negative { format!("-{magnitude}") } else { "0".to_owned() };
                let reasons = if reason { vec![IneligibilityReason::NotEnoughTokens] } else { vec![] };
                let view = derive(&snapshots(
                    QueryState::Success(condition(&available, &price.to_string())),
                    QueryState::Success(reasons),
                    claimed,
                ));
                view.sold_out && view.button.label == "Sold Out"
            }

            fn large_totals_are_unbounded(available: u64, claimed: u64) -> bool {
                let view = derive(&snapshots(
                    QueryState::Success(condition(&available.to_string(), "0")),
                    QueryState::Success(vec![]),
                    claimed,
                ));
                let sum = u128::from(available) + u128::from(claimed);
                if sum >= SUPPLY_SENTINEL {
                    view.supply.total_display().is_empty()
                } else {
                    view.supply.total_display() == sum.to_string()
                }
            }

            fn positive_available_is_never_sold_out(available: u64, claimed: u64) -> bool {
                let available = available.saturating_add(1);
                let view = derive(&snapshots(
                    QueryState::Success(condition(&available.to_string(), "0")),
                    QueryState::Success(vec![]),
                    claimed,
                ));
                !view.sold_out && view.can_claim
            }

            fn reasons_always_block(available: u64, selector: u8) -> bool {
                let reason = IneligibilityReason::KNOWN[usize::from(selector) % IneligibilityReason::KNOWN.len()].clone();
                let view = derive(&snapshots(
                    QueryState::Success(condition(&available.to_string(), "0")),
                    QueryState::Success(vec![reason]),
                    0,
                ));
                !view.can_claim && view.button.disabled
            }
        }
    }
}
