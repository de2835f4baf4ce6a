//! Status of the external reads feeding the calculator.

use std::{future::Future, time::Duration};

use serde::Serialize;

use crate::{
    address::Address,
    condition::{ClaimCondition, ContractMetadata, TokenSupply},
    config::DropConfig,
    ineligibility::IneligibilityReason,
};

/// Status of a single asynchronous read.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "status", content = "data")]
pub enum QueryState<T> {
    /// Not resolved yet
    Loading,
    /// Resolved with data
    Success(T),
    /// Failed, with the reader's error message
    Error(String),
}

impl<T> QueryState<T> {
    /// Is the read still outstanding?
    pub fn is_loading(&self) -> bool {
        matches!(self, QueryState::Loading)
    }

    /// Did the read complete successfully?
    pub fn is_success(&self) -> bool {
        matches!(self, QueryState::Success(_))
    }

    /// Did the read fail?
    pub fn is_error(&self) -> bool {
        matches!(self, QueryState::Error(_))
    }

    /// Data of a successful read
    pub fn data(&self) -> Option<&T> {
        match self {
            QueryState::Success(data) => Some(data),
            QueryState::Loading | QueryState::Error(_) => None,
        }
    }
}

impl<T> From<anyhow::Result<T>> for QueryState<T> {
    fn from(res: anyhow::Result<T>) -> Self {
        match res {
            Ok(data) => QueryState::Success(data),
            Err(e) => QueryState::Error(format!("{e:#}")),
        }
    }
}

/// The five reads a claim page depends on, each in its own state.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct DropSnapshots {
    /// Phase currently applying to the connected wallet
    pub active_claim_condition: QueryState<ClaimCondition>,
    /// Every phase configured on the contract
    pub claim_conditions: QueryState<Vec<ClaimCondition>>,
    /// Why the connected wallet cannot claim the configured quantity
    pub ineligibility_reasons: QueryState<Vec<IneligibilityReason>>,
    /// Tokens claimed so far
    pub claimed_supply: QueryState<TokenSupply>,
    #[allow(missing_docs)]
    pub contract_metadata: QueryState<ContractMetadata>,
}

impl DropSnapshots {
    /// Every read still outstanding
    pub fn loading() -> Self {
        DropSnapshots {
            active_claim_condition: QueryState::Loading,
            claim_conditions: QueryState::Loading,
            ineligibility_reasons: QueryState::Loading,
            claimed_supply: QueryState::Loading,
            contract_metadata: QueryState::Loading,
        }
    }
}

/// Read access to a token drop contract.
///
/// Implemented by whatever talks to the chain. A `None` wallet means no wallet
/// is connected.
pub trait DropQueries {
    /// Phase currently applying to the wallet
    fn active_claim_condition(
        &self,
        contract: Address,
        wallet: Option<Address>,
    ) -> impl Future<Output = anyhow::Result<ClaimCondition>> + Send;

    /// Every phase configured on the contract
    fn claim_conditions(
        &self,
        contract: Address,
    ) -> impl Future<Output = anyhow::Result<Vec<ClaimCondition>>> + Send;

    /// Why the wallet cannot claim the given quantity, empty when it can
    fn ineligibility_reasons(
        &self,
        contract: Address,
        quantity: u64,
        wallet: Option<Address>,
    ) -> impl Future<Output = anyhow::Result<Vec<IneligibilityReason>>> + Send;

    /// Tokens claimed so far
    fn token_supply(
        &self,
        contract: Address,
    ) -> impl Future<Output = anyhow::Result<TokenSupply>> + Send;

    /// Name and image of the contract
    fn contract_metadata(
        &self,
        contract: Address,
    ) -> impl Future<Output = anyhow::Result<ContractMetadata>> + Send;
}

/// Issue all reads concurrently and collect their states.
///
/// A read that has not resolved within `timeout` is reported as
/// [QueryState::Loading]. Failures are logged and kept as [QueryState::Error].
pub async fn fetch_snapshots<Q: DropQueries>(
    queries: &Q,
    config: &DropConfig,
    wallet: Option<Address>,
    timeout: Duration,
) -> DropSnapshots {
    let contract = config.contract;
    let quantity = config.quantity.get();
    let (active, conditions, reasons, supply, metadata) = tokio::join!(
        bounded(
            "active claim condition",
            timeout,
            queries.active_claim_condition(contract, wallet)
        ),
        bounded("claim conditions", timeout, queries.claim_conditions(contract)),
        bounded(
            "ineligibility reasons",
            timeout,
            queries.ineligibility_reasons(contract, quantity, wallet)
        ),
        bounded("token supply", timeout, queries.token_supply(contract)),
        bounded(
            "contract metadata",
            timeout,
            queries.contract_metadata(contract)
        ),
    );
    DropSnapshots {
        active_claim_condition: active,
        claim_conditions: conditions,
        ineligibility_reasons: reasons,
        claimed_supply: supply,
        contract_metadata: metadata,
    }
}

async fn bounded<T>(
    name: &'static str,
    timeout: Duration,
    read: impl Future<Output = anyhow::Result<T>>,
) -> QueryState<T> {
    match tokio::time::timeout(timeout, read).await {
        Ok(Ok(data)) => QueryState::Success(data),
        Ok(Err(e)) => {
            tracing::warn!("Read of {name} failed: {e:?}");
            QueryState::Error(format!("{e:#}"))
        }
        Err(_) => {
            tracing::debug!("Read of {name} still pending after {timeout:?}");
            QueryState::Loading
        }
    }
}
