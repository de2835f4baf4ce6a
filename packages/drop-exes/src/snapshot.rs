//! Drop reads served from a YAML snapshot of contract state.
//!
//! The file is re-read on every query so that edits show up on the next page
//! load. Sections missing from the file are reported as failed reads.

use std::{collections::HashMap, path::PathBuf};

use anyhow::{Context, Result};
use claim::prelude::*;

#[derive(serde::Deserialize, Debug)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct SnapshotContents {
    /// Contract the snapshot was taken from. Reads for any other contract fail.
    contract: Option<Address>,
    metadata: Option<ContractMetadata>,
    token_supply: Option<TokenSupply>,
    claim_conditions: Option<Vec<ClaimCondition>>,
    /// Index into `claim_conditions` of the phase currently open
    active_condition: Option<usize>,
    #[serde(default)]
    eligibility: EligibilityContents,
}

#[derive(serde::Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct EligibilityContents {
    /// Reasons for wallets without an entry in `wallets`
    #[serde(default)]
    default: Vec<IneligibilityReason>,
    #[serde(default)]
    wallets: HashMap<Address, Vec<IneligibilityReason>>,
}

/// [DropQueries] backed by a snapshot file on disk.
#[derive(Clone, Debug)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SnapshotFile { path: path.into() }
    }

    async fn load(&self, contract: Address) -> Result<SnapshotContents> {
        let raw = fs_err::tokio::read_to_string(&self.path).await?;
        let contents: SnapshotContents = serde_yaml::from_str(&raw)
            .with_context(|| format!("Could not parse snapshot {}", self.path.display()))?;
        if let Some(expected) = contents.contract {
            anyhow::ensure!(
                expected == contract,
                "Snapshot {} is for contract {expected}, not {contract}",
                self.path.display()
            );
        }
        Ok(contents)
    }
}

impl DropQueries for SnapshotFile {
    async fn active_claim_condition(
        &self,
        contract: Address,
        _wallet: Option<Address>,
    ) -> Result<ClaimCondition> {
        let contents = self.load(contract).await?;
        let index = contents
            .active_condition
            .context("No active claim condition")?;
        contents
            .claim_conditions
            .unwrap_or_default()
            .into_iter()
            .nth(index)
            .with_context(|| format!("Active claim condition {index} does not exist"))
    }

    async fn claim_conditions(&self, contract: Address) -> Result<Vec<ClaimCondition>> {
        self.load(contract)
            .await?
            .claim_conditions
            .context("Snapshot has no claim conditions")
    }

    async fn ineligibility_reasons(
        &self,
        contract: Address,
        _quantity: u64,
        wallet: Option<Address>,
    ) -> Result<Vec<IneligibilityReason>> {
        let mut eligibility = self.load(contract).await?.eligibility;
        Ok(match wallet {
            None => vec![IneligibilityReason::NoWallet],
            Some(wallet) => eligibility
                .wallets
                .remove(&wallet)
                .unwrap_or(eligibility.default),
        })
    }

    async fn token_supply(&self, contract: Address) -> Result<TokenSupply> {
        self.load(contract)
            .await?
            .token_supply
            .context("Snapshot has no token supply")
    }

    async fn contract_metadata(&self, contract: Address) -> Result<ContractMetadata> {
        self.load(contract)
            .await?
            .metadata
            .context("Snapshot has no contract metadata")
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const SNAPSHOT: &str = r#"
contract: "0x00000000000000000000000000000000000000aa"
metadata:
  name: GURS
  image: /hero.png
token-supply:
  value: "250"
claim-conditions:
  - start-time: 2024-01-01T00:00:00Z
    available-supply: "750"
    max-claimable-supply: "1000"
    currency:
      value: "0"
      decimals: 18
      symbol: AVAX
active-condition: 0
eligibility:
  default: []
  wallets:
    "0x00000000000000000000000000000000000000bb": [address-not-allowed]
"#;

    fn contract() -> Address {
        "0x00000000000000000000000000000000000000aa".parse().unwrap()
    }

    fn write(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn reads_each_section() {
        let file = write(SNAPSHOT);
        let source = SnapshotFile::new(file.path());

        let active = source
            .active_claim_condition(contract(), None)
            .await
            .unwrap();
        assert_eq!(active.available_supply.as_deref(), Some("750"));
        assert_eq!(source.claim_conditions(contract()).await.unwrap().len(), 1);
        assert_eq!(
            source.token_supply(contract()).await.unwrap(),
            TokenSupply::new(250u64)
        );
        assert_eq!(
            source.contract_metadata(contract()).await.unwrap().name,
            "GURS"
        );
    }

    #[tokio::test]
    async fn eligibility_per_wallet() {
        let file = write(SNAPSHOT);
        let source = SnapshotFile::new(file.path());
        let blocked: Address = "0x00000000000000000000000000000000000000bb".parse().unwrap();

        assert_eq!(
            source
                .ineligibility_reasons(contract(), 1, None)
                .await
                .unwrap(),
            vec![IneligibilityReason::NoWallet]
        );
        assert_eq!(
            source
                .ineligibility_reasons(contract(), 1, Some(blocked))
                .await
                .unwrap(),
            vec![IneligibilityReason::AddressNotAllowed]
        );
        assert!(source
            .ineligibility_reasons(contract(), 1, Some(Address::ZERO))
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn missing_sections_fail() {
        let file = write("metadata:\n  name: Empty\n");
        let source = SnapshotFile::new(file.path());
        source
            .active_claim_condition(contract(), None)
            .await
            .unwrap_err();
        source.token_supply(contract()).await.unwrap_err();
        source.claim_conditions(contract()).await.unwrap_err();
        assert!(source.contract_metadata(contract()).await.is_ok());
    }

    #[tokio::test]
    async fn wrong_contract_fails() {
        let file = write(SNAPSHOT);
        let source = SnapshotFile::new(file.path());
        let err = source.token_supply(Address::ZERO).await.unwrap_err();
        assert!(err.to_string().contains("not 0x0000000000000000000000000000000000000000"));
    }

    #[tokio::test]
    async fn missing_file_fails() {
        let source = SnapshotFile::new("/nonexistent/snapshot.yaml");
        source.token_supply(contract()).await.unwrap_err();
    }
}
