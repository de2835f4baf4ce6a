use std::{path::Path, time::Duration};

use claim::prelude::*;
use drop_exes::snapshot::SnapshotFile;

pub(crate) struct App {
    pub(crate) calculator: ClaimCalculator,
    pub(crate) source: SnapshotFile,
    pub(crate) read_timeout: Duration,
}

impl App {
    pub(crate) fn new(config: DropConfig, snapshot: &Path, read_timeout: Duration) -> App {
        tracing::info!(
            "Reading drop {} from snapshot {}",
            config.contract,
            snapshot.display()
        );
        App {
            calculator: ClaimCalculator::new(config),
            source: SnapshotFile::new(snapshot),
            read_timeout,
        }
    }

    pub(crate) fn config(&self) -> &DropConfig {
        self.calculator.config()
    }

    /// Read the current drop state for a wallet and derive what to show.
    pub(crate) async fn claim_view(&self, wallet: Option<Address>) -> ClaimView {
        let snapshots =
            fetch_snapshots(&self.source, self.config(), wallet, self.read_timeout).await;
        self.calculator.derive(&snapshots, chrono::Utc::now())
    }
}
