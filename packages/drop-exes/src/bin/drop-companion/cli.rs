use std::{net::SocketAddr, num::NonZeroU64, path::PathBuf};

use anyhow::Result;
use claim::prelude::{Address, DropConfig};
use drop_exes::build_version;
use tracing_subscriber::{
    fmt, prelude::__tracing_subscriber_SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

#[derive(clap::Parser)]
#[clap(version = build_version())]
pub(crate) struct Opt {
    #[clap(long, short, global = true)]
    verbose: bool,
    /// Token drop contract address. Falls back to the zero address.
    #[clap(long, env = "TOKEN_DROP_CONTRACT_ADDRESS", global = true)]
    pub(crate) contract: Option<Address>,
    /// Number of tokens requested per claim
    #[clap(long, env = "TOKEN_DROP_QUANTITY", default_value_t = NonZeroU64::MIN, global = true)]
    pub(crate) quantity: NonZeroU64,
    /// YAML snapshot of the drop contract state
    #[clap(
        long,
        env = "TOKEN_DROP_SNAPSHOT",
        default_value = "assets/snapshot.yaml",
        global = true
    )]
    pub(crate) snapshot: PathBuf,
    /// Seconds to wait on each read before reporting it as still loading
    #[clap(long, env = "TOKEN_DROP_READ_TIMEOUT", default_value_t = 5, global = true)]
    pub(crate) read_timeout_seconds: u64,
    #[clap(subcommand)]
    pub(crate) sub: Sub,
}

#[derive(clap::Subcommand)]
pub(crate) enum Sub {
    /// Serve the claim page
    Serve {
        #[clap(flatten)]
        serve: ServeOpt,
    },
    /// Print the derived claim state
    Status {
        /// Wallet to check eligibility for
        #[clap(long)]
        wallet: Option<Address>,
    },
}

#[derive(clap::Parser, Clone, Debug)]
pub(crate) struct ServeOpt {
    #[clap(long, default_value = "[::]:3000", env = "TOKEN_DROP_BIND")]
    pub(crate) bind: SocketAddr,
    /// Request timeout in seconds
    #[clap(long, env = "TOKEN_DROP_REQUEST_TIMEOUT", default_value_t = 15)]
    pub(crate) request_timeout_seconds: u64,
}

impl Opt {
    pub(crate) fn drop_config(&self) -> DropConfig {
        DropConfig::from_optional(self.contract).with_quantity(self.quantity)
    }

    pub(crate) fn init_logger(&self) -> Result<()> {
        let env_filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if self.verbose {
            EnvFilter::try_new(format!(
                "{}=debug,gurs_drop_claim=debug,info",
                env!("CARGO_CRATE_NAME")
            ))?
        } else {
            EnvFilter::try_new("info")?
        };

        tracing_subscriber::registry()
            .with(fmt::Layer::default().and_then(env_filter))
            .init();

        tracing::debug!("Debug logging enabled");
        Ok(())
    }
}
