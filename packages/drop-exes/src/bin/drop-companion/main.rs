mod app;
mod cli;
mod endpoints;
mod status;

use std::time::Duration;

use anyhow::Result;
use app::App;
use clap::Parser;
use cli::{Opt, Sub};
use pid1::Pid1Settings;

#[tokio::main]
async fn main() -> Result<()> {
    main_inner().await
}

async fn main_inner() -> Result<()> {
    Pid1Settings::new().enable_log(true).launch()?;
    dotenvy::dotenv().ok();
    let opt = Opt::parse();
    opt.init_logger()?;
    let app = App::new(
        opt.drop_config(),
        &opt.snapshot,
        Duration::from_secs(opt.read_timeout_seconds),
    );
    match opt.sub {
        Sub::Serve { serve } => endpoints::launch(app, serve).await,
        Sub::Status { wallet } => status::print(&app, wallet).await,
    }
}
