//! CLI entry point for the court listing scraper.

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info};

mod app;
mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    app::init_tracing(args.default_log_level());

    debug!(?args, "CLI arguments parsed");
    info!("court-scraper starting");

    let files = app::run(&args).await?;

    info!(files = files.len(), "court-scraper finished");
    Ok(())
}
