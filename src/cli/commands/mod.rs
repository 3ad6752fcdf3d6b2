//! Command implementations for the METAR ingest CLI
//!
//! Each command lives in its own module:
//! - `fetch`: one download cycle, then print the snapshot
//! - `watch`: periodic download until cancelled
//! - `parse`: parse a snapshot file already on disk

pub mod fetch;
pub mod parse;
pub mod shared;
pub mod watch;

use anyhow::Result;
use tokio_util::sync::CancellationToken;

use crate::cli::args::{Args, Commands};

/// Dispatch to the subcommand handler
pub async fn run(args: Args, cancel: CancellationToken) -> Result<()> {
    shared::setup_logging(&args);

    match args.command {
        Some(Commands::Fetch(fetch_args)) => fetch::run_fetch(fetch_args, cancel).await,
        Some(Commands::Watch(watch_args)) => watch::run_watch(watch_args, cancel).await,
        Some(Commands::Parse(parse_args)) => parse::run_parse(parse_args).await,
        None => anyhow::bail!("No command given"),
    }
}
