//! Single fetch cycle

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::shared::{describe_outcome, print_snapshot};
use crate::MetarFetcher;
use crate::app::services::fetcher::ObservationStore;
use crate::cli::args::FetchArgs;

/// Download, parse and print the current snapshot
///
/// Any outcome other than a publish is reported as an error so the exit
/// code reflects whether fresh data was obtained.
pub async fn run_fetch(args: FetchArgs, cancel: CancellationToken) -> Result<()> {
    let config = args.source.to_config();
    let store = Arc::new(ObservationStore::new());
    let fetcher =
        MetarFetcher::http(config, store.clone()).context("Invalid fetch configuration")?;

    let outcome = tokio::select! {
        outcome = fetcher.fetch_latest() => outcome,
        _ = cancel.cancelled() => anyhow::bail!("Fetch interrupted"),
    };
    info!("{}", describe_outcome(&outcome));

    if !outcome.is_published() {
        anyhow::bail!("No snapshot published ({})", describe_outcome(&outcome));
    }

    print_snapshot(&store.current(), &args.output)
}
