//! Periodic fetching

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use colored::*;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::MetarFetcher;
use crate::app::services::fetcher::ObservationStore;
use crate::cli::args::WatchArgs;

/// Fetch on an interval and print a line per published snapshot
pub async fn run_watch(args: WatchArgs, cancel: CancellationToken) -> Result<()> {
    if args.interval == 0 {
        anyhow::bail!("Interval must be at least one second");
    }

    let config = args.source.to_config();
    let store = Arc::new(ObservationStore::new());
    let fetcher = Arc::new(
        MetarFetcher::http(config, store.clone()).context("Invalid fetch configuration")?,
    );
    let mut updates = store.subscribe();

    let worker = {
        let fetcher = Arc::clone(&fetcher);
        let cancel = cancel.clone();
        let interval = Duration::from_secs(args.interval);
        tokio::spawn(async move { fetcher.run_periodic(interval, cancel).await })
    };

    info!("Watching {} every {}s", fetcher.config().source_url, args.interval);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = updates.borrow_and_update().clone();
                let vfr = snapshot
                    .observations
                    .iter()
                    .filter(|o| o.category() == crate::FlightCategory::Vfr)
                    .count();
                println!(
                    "{} cycle {} {} observations ({} VFR)",
                    chrono::Utc::now().format("%H:%M:%S").to_string().dimmed(),
                    snapshot.cycle.to_string().bright_white(),
                    snapshot.len().to_string().bright_white().bold(),
                    vfr.to_string().bright_green()
                );
            }
        }
    }

    worker.await.context("Periodic fetch task failed")?;
    Ok(())
}
