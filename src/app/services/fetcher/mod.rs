//! Fetch orchestration for the METAR snapshot
//!
//! One fetch cycle retrieves the compressed snapshot, inflates it, keeps an
//! optional scratch copy of the text, parses it and publishes the result to
//! the consumer. No stage propagates an error to the caller: failures are
//! logged and reported as a [`FetchOutcome`], and the published state is
//! either left alone or replaced by an empty snapshot per
//! [`FailurePolicy`].
//!
//! Decompression and parsing run on the blocking pool so the async runtime
//! stays responsive. Every cycle takes a ticket; a cycle that finishes after
//! a newer one has already published is discarded rather than rolling the
//! consumer back to older data.

pub mod source;
pub mod store;


pub use source::{FileSource, HttpSource, SnapshotSource};
pub use store::{ObservationConsumer, ObservationStore, Snapshot};

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::Utc;
use tokio::sync::Mutex;
use tokio::task;
use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::app::services::decompressor::decompress;
use crate::app::services::record_parser::{ParseResult, RecordParser};
use crate::config::{FailurePolicy, FetchConfig};
use crate::{Error, Result};

/// How a fetch cycle ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// A new snapshot replaced the published one
    Published { cycle: u64, observations: usize },

    /// No snapshot bytes were received
    TransportFailed { cycle: u64, reason: String },

    /// The snapshot bytes did not inflate
    DecompressionFailed { cycle: u64, reason: String },

    /// The column header failed strict validation
    HeaderRejected { cycle: u64, reason: String },

    /// A newer cycle published first; this result was dropped
    Superseded { cycle: u64, newer: u64 },
}

impl FetchOutcome {
    pub fn cycle(&self) -> u64 {
        match self {
            FetchOutcome::Published { cycle, .. }
            | FetchOutcome::TransportFailed { cycle, .. }
            | FetchOutcome::DecompressionFailed { cycle, .. }
            | FetchOutcome::HeaderRejected { cycle, .. }
            | FetchOutcome::Superseded { cycle, .. } => *cycle,
        }
    }

    pub fn is_published(&self) -> bool {
        matches!(self, FetchOutcome::Published { .. })
    }
}

/// Fetch orchestrator publishing parsed snapshots to a consumer
pub struct MetarFetcher<S> {
    source: S,
    parser: RecordParser,
    config: FetchConfig,
    consumer: Arc<dyn ObservationConsumer>,
    next_cycle: AtomicU64,
    published_cycle: Mutex<u64>,
}

impl MetarFetcher<HttpSource> {
    /// Create a fetcher for the configured URL
    pub fn http(config: FetchConfig, consumer: Arc<dyn ObservationConsumer>) -> Result<Self> {
        config.validate()?;
        let source = HttpSource::new(&config)?;
        Ok(Self::new(source, config, consumer))
    }
}

impl<S: SnapshotSource> MetarFetcher<S> {
    /// Create a fetcher over any snapshot source
    pub fn new(source: S, config: FetchConfig, consumer: Arc<dyn ObservationConsumer>) -> Self {
        Self {
            source,
            parser: RecordParser::new(config.parser.clone()),
            config,
            consumer,
            next_cycle: AtomicU64::new(0),
            published_cycle: Mutex::new(0),
        }
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Run one fetch cycle
    pub async fn fetch_latest(&self) -> FetchOutcome {
        let cycle = self.next_cycle.fetch_add(1, Ordering::SeqCst) + 1;
        info!("Fetch cycle {} from {}", cycle, self.source.describe());

        let compressed = match self.source.fetch().await {
            Ok(bytes) => bytes,
            Err(e) => {
                error!("METAR download failed: {}", e);
                self.publish_failure(cycle).await;
                return FetchOutcome::TransportFailed {
                    cycle,
                    reason: e.to_string(),
                };
            }
        };

        let inflated = match run_blocking(move || decompress(&compressed)).await {
            Ok(bytes) => bytes,
            Err(e) => {
                error!("METAR decompression failed: {}", e);
                self.publish_failure(cycle).await;
                return FetchOutcome::DecompressionFailed {
                    cycle,
                    reason: e.to_string(),
                };
            }
        };

        if let Some(path) = &self.config.scratch_path {
            write_scratch(path, &inflated).await;
        }

        let parser = self.parser.clone();
        let parsed = run_blocking(move || {
            let text = String::from_utf8_lossy(&inflated);
            parser.parse(&text)
        })
        .await;

        let ParseResult {
            observations,
            stats,
        } = match parsed {
            Ok(result) => result,
            Err(e) => {
                error!("METAR parsing refused: {}", e);
                self.publish_failure(cycle).await;
                return FetchOutcome::HeaderRejected {
                    cycle,
                    reason: e.to_string(),
                };
            }
        };

        let count = observations.len();
        let snapshot = Snapshot {
            cycle,
            fetched_at: Some(Utc::now()),
            observations,
            stats,
        };

        match self.publish(snapshot).await {
            Ok(()) => {
                info!("Published {} observations (cycle {})", count, cycle);
                FetchOutcome::Published {
                    cycle,
                    observations: count,
                }
            }
            Err(newer) => FetchOutcome::Superseded { cycle, newer },
        }
    }

    /// Fetch repeatedly until cancelled
    ///
    /// The first cycle starts immediately; a slow cycle delays the next tick
    /// rather than bunching ticks up.
    pub async fn run_periodic(&self, interval: Duration, cancel: CancellationToken) {
        let mut ticker = time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("Periodic fetch stopped");
                    break;
                }
                _ = ticker.tick() => {
                    let outcome = self.fetch_latest().await;
                    debug!("Cycle {} finished: {:?}", outcome.cycle(), outcome);
                }
            }
        }
    }

    /// Hand a snapshot to the consumer unless a newer cycle already published
    async fn publish(&self, snapshot: Snapshot) -> std::result::Result<(), u64> {
        let mut published = self.published_cycle.lock().await;
        if snapshot.cycle < *published {
            warn!(
                "Dropping cycle {} result, cycle {} already published",
                snapshot.cycle, *published
            );
            return Err(*published);
        }

        *published = snapshot.cycle;
        self.consumer.on_update(Arc::new(snapshot));
        Ok(())
    }

    async fn publish_failure(&self, cycle: u64) {
        if self.config.failure_policy != FailurePolicy::PublishEmpty {
            return;
        }

        let empty = Snapshot {
            cycle,
            fetched_at: Some(Utc::now()),
            ..Snapshot::default()
        };
        if self.publish(empty).await.is_ok() {
            info!("Published empty snapshot after failed cycle {}", cycle);
        }
    }
}

/// Run CPU-bound work on the blocking pool, folding a panic into an error
async fn run_blocking<T, F>(work: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    task::spawn_blocking(work)
        .await
        .map_err(|e| Error::decompression(format!("Background task failed: {}", e)))?
}

/// Persist the decompressed text; failure only costs the debug copy
async fn write_scratch(path: &Path, contents: &[u8]) {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            if let Err(e) = tokio::fs::create_dir_all(parent).await {
                warn!("Cannot create scratch directory {}: {}", parent.display(), e);
                return;
            }
        }
    }

    match tokio::fs::write(path, contents).await {
        Ok(()) => debug!("Wrote {} bytes to {}", contents.len(), path.display()),
        Err(e) => warn!("Cannot write scratch file {}: {}", path.display(), e),
    }
}
