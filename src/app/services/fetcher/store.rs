//! Published observation state
//!
//! The store is a single-writer, many-reader slot holding the latest
//! complete snapshot. Each publish swaps in a whole new `Arc<Snapshot>`, so
//! readers see one cycle's records or the next, never a mix.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::watch;

use crate::app::models::{FlightCategory, WeatherObservation};
use crate::app::services::record_parser::ParseStats;

/// One fetch cycle's complete result set
#[derive(Debug, Clone, Default, Serialize)]
pub struct Snapshot {
    /// Fetch cycle that produced this snapshot (0 before any publish)
    pub cycle: u64,

    /// When the snapshot was published
    pub fetched_at: Option<DateTime<Utc>>,

    /// Observations in feed order
    pub observations: Vec<WeatherObservation>,

    pub stats: ParseStats,
}

impl Snapshot {
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Find a station's observation
    pub fn station(&self, station_id: &str) -> Option<&WeatherObservation> {
        self.observations
            .iter()
            .find(|o| o.station_id.eq_ignore_ascii_case(station_id))
    }

    /// Count observations per flight category, in [`FlightCategory::ALL`] order
    pub fn category_counts(&self) -> Vec<(FlightCategory, usize)> {
        FlightCategory::ALL
            .iter()
            .map(|&category| {
                let count = self
                    .observations
                    .iter()
                    .filter(|o| o.category() == category)
                    .count();
                (category, count)
            })
            .collect()
    }
}

/// Receiver of newly published snapshots
pub trait ObservationConsumer: Send + Sync {
    /// Called with each snapshot that replaces the previous one
    fn on_update(&self, snapshot: Arc<Snapshot>);
}

/// Latest published snapshot, observable through a watch channel
#[derive(Debug)]
pub struct ObservationStore {
    sender: watch::Sender<Arc<Snapshot>>,
}

impl Default for ObservationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ObservationStore {
    /// Create a store holding an empty snapshot
    pub fn new() -> Self {
        let (sender, _receiver) = watch::channel(Arc::new(Snapshot::default()));
        Self { sender }
    }

    /// The most recently published snapshot
    pub fn current(&self) -> Arc<Snapshot> {
        Arc::clone(&self.sender.borrow())
    }

    /// Subscribe to future publishes
    pub fn subscribe(&self) -> watch::Receiver<Arc<Snapshot>> {
        self.sender.subscribe()
    }
}

impl ObservationConsumer for ObservationStore {
    fn on_update(&self, snapshot: Arc<Snapshot>) {
        self.sender.send_replace(snapshot);
    }
}
