//! Parsing statistics and result structures for METAR cache processing

use crate::app::models::WeatherObservation;
use serde::{Deserialize, Serialize};

/// Parsing result with observations and statistics
#[derive(Debug, Clone, Default)]
pub struct ParseResult {
    /// Observations in input line order
    pub observations: Vec<WeatherObservation>,

    pub stats: ParseStats,
}

/// Per-cycle parsing statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseStats {
    /// Data lines seen after the leading header line
    pub total_lines: usize,

    /// Observations produced
    pub observations_parsed: usize,

    /// Lines dropped for having too few fields
    pub skipped_short: usize,

    /// Lines dropped by the station prefix filter
    pub filtered_prefix: usize,

    /// Column header rows found among the data lines
    pub header_rows: usize,

    /// Records dropped because a coordinate did not parse
    pub rejected_coordinates: usize,

    /// Records kept with a coordinate replaced by 0.0
    pub coordinate_fallbacks: usize,
}

impl ParseStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines that did not produce an observation
    pub fn lines_dropped(&self) -> usize {
        self.skipped_short + self.filtered_prefix + self.header_rows + self.rejected_coordinates
    }

    /// Share of data lines that produced an observation, as a percentage
    pub fn yield_rate(&self) -> f64 {
        if self.total_lines == 0 {
            0.0
        } else {
            (self.observations_parsed as f64 / self.total_lines as f64) * 100.0
        }
    }
}
