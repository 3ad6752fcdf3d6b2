//! Core METAR cache parser implementation
//!
//! This module drives line iteration: it skips the leading header line,
//! hands each data line to the record parser, and tallies what happened
//! to every line.

use tracing::{debug, info, warn};

use super::header::HeaderCheck;
use super::record::{LineOutcome, parse_line};
use super::stats::{ParseResult, ParseStats};
use crate::Result;
use crate::config::{HeaderPolicy, ParserOptions};

/// Parser for METAR cache CSV text
///
/// Stateless apart from its options; the same input always yields the same
/// sequence of reports (identity keys aside), in input line order.
#[derive(Debug, Clone, Default)]
pub struct RecordParser {
    options: ParserOptions,
}

impl RecordParser {
    /// Create a parser with the given options
    pub fn new(options: ParserOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Parse text, enforcing the header policy
    ///
    /// Under [`HeaderPolicy::Strict`] a missing or mismatched column header
    /// is an error; otherwise this never fails.
    pub fn parse(&self, text: &str) -> Result<ParseResult> {
        if self.options.header_policy == HeaderPolicy::Strict {
            HeaderCheck::inspect(text, self.options.min_fields).into_result()?;
            return Ok(self.parse_records(text));
        }
        Ok(self.parse_lenient(text))
    }

    /// Parse text, reporting header problems as warnings only
    pub fn parse_lenient(&self, text: &str) -> ParseResult {
        match HeaderCheck::inspect(text, self.options.min_fields) {
            HeaderCheck::Matched { line, columns } => {
                debug!("Column header on line {} with {} columns", line + 1, columns);
            }
            HeaderCheck::Mismatched { line, problems } => {
                warn!(
                    "Column header on line {} differs from expected layout, parsing positionally: {}",
                    line + 1,
                    problems.join("; ")
                );
            }
            HeaderCheck::Missing => {
                debug!("No column header row found, parsing positionally");
            }
        }

        self.parse_records(text)
    }

    /// Parse every data line after the first non-empty line
    fn parse_records(&self, text: &str) -> ParseResult {
        let mut stats = ParseStats::new();
        let mut observations = Vec::new();

        let data_lines = text.lines().filter(|line| !line.is_empty()).skip(1);

        for line in data_lines {
            stats.total_lines += 1;

            match parse_line(line, &self.options) {
                LineOutcome::Parsed {
                    observation,
                    coordinate_fallback,
                } => {
                    if coordinate_fallback {
                        stats.coordinate_fallbacks += 1;
                    }
                    observations.push(observation);
                }
                LineOutcome::TooShort { .. } => stats.skipped_short += 1,
                LineOutcome::Filtered => stats.filtered_prefix += 1,
                LineOutcome::Header => stats.header_rows += 1,
                LineOutcome::BadCoordinates => stats.rejected_coordinates += 1,
            }
        }

        stats.observations_parsed = observations.len();

        if stats.total_lines == 0 {
            warn!("No METAR data lines found");
        } else {
            info!(
                "Parsed {} observations from {} lines ({} short, {} filtered, {} rejected)",
                stats.observations_parsed,
                stats.total_lines,
                stats.skipped_short,
                stats.filtered_prefix,
                stats.rejected_coordinates
            );
        }
        if stats.coordinate_fallbacks > 0 {
            warn!(
                "{} observations placed at 0.0 after unparseable coordinates",
                stats.coordinate_fallbacks
            );
        }

        ParseResult {
            observations,
            stats,
        }
    }
}
