//! METAR cache CSV parser
//!
//! This module turns the decompressed text of the METAR cache snapshot into
//! [`WeatherObservation`] records. The feed is strictly positional: fields
//! are read by column index, empty fields keep their position, and nothing
//! about a single bad line is allowed to stop the remaining lines from
//! being parsed.
//!
//! ## Architecture
//!
//! - [`parser`] - Line iteration, filtering and statistics
//! - [`record`] - Building one observation from a split line
//! - [`field_parsers`] - Bounds-checked field access and conversion
//! - [`header`] - Column header validation against the expected layout
//! - [`stats`] - Parsing statistics and result structures
//!
//! ## Usage
//!
//! ```rust
//! use metar_ingest::app::services::record_parser::parse;
//!
//! let text = "raw_text,station_id\n";
//! let observations = parse(text);
//! assert!(observations.is_empty());
//! ```

pub mod field_parsers;
pub mod header;
pub mod parser;
pub mod record;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use header::HeaderCheck;
pub use parser::RecordParser;
pub use stats::{ParseResult, ParseStats};

use crate::app::models::WeatherObservation;

/// Parse METAR cache text with the default options
///
/// The first non-empty line is skipped as a header; lines that are too
/// short or outside the default station prefix are dropped. Never fails.
pub fn parse(text: &str) -> Vec<WeatherObservation> {
    RecordParser::default().parse_lenient(text).observations
}
