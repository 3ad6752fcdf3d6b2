//! Configuration for fetching and parsing the METAR snapshot.
//!
//! Provides the transport settings, scratch-file location, failure
//! policy and the parser options that control filtering, coordinate
//! handling and header validation.

use crate::constants::{
    DEFAULT_SOURCE_URL, DEFAULT_STATION_PREFIX, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
    MIN_FIELD_COUNT, SCRATCH_FILE_NAME, columns,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// How the parser treats an unparseable latitude or longitude
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CoordinatePolicy {
    /// Substitute 0.0 and keep the record
    #[default]
    ZeroFallback,
    /// Drop the record
    Reject,
}

/// How the parser treats the column header row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HeaderPolicy {
    /// Log a warning on mismatch and keep parsing positionally
    #[default]
    Lenient,
    /// Refuse to parse when the header is missing or does not match
    Strict,
}

/// What the fetcher publishes when a cycle fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FailurePolicy {
    /// Leave the last published snapshot in place
    #[default]
    KeepPrevious,
    /// Replace the published snapshot with an empty one
    PublishEmpty,
}

/// Options for the record parser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserOptions {
    /// Lines with fewer fields are skipped
    pub min_fields: usize,

    /// Station identifier prefix to keep (empty keeps every station)
    pub station_prefix: String,

    pub coordinate_policy: CoordinatePolicy,

    pub header_policy: HeaderPolicy,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            min_fields: MIN_FIELD_COUNT,
            station_prefix: DEFAULT_STATION_PREFIX.to_string(),
            coordinate_policy: CoordinatePolicy::default(),
            header_policy: HeaderPolicy::default(),
        }
    }
}

impl ParserOptions {
    /// Set the station identifier prefix
    pub fn with_station_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.station_prefix = prefix.into();
        self
    }

    /// Set the coordinate policy
    pub fn with_coordinate_policy(mut self, policy: CoordinatePolicy) -> Self {
        self.coordinate_policy = policy;
        self
    }

    /// Set the header policy
    pub fn with_header_policy(mut self, policy: HeaderPolicy) -> Self {
        self.header_policy = policy;
        self
    }

    /// Validate parser options
    pub fn validate(&self) -> Result<()> {
        if self.min_fields <= columns::MAX_MAPPED {
            return Err(Error::configuration(format!(
                "Minimum field count {} does not cover mapped column {}",
                self.min_fields,
                columns::MAX_MAPPED
            )));
        }
        Ok(())
    }
}

/// Configuration for a fetch cycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Location of the gzip-compressed snapshot
    pub source_url: String,

    /// HTTP request timeout in seconds
    pub timeout_secs: u64,

    pub user_agent: String,

    /// Where the decompressed text is written before parsing (None disables it)
    pub scratch_path: Option<PathBuf>,

    pub failure_policy: FailurePolicy,

    pub parser: ParserOptions,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            scratch_path: Some(default_scratch_path()),
            failure_policy: FailurePolicy::default(),
            parser: ParserOptions::default(),
        }
    }
}

impl FetchConfig {
    /// Create a configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the snapshot URL
    pub fn with_source_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = url.into();
        self
    }

    /// Set the request timeout in seconds
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set or clear the scratch file location
    pub fn with_scratch_path(mut self, path: Option<PathBuf>) -> Self {
        self.scratch_path = path;
        self
    }

    /// Set the failure policy
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Set the parser options
    pub fn with_parser(mut self, parser: ParserOptions) -> Self {
        self.parser = parser;
        self
    }

    /// Request timeout as a duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(Error::configuration("Timeout must be greater than 0"));
        }

        let url = self.source_url.trim();
        if url.is_empty() {
            return Err(Error::configuration("Source URL must not be empty"));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(Error::configuration(format!(
                "Source URL must use http or https: '{}'",
                url
            )));
        }

        self.parser.validate()
    }
}

/// Scratch file in the OS temporary directory
pub fn default_scratch_path() -> PathBuf {
    std::env::temp_dir().join(SCRATCH_FILE_NAME)
}
