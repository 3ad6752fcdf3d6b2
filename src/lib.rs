//! METAR Ingest Library
//!
//! A Rust library for pulling the aviationweather.gov METAR cache snapshot
//! (a gzip-compressed CSV feed) and turning it into structured surface
//! weather observations.
//!
//! This library provides tools for:
//! - Inflating the gzip envelope of the published snapshot
//! - Tolerant, position-based parsing of the METAR CSV layout
//! - Filtering observations to a station identifier prefix
//! - Fetching the snapshot over HTTP and publishing each complete result set
//!   to observers, replacing the previous one atomically

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod decompressor;
        pub mod fetcher;
        pub mod record_parser;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{FlightCategory, WeatherObservation};
pub use app::services::decompressor::decompress;
pub use app::services::fetcher::{FetchOutcome, MetarFetcher, ObservationStore, Snapshot};
pub use app::services::record_parser::{ParseResult, ParseStats, RecordParser, parse};
pub use config::{FetchConfig, ParserOptions};

/// Result type alias for METAR ingestion
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the ingestion pipeline
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// HTTP transport failed before a response body was received
    #[error("Transport error fetching '{url}': {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Server answered with a non-success status
    #[error("HTTP status {status} fetching '{url}'")]
    HttpStatus { url: String, status: u16 },

    /// Server answered successfully but sent no bytes
    #[error("Empty response body from '{url}'")]
    EmptyResponse { url: String },

    /// Gzip envelope or deflate stream could not be inflated
    #[error("Decompression error: {message}")]
    Decompression {
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Column header does not match the expected feed layout
    #[error("Header mismatch: {message}")]
    HeaderMismatch { message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// JSON serialization error
    #[error("Serialization error: {source}")]
    Serialization {
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a transport error for a URL
    pub fn transport(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Transport {
            url: url.into(),
            source,
        }
    }

    /// Create a non-success status error
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Create an empty response error
    pub fn empty_response(url: impl Into<String>) -> Self {
        Self::EmptyResponse { url: url.into() }
    }

    /// Create a decompression error without an underlying I/O cause
    pub fn decompression(message: impl Into<String>) -> Self {
        Self::Decompression {
            message: message.into(),
            source: None,
        }
    }

    /// Create a decompression error wrapping the inflate failure
    pub fn decompression_with(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Decompression {
            message: message.into(),
            source: Some(source),
        }
    }

    /// Create a header mismatch error
    pub fn header_mismatch(message: impl Into<String>) -> Self {
        Self::HeaderMismatch {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization { source: error }
    }
}
