//! Command-line argument definitions for METAR ingest
//!
//! This module defines the CLI interface using the clap derive API.

use crate::config::{
    CoordinatePolicy, FailurePolicy, FetchConfig, HeaderPolicy, ParserOptions,
    default_scratch_path,
};
use crate::constants::{
    DEFAULT_REFRESH_INTERVAL_SECS, DEFAULT_SOURCE_URL, DEFAULT_STATION_PREFIX,
    DEFAULT_TIMEOUT_SECS,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the METAR snapshot ingester
///
/// Downloads the aviationweather.gov METAR cache, inflates it and parses
/// the CSV into station observations.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "metar-ingest",
    version,
    about = "Fetch and parse the aviationweather.gov METAR cache snapshot",
    long_about = "Downloads the gzip-compressed METAR cache published by aviationweather.gov, \
                  inflates it, and parses the positional CSV into surface weather observations. \
                  Malformed lines and fields are tolerated; a failed fetch never publishes \
                  partial data."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Increase logging verbosity
    #[arg(
        short = 'v',
        long = "verbose",
        global = true,
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Run one fetch cycle and print the result
    Fetch(FetchArgs),
    /// Fetch periodically until interrupted
    Watch(WatchArgs),
    /// Parse a local snapshot file (gzip or plain CSV)
    Parse(ParseArgs),
}

/// Options controlling how lines are parsed and filtered
#[derive(Debug, Clone, Parser)]
pub struct ParserArgs {
    /// Station identifier prefix to keep (empty string keeps all stations)
    #[arg(
        long = "prefix",
        value_name = "PREFIX",
        default_value = DEFAULT_STATION_PREFIX,
        help = "Station identifier prefix to keep"
    )]
    pub prefix: String,

    /// Fail when the column header is missing or does not match the expected layout
    #[arg(long = "strict-header")]
    pub strict_header: bool,

    /// Drop records with unparseable coordinates instead of placing them at 0.0
    #[arg(long = "reject-bad-coordinates")]
    pub reject_bad_coordinates: bool,
}

/// Options controlling where and how the snapshot is fetched
#[derive(Debug, Clone, Parser)]
pub struct SourceArgs {
    /// Snapshot URL
    #[arg(
        long = "url",
        value_name = "URL",
        default_value = DEFAULT_SOURCE_URL,
        help = "URL of the gzip-compressed METAR cache"
    )]
    pub url: String,

    /// Request timeout in seconds
    #[arg(
        long = "timeout",
        value_name = "SECS",
        default_value_t = DEFAULT_TIMEOUT_SECS,
        help = "HTTP request timeout in seconds"
    )]
    pub timeout: u64,

    /// Where to keep the decompressed text
    ///
    /// Defaults to metars.cache.csv in the system temporary directory.
    #[arg(long = "scratch", value_name = "PATH", conflicts_with = "no_scratch")]
    pub scratch: Option<PathBuf>,

    /// Do not write the decompressed text to disk
    #[arg(long = "no-scratch")]
    pub no_scratch: bool,

    /// Replace the published result with an empty set when a cycle fails
    #[arg(long = "publish-empty-on-failure")]
    pub publish_empty_on_failure: bool,

    #[command(flatten)]
    pub parser: ParserArgs,
}

/// Arguments for the fetch command
#[derive(Debug, Clone, Parser)]
pub struct FetchArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Arguments for the watch command
#[derive(Debug, Clone, Parser)]
pub struct WatchArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Seconds between fetch cycles
    #[arg(
        short = 'i',
        long = "interval",
        value_name = "SECS",
        default_value_t = DEFAULT_REFRESH_INTERVAL_SECS,
        help = "Seconds between fetch cycles"
    )]
    pub interval: u64,
}

/// Arguments for the parse command
#[derive(Debug, Clone, Parser)]
pub struct ParseArgs {
    /// Snapshot file; gzip input is detected by its magic bytes
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[command(flatten)]
    pub parser: ParserArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Options controlling what is printed
#[derive(Debug, Clone, Parser)]
pub struct OutputArgs {
    /// Output format
    #[arg(
        long = "format",
        value_enum,
        default_value = "summary",
        help = "Output format"
    )]
    pub format: OutputFormat,

    /// Only print the given station
    #[arg(long = "station", value_name = "ID")]
    pub station: Option<String>,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Counts per flight category and parse statistics
    Summary,
    /// One line per station
    Table,
    /// Full snapshot as JSON
    Json,
}

impl Args {
    /// Log level derived from verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }
}

impl ParserArgs {
    /// Parser options for these flags
    pub fn to_options(&self) -> ParserOptions {
        let coordinate_policy = if self.reject_bad_coordinates {
            CoordinatePolicy::Reject
        } else {
            CoordinatePolicy::ZeroFallback
        };
        let header_policy = if self.strict_header {
            HeaderPolicy::Strict
        } else {
            HeaderPolicy::Lenient
        };

        ParserOptions::default()
            .with_station_prefix(self.prefix.clone())
            .with_coordinate_policy(coordinate_policy)
            .with_header_policy(header_policy)
    }
}

impl SourceArgs {
    /// Fetch configuration for these flags
    pub fn to_config(&self) -> FetchConfig {
        let scratch_path = if self.no_scratch {
            None
        } else {
            Some(self.scratch.clone().unwrap_or_else(default_scratch_path))
        };
        let failure_policy = if self.publish_empty_on_failure {
            FailurePolicy::PublishEmpty
        } else {
            FailurePolicy::KeepPrevious
        };

        FetchConfig::new()
            .with_source_url(self.url.clone())
            .with_timeout_secs(self.timeout)
            .with_scratch_path(scratch_path)
            .with_failure_policy(failure_policy)
            .with_parser(self.parser.to_options())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_defaults() {
        let args = Args::try_parse_from(["metar-ingest", "fetch"]).unwrap();
        let Some(Commands::Fetch(fetch)) = args.command else {
            panic!("Expected fetch command");
        };

        let config = fetch.source.to_config();
        assert_eq!(config.source_url, DEFAULT_SOURCE_URL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.scratch_path, Some(default_scratch_path()));
        assert_eq!(config.parser, ParserOptions::default());
        assert_eq!(fetch.output.format, OutputFormat::Summary);
    }

    #[test]
    fn test_fetch_flags_map_to_config() {
        let args = Args::try_parse_from([
            "metar-ingest",
            "-vv",
            "fetch",
            "--url",
            "http://localhost:8080/metars.csv.gz",
            "--timeout",
            "5",
            "--no-scratch",
            "--prefix",
            "",
            "--strict-header",
            "--reject-bad-coordinates",
            "--publish-empty-on-failure",
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(args.get_log_level(), "debug");

        let Some(Commands::Fetch(fetch)) = args.command else {
            panic!("Expected fetch command");
        };
        let config = fetch.source.to_config();

        assert_eq!(config.source_url, "http://localhost:8080/metars.csv.gz");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.scratch_path, None);
        assert_eq!(config.failure_policy, FailurePolicy::PublishEmpty);
        assert_eq!(config.parser.station_prefix, "");
        assert_eq!(config.parser.header_policy, HeaderPolicy::Strict);
        assert_eq!(config.parser.coordinate_policy, CoordinatePolicy::Reject);
        assert_eq!(fetch.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_scratch_conflicts_with_no_scratch() {
        let result = Args::try_parse_from([
            "metar-ingest",
            "fetch",
            "--scratch",
            "/tmp/m.csv",
            "--no-scratch",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_quiet_overrides_log_level() {
        let args = Args::try_parse_from(["metar-ingest", "-q", "watch", "-i", "60"]).unwrap();
        assert_eq!(args.get_log_level(), "error");

        let Some(Commands::Watch(watch)) = args.command else {
            panic!("Expected watch command");
        };
        assert_eq!(watch.interval, 60);
    }

    #[test]
    fn test_parse_command_takes_file() {
        let args = Args::try_parse_from([
            "metar-ingest",
            "parse",
            "metars.cache.csv.gz",
            "--station",
            "KSEA",
        ])
        .unwrap();
        let Some(Commands::Parse(parse)) = args.command else {
            panic!("Expected parse command");
        };

        assert_eq!(parse.file, PathBuf::from("metars.cache.csv.gz"));
        assert_eq!(parse.output.station.as_deref(), Some("KSEA"));
    }
}
