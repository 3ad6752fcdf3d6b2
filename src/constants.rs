//! Application constants for METAR ingestion
//!
//! This module contains the feed location, parser thresholds, fallback
//! sentinels and the column layout of the METAR cache CSV.

// =============================================================================
// Feed Location and Transport
// =============================================================================

/// Published METAR cache snapshot (gzip-compressed CSV)
pub const DEFAULT_SOURCE_URL: &str = "https://aviationweather.gov/data/cache/metars.cache.csv.gz";

/// Default HTTP timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User agent sent with each snapshot request
pub const DEFAULT_USER_AGENT: &str = concat!("metar-ingest/", env!("CARGO_PKG_VERSION"));

/// File name used for the decompressed scratch copy
pub const SCRATCH_FILE_NAME: &str = "metars.cache.csv";

/// Default refresh interval for the watch command
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 300;

// =============================================================================
// Decompression
// =============================================================================

/// Output chunk size requested from the inflater on each step
pub const INFLATE_CHUNK_SIZE: usize = 4096;

// =============================================================================
// Record Parsing
// =============================================================================

/// Minimum number of positional fields a data line must carry
pub const MIN_FIELD_COUNT: usize = 43;

/// Only stations whose identifier starts with this prefix are kept
pub const DEFAULT_STATION_PREFIX: &str = "K";

/// Sentinel for missing station identifiers, observation times and flight categories
pub const UNKNOWN: &str = "UNKNOWN";

/// Sentinel for missing visibility
pub const NOT_AVAILABLE: &str = "N/A";

/// First field of the column header row in the METAR cache CSV
pub const HEADER_MARKER: &str = "raw_text";

/// Fixed column positions in the METAR cache CSV
pub mod columns {
    pub const RAW_TEXT: usize = 0;
    pub const STATION_ID: usize = 1;
    pub const OBSERVATION_TIME: usize = 2;
    pub const LATITUDE: usize = 3;
    pub const LONGITUDE: usize = 4;
    pub const TEMP_C: usize = 5;
    pub const DEWPOINT_C: usize = 6;
    pub const WIND_DIR_DEGREES: usize = 7;
    pub const WIND_SPEED_KT: usize = 8;
    pub const WIND_GUST_KT: usize = 9;
    pub const VISIBILITY: usize = 10;
    pub const ALTIMETER_IN_HG: usize = 11;
    pub const SKY_COVER: usize = 22;
    pub const CLOUD_BASE_FT_AGL: usize = 23;
    pub const FLIGHT_CATEGORY: usize = 30;

    /// Expected header names at every position the parser reads
    pub const EXPECTED_HEADER: &[(usize, &str)] = &[
        (RAW_TEXT, "raw_text"),
        (STATION_ID, "station_id"),
        (OBSERVATION_TIME, "observation_time"),
        (LATITUDE, "latitude"),
        (LONGITUDE, "longitude"),
        (TEMP_C, "temp_c"),
        (DEWPOINT_C, "dewpoint_c"),
        (WIND_DIR_DEGREES, "wind_dir_degrees"),
        (WIND_SPEED_KT, "wind_speed_kt"),
        (WIND_GUST_KT, "wind_gust_kt"),
        (VISIBILITY, "visibility_statute_mi"),
        (ALTIMETER_IN_HG, "altim_in_hg"),
        (SKY_COVER, "sky_cover"),
        (CLOUD_BASE_FT_AGL, "cloud_base_ft_agl"),
        (FLIGHT_CATEGORY, "flight_category"),
    ];

    /// Highest column position the parser reads
    pub const MAX_MAPPED: usize = FLIGHT_CATEGORY;
}
