//! Data models for METAR ingestion
//!
//! This module contains the parsed observation record and the flight
//! category classification read from the METAR cache feed.

use crate::constants::{NOT_AVAILABLE, UNKNOWN};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

// =============================================================================
// Weather Observation
// =============================================================================

/// A single surface weather observation (METAR) for one station
///
/// Every optional measurement is either a successfully parsed value or
/// `None`; conversion failures never surface as errors. The `id` is
/// assigned at construction, is never derived from the feed, and cannot
/// be changed afterwards, so it is safe to use as a collection key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherObservation {
    id: Uuid,

    /// Station identifier, usually an ICAO code (e.g., "KSEA")
    pub station_id: String,

    /// Observation time exactly as published (not validated)
    pub observation_time: String,

    /// Latitude in decimal degrees
    pub latitude: f64,

    /// Longitude in decimal degrees
    pub longitude: f64,

    /// Air temperature in degrees Celsius
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temp_c: Option<f64>,

    /// Dewpoint in degrees Celsius
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dewpoint_c: Option<f64>,

    /// Wind direction in degrees true
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_dir_degrees: Option<i32>,

    /// Wind speed in knots
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_speed_kt: Option<i32>,

    /// Wind gust in knots
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_gust_kt: Option<i32>,

    /// Visibility with its unit-bearing text preserved (e.g., "10+")
    pub visibility: String,

    /// Altimeter setting in inches of mercury
    #[serde(skip_serializing_if = "Option::is_none")]
    pub altimeter_in_hg: Option<f64>,

    /// Lowest reported sky cover code (e.g., "BKN")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sky_cover: Option<String>,

    /// Base of the lowest reported cloud layer in feet above ground
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_base_ft_agl: Option<i32>,

    /// Flight category as published (VFR, MVFR, IFR, LIFR or UNKNOWN)
    pub flight_category: String,
}

impl WeatherObservation {
    /// Create an observation with a fresh id and every measurement absent
    pub fn new(
        station_id: impl Into<String>,
        observation_time: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            station_id: station_id.into(),
            observation_time: observation_time.into(),
            latitude,
            longitude,
            temp_c: None,
            dewpoint_c: None,
            wind_dir_degrees: None,
            wind_speed_kt: None,
            wind_gust_kt: None,
            visibility: NOT_AVAILABLE.to_string(),
            altimeter_in_hg: None,
            sky_cover: None,
            cloud_base_ft_agl: None,
            flight_category: UNKNOWN.to_string(),
        }
    }

    /// Process-local identity key
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Flight category classification
    pub fn category(&self) -> FlightCategory {
        self.flight_category
            .parse()
            .unwrap_or(FlightCategory::Unknown)
    }

    /// Spread between temperature and dewpoint, when both are reported
    pub fn dewpoint_depression(&self) -> Option<f64> {
        Some(self.temp_c? - self.dewpoint_c?)
    }

    /// Compare every field except the identity key
    pub fn same_report(&self, other: &Self) -> bool {
        self.station_id == other.station_id
            && self.observation_time == other.observation_time
            && self.latitude.to_bits() == other.latitude.to_bits()
            && self.longitude.to_bits() == other.longitude.to_bits()
            && self.temp_c == other.temp_c
            && self.dewpoint_c == other.dewpoint_c
            && self.wind_dir_degrees == other.wind_dir_degrees
            && self.wind_speed_kt == other.wind_speed_kt
            && self.wind_gust_kt == other.wind_gust_kt
            && self.visibility == other.visibility
            && self.altimeter_in_hg == other.altimeter_in_hg
            && self.sky_cover == other.sky_cover
            && self.cloud_base_ft_agl == other.cloud_base_ft_agl
            && self.flight_category == other.flight_category
    }
}

// =============================================================================
// Flight Category
// =============================================================================

/// Ceiling/visibility classification derived upstream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FlightCategory {
    Vfr,
    Mvfr,
    Ifr,
    Lifr,
    Unknown,
}

impl FlightCategory {
    /// All categories in display order
    pub const ALL: [FlightCategory; 5] = [
        FlightCategory::Vfr,
        FlightCategory::Mvfr,
        FlightCategory::Ifr,
        FlightCategory::Lifr,
        FlightCategory::Unknown,
    ];

    /// Code as it appears in the feed
    pub fn as_str(&self) -> &'static str {
        match self {
            FlightCategory::Vfr => "VFR",
            FlightCategory::Mvfr => "MVFR",
            FlightCategory::Ifr => "IFR",
            FlightCategory::Lifr => "LIFR",
            FlightCategory::Unknown => UNKNOWN,
        }
    }
}

impl FromStr for FlightCategory {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "VFR" => Ok(FlightCategory::Vfr),
            "MVFR" => Ok(FlightCategory::Mvfr),
            "IFR" => Ok(FlightCategory::Ifr),
            "LIFR" => Ok(FlightCategory::Lifr),
            "UNKNOWN" => Ok(FlightCategory::Unknown),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for FlightCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
