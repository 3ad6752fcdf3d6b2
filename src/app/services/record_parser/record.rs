//! Individual line parsing for METAR cache records
//!
//! Splits one data line on commas without collapsing empty fields and maps
//! the fixed column positions onto a [`WeatherObservation`].

use tracing::{debug, trace};

use super::field_parsers::{
    get_field, parse_optional, parse_optional_f64, parse_optional_string, parse_string_or,
};
use crate::app::models::WeatherObservation;
use crate::config::{CoordinatePolicy, ParserOptions};
use crate::constants::{HEADER_MARKER, NOT_AVAILABLE, UNKNOWN, columns};

/// What became of a single data line
#[derive(Debug)]
pub enum LineOutcome {
    /// Observation built; `coordinate_fallback` is set when 0.0 was substituted
    Parsed {
        observation: WeatherObservation,
        coordinate_fallback: bool,
    },
    /// Fewer fields than the configured minimum
    TooShort { fields: usize },
    /// Station identifier outside the accepted prefix
    Filtered,
    /// A repeated column header row
    Header,
    /// Coordinates unparseable under [`CoordinatePolicy::Reject`]
    BadCoordinates,
}

/// Split a line into trimmed positional fields
pub fn split_fields(line: &str) -> Vec<&str> {
    line.split(',').map(str::trim).collect()
}

/// Parse one data line
pub fn parse_line(line: &str, options: &ParserOptions) -> LineOutcome {
    let fields = split_fields(line);

    if fields.len() < options.min_fields {
        debug!(
            "Skipping line with {} fields (need {}): {}",
            fields.len(),
            options.min_fields,
            line
        );
        return LineOutcome::TooShort {
            fields: fields.len(),
        };
    }

    if get_field(&fields, columns::RAW_TEXT) == Some(HEADER_MARKER) {
        return LineOutcome::Header;
    }

    let station = get_field(&fields, columns::STATION_ID).unwrap_or_default();
    if !station.starts_with(options.station_prefix.as_str()) {
        trace!("Filtered station '{}'", station);
        return LineOutcome::Filtered;
    }

    let latitude = parse_optional_f64(&fields, columns::LATITUDE);
    let longitude = parse_optional_f64(&fields, columns::LONGITUDE);
    let coordinate_fallback = latitude.is_none() || longitude.is_none();

    if coordinate_fallback && options.coordinate_policy == CoordinatePolicy::Reject {
        debug!(
            "Rejecting {}: unparseable coordinates ({:?}, {:?})",
            station,
            get_field(&fields, columns::LATITUDE),
            get_field(&fields, columns::LONGITUDE)
        );
        return LineOutcome::BadCoordinates;
    }

    let mut observation = WeatherObservation::new(
        parse_string_or(&fields, columns::STATION_ID, UNKNOWN),
        parse_string_or(&fields, columns::OBSERVATION_TIME, UNKNOWN),
        latitude.unwrap_or(0.0),
        longitude.unwrap_or(0.0),
    );
    observation.temp_c = parse_optional_f64(&fields, columns::TEMP_C);
    observation.dewpoint_c = parse_optional_f64(&fields, columns::DEWPOINT_C);
    observation.wind_dir_degrees = parse_optional::<i32>(&fields, columns::WIND_DIR_DEGREES);
    observation.wind_speed_kt = parse_optional::<i32>(&fields, columns::WIND_SPEED_KT);
    observation.wind_gust_kt = parse_optional::<i32>(&fields, columns::WIND_GUST_KT);
    observation.visibility = parse_string_or(&fields, columns::VISIBILITY, NOT_AVAILABLE);
    observation.altimeter_in_hg = parse_optional_f64(&fields, columns::ALTIMETER_IN_HG);
    observation.sky_cover = parse_optional_string(&fields, columns::SKY_COVER);
    observation.cloud_base_ft_agl = parse_optional::<i32>(&fields, columns::CLOUD_BASE_FT_AGL);
    observation.flight_category = parse_string_or(&fields, columns::FLIGHT_CATEGORY, UNKNOWN);

    LineOutcome::Parsed {
        observation,
        coordinate_fallback,
    }
}
