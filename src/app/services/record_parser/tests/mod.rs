//! Test utilities and fixtures for METAR cache parser testing
//!
//! Builds lines in the exact column layout of the aviationweather.gov
//! METAR cache CSV so individual tests only override what they exercise.


/// Column names of the METAR cache CSV, in feed order
pub const HEADER_COLUMNS: &[&str] = &[
    "raw_text",
    "station_id",
    "observation_time",
    "latitude",
    "longitude",
    "temp_c",
    "dewpoint_c",
    "wind_dir_degrees",
    "wind_speed_kt",
    "wind_gust_kt",
    "visibility_statute_mi",
    "altim_in_hg",
    "sea_level_pressure_mb",
    "corrected",
    "auto",
    "auto_station",
    "maintenance_indicator_on",
    "no_signal",
    "lightning_sensor_off",
    "freezing_rain_sensor_off",
    "present_weather_sensor_off",
    "wx_string",
    "sky_cover",
    "cloud_base_ft_agl",
    "sky_cover",
    "cloud_base_ft_agl",
    "sky_cover",
    "cloud_base_ft_agl",
    "sky_cover",
    "cloud_base_ft_agl",
    "flight_category",
    "three_hr_pressure_tendency_mb",
    "maxT_c",
    "minT_c",
    "maxT24hr_c",
    "minT24hr_c",
    "precip_in",
    "pcp3hr_in",
    "pcp6hr_in",
    "pcp24hr_in",
    "snow_in",
    "vert_vis_ft",
    "metar_type",
    "elevation_m",
];

/// Status lines the feed emits before the column header
pub const FEED_PREAMBLE: &str = "No errors\nNo warnings\n28 ms\ndata source=metars\n3 results";

/// The column header row
pub fn header_line() -> String {
    HEADER_COLUMNS.join(",")
}

/// A fully populated observation row for a station
pub fn station_fields(station: &str, latitude: &str, longitude: &str) -> Vec<String> {
    let mut fields = vec![String::new(); HEADER_COLUMNS.len()];
    fields[0] = format!("{station} 211853Z 17008G18KT 10SM FEW020 BKN045 08/04 A3012 RMK AO2");
    fields[1] = station.to_string();
    fields[2] = "2025-02-21T18:53:00Z".to_string();
    fields[3] = latitude.to_string();
    fields[4] = longitude.to_string();
    fields[5] = "8.3".to_string();
    fields[6] = "4.4".to_string();
    fields[7] = "170".to_string();
    fields[8] = "8".to_string();
    fields[9] = "18".to_string();
    fields[10] = "10+".to_string();
    fields[11] = "30.12".to_string();
    fields[12] = "1020.3".to_string();
    fields[15] = "TRUE".to_string();
    fields[22] = "FEW".to_string();
    fields[23] = "2000".to_string();
    fields[24] = "BKN".to_string();
    fields[25] = "4500".to_string();
    fields[30] = "VFR".to_string();
    fields[42] = "METAR".to_string();
    fields[43] = "137".to_string();
    fields
}

/// KSEA row with the Sea-Tac coordinates
pub fn ksea_fields() -> Vec<String> {
    station_fields("KSEA", "47.4489", "-122.3094")
}

/// EGLL row with the Heathrow coordinates
pub fn egll_fields() -> Vec<String> {
    station_fields("EGLL", "51.4775", "-0.4614")
}

/// Join fields into one CSV line
pub fn line(fields: &[String]) -> String {
    fields.join(",")
}

/// Header line followed by the given data lines
pub fn document(rows: &[Vec<String>]) -> String {
    let mut text = header_line();
    for row in rows {
        text.push('\n');
        text.push_str(&line(row));
    }
    text.push('\n');
    text
}

/// Feed preamble, header line and the given data lines
pub fn feed_document(rows: &[Vec<String>]) -> String {
    format!("{}\n{}", FEED_PREAMBLE, document(rows))
}
