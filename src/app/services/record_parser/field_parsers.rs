//! Field access and conversion utilities for METAR cache records
//!
//! Every accessor is bounds-checked against the actual field count of the
//! line and treats an empty or whitespace-only value as absent.

use std::str::FromStr;

/// Get a trimmed, non-empty field by position
pub fn get_field<'a>(fields: &[&'a str], index: usize) -> Option<&'a str> {
    fields
        .get(index)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
}

/// Parse an optional field into any `FromStr` type, absent on failure
pub fn parse_optional<T: FromStr>(fields: &[&str], index: usize) -> Option<T> {
    get_field(fields, index).and_then(|s| s.parse::<T>().ok())
}

/// Parse an optional floating point field, rejecting NaN and infinities
pub fn parse_optional_f64(fields: &[&str], index: usize) -> Option<f64> {
    parse_optional::<f64>(fields, index).filter(|v| v.is_finite())
}

/// Parse an optional string field
pub fn parse_optional_string(fields: &[&str], index: usize) -> Option<String> {
    get_field(fields, index).map(str::to_string)
}

/// Parse a string field, substituting `default` when absent
pub fn parse_string_or(fields: &[&str], index: usize, default: &str) -> String {
    get_field(fields, index).unwrap_or(default).to_string()
}
