//! Polars `AnyValue` utility functions.
//!
//! Helpers for rendering frame cells as text and parsing numeric cells,
//! shared by the ingestor (delimited output) and the cleaner (retype).

use polars::prelude::AnyValue;

/// Converts a Polars `AnyValue` to its canonical `String` representation.
///
/// Returns an empty string for `Null` so missing cells render as an
/// explicit empty marker. Floats are formatted without trailing zeros,
/// which makes an integer -> string retype round-trip the original
/// digits exactly.
///
/// # Examples
///
/// ```
/// use polars::prelude::AnyValue;
/// use hxp_common::cell_to_string;
///
/// assert_eq!(cell_to_string(&AnyValue::Null), "");
/// assert_eq!(cell_to_string(&AnyValue::Int64(42)), "42");
/// assert_eq!(cell_to_string(&AnyValue::Float64(1.50)), "1.5");
/// assert_eq!(cell_to_string(&AnyValue::String("walking")), "walking");
/// ```
pub fn cell_to_string(value: &AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Int8(v) => v.to_string(),
        AnyValue::Int16(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt8(v) => v.to_string(),
        AnyValue::UInt16(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float32(v) => format_numeric(f64::from(*v)),
        AnyValue::Float64(v) => format_numeric(*v),
        AnyValue::String(s) => (*s).to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Boolean(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Formats a floating-point number as a string without trailing zeros.
///
/// # Examples
///
/// ```
/// use hxp_common::format_numeric;
///
/// assert_eq!(format_numeric(1.0), "1");
/// assert_eq!(format_numeric(44.95), "44.95");
/// assert_eq!(format_numeric(0.0), "0");
/// ```
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if !s.contains('.') {
        return s;
    }
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Parses a string as `f64`, returning `None` for empty or blank input
/// and for text that is not a base-10 number.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// Parses a string as `i64`, returning `None` for empty or blank input
/// and for text that is not a base-10 integer.
pub fn parse_i64(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<i64>().ok()
}
