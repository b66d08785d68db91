//! Raw SQLite values to display cells.
//!
//! Every report cell passes through here. Null and blank values become
//! [`NOT_APPLICABLE`]; blobs are decoded byte-for-byte as ISO-8859-1 so
//! password and form-data columns never lose or reject bytes.

use rusqlite::types::Value;

/// Sentinel for absent, null, or empty source values.
pub const NOT_APPLICABLE: &str = "Not Applicable";

/// Decode bytes as ISO-8859-1. Every byte maps to exactly one char.
pub fn latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Render a raw value as text, `None` when it is null or empty.
pub fn text(value: &Value) -> Option<String> {
    let rendered = match value {
        Value::Null => return None,
        Value::Integer(i) => i.to_string(),
        Value::Real(f) => f.to_string(),
        Value::Text(s) => s.clone(),
        Value::Blob(b) => latin1(b),
    };
    if rendered.is_empty() {
        None
    } else {
        Some(rendered)
    }
}

/// Render a raw value as a report cell.
pub fn cell(value: &Value) -> String {
    text(value).unwrap_or_else(|| NOT_APPLICABLE.to_string())
}

/// Interpret a raw value as an integer (integers, whole reals, numeric text).
pub fn integer(value: &Value) -> Option<i64> {
    match value {
        Value::Integer(i) => Some(*i),
        Value::Real(f) if f.is_finite() && f.fract() == 0.0 => Some(*f as i64),
        Value::Text(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Interpret a raw value as a float (integers, reals, numeric text).
pub fn real(value: &Value) -> Option<f64> {
    match value {
        Value::Integer(i) => Some(*i as f64),
        Value::Real(f) if f.is_finite() => Some(*f),
        Value::Text(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}
