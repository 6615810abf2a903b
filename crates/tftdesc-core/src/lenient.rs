//! Lenient numeric decoding.
//!
//! Game data exports occasionally carry `null`, numeric strings or other
//! junk where a number is expected. These helpers decode such fields to a
//! best-effort value instead of rejecting the whole record.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Numeric view of a JSON value, if it has one.
///
/// Numbers decode as-is, strings are parsed after trimming, booleans map
/// to `1.0` / `0.0`. Everything else is `None`.
pub fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

/// Deserialize a number, falling back to `0.0`.
pub fn f64_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(as_f64(&value).unwrap_or(0.0))
}

/// Deserialize a number truncated to an integer, falling back to `0`.
pub fn i64_or_zero<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(as_f64(&value).map(|v| v.trunc() as i64).unwrap_or(0))
}

/// Deserialize a sequence of numbers. Non-numeric elements become `0.0`;
/// a non-array value becomes an empty sequence.
pub fn f64_seq<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items.iter().map(|v| as_f64(v).unwrap_or(0.0)).collect(),
        _ => Vec::new(),
    })
}

/// Deserialize a string, falling back to empty for `null` and non-strings.
pub fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        _ => String::new(),
    })
}

/// Deserialize an object, falling back to empty for anything else.
pub fn object_or_empty<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Object(map) => map,
        _ => Map::new(),
    })
}
