//! Entity records.
//!
//! Records are kept as ordered JSON objects rather than typed structs: the
//! renderer only reads a handful of fields and must hand every other field
//! back untouched and in its original order.

use serde_json::{Map, Value};

/// An entity record (champion ability, item, or trait) as found in the dataset.
pub type Record = Map<String, Value>;

/// Field holding the raw description template.
pub const DESC_FIELD: &str = "desc";

/// Field appended next to [`DESC_FIELD`] with the rendered description.
pub const MODIFIED_DESC_FIELD: &str = "modifiedDesc";

/// Field holding an entity's stable identifier.
pub const API_NAME_FIELD: &str = "apiName";

/// Returns a string field, or `""` when it is absent or not a string.
pub fn str_field<'a>(record: &'a Record, key: &str) -> &'a str {
    record.get(key).and_then(Value::as_str).unwrap_or("")
}

/// Returns the record's `apiName`, or `""`.
pub fn api_name(record: &Record) -> &str {
    str_field(record, API_NAME_FIELD)
}

/// Build a copy of `record` with `key` inserted immediately after `anchor`.
///
/// Every other field keeps its relative order. A pre-existing `key` is
/// dropped from its old position. When `anchor` is missing the new field is
/// appended at the end.
pub fn with_field_after(record: &Record, anchor: &str, key: &str, value: Value) -> Record {
    let mut out = Map::with_capacity(record.len() + 1);
    let mut pending = Some(value);
    for (k, v) in record {
        if k == key {
            continue;
        }
        out.insert(k.clone(), v.clone());
        if k == anchor {
            if let Some(value) = pending.take() {
                out.insert(key.to_string(), value);
            }
        }
    }
    if let Some(value) = pending {
        out.insert(key.to_string(), value);
    }
    out
}
