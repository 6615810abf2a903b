//! JSON file read/write support.
//!
//! Dataset exports are written with a UTF-8 byte-order mark, so reads strip
//! one if present. Writes are pretty-printed with two-space indentation and
//! keep non-ASCII text as-is.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::{CoreError, Result};

const UTF8_BOM: char = '\u{feff}';

/// Parse JSON text, ignoring a leading byte-order mark.
pub fn parse_json(content: &str) -> serde_json::Result<Value> {
    serde_json::from_str(content.strip_prefix(UTF8_BOM).unwrap_or(content))
}

/// Read and parse a JSON file.
pub fn read_json(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path).map_err(|source| CoreError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_json(&content).map_err(|source| CoreError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Write a value as pretty-printed JSON, creating parent directories.
pub fn write_json_pretty(path: &Path, value: &Value) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| CoreError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).map_err(|source| CoreError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn parse_strips_bom() {
        let value = parse_json("\u{feff}{\"a\": 1}").unwrap();
        assert_eq!(value, json!({"a": 1}));
    }

    #[test]
    fn write_then_read_keeps_korean_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.json");
        let value = json!({"desc": "피해를 입힙니다"});

        write_json_pretty(&path, &value).unwrap();
        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("피해를 입힙니다"));
        assert_eq!(read_json(&path).unwrap(), value);
    }

    #[test]
    fn read_reports_path_on_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{not json").unwrap();
        match read_json(&path) {
            Err(CoreError::Json { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected JSON error, got {:?}", other),
        }
    }

    #[test]
    fn read_missing_file_is_read_error() {
        let err = read_json(Path::new("/nonexistent/tftdesc.json")).unwrap_err();
        assert!(matches!(err, CoreError::Read { .. }));
    }
}
