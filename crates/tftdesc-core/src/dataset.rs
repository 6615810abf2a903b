//! The localized dataset, loaded once and read-only afterwards.
//!
//! A dataset export looks like:
//!
//! ```text
//! {
//!   "items": [ {item}, ... ],
//!   "sets": { "14": { "champions": [...], "traits": [...] }, ... }
//! }
//! ```
//!
//! [`DataSet`] is constructed once per run and passed by reference to every
//! renderer. It exposes no mutation; batch passes copy the parts they augment.

use std::path::Path;

use serde_json::Value;

use crate::error::{CoreError, Result};
use crate::jsonfile;
use crate::record::{Record, api_name};

/// Read-only view over a parsed dataset export.
#[derive(Debug, Clone)]
pub struct DataSet {
    root: Value,
}

impl DataSet {
    /// Load a dataset file.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Read`] / [`CoreError::Json`] when the file cannot
    /// be read or parsed, and [`CoreError::NotAnObject`] when the top level is
    /// not an object.
    pub fn load(path: &Path) -> Result<Self> {
        let root = jsonfile::read_json(path)?;
        if !root.is_object() {
            return Err(CoreError::NotAnObject {
                what: format!("dataset {}", path.display()),
            });
        }
        tracing::debug!(path = %path.display(), "dataset loaded");
        Ok(Self { root })
    }

    /// Wrap an already-parsed document.
    pub fn from_value(root: Value) -> Self {
        Self { root }
    }

    /// The whole document.
    pub fn root(&self) -> &Value {
        &self.root
    }

    /// The top-level `items` list.
    pub fn items(&self) -> &[Value] {
        array_at(&self.root, "items")
    }

    /// Every set keyed by version, skipping entries that are not objects.
    pub fn sets(&self) -> impl Iterator<Item = (&str, &Record)> {
        self.root
            .get("sets")
            .and_then(Value::as_object)
            .into_iter()
            .flatten()
            .filter_map(|(version, set)| set.as_object().map(|s| (version.as_str(), s)))
    }

    /// A single set by version (e.g. `"14"`).
    pub fn set(&self, version: &str) -> Option<&Record> {
        self.root.get("sets")?.get(version)?.as_object()
    }

    /// Champions of a set.
    pub fn champions(&self, version: &str) -> &[Value] {
        self.set(version)
            .and_then(|set| set.get("champions"))
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Traits of a set.
    pub fn traits(&self, version: &str) -> &[Value] {
        self.set(version)
            .and_then(|set| set.get("traits"))
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Find a champion by `apiName`, using the set encoded in its prefix.
    pub fn find_champion(&self, name: &str) -> Option<&Record> {
        let version = set_version_of(name)?;
        find_by_api_name(self.champions(version), name)
    }

    /// Find an item by `apiName`.
    pub fn find_item(&self, name: &str) -> Option<&Record> {
        find_by_api_name(self.items(), name)
    }

    /// Find a trait by `apiName`, searching every set.
    pub fn find_trait(&self, name: &str) -> Option<&Record> {
        self.sets()
            .find_map(|(version, _)| find_by_api_name(self.traits(version), name))
    }
}

/// Extract the set version from a champion api name: `TFT14_Seraphine` -> `14`.
pub fn set_version_of(name: &str) -> Option<&str> {
    let rest = name.strip_prefix("TFT")?;
    let digits = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 || !rest[digits..].starts_with('_') {
        return None;
    }
    Some(&rest[..digits])
}

fn array_at<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn find_by_api_name<'a>(records: &'a [Value], name: &str) -> Option<&'a Record> {
    records
        .iter()
        .filter_map(Value::as_object)
        .find(|record| api_name(record) == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sample() -> DataSet {
        DataSet::from_value(json!({
            "items": [
                {"apiName": "TFT_Item_BFSword", "desc": "+@AD@ AD"},
                "not a record",
            ],
            "sets": {
                "13": {"champions": [], "traits": [{"apiName": "TFT13_Rebel"}]},
                "14": {
                    "champions": [{"apiName": "TFT14_Jinx", "ability": {"desc": "Boom"}}],
                    "traits": [{"apiName": "TFT14_Cyberboss"}],
                },
                "junk": 5,
            }
        }))
    }

    #[test]
    fn set_version_parsing() {
        assert_eq!(set_version_of("TFT14_Seraphine"), Some("14"));
        assert_eq!(set_version_of("TFT9_Ahri"), Some("9"));
        assert_eq!(set_version_of("TFTSet_Ahri"), None);
        assert_eq!(set_version_of("TFT14Seraphine"), None);
        assert_eq!(set_version_of("Seraphine"), None);
    }

    #[test]
    fn lookups() {
        let data = sample();
        assert_eq!(data.items().len(), 2);
        assert_eq!(data.sets().count(), 2);
        assert!(data.find_champion("TFT14_Jinx").is_some());
        assert!(data.find_champion("TFT13_Jinx").is_none());
        assert!(data.find_item("TFT_Item_BFSword").is_some());
        assert!(data.find_trait("TFT13_Rebel").is_some());
        assert!(data.find_trait("TFT99_Nope").is_none());
        assert!(data.champions("99").is_empty());
    }

    #[test]
    fn load_rejects_non_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, "[1, 2]").unwrap();
        assert!(matches!(
            DataSet::load(&path),
            Err(CoreError::NotAnObject { .. })
        ));
    }
}
