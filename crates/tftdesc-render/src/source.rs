//! Where champion spell data comes from.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tftdesc_formula::parser;
use tftdesc_formula::{Spell, SpellError};
use tracing::debug;

/// File name suffix of per-champion spell files.
pub const SPELL_FILE_SUFFIX: &str = ".cdtb.bin.json";

/// Supplies the spell of a champion by `apiName`.
pub trait SpellSource {
    /// `Ok(None)` when the champion has no spell data at all.
    fn load_spell(&self, api_name: &str) -> Result<Option<Spell>, SpellError>;
}

/// Spell files in a directory, one per champion:
/// `<dir>/<apiName>.cdtb.bin.json`, or the same name lowercased.
#[derive(Debug, Clone)]
pub struct SpellDirectory {
    root: PathBuf,
}

impl SpellDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The spell file of `api_name`, if one exists.
    pub fn spell_path(&self, api_name: &str) -> Option<PathBuf> {
        if api_name.is_empty() || api_name.contains(['/', '\\']) || api_name.contains("..") {
            return None;
        }
        let exact = self.root.join(format!("{}{}", api_name, SPELL_FILE_SUFFIX));
        if exact.is_file() {
            return Some(exact);
        }
        let lower = self
            .root
            .join(format!("{}{}", api_name.to_lowercase(), SPELL_FILE_SUFFIX));
        lower.is_file().then_some(lower)
    }
}

impl SpellSource for SpellDirectory {
    fn load_spell(&self, api_name: &str) -> Result<Option<Spell>, SpellError> {
        match self.spell_path(api_name) {
            Some(path) => parser::load_spell(&path),
            None => {
                debug!(api_name, root = %self.root.display(), "no spell file");
                Ok(None)
            }
        }
    }
}

/// In-memory spells keyed by `apiName`.
impl SpellSource for HashMap<String, Spell> {
    fn load_spell(&self, api_name: &str) -> Result<Option<Spell>, SpellError> {
        Ok(self.get(api_name).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SPELL: &str = r#"{
        "TFT14_AhriSpell": {
            "mSpell": {
                "mDataValues": [{"mName": "Damage", "mValues": [0, 100, 150, 225]}]
            }
        }
    }"#;

    #[test]
    fn finds_exact_then_lowercase_names() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("TFT14_Ahri.cdtb.bin.json"), SPELL).unwrap();
        std::fs::write(dir.path().join("tft14_jinx.cdtb.bin.json"), SPELL).unwrap();
        let source = SpellDirectory::new(dir.path());

        assert_eq!(
            source.spell_path("TFT14_Ahri").unwrap(),
            dir.path().join("TFT14_Ahri.cdtb.bin.json")
        );
        assert_eq!(
            source.spell_path("TFT14_Jinx").unwrap(),
            dir.path().join("tft14_jinx.cdtb.bin.json")
        );
        assert!(source.spell_path("TFT14_Missing").is_none());
        assert!(source.spell_path("../TFT14_Ahri").is_none());
    }

    #[test]
    fn loads_spells_and_reports_bad_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("TFT14_Ahri.cdtb.bin.json"), SPELL).unwrap();
        std::fs::write(dir.path().join("TFT14_Bad.cdtb.bin.json"), "{oops").unwrap();
        let source = SpellDirectory::new(dir.path());

        let spell = source.load_spell("TFT14_Ahri").unwrap().unwrap();
        assert_eq!(spell.values.get("Damage", 2), 150.0);
        assert!(source.load_spell("TFT14_None").unwrap().is_none());
        assert!(source.load_spell("TFT14_Bad").is_err());
    }

    #[test]
    fn in_memory_source() {
        let mut spells = HashMap::new();
        spells.insert("TFT14_Ahri".to_string(), Spell::default());
        assert!(spells.load_spell("TFT14_Ahri").unwrap().is_some());
        assert!(spells.load_spell("TFT14_Jinx").unwrap().is_none());
    }
}
