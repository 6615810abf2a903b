//! Spell file decoding.
//!
//! A spell file is a JSON document whose first key ending in `Spell` holds an
//! object with `mSpell.mDataValues` (tiered values) and
//! `mSpell.mSpellCalculations` (the formula table). Anything missing decodes
//! as empty rather than failing.

use std::path::Path;

use serde_json::{Map, Value};
use tftdesc_core::jsonfile;
use tracing::debug;

use crate::spell::Spell;
use crate::store::TieredValueStore;
use crate::types::{FormulaTable, SpellError, TieredValue};

/// Suffix of the document key that holds the spell block.
pub const SPELL_KEY_SUFFIX: &str = "Spell";

/// Locate and decode the spell block of a parsed document.
///
/// Returns `None` when no key ends in `Spell` with an object value.
pub fn spell_from_document(doc: &Value) -> Option<Spell> {
    let root = doc.as_object()?;
    let (key, block) = root
        .iter()
        .find(|(key, value)| key.ends_with(SPELL_KEY_SUFFIX) && value.is_object())?;
    debug!(key = %key, "found spell block");
    Some(block.get("mSpell").and_then(Value::as_object).map_or_else(
        || {
            debug!(key = %key, "spell block has no mSpell, using empty spell");
            Spell::default()
        },
        spell_from_block,
    ))
}

fn spell_from_block(block: &Map<String, Value>) -> Spell {
    let values: TieredValueStore = block
        .get("mDataValues")
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| match serde_json::from_value::<TieredValue>(entry.clone()) {
                    Ok(value) if !value.name.is_empty() => Some(value),
                    Ok(_) => None,
                    Err(e) => {
                        debug!(error = %e, "skipping malformed data value");
                        None
                    }
                })
                .collect()
        })
        .unwrap_or_default();

    let formulas = block
        .get("mSpellCalculations")
        .and_then(Value::as_object)
        .map(FormulaTable::from_object)
        .unwrap_or_default();

    Spell::new(values, formulas)
}

/// Decode a spell from file contents.
pub fn parse_spell(content: &str) -> Result<Option<Spell>, SpellError> {
    let doc = jsonfile::parse_json(content)?;
    Ok(spell_from_document(&doc))
}

/// Read and decode a spell file.
pub fn load_spell(path: &Path) -> Result<Option<Spell>, SpellError> {
    let doc = jsonfile::read_json(path)?;
    let spell = spell_from_document(&doc);
    if spell.is_none() {
        debug!(path = %path.display(), "spell file has no spell block");
    }
    Ok(spell)
}
