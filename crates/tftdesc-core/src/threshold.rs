//! Trait effect thresholds.
//!
//! A trait carries an ordered list of effects, each activated once a minimum
//! number of units is fielded. Order matters: the i-th effect pairs with the
//! i-th row of the trait description.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::lenient;
use crate::record::Record;

/// Variable name synthesized from [`EffectThreshold::min_units`].
pub const MIN_UNITS_VAR: &str = "MinUnits";

/// One tier of a trait's bonus.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectThreshold {
    /// Units required to activate this tier.
    #[serde(default, deserialize_with = "lenient::i64_or_zero")]
    pub min_units: i64,

    /// Values substituted into this tier's row.
    #[serde(default, deserialize_with = "lenient::object_or_empty")]
    pub variables: Map<String, Value>,
}

impl EffectThreshold {
    pub fn new(min_units: i64, variables: Map<String, Value>) -> Self {
        Self {
            min_units,
            variables,
        }
    }

    /// This tier's variables plus a synthesized `MinUnits` entry.
    pub fn active_variables(&self) -> Map<String, Value> {
        let mut vars = self.variables.clone();
        vars.insert(MIN_UNITS_VAR.to_string(), Value::from(self.min_units));
        vars
    }
}

/// Decode the `effects` array of a trait record, in source order.
///
/// Entries that are not objects are skipped.
pub fn thresholds_of(record: &Record) -> Vec<EffectThreshold> {
    let Some(effects) = record.get("effects").and_then(Value::as_array) else {
        return Vec::new();
    };
    effects
        .iter()
        .filter(|effect| effect.is_object())
        .filter_map(|effect| match EffectThreshold::deserialize(effect) {
            Ok(threshold) => Some(threshold),
            Err(e) => {
                tracing::debug!(error = %e, "skipping undecodable trait effect");
                None
            }
        })
        .collect()
}

/// The flat `effects` map of an item record (effect name to value).
pub fn item_effects(record: &Record) -> Map<String, Value> {
    record
        .get("effects")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default()
}
