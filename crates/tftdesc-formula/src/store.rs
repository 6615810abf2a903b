//! Per-spell store of tiered values.

use std::collections::HashMap;

use crate::format::round2;
use crate::types::TieredValue;

impl TieredValue {
    /// The magnitude for `tier`, clamped into the available range.
    ///
    /// Magnitudes with an absolute value below 1 are rounded to two decimal
    /// places; larger ones are returned unrounded. An empty series reads as 0.
    pub fn at(&self, tier: i64) -> f64 {
        let Some(last) = self.magnitudes.len().checked_sub(1) else {
            return 0.0;
        };
        let index = usize::try_from(tier).unwrap_or(0).min(last);
        let value = self.magnitudes[index];
        if value.abs() < 1.0 { round2(value) } else { value }
    }
}

/// Named tiered values of one spell.
///
/// Built once from the spell file and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct TieredValueStore {
    values: HashMap<String, TieredValue>,
}

impl TieredValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value; a later value with the same name replaces an earlier one.
    pub fn insert(&mut self, value: TieredValue) {
        self.values.insert(value.name.clone(), value);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn value(&self, name: &str) -> Option<&TieredValue> {
        self.values.get(name)
    }

    /// The magnitude of `name` at `tier`, or 0 for unknown names.
    pub fn get(&self, name: &str, tier: i64) -> f64 {
        self.values.get(name).map_or(0.0, |value| value.at(tier))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<TieredValue> for TieredValueStore {
    fn from_iter<I: IntoIterator<Item = TieredValue>>(iter: I) -> Self {
        let mut store = Self::new();
        for value in iter {
            store.insert(value);
        }
        store
    }
}
