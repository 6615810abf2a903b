//! A decoded champion spell: its tiered values and calculation table.

use crate::engine::FormulaEvaluator;
use crate::format::format_scaled_number;
use crate::store::TieredValueStore;
use crate::types::FormulaTable;

/// Values and calculations of one spell.
#[derive(Debug, Clone, Default)]
pub struct Spell {
    pub values: TieredValueStore,
    pub formulas: FormulaTable,
}

impl Spell {
    pub fn new(values: TieredValueStore, formulas: FormulaTable) -> Self {
        Self { values, formulas }
    }

    pub fn evaluator(&self, max_depth: usize) -> FormulaEvaluator<'_> {
        FormulaEvaluator::new(&self.values, &self.formulas).with_max_depth(max_depth)
    }

    /// The value `name` at each tier, multiplied by `factor` and truncated,
    /// joined with `/`. `None` when the spell has no such value.
    pub fn value_series(&self, name: &str, tiers: &[i64], factor: f64) -> Option<String> {
        let value = self.values.value(name)?;
        let series = tiers
            .iter()
            .map(|&tier| ((value.at(tier) * factor).trunc() as i64).to_string())
            .collect::<Vec<_>>();
        Some(series.join("/"))
    }

    /// The value `name` at each tier multiplied by `factor`, formatted as a
    /// plain number (whole values bare, the rest to two places), joined
    /// with `/`.
    pub fn scaled_series(&self, name: &str, tiers: &[i64], factor: f64) -> Option<String> {
        let value = self.values.value(name)?;
        let series = tiers
            .iter()
            .map(|&tier| format_scaled_number(value.at(tier) * factor))
            .collect::<Vec<_>>();
        Some(series.join("/"))
    }

    /// The formula `key` evaluated at each tier. Identical results collapse
    /// to a single value; otherwise they are joined with `/`.
    pub fn formula_series(&self, key: &str, tiers: &[i64], max_depth: usize) -> Option<String> {
        let formula = self.formulas.get(key)?;
        let evaluator = self.evaluator(max_depth);
        let mut series: Vec<String> = tiers
            .iter()
            .map(|&tier| evaluator.evaluate_formula(formula, tier))
            .collect();
        if series.windows(2).all(|w| w[0] == w[1]) {
            series.truncate(1);
        }
        Some(series.join("/"))
    }
}
