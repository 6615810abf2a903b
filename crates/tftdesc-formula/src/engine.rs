//! Recursive evaluation of spell calculation trees.
//!
//! Sibling parts are joined as display fragments (`"20% AP + 10% AP"`), not
//! summed: the export encodes independent scaling terms that are meant to be
//! read side by side. Only ratio, coefficient and efficiency nodes multiply.

use tracing::debug;

use crate::format::{as_percent_int, is_bare_number, with_stat_suffix};
use crate::store::TieredValueStore;
use crate::types::{CalculationNode, Formula, FormulaTable, Stat};
use crate::value::{Fragment, Quantity, Unit};

/// Default bound on nested node evaluation.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Evaluates calculation nodes of one spell.
///
/// Evaluation is a pure function of the node, the spell's values and formula
/// table, and the tier. Reference cycles in the formula table are cut off at
/// `max_depth`; the offending branch contributes nothing.
#[derive(Debug, Clone, Copy)]
pub struct FormulaEvaluator<'a> {
    store: &'a TieredValueStore,
    table: &'a FormulaTable,
    max_depth: usize,
}

impl<'a> FormulaEvaluator<'a> {
    pub fn new(store: &'a TieredValueStore, table: &'a FormulaTable) -> Self {
        Self {
            store,
            table,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Evaluate a single node to its display string.
    pub fn evaluate(&self, node: &CalculationNode, tier: i64) -> String {
        self.fragment(node, tier).to_string()
    }

    /// Evaluate a single node, keeping the typed result.
    pub fn fragment(&self, node: &CalculationNode, tier: i64) -> Fragment {
        self.eval(node, tier, 0)
    }

    /// Evaluate every top-level part of a formula and join them.
    ///
    /// A bare numeric result gets a `% AP` suffix whenever any formula in the
    /// table leads with a value named `...AP`. The export under-tags AP
    /// scalings; this mirrors how the game client displays them.
    pub fn evaluate_formula(&self, formula: &Formula, tier: i64) -> String {
        let joined = self.join_parts(&formula.parts, tier, 0).to_string();
        if is_bare_number(&joined) && self.table.any_leads_with_ap_value() {
            format!("{}% AP", joined)
        } else {
            joined
        }
    }

    /// Evaluate a formula of the table by key.
    pub fn evaluate_key(&self, key: &str, tier: i64) -> Option<String> {
        self.table
            .get(key)
            .map(|formula| self.evaluate_formula(formula, tier))
    }

    fn join_parts(&self, parts: &[CalculationNode], tier: i64, depth: usize) -> Fragment {
        Fragment::join(parts.iter().map(|part| self.eval(part, tier, depth)))
    }

    fn lookup(&self, name: &str, tier: i64) -> Option<f64> {
        let value = self.store.value(name).map(|v| v.at(tier));
        if value.is_none() {
            debug!(name, "calculation references unknown data value");
        }
        value
    }

    fn eval(&self, node: &CalculationNode, tier: i64, depth: usize) -> Fragment {
        if depth > self.max_depth {
            debug!(depth, "calculation nesting exceeds limit, dropping branch");
            return Fragment::Empty;
        }
        let next = depth + 1;

        match node {
            CalculationNode::NamedValue { name } => match self.lookup(name, tier) {
                Some(v) if name.ends_with("AD") => Quantity::plain(as_percent_int(v) as f64).into(),
                Some(v) if name.ends_with("AP") => {
                    Quantity::new(v.trunc(), Unit::Stat(Stat::AbilityPower)).into()
                }
                Some(v) => Quantity::plain(v).into(),
                None => Fragment::Empty,
            },

            CalculationNode::StatBySubpart { stat, subpart } => {
                let Some(stat) = *stat else {
                    return Fragment::Empty;
                };
                let inner = self.eval(subpart, tier, next);
                if inner.is_empty() {
                    return Fragment::Empty;
                }
                scale_with_stat(inner, stat)
            }

            CalculationNode::SubpartScaledByRatio { ratio, subpart } => {
                match self.eval(subpart, tier, next) {
                    Fragment::Quantity(q)
                        if matches!(q.unit, Unit::Plain | Unit::Stat(Stat::AbilityPower)) =>
                    {
                        Quantity::new((q.magnitude * ratio * 100.0).trunc(), q.unit).into()
                    }
                    other => other,
                }
            }

            CalculationNode::SpellCalculationReference { key } => match self.table.get(key) {
                Some(formula) => self.join_parts(&formula.parts, tier, next),
                None => {
                    debug!(key = %key, "reference to unknown spell calculation");
                    Fragment::Empty
                }
            },

            CalculationNode::SumOfSubparts { subparts } => self.join_parts(subparts, tier, next),

            CalculationNode::BuffCounterByNamedValue { name } => match self.lookup(name, tier) {
                Some(v) if name.ends_with("AD") => Quantity::plain(as_percent_int(v) as f64).into(),
                Some(v) => Quantity::plain(v).into(),
                None => Fragment::Empty,
            },

            CalculationNode::StatByCoefficient { coefficient, stat } => match *stat {
                None => Fragment::Empty,
                Some(stat) if stat.is_percent_scaled() => {
                    Quantity::new(as_percent_int(*coefficient) as f64, Unit::Stat(stat)).into()
                }
                Some(stat) if *coefficient != 1.0 => {
                    Quantity::new(*coefficient, Unit::Times(stat)).into()
                }
                Some(stat) => Fragment::text(stat.as_str()),
            },

            CalculationNode::Number { number } => Quantity::plain(*number).into(),

            CalculationNode::StatByNamedValue { name, stat } => {
                let Some(stat) = *stat else {
                    return Fragment::Empty;
                };
                match self.lookup(name, tier) {
                    Some(v) if stat.is_percent_scaled() => {
                        Quantity::new(as_percent_int(v) as f64, Unit::Stat(stat)).into()
                    }
                    Some(v) => Quantity::new(v, Unit::Times(stat)).into(),
                    None => Fragment::Empty,
                }
            }

            CalculationNode::BuffCounterByCoefficient { coefficient } => {
                Quantity::plain(as_percent_int(*coefficient) as f64).into()
            }

            CalculationNode::StatEfficiencyPerHundred { name, bonus_stat } => {
                match self.lookup(name, tier) {
                    Some(v) => Quantity::new((v * bonus_stat).trunc(), Unit::Percent).into(),
                    None => Fragment::Empty,
                }
            }

            CalculationNode::ProductOfSubparts { part1, part2 } => {
                match (part1.stat(), part2.stat()) {
                    (Some(a), Some(b)) => Fragment::text(stat_product(a, b)),
                    _ => Fragment::Empty,
                }
            }

            CalculationNode::CharLevelInterpolation { start, end } => Fragment::text(format!(
                "{}% ~ {}%",
                as_percent_int(*start),
                as_percent_int(*end)
            )),

            CalculationNode::Unknown { .. } => Fragment::Empty,
        }
    }
}

/// Tag an evaluated subpart with the stat it scales with.
fn scale_with_stat(inner: Fragment, stat: Stat) -> Fragment {
    if stat.is_percent_scaled() {
        if let Fragment::Quantity(q) = &inner {
            if matches!(q.unit, Unit::Plain | Unit::Percent) || q.unit == Unit::Stat(stat) {
                return q.retag(Unit::Stat(stat)).into();
            }
        }
        // Composite text: drop a trailing run of the suffix's own characters
        // before appending it again.
        let text = inner.to_string();
        let trimmed =
            text.trim_end_matches(|c: char| c == '%' || c == ' ' || stat.as_str().contains(c));
        return Fragment::text(with_stat_suffix(trimmed, stat));
    }
    match inner {
        Fragment::Quantity(q) if q.unit == Unit::Plain => q.retag(Unit::Stat(stat)).into(),
        other => Fragment::text(format!("{} {}", other, stat)),
    }
}

/// Display a product of two stats.
fn stat_product(a: Stat, b: Stat) -> String {
    if a == b {
        a.to_string()
    } else if a.is_percent_scaled() {
        format!("{} {}", b, a)
    } else if b.is_percent_scaled() {
        format!("{} {}", a, b)
    } else {
        format!("{} * {}", a, b)
    }
}
