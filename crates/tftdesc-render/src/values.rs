//! Token resolution against a champion spell.

use tftdesc_formula::Spell;
use tftdesc_template::TokenResolver;

/// Resolves ability tokens from a spell's tiered values and formulas.
///
/// Values and formulas render as one entry per tier joined with `/`
/// (`180/270/400`). A `@Name*100@` token renders the truncated percentage
/// series with a trailing `%`; any other multiplier scales the values and
/// formats them as plain numbers.
#[derive(Debug, Clone, Copy)]
pub struct SpellValues<'a> {
    spell: &'a Spell,
    tiers: &'a [i64],
    max_depth: usize,
}

impl<'a> SpellValues<'a> {
    pub fn new(spell: &'a Spell, tiers: &'a [i64], max_depth: usize) -> Self {
        Self {
            spell,
            tiers,
            max_depth,
        }
    }
}

/// The multiplier that marks a token as a percentage.
const PERCENT_FACTOR: f64 = 100.0;

impl TokenResolver for SpellValues<'_> {
    fn scaled(&self, name: &str, factor: f64) -> Option<String> {
        if factor == PERCENT_FACTOR {
            self.spell
                .value_series(name, self.tiers, factor)
                .map(|series| format!("{}%", series))
        } else {
            self.spell.scaled_series(name, self.tiers, factor)
        }
    }

    fn tiered(&self, name: &str) -> Option<String> {
        self.spell.value_series(name, self.tiers, 1.0)
    }

    fn formula(&self, name: &str) -> Option<String> {
        self.spell.formula_series(name, self.tiers, self.max_depth)
    }
}
