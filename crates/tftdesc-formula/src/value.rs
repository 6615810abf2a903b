//! Typed evaluation results.
//!
//! Formula nodes produce a [`Fragment`]: nothing, a single [`Quantity`] that
//! still knows its unit, or already-composed display text. Composing nodes
//! inspect the unit instead of re-parsing rendered strings; text is produced
//! only when a result is finally displayed or joined.

use std::fmt;

use crate::format::{format_number, with_stat_suffix};
use crate::types::Stat;

/// What a magnitude is measured in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    /// A bare number.
    Plain,
    /// `N%`.
    Percent,
    /// Scaling with a stat: `N% AP`, `N% AD`, `N HP`.
    Stat(Stat),
    /// A coefficient on a stat: `N * HP`.
    Times(Stat),
}

/// A magnitude with its unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantity {
    pub magnitude: f64,
    pub unit: Unit,
}

impl Quantity {
    pub fn new(magnitude: f64, unit: Unit) -> Self {
        Self { magnitude, unit }
    }

    pub fn plain(magnitude: f64) -> Self {
        Self::new(magnitude, Unit::Plain)
    }

    /// Same magnitude, different unit.
    pub fn retag(self, unit: Unit) -> Self {
        Self { unit, ..self }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let number = format_number(self.magnitude);
        match self.unit {
            Unit::Plain => f.write_str(&number),
            Unit::Percent => write!(f, "{}%", number),
            Unit::Stat(stat) => f.write_str(&with_stat_suffix(&number, stat)),
            Unit::Times(stat) => write!(f, "{} * {}", number, stat),
        }
    }
}

/// The result of evaluating a calculation node.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Fragment {
    /// No contribution.
    #[default]
    Empty,
    Quantity(Quantity),
    Text(String),
}

impl Fragment {
    pub fn text(s: impl Into<String>) -> Self {
        let s = s.into();
        if s.is_empty() { Self::Empty } else { Self::Text(s) }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Quantity(_) => false,
            Self::Text(s) => s.is_empty(),
        }
    }

    /// Join the non-empty fragments with `" + "`.
    ///
    /// A single survivor is returned as-is so its unit stays visible to
    /// enclosing nodes.
    pub fn join(parts: impl IntoIterator<Item = Fragment>) -> Fragment {
        let mut survivors: Vec<Fragment> = parts.into_iter().filter(|p| !p.is_empty()).collect();
        match survivors.len() {
            0 => Self::Empty,
            1 => survivors.remove(0),
            _ => Self::Text(
                survivors
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(" + "),
            ),
        }
    }
}

impl From<Quantity> for Fragment {
    fn from(q: Quantity) -> Self {
        Self::Quantity(q)
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Quantity(q) => q.fmt(f),
            Self::Text(s) => f.write_str(s),
        }
    }
}
