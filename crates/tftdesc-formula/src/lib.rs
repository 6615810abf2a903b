//! Spell value resolution for tftdesc.
//!
//! A champion spell carries named per-tier value series and a table of
//! calculations: small expression trees that combine those values with stat
//! scalings. This crate decodes both from spell files and evaluates the trees
//! to display strings such as `"180/270/400"` or `"20% AP + 5% AD"`.

pub mod engine;
pub mod format;
pub mod parser;
pub mod spell;
pub mod store;
pub mod types;
pub mod value;

pub use engine::{DEFAULT_MAX_DEPTH, FormulaEvaluator};
pub use spell::Spell;
pub use store::TieredValueStore;
pub use types::{CalculationNode, Formula, FormulaTable, SpellError, Stat, TieredValue};
