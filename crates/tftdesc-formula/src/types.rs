//! Spell data model: stats, tiered values, calculation nodes and formulas.
//!
//! Field names follow the spell-file export (`mDataValue`, `mSubpart`, ...).
//! Decoding is lenient throughout: a node that cannot be decoded becomes
//! [`CalculationNode::Unknown`], keeping only its `mStat`, and contributes
//! nothing when evaluated.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use tftdesc_core::{CoreError, lenient};

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

/// Character attribute a scaling value is expressed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stat {
    AbilityPower,
    AttackDamage,
    MagicResist,
    Health,
    Range,
}

impl Stat {
    /// Map a numeric stat code from the export. Unknown codes are `None`.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::AbilityPower),
            2 => Some(Self::AttackDamage),
            6 => Some(Self::MagicResist),
            12 => Some(Self::Health),
            29 => Some(Self::Range),
            _ => None,
        }
    }

    /// Short display name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AbilityPower => "AP",
            Self::AttackDamage => "AD",
            Self::MagicResist => "MR",
            Self::Health => "HP",
            Self::Range => "Range",
        }
    }

    /// AP and AD scalings are always shown as `N% AP` / `N% AD`.
    pub fn is_percent_scaled(self) -> bool {
        matches!(self, Self::AbilityPower | Self::AttackDamage)
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tiered values
// ---------------------------------------------------------------------------

/// A named series of magnitudes, one per tier (star level).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TieredValue {
    #[serde(rename = "mName", default, deserialize_with = "lenient::string_or_empty")]
    pub name: String,

    /// May be empty, in which case every tier reads as zero.
    #[serde(rename = "mValues", default, deserialize_with = "lenient::f64_seq")]
    pub magnitudes: Vec<f64>,
}

impl TieredValue {
    pub fn new(name: impl Into<String>, magnitudes: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            magnitudes,
        }
    }
}

// ---------------------------------------------------------------------------
// Calculation nodes
// ---------------------------------------------------------------------------

/// One node of a spell calculation tree.
///
/// The `__type` tag selects the variant. Tags this crate does not know
/// decode to [`CalculationNode::Unknown`] through [`CalculationNode::from_value`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "__type")]
pub enum CalculationNode {
    /// A tiered value by name.
    #[serde(rename = "NamedDataValueCalculationPart")]
    NamedValue {
        #[serde(rename = "mDataValue", default, deserialize_with = "lenient::string_or_empty")]
        name: String,
    },

    /// A subpart tagged with the stat it scales with.
    #[serde(rename = "StatBySubPartCalculationPart")]
    StatBySubpart {
        #[serde(rename = "mStat", default, deserialize_with = "stat_code")]
        stat: Option<Stat>,
        #[serde(rename = "mSubpart", default, deserialize_with = "boxed_node")]
        subpart: Box<CalculationNode>,
    },

    /// A subpart multiplied by `ratio * 100`.
    #[serde(rename = "SubPartScaledProportionalToStat")]
    SubpartScaledByRatio {
        #[serde(rename = "mRatio", default, deserialize_with = "lenient::f64_or_zero")]
        ratio: f64,
        #[serde(rename = "mSubpart", default, deserialize_with = "boxed_node")]
        subpart: Box<CalculationNode>,
    },

    /// Every part of another formula in the same table.
    #[serde(rename = "{f3cbe7b2}")]
    SpellCalculationReference {
        #[serde(
            rename = "mSpellCalculationKey",
            default,
            deserialize_with = "lenient::string_or_empty"
        )]
        key: String,
    },

    #[serde(rename = "SumOfSubPartsCalculationPart")]
    SumOfSubparts {
        #[serde(rename = "mSubparts", default, deserialize_with = "node_list")]
        subparts: Vec<CalculationNode>,
    },

    /// Like [`CalculationNode::NamedValue`] but never stat-suffixed.
    #[serde(rename = "BuffCounterByNamedDataValueCalculationPart")]
    BuffCounterByNamedValue {
        #[serde(rename = "mDataValue", default, deserialize_with = "lenient::string_or_empty")]
        name: String,
    },

    #[serde(rename = "StatByCoefficientCalculationPart")]
    StatByCoefficient {
        #[serde(rename = "mCoefficient", default, deserialize_with = "lenient::f64_or_zero")]
        coefficient: f64,
        #[serde(rename = "mStat", default, deserialize_with = "stat_code")]
        stat: Option<Stat>,
    },

    #[serde(rename = "NumberCalculationPart")]
    Number {
        #[serde(rename = "mNumber", default, deserialize_with = "lenient::f64_or_zero")]
        number: f64,
    },

    #[serde(rename = "StatByNamedDataValueCalculationPart")]
    StatByNamedValue {
        #[serde(rename = "mDataValue", default, deserialize_with = "lenient::string_or_empty")]
        name: String,
        #[serde(rename = "mStat", default, deserialize_with = "stat_code")]
        stat: Option<Stat>,
    },

    #[serde(rename = "BuffCounterByCoefficientCalculationPart")]
    BuffCounterByCoefficient {
        #[serde(rename = "mCoefficient", default, deserialize_with = "lenient::f64_or_zero")]
        coefficient: f64,
    },

    #[serde(rename = "StatEfficiencyPerHundred")]
    StatEfficiencyPerHundred {
        #[serde(rename = "mDataValue", default, deserialize_with = "lenient::string_or_empty")]
        name: String,
        #[serde(
            rename = "mBonusStatForEfficiency",
            default,
            deserialize_with = "lenient::f64_or_zero"
        )]
        bonus_stat: f64,
    },

    /// Product of two stat-bearing parts; only the parts' stats are shown.
    #[serde(rename = "ProductOfSubPartsCalculationPart")]
    ProductOfSubparts {
        #[serde(rename = "mPart1", default, deserialize_with = "boxed_node")]
        part1: Box<CalculationNode>,
        #[serde(rename = "mPart2", default, deserialize_with = "boxed_node")]
        part2: Box<CalculationNode>,
    },

    #[serde(rename = "ByCharLevelInterpolationCalculationPart")]
    CharLevelInterpolation {
        #[serde(rename = "mStartValue", default, deserialize_with = "lenient::f64_or_zero")]
        start: f64,
        #[serde(rename = "mEndValue", default, deserialize_with = "lenient::f64_or_zero")]
        end: f64,
    },

    /// Any node kind not listed above. Evaluates to nothing, but the stat
    /// it declares still counts inside a product.
    #[serde(skip)]
    Unknown { stat: Option<Stat> },
}

impl Default for CalculationNode {
    fn default() -> Self {
        Self::Unknown { stat: None }
    }
}

impl CalculationNode {
    /// Decode a node, falling back to [`CalculationNode::Unknown`].
    pub fn from_value(value: &Value) -> Self {
        match Self::deserialize(value) {
            Ok(node) => node,
            Err(e) => {
                tracing::debug!(error = %e, "unrecognized calculation node");
                Self::Unknown {
                    stat: value
                        .get("mStat")
                        .and_then(lenient::as_f64)
                        .and_then(|code| Stat::from_code(code as i64)),
                }
            }
        }
    }

    /// The stat this node is declared against, if it carries one.
    pub fn stat(&self) -> Option<Stat> {
        match self {
            Self::StatBySubpart { stat, .. }
            | Self::StatByCoefficient { stat, .. }
            | Self::StatByNamedValue { stat, .. }
            | Self::Unknown { stat } => *stat,
            _ => None,
        }
    }

    /// The wrapped subpart of single-child nodes.
    pub fn subpart(&self) -> Option<&CalculationNode> {
        match self {
            Self::StatBySubpart { subpart, .. } | Self::SubpartScaledByRatio { subpart, .. } => {
                Some(subpart)
            }
            _ => None,
        }
    }

    /// Name of the tiered value this node reads directly, if any.
    pub fn data_value_name(&self) -> Option<&str> {
        match self {
            Self::NamedValue { name }
            | Self::BuffCounterByNamedValue { name }
            | Self::StatByNamedValue { name, .. }
            | Self::StatEfficiencyPerHundred { name, .. } => Some(name),
            _ => None,
        }
    }
}

fn stat_code<'de, D>(deserializer: D) -> Result<Option<Stat>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(lenient::as_f64(&value).and_then(|code| Stat::from_code(code as i64)))
}

fn boxed_node<'de, D>(deserializer: D) -> Result<Box<CalculationNode>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(Box::new(CalculationNode::from_value(&value)))
}

fn node_list<'de, D>(deserializer: D) -> Result<Vec<CalculationNode>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items.iter().map(CalculationNode::from_value).collect(),
        _ => Vec::new(),
    })
}

// ---------------------------------------------------------------------------
// Formulas
// ---------------------------------------------------------------------------

/// A named spell calculation: an ordered list of top-level parts.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Formula {
    #[serde(rename = "mFormulaParts", default, deserialize_with = "node_list")]
    pub parts: Vec<CalculationNode>,
}

impl Formula {
    pub fn new(parts: Vec<CalculationNode>) -> Self {
        Self { parts }
    }

    /// Whether the first part wraps a tiered value whose name ends in `AP`.
    pub fn leads_with_ap_value(&self) -> bool {
        self.parts
            .first()
            .and_then(CalculationNode::subpart)
            .and_then(CalculationNode::data_value_name)
            .is_some_and(|name| name.ends_with("AP"))
    }
}

/// All calculations of one spell, keyed by calculation name.
#[derive(Debug, Clone, Default)]
pub struct FormulaTable {
    formulas: HashMap<String, Formula>,
}

impl FormulaTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode an `mSpellCalculations` object. Entries that are not objects
    /// are skipped; objects of other calculation shapes get no parts.
    pub fn from_object(calculations: &Map<String, Value>) -> Self {
        let mut table = Self::new();
        for (key, raw) in calculations {
            if !raw.is_object() {
                tracing::debug!(key = %key, "skipping non-object spell calculation");
                continue;
            }
            match Formula::deserialize(raw) {
                Ok(formula) => table.insert(key.clone(), formula),
                Err(e) => tracing::debug!(key = %key, error = %e, "skipping spell calculation"),
            }
        }
        table
    }

    pub fn insert(&mut self, key: impl Into<String>, formula: Formula) {
        self.formulas.insert(key.into(), formula);
    }

    pub fn get(&self, key: &str) -> Option<&Formula> {
        self.formulas.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.formulas.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.formulas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formulas.is_empty()
    }

    /// Formula keys in sorted order.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.formulas.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Whether any formula in the table leads with an `...AP` value.
    pub fn any_leads_with_ap_value(&self) -> bool {
        self.formulas.values().any(Formula::leads_with_ap_value)
    }
}

impl FromIterator<(String, Formula)> for FormulaTable {
    fn from_iter<I: IntoIterator<Item = (String, Formula)>>(iter: I) -> Self {
        Self {
            formulas: iter.into_iter().collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur while loading spell files.
#[derive(Debug, thiserror::Error)]
pub enum SpellError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
