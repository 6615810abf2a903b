//! Per-kind rendering of dataset entities.

use serde::Serialize;
use serde_json::Value;
use tftdesc_core::dataset::DataSet;
use tftdesc_core::record::{self, DESC_FIELD, MODIFIED_DESC_FIELD, Record};
use tftdesc_core::threshold::{item_effects, thresholds_of};
use tftdesc_formula::{DEFAULT_MAX_DEPTH, Spell, SpellError};
use tftdesc_template::{RenderOptions, TemplateEngine, VariableResolver};
use tracing::{debug, warn};

use crate::error::{RenderError, Result};
use crate::source::SpellSource;
use crate::values::SpellValues;

/// Marker in item api names that identifies augments.
pub const AUGMENT_MARKER: &str = "Augment";

/// Record field holding a champion's ability.
pub const ABILITY_FIELD: &str = "ability";

/// Knobs shared by every entity kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSettings {
    pub source_field: String,
    pub target_field: String,
    pub max_formula_depth: usize,
    pub tiers: Vec<i64>,
    pub skip_augments: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            source_field: DESC_FIELD.to_string(),
            target_field: MODIFIED_DESC_FIELD.to_string(),
            max_formula_depth: DEFAULT_MAX_DEPTH,
            tiers: vec![1, 2, 3],
            skip_augments: true,
        }
    }
}

/// Why an entity was left without a rendered description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    NoApiName,
    NoDescription,
    Augment,
    EmptyResult,
    NotAnObject,
}

/// What rendering one entity produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Tokens were substituted.
    Rendered(String),
    /// Rendering ran but the text came out identical to the template.
    Unchanged(String),
    /// No spell data; the template is used as-is.
    PassedThrough(String),
    /// Nothing to attach.
    Skipped(SkipReason),
}

impl Outcome {
    /// The text to attach to the record, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Rendered(text) | Self::Unchanged(text) | Self::PassedThrough(text) => Some(text),
            Self::Skipped(_) => None,
        }
    }

    fn from_render(template: &str, rendered: String) -> Self {
        if rendered.is_empty() {
            Self::Skipped(SkipReason::EmptyResult)
        } else if rendered == template {
            Self::Unchanged(rendered)
        } else {
            Self::Rendered(rendered)
        }
    }
}

/// Entity kinds the renderer knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Champion,
    Item,
    Trait,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Champion => "champion",
            Self::Item => "item",
            Self::Trait => "trait",
        })
    }
}

/// One entity after rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedEntity {
    pub kind: EntityKind,
    pub record: Record,
    pub outcome: Outcome,
}

/// One formula of a champion spell evaluated at each configured tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormulaRow {
    pub key: String,
    pub tiers: Vec<String>,
}

/// Renders entity descriptions.
///
/// Holds the spell source and settings for a run. Every method is a pure
/// function of its inputs and the spell data, so entities can be rendered
/// in any order.
#[derive(Debug, Clone)]
pub struct RenderOrchestrator<S> {
    spells: S,
    settings: RenderSettings,
}

impl<S: SpellSource> RenderOrchestrator<S> {
    pub fn new(spells: S, settings: RenderSettings) -> Self {
        Self { spells, settings }
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub fn spells(&self) -> &S {
        &self.spells
    }

    // -- champions ----------------------------------------------------------

    /// Render a champion ability template from the champion's spell data.
    ///
    /// A champion without usable spell data gets its template back
    /// unmodified.
    pub fn render_ability(&self, api_name: &str, template: &str) -> Outcome {
        if template.is_empty() {
            return Outcome::Skipped(SkipReason::NoDescription);
        }
        match self.spells.load_spell(api_name) {
            Ok(Some(spell)) => self.render_with_spell(&spell, template),
            Ok(None) => {
                warn!(api_name, "no spell data, keeping the original description");
                Outcome::PassedThrough(template.to_string())
            }
            Err(e) => {
                warn!(api_name, error = %e, "unreadable spell data, keeping the original description");
                Outcome::PassedThrough(template.to_string())
            }
        }
    }

    /// Render an ability template against an already-loaded spell.
    pub fn render_with_spell(&self, spell: &Spell, template: &str) -> Outcome {
        let engine = TemplateEngine::with_options(RenderOptions {
            merge_adjacent_groups: true,
        });
        let values = SpellValues::new(spell, &self.settings.tiers, self.settings.max_formula_depth);
        let outcome = Outcome::from_render(template, engine.render(template, &values));
        if matches!(outcome, Outcome::Unchanged(_)) {
            debug!("ability description unchanged after rendering");
        }
        outcome
    }

    /// A champion record with its ability description rendered.
    pub fn augment_champion(&self, champion: &Record) -> (Record, Outcome) {
        let api_name = record::api_name(champion);
        if api_name.is_empty() {
            return (champion.clone(), Outcome::Skipped(SkipReason::NoApiName));
        }
        let Some(ability) = champion.get(ABILITY_FIELD).and_then(Value::as_object) else {
            debug!(api_name, "champion has no ability");
            return (champion.clone(), Outcome::Skipped(SkipReason::NoDescription));
        };
        let template = record::str_field(ability, &self.settings.source_field);
        let outcome = self.render_ability(api_name, template);

        let mut out = champion.clone();
        if let Some(text) = outcome.text() {
            let ability = self.attach(ability, text);
            out.insert(ABILITY_FIELD.to_string(), Value::Object(ability));
        }
        (out, outcome)
    }

    // -- items --------------------------------------------------------------

    /// Render an item description from its `effects` map.
    pub fn render_item(&self, item: &Record) -> Outcome {
        let api_name = record::api_name(item);
        if api_name.is_empty() {
            return Outcome::Skipped(SkipReason::NoApiName);
        }
        if self.settings.skip_augments && api_name.contains(AUGMENT_MARKER) {
            return Outcome::Skipped(SkipReason::Augment);
        }
        let template = record::str_field(item, &self.settings.source_field);
        if template.is_empty() {
            return Outcome::Skipped(SkipReason::NoDescription);
        }
        let effects = item_effects(item);
        let rendered = TemplateEngine::new().render(template, &VariableResolver::new(&effects));
        Outcome::from_render(template, rendered)
    }

    pub fn augment_item(&self, item: &Record) -> (Record, Outcome) {
        let outcome = self.render_item(item);
        (self.attach_outcome(item, &outcome), outcome)
    }

    // -- traits -------------------------------------------------------------

    /// Render a trait description, one row per effect threshold.
    pub fn render_trait(&self, trait_record: &Record) -> Outcome {
        if record::api_name(trait_record).is_empty() {
            return Outcome::Skipped(SkipReason::NoApiName);
        }
        let template = record::str_field(trait_record, &self.settings.source_field);
        if template.is_empty() {
            return Outcome::Skipped(SkipReason::NoDescription);
        }
        let thresholds = thresholds_of(trait_record);
        let rendered = TemplateEngine::new().render_rows(template, &thresholds);
        Outcome::from_render(template, rendered)
    }

    pub fn augment_trait(&self, trait_record: &Record) -> (Record, Outcome) {
        let outcome = self.render_trait(trait_record);
        (self.attach_outcome(trait_record, &outcome), outcome)
    }

    // -- lookup -------------------------------------------------------------

    /// Find an entity by `apiName` and render it. Champions are tried first,
    /// then items, then traits.
    pub fn render_named(&self, dataset: &DataSet, api_name: &str) -> Result<RenderedEntity> {
        if let Some(champion) = dataset.find_champion(api_name) {
            let (record, outcome) = self.augment_champion(champion);
            return Ok(RenderedEntity {
                kind: EntityKind::Champion,
                record,
                outcome,
            });
        }
        if let Some(item) = dataset.find_item(api_name) {
            let (record, outcome) = self.augment_item(item);
            return Ok(RenderedEntity {
                kind: EntityKind::Item,
                record,
                outcome,
            });
        }
        if let Some(trait_record) = dataset.find_trait(api_name) {
            let (record, outcome) = self.augment_trait(trait_record);
            return Ok(RenderedEntity {
                kind: EntityKind::Trait,
                record,
                outcome,
            });
        }
        Err(RenderError::UnknownEntity(api_name.to_string()))
    }

    /// Every formula of a champion's spell, evaluated at each tier, sorted by
    /// key.
    pub fn formula_rows(&self, api_name: &str) -> Result<Vec<FormulaRow>> {
        let spell = self
            .spells
            .load_spell(api_name)
            .map_err(|e: SpellError| {
                warn!(api_name, error = %e, "unreadable spell data");
                RenderError::NoSpell(api_name.to_string())
            })?
            .ok_or_else(|| RenderError::NoSpell(api_name.to_string()))?;
        let evaluator = spell.evaluator(self.settings.max_formula_depth);
        Ok(spell
            .formulas
            .keys()
            .into_iter()
            .map(|key| FormulaRow {
                key: key.to_string(),
                tiers: self
                    .settings
                    .tiers
                    .iter()
                    .map(|&tier| evaluator.evaluate_key(key, tier).unwrap_or_default())
                    .collect(),
            })
            .collect())
    }

    // -- helpers ------------------------------------------------------------

    fn attach(&self, record: &Record, text: &str) -> Record {
        record::with_field_after(
            record,
            &self.settings.source_field,
            &self.settings.target_field,
            Value::String(text.to_string()),
        )
    }

    fn attach_outcome(&self, record: &Record, outcome: &Outcome) -> Record {
        match outcome.text() {
            Some(text) => self.attach(record, text),
            None => record.clone(),
        }
    }
}
