//! Whole-dataset render passes.
//!
//! Each pass copies the part of the dataset it augments, renders every
//! entity of one kind, and reports what happened. A malformed entity is
//! counted and left alone; it never stops the pass.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value, json};
use tftdesc_core::dataset::DataSet;
use tracing::{debug, info};

use crate::orchestrator::{Outcome, RenderOrchestrator, SkipReason};
use crate::source::SpellSource;

/// Tally of one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub total: usize,
    pub rendered: usize,
    pub unchanged: usize,
    pub passed_through: usize,
    pub skipped: usize,
}

impl BatchReport {
    pub fn record(&mut self, outcome: &Outcome) {
        self.total += 1;
        match outcome {
            Outcome::Rendered(_) => self.rendered += 1,
            Outcome::Unchanged(_) => self.unchanged += 1,
            Outcome::PassedThrough(_) => self.passed_through += 1,
            Outcome::Skipped(_) => self.skipped += 1,
        }
    }

    /// Entities that received a description field.
    pub fn attached(&self) -> usize {
        self.rendered + self.unchanged + self.passed_through
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of {} rendered ({} unchanged, {} passed through, {} skipped)",
            self.attached(),
            self.total,
            self.unchanged,
            self.passed_through,
            self.skipped
        )
    }
}

/// The result of a pass: the document to write and its report.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchOutput {
    pub document: Value,
    pub report: BatchReport,
}

/// Render every champion ability of every set.
///
/// The output is the whole dataset with each champion's `ability` augmented
/// in place.
pub fn render_champions<S: SpellSource>(orch: &RenderOrchestrator<S>, dataset: &DataSet) -> BatchOutput {
    let mut document = dataset.root().clone();
    let mut report = BatchReport::default();

    let sets = document
        .get_mut("sets")
        .and_then(Value::as_object_mut)
        .into_iter()
        .flat_map(|sets| sets.iter_mut());
    for (version, set) in sets {
        let Some(champions) = set.get_mut("champions").and_then(Value::as_array_mut) else {
            continue;
        };
        debug!(set = %version, count = champions.len(), "rendering champions");
        for champion in champions.iter_mut() {
            let Some(record) = champion.as_object() else {
                report.record(&Outcome::Skipped(SkipReason::NotAnObject));
                continue;
            };
            let (augmented, outcome) = orch.augment_champion(record);
            report.record(&outcome);
            *champion = Value::Object(augmented);
        }
    }

    info!(%report, "champion pass complete");
    BatchOutput { document, report }
}

/// Render every item.
///
/// The output is the item list. Augments and description-less items are kept
/// unmodified; entries that are not objects or have no `apiName` are dropped.
pub fn render_items<S: SpellSource>(orch: &RenderOrchestrator<S>, dataset: &DataSet) -> BatchOutput {
    let mut report = BatchReport::default();
    let mut items = Vec::with_capacity(dataset.items().len());

    for item in dataset.items() {
        let Some(record) = item.as_object() else {
            report.record(&Outcome::Skipped(SkipReason::NotAnObject));
            continue;
        };
        let (augmented, outcome) = orch.augment_item(record);
        report.record(&outcome);
        if outcome != Outcome::Skipped(SkipReason::NoApiName) {
            items.push(Value::Object(augmented));
        }
    }

    info!(%report, "item pass complete");
    BatchOutput {
        document: Value::Array(items),
        report,
    }
}

/// Render every trait of every set.
///
/// The output holds only the traits that received a description:
/// `{"sets": {"<version>": {"traits": [...]}}}`.
pub fn render_traits<S: SpellSource>(orch: &RenderOrchestrator<S>, dataset: &DataSet) -> BatchOutput {
    let mut report = BatchReport::default();
    let mut sets = Map::new();

    for (version, _) in dataset.sets() {
        let traits = dataset.traits(version);
        debug!(set = %version, count = traits.len(), "rendering traits");
        let mut rendered = Vec::with_capacity(traits.len());
        for trait_value in traits {
            let Some(record) = trait_value.as_object() else {
                report.record(&Outcome::Skipped(SkipReason::NotAnObject));
                continue;
            };
            let (augmented, outcome) = orch.augment_trait(record);
            report.record(&outcome);
            if outcome.text().is_some() {
                rendered.push(Value::Object(augmented));
            }
        }
        sets.insert(version.to_string(), json!({ "traits": rendered }));
    }

    info!(%report, "trait pass complete");
    BatchOutput {
        document: json!({ "sets": sets }),
        report,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::RenderSettings;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use tftdesc_formula::Spell;
    use tftdesc_formula::types::TieredValue;

    fn dataset() -> DataSet {
        DataSet::from_value(json!({
            "items": [
                {"apiName": "TFT_Item_Rod", "desc": "+@AP@ AP", "effects": {"AP": 10}},
                {"apiName": "TFT14_Augment_Gold", "desc": "@Gold@ gold"},
                {"apiName": "TFT_Item_Empty", "desc": ""},
                {"desc": "no api name"},
                "garbage"
            ],
            "sets": {
                "14": {
                    "champions": [
                        {"apiName": "TFT14_Ahri", "ability": {"desc": "Deal @Damage@.", "name": "Orb"}},
                        {"apiName": "TFT14_Jinx", "ability": {"desc": "Fire @Rockets@."}},
                        {"apiName": "TFT14_Dummy"},
                        7
                    ],
                    "traits": [
                        {"apiName": "TFT14_Mage", "desc": "<row>@Bonus@% AP</row>",
                         "effects": [{"minUnits": 3, "variables": {"Bonus": 20}}]},
                        {"apiName": "TFT14_Blank", "desc": ""}
                    ]
                },
                "13": {
                    "traits": [{"apiName": "TFT13_Old", "desc": "@Nope@ old"}]
                },
                "notes": "not a set"
            }
        }))
    }

    fn orchestrator() -> RenderOrchestrator<HashMap<String, Spell>> {
        let ahri = Spell::new(
            [TieredValue::new("Damage", vec![0.0, 100.0, 150.0, 225.0])]
                .into_iter()
                .collect(),
            Default::default(),
        );
        RenderOrchestrator::new(
            HashMap::from([("TFT14_Ahri".to_string(), ahri)]),
            RenderSettings::default(),
        )
    }

    #[test]
    fn champion_pass_augments_in_place() {
        let out = render_champions(&orchestrator(), &dataset());
        assert_eq!(
            out.report,
            BatchReport {
                total: 4,
                rendered: 1,
                unchanged: 0,
                passed_through: 1,
                skipped: 2,
            }
        );
        let champions = &out.document["sets"]["14"]["champions"];
        assert_eq!(champions[0]["ability"]["modifiedDesc"], "Deal 100/150/225.");
        assert_eq!(champions[1]["ability"]["modifiedDesc"], "Fire @Rockets@.");
        assert!(champions[2].get("ability").is_none());
        assert_eq!(champions[3], 7);
        // the rest of the document is carried over
        assert_eq!(out.document["items"].as_array().unwrap().len(), 5);
        assert_eq!(out.document["sets"]["notes"], "not a set");
    }

    #[test]
    fn item_pass_keeps_skipped_items() {
        let out = render_items(&orchestrator(), &dataset());
        assert_eq!(out.report.total, 5);
        assert_eq!(out.report.rendered, 1);
        assert_eq!(out.report.skipped, 4);

        let items = out.document.as_array().unwrap();
        let names: Vec<&str> = items.iter().map(|i| i["apiName"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["TFT_Item_Rod", "TFT14_Augment_Gold", "TFT_Item_Empty"]);
        assert_eq!(items[0]["modifiedDesc"], "+10 AP");
        assert!(items[1].get("modifiedDesc").is_none());
    }

    #[test]
    fn trait_pass_collects_rendered_traits() {
        let out = render_traits(&orchestrator(), &dataset());
        assert_eq!(out.report.total, 3);
        assert_eq!(out.report.rendered, 2);
        assert_eq!(out.report.skipped, 1);

        let mage = &out.document["sets"]["14"]["traits"][0];
        assert_eq!(mage["modifiedDesc"], "(3) 20% AP");
        assert_eq!(out.document["sets"]["14"]["traits"].as_array().unwrap().len(), 1);
        assert_eq!(out.document["sets"]["13"]["traits"][0]["modifiedDesc"], "0 old");
        assert!(out.document["sets"].get("notes").is_none());
    }

    #[test]
    fn report_display() {
        let report = BatchReport {
            total: 10,
            rendered: 6,
            unchanged: 1,
            passed_through: 2,
            skipped: 1,
        };
        assert_eq!(
            report.to_string(),
            "9 of 10 rendered (1 unchanged, 2 passed through, 1 skipped)"
        );
    }
}
