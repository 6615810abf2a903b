//! Template rendering.

use serde_json::Map;
use tftdesc_core::threshold::EffectThreshold;
use tracing::debug;

use crate::cleanup;
use crate::icon;
use crate::markup;
use crate::resolve::{TokenResolver, VariableResolver};
use crate::token::Token;

const FALLBACK: &str = "0";
const ROW_SEPARATOR: &str = "\n\n";

/// Per-kind switches for the final cleanup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Merge adjacent single-word groups, `(x)(y)` to `(xy)`.
    pub merge_adjacent_groups: bool,
}

/// Renders description templates.
///
/// Rendering never fails: unknown tokens become `0`, unknown markup is
/// dropped, and malformed pieces are left for cleanup.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateEngine {
    options: RenderOptions,
}

impl TemplateEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> RenderOptions {
        self.options
    }

    /// Render a template against one resolver, without row expansion.
    pub fn render(&self, template: &str, resolver: &dyn TokenResolver) -> String {
        let text = markup::strip_tags(template);
        self.render_fragment(&text, resolver)
    }

    /// Render a trait template, expanding its rows once per threshold.
    ///
    /// The text outside row blocks renders once with the first threshold's
    /// variables. With `<expandRow>` every threshold reuses the first row.
    /// With plain `<row>` blocks the i-th row pairs with the i-th threshold
    /// (extra rows are dropped), except that a single row repeats for every
    /// threshold. Each row is prefixed with `(minUnits) ` and fragments are
    /// separated by a blank line.
    pub fn render_rows(&self, template: &str, thresholds: &[EffectThreshold]) -> String {
        let split = markup::split_rows(&markup::strip_tags_keep_rows(template));
        let mut fragments = Vec::new();

        if !split.base.trim().is_empty() {
            let variables = thresholds
                .first()
                .map(EffectThreshold::active_variables)
                .unwrap_or_default();
            let base = markup::strip_tags(&split.base);
            fragments.push(self.render_fragment(&base, &VariableResolver::new(&variables)));
        }

        for (row, threshold) in pair_rows(&split.rows, split.expand, thresholds) {
            let variables: Map<_, _> = threshold.active_variables();
            let rendered = self.render_fragment(row, &VariableResolver::new(&variables));
            let rendered = icon::place_icons(&rendered, &icon::icons(row));
            fragments.push(format!("({}) {}", threshold.min_units, rendered));
        }

        fragments.retain(|f| !f.trim().is_empty());
        fragments.join(ROW_SEPARATOR).trim().to_string()
    }

    /// Substitute, drop icons, and clean up a tag-free fragment.
    fn render_fragment(&self, text: &str, resolver: &dyn TokenResolver) -> String {
        let substituted = crate::token::substitute(text, |token| resolve_token(token, resolver));
        let cleaned = cleanup::normalize(&icon::strip_icons(&substituted));
        if self.options.merge_adjacent_groups {
            cleanup::merge_adjacent_groups(&cleaned)
        } else {
            cleaned
        }
    }
}

/// Pick the row template for each threshold.
fn pair_rows<'a, 't>(
    rows: &'a [String],
    expand: bool,
    thresholds: &'t [EffectThreshold],
) -> Vec<(&'a str, &'t EffectThreshold)> {
    match rows {
        [] => Vec::new(),
        [only] => thresholds.iter().map(|t| (only.as_str(), t)).collect(),
        [first, ..] if expand => thresholds.iter().map(|t| (first.as_str(), t)).collect(),
        _ => rows
            .iter()
            .zip(thresholds)
            .map(|(row, t)| (row.as_str(), t))
            .collect(),
    }
}

/// Resolve one token, trying each lookup rule in order.
fn resolve_token(token: &Token<'_>, resolver: &dyn TokenResolver) -> String {
    let name = token.name;
    if cleanup::is_unit_property(name) {
        return token.raw.to_string();
    }

    if let Some((base, factors)) = name.split_once('*') {
        match parse_factor(factors) {
            Some(factor) => {
                if let Some(value) = resolver.scaled(base, factor) {
                    return value;
                }
            }
            None => {
                debug!(token = name, "invalid multiplier in token");
                return FALLBACK.to_string();
            }
        }
    }

    resolver
        .variable(name)
        .or_else(|| resolver.tiered(name))
        .or_else(|| resolver.formula(name))
        .unwrap_or_else(|| {
            debug!(token = name, "no value for token");
            FALLBACK.to_string()
        })
}

/// Product of `*`-separated numeric factors, e.g. `100*100`.
fn parse_factor(factors: &str) -> Option<f64> {
    factors
        .split('*')
        .map(|f| f.trim().parse::<f64>().ok())
        .product()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::NoValues;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    fn vars(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    fn threshold(min_units: i64, variables: Value) -> EffectThreshold {
        EffectThreshold::new(min_units, vars(variables))
    }

    // -- token resolution ---------------------------------------------------

    #[test]
    fn unknown_tokens_become_zero() {
        let engine = TemplateEngine::new();
        assert_eq!(engine.render("Deals @Foo@ damage", &NoValues), "Deals 0 damage");
        assert_eq!(engine.render("Heals {0ab1} health", &NoValues), "Heals 0 health");
    }

    #[test]
    fn multiplier_tokens() {
        let map = vars(json!({"AttackDamage": 0.5, "Shield": 0.0125}));
        let resolver = VariableResolver::new(&map);
        let engine = TemplateEngine::new();
        assert_eq!(engine.render("@AttackDamage*100@", &resolver), "50");
        assert_eq!(engine.render("@Shield*100*100@", &resolver), "125");
        assert_eq!(engine.render("@AttackDamage*x@", &resolver), "0");
        assert_eq!(engine.render("@Missing*100@", &resolver), "0");
    }

    #[test]
    fn percentage_rule_depends_on_token_form() {
        let map = vars(json!({"Ratio": 0.35}));
        let resolver = VariableResolver::new(&map);
        let engine = TemplateEngine::new();
        assert_eq!(engine.render("@Ratio@", &resolver), "35");
        assert_eq!(engine.render("@Ratio*1@", &resolver), "0.35");
    }

    #[test]
    fn unit_properties_pass_through() {
        let engine = TemplateEngine::new();
        assert_eq!(
            engine.render("Stacks: @TFTUnitProperty.item:Stacks@", &NoValues),
            "Stacks: @TFTUnitProperty.item:Stacks@"
        );
    }

    #[test]
    fn resolver_rules_apply_in_order() {
        struct Layered;
        impl TokenResolver for Layered {
            fn variable(&self, name: &str) -> Option<String> {
                (name == "Both").then(|| "var".to_string())
            }
            fn tiered(&self, name: &str) -> Option<String> {
                matches!(name, "Both" | "Series").then(|| "1/2/3".to_string())
            }
            fn formula(&self, name: &str) -> Option<String> {
                matches!(name, "Series" | "Calc").then(|| "20% AP".to_string())
            }
        }
        let engine = TemplateEngine::new();
        assert_eq!(
            engine.render("@Both@ @Series@ @Calc@ @None@", &Layered),
            "var 1/2/3 20% AP 0"
        );
    }

    // -- cleanup ------------------------------------------------------------

    #[test]
    fn strips_markup_and_icons() {
        let map = vars(json!({"Damage": 120}));
        let engine = TemplateEngine::new();
        assert_eq!(
            engine.render(
                "<magicDamage>@Damage@%i:scaleAP%</magicDamage> magic damage<br><br>((Passive))",
                &VariableResolver::new(&map),
            ),
            "120 magic damage (Passive)"
        );
    }

    #[test]
    fn rendered_text_is_a_fixed_point() {
        let engine = TemplateEngine::new();
        let resolved = "Deals 180/270/400 (+20% AP) magic damage.";
        assert_eq!(engine.render(resolved, &NoValues), resolved);

        let map = vars(json!({"Damage": 0.25}));
        let once = engine.render("<b>Gain @Damage@%%</b>  bonus", &VariableResolver::new(&map));
        assert_eq!(once, "Gain 25% bonus");
        assert_eq!(engine.render(&once, &NoValues), once);
    }

    #[test]
    fn merge_option() {
        let engine = TemplateEngine::with_options(RenderOptions {
            merge_adjacent_groups: true,
        });
        assert_eq!(engine.render("Shield (AP)(HP)", &NoValues), "Shield (APHP)");
        assert_eq!(
            TemplateEngine::new().render("Shield (AP)(HP)", &NoValues),
            "Shield (AP)(HP)"
        );
    }

    // -- rows ---------------------------------------------------------------

    #[test]
    fn single_row_repeats_for_each_threshold() {
        let thresholds = [
            threshold(2, json!({"Dmg": 10})),
            threshold(4, json!({"Dmg": 20})),
        ];
        let out = TemplateEngine::new().render_rows(
            "Base. <row>Deals (@MinUnits@) (@Dmg@)</row>",
            &thresholds,
        );
        insta::assert_snapshot!(out, @r"
        Base.

        (2) Deals (2) (10)

        (4) Deals (4) (20)
        ");
    }

    #[test]
    fn rows_pair_positionally() {
        let thresholds = [
            threshold(2, json!({"Armor": 20})),
            threshold(4, json!({"Armor": 45})),
        ];
        let template = "Gain armor.<row>@Armor@ Armor</row><br><row>@Armor@ Armor, doubled</row>\
                        <row>never shown</row>";
        let out = TemplateEngine::new().render_rows(template, &thresholds);
        assert_eq!(
            out,
            "Gain armor.\n\n(2) 20 Armor\n\n(4) 45 Armor, doubled"
        );
    }

    #[test]
    fn expand_rows_reuse_first_row() {
        let thresholds = [
            threshold(3, json!({"{5e1d2f}": 0.15})),
            threshold(5, json!({"{5e1d2f}": 0.3})),
            threshold(7, json!({"{5e1d2f}": 0.5})),
        ];
        let template = "<expandRow>{5e1d2f}% bonus</expandRow><row>unused</row>";
        let out = TemplateEngine::new().render_rows(template, &thresholds);
        assert_eq!(out, "(3) 15% bonus\n\n(5) 30% bonus\n\n(7) 50% bonus");
    }

    #[test]
    fn base_uses_first_threshold_variables() {
        let thresholds = [threshold(2, json!({"Gold": 1})), threshold(4, json!({"Gold": 3}))];
        let out = TemplateEngine::new().render_rows(
            "From @MinUnits@ units earn @Gold@ gold.",
            &thresholds,
        );
        assert_eq!(out, "From 2 units earn 1 gold.");
        assert_eq!(
            TemplateEngine::new().render_rows("Earn @Gold@ gold.", &[]),
            "Earn 0 gold."
        );
    }

    #[test]
    fn row_icons_follow_their_numbers() {
        let thresholds = [
            threshold(2, json!({"Mana": 5, "Health": 0.1})),
            threshold(4, json!({"Mana": 10, "Health": 0.2})),
        ];
        let template = "<row>Gain @Mana@%i:scaleMana% Mana and @Health@%%i:scaleHealth% Health</row>";
        let out = TemplateEngine::new().render_rows(template, &thresholds);
        assert_eq!(
            out,
            "(2) Gain 5 %i:scaleMana% Mana and 10% %i:scaleHealth% Health\n\n\
             (4) Gain 10 %i:scaleMana% Mana and 20% %i:scaleHealth% Health"
        );
    }

    #[test]
    fn empty_template_renders_empty() {
        assert_eq!(TemplateEngine::new().render("", &NoValues), "");
        assert_eq!(TemplateEngine::new().render_rows("", &[]), "");
    }

    #[test]
    fn parses_factor_products() {
        assert_eq!(parse_factor("100"), Some(100.0));
        assert_eq!(parse_factor("100*100"), Some(10000.0));
        assert_eq!(parse_factor("3.6"), Some(3.6));
        assert_eq!(parse_factor("x"), None);
        assert_eq!(parse_factor(""), None);
    }
}
