//! Value sources for placeholder tokens.

use serde_json::{Map, Value};
use tftdesc_core::lenient;
use tftdesc_formula::format::{format_scaled_number, format_template_number};

/// Supplies values for placeholder tokens.
///
/// Each method answers one lookup rule of the engine; `None` passes the token
/// on to the next rule. Entity kinds implement only the rules they have data
/// for.
pub trait TokenResolver {
    /// `name` multiplied by `factor`, for `@name*k1*k2@` tokens.
    fn scaled(&self, _name: &str, _factor: f64) -> Option<String> {
        None
    }

    /// A flat variable or effect value.
    fn variable(&self, _name: &str) -> Option<String> {
        None
    }

    /// A per-tier value series.
    fn tiered(&self, _name: &str) -> Option<String> {
        None
    }

    /// A per-tier formula evaluation.
    fn formula(&self, _name: &str) -> Option<String> {
        None
    }
}

/// Resolves nothing. Every token falls back to `"0"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoValues;

impl TokenResolver for NoValues {}

/// Resolves tokens from a flat name-to-value map: item effects, or the active
/// variables of one trait threshold.
///
/// Hashed tokens are stored with their braces (`{1a2b3c}`), so a bare name is
/// also looked up in braced form.
#[derive(Debug, Clone, Copy)]
pub struct VariableResolver<'a> {
    variables: &'a Map<String, Value>,
}

impl<'a> VariableResolver<'a> {
    pub fn new(variables: &'a Map<String, Value>) -> Self {
        Self { variables }
    }

    fn lookup(&self, name: &str) -> Option<&'a Value> {
        self.variables
            .get(name)
            .or_else(|| self.variables.get(&format!("{{{}}}", name)))
    }
}

impl TokenResolver for VariableResolver<'_> {
    fn scaled(&self, name: &str, factor: f64) -> Option<String> {
        let value = leading_value(self.lookup(name)?);
        if value.is_null() {
            return None;
        }
        Some(match lenient::as_f64(value) {
            Some(x) => format_scaled_number(x * factor),
            None => raw_string(value),
        })
    }

    fn variable(&self, name: &str) -> Option<String> {
        self.lookup(name).map(format_variable)
    }
}

/// Format a flat variable for display.
///
/// Null renders as `0`; numbers strictly between 0 and 1 as whole
/// percentages; other numbers whole or to two decimals; anything
/// non-numeric as its raw text. Lists use their first non-zero element.
pub fn format_variable(value: &Value) -> String {
    let value = leading_value(value);
    if value.is_null() {
        return "0".to_string();
    }
    match lenient::as_f64(value) {
        Some(x) => format_template_number(x),
        None => raw_string(value),
    }
}

static NULL: Value = Value::Null;

/// The first non-zero element of a list (the first element if all are
/// zero, null if empty). Non-lists are returned as-is.
fn leading_value(value: &Value) -> &Value {
    match value {
        Value::Array(items) => items
            .iter()
            .find(|item| lenient::as_f64(item).is_some_and(|x| x != 0.0))
            .or_else(|| items.first())
            .unwrap_or(&NULL),
        other => other,
    }
}

fn raw_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn vars(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn formats_plain_variables() {
        assert_eq!(format_variable(&json!(0.35)), "35");
        assert_eq!(format_variable(&json!(20)), "20");
        assert_eq!(format_variable(&json!(20.0)), "20");
        assert_eq!(format_variable(&json!(1.255)), "1.25");
        assert_eq!(format_variable(&json!(2.5)), "2.5");
        assert_eq!(format_variable(&json!(-0.5)), "-0.5");
        assert_eq!(format_variable(&Value::Null), "0");
        assert_eq!(format_variable(&json!("Ionia")), "Ionia");
        assert_eq!(format_variable(&json!("0.5")), "50");
    }

    #[test]
    fn lists_use_first_non_zero_element() {
        assert_eq!(format_variable(&json!([0, 0.25, 0.5])), "25");
        assert_eq!(format_variable(&json!([0, 0])), "0");
        assert_eq!(format_variable(&json!([])), "0");
    }

    #[test]
    fn looks_up_braced_hash_keys() {
        let map = vars(json!({"{9f1c2a}": 15, "Damage": 0.2}));
        let resolver = VariableResolver::new(&map);
        assert_eq!(resolver.variable("9f1c2a").unwrap(), "15");
        assert_eq!(resolver.variable("Damage").unwrap(), "20");
        assert!(resolver.variable("Missing").is_none());
    }

    #[test]
    fn scaled_values_skip_the_percentage_rule() {
        let map = vars(json!({"AttackDamage": 0.5, "Ratio": 0.35, "Name": "x", "Empty": null}));
        let resolver = VariableResolver::new(&map);
        assert_eq!(resolver.scaled("AttackDamage", 100.0).unwrap(), "50");
        assert_eq!(resolver.scaled("Ratio", 1.0).unwrap(), "0.35");
        assert_eq!(resolver.scaled("Ratio", 10.0).unwrap(), "3.5");
        assert_eq!(resolver.scaled("Name", 100.0).unwrap(), "x");
        assert!(resolver.scaled("Empty", 100.0).is_none());
        assert!(resolver.scaled("Missing", 100.0).is_none());
    }

    #[test]
    fn no_values_resolves_nothing() {
        assert!(NoValues.variable("x").is_none());
        assert!(NoValues.scaled("x", 2.0).is_none());
    }
}
