//! Text normalization applied after substitution.

use crate::markup;
use crate::token::{self, TokenKind};

/// Tokens naming a unit property are filled in by the game client, not by
/// this renderer. They survive substitution and cleanup verbatim.
pub const UNIT_PROPERTY_MARKER: &str = "TFTUnitProperty";

pub fn is_unit_property(name: &str) -> bool {
    name.contains(UNIT_PROPERTY_MARKER)
}

/// Remove `@name@` tokens that survived substitution, except unit
/// properties.
pub fn remove_unresolved(text: &str) -> String {
    token::substitute(text, |t| {
        if t.kind == TokenKind::Named && !is_unit_property(t.name) {
            String::new()
        } else {
            t.raw.to_string()
        }
    })
}

/// `((x))` to `(x)`, where `x` has no closing parenthesis.
pub fn collapse_double_parens(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(at) = rest.find("((") {
        let after = &rest[at + 2..];
        let inner_len = after.find(')').unwrap_or(0);
        if inner_len > 0 && after[inner_len..].starts_with("))") {
            out.push_str(&rest[..at]);
            out.push('(');
            out.push_str(&after[..inner_len]);
            out.push(')');
            rest = &after[inner_len + 2..];
        } else {
            out.push_str(&rest[..at + 1]);
            rest = &rest[at + 1..];
        }
    }
    out.push_str(rest);
    out
}

/// Runs of `%` to a single `%`.
pub fn collapse_percent(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_percent = false;
    for c in text.chars() {
        if c == '%' && prev_percent {
            continue;
        }
        prev_percent = c == '%';
        out.push(c);
    }
    out
}

/// Runs of whitespace to a single space, trimmed.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Final cleanup of a rendered fragment.
pub fn normalize(text: &str) -> String {
    let text = remove_unresolved(text);
    let text = markup::strip_tags(&text);
    let text = collapse_double_parens(&text);
    let text = collapse_percent(&text);
    collapse_whitespace(&text)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Parse `(word)` at the start of `s`; returns the word and the byte length.
fn word_group(s: &str) -> Option<(&str, usize)> {
    let inner = s.strip_prefix('(')?;
    let len = inner
        .char_indices()
        .find(|&(_, c)| !is_word_char(c))
        .map_or(inner.len(), |(i, _)| i);
    if len == 0 || !inner[len..].starts_with(')') {
        return None;
    }
    Some((&inner[..len], len + 2))
}

/// Merge adjacent single-word groups: `(x)(y)` to `(xy)`.
///
/// Ability descriptions write stacked scalings as `(AP)(AD)` icons; merged,
/// they read as one group.
pub fn merge_adjacent_groups(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(at) = rest.find('(') {
        out.push_str(&rest[..at]);
        let candidate = &rest[at..];
        let merged = word_group(candidate).and_then(|(first, first_len)| {
            word_group(&candidate[first_len..])
                .map(|(second, second_len)| (first, second, first_len + second_len))
        });
        match merged {
            Some((first, second, len)) => {
                out.push('(');
                out.push_str(first);
                out.push_str(second);
                out.push(')');
                rest = &candidate[len..];
            }
            None => {
                out.push('(');
                rest = &candidate[1..];
            }
        }
    }
    out.push_str(rest);
    out
}
