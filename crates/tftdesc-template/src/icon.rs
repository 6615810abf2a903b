//! Icon markers (`%i:scaleAP%`).
//!
//! Icons are dropped from rendered text. Trait rows put theirs back next to
//! the number they annotate, following a fixed placement table.

const ICON_PREFIX: &str = "%i:";

/// Where a re-inserted icon goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// After the next number.
    AfterNumber,
    /// After the next number that is followed by `%`.
    AfterPercent,
    /// At the end of the text.
    End,
}

/// Marker substring to placement. Icons matching nothing go to the end.
pub const PLACEMENTS: &[(&str, Placement)] = &[
    ("scaleMana", Placement::AfterNumber),
    ("scaleHealth", Placement::AfterPercent),
];

pub fn placement_of(icon: &str) -> Placement {
    PLACEMENTS
        .iter()
        .find(|(marker, _)| icon.contains(marker))
        .map_or(Placement::End, |&(_, placement)| placement)
}

/// Byte length of the icon marker starting at `i`, if there is one.
fn icon_len(text: &str, i: usize) -> Option<usize> {
    let rest = text.get(i..)?.strip_prefix(ICON_PREFIX)?;
    let body = rest.find('%')?;
    (body > 0).then_some(ICON_PREFIX.len() + body + 1)
}

/// Every icon marker in `text`, in order.
pub fn icons(text: &str) -> Vec<&str> {
    let mut found = Vec::new();
    let mut i = 0;
    while i < text.len() {
        match icon_len(text, i) {
            Some(len) => {
                found.push(&text[i..i + len]);
                i += len;
            }
            None => i += 1,
        }
    }
    found
}

/// Remove every icon marker.
pub fn strip_icons(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut i = 0;
    while i < text.len() {
        match icon_len(text, i) {
            Some(len) => {
                out.push_str(&text[copied..i]);
                i += len;
                copied = i;
            }
            None => i += 1,
        }
    }
    out.push_str(&text[copied..]);
    out
}

/// Find the next number at or after `from`: `digits[.digits]`, optionally
/// required to be directly followed by `%` (which is then included).
/// Returns the byte offset just past the match.
fn next_number(text: &str, from: usize, with_percent: bool) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut i = from;
    while i < bytes.len() {
        let starts_run = bytes[i].is_ascii_digit() && (i == 0 || !bytes[i - 1].is_ascii_digit());
        if !starts_run {
            i += 1;
            continue;
        }
        let mut end = i;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        if bytes.get(end) == Some(&b'.') && bytes.get(end + 1).is_some_and(u8::is_ascii_digit) {
            end += 1;
            while end < bytes.len() && bytes[end].is_ascii_digit() {
                end += 1;
            }
        }
        if !with_percent {
            return Some(end);
        }
        if bytes.get(end) == Some(&b'%') && !bytes.get(end + 1).is_some_and(u8::is_ascii_digit) {
            return Some(end + 1);
        }
        i = end;
    }
    None
}

/// Insert `icons` into already-rendered `text`.
///
/// Number-anchored icons consume numbers left to right, so two mana icons
/// land after two different numbers. Icons whose anchor is not found are
/// appended.
pub fn place_icons(text: &str, icons: &[&str]) -> String {
    let mut result = text.to_string();
    let mut cursor = 0;
    for icon in icons {
        let anchor = match placement_of(icon) {
            Placement::AfterNumber => next_number(&result, cursor, false),
            Placement::AfterPercent => next_number(&result, cursor, true),
            Placement::End => None,
        };
        match anchor {
            Some(at) => {
                let insert = format!(" {}", icon);
                result.insert_str(at, &insert);
                cursor = at + insert.len();
            }
            None => {
                result.push(' ');
                result.push_str(icon);
            }
        }
    }
    result
}
