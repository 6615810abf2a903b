//! Markup tags and trait row blocks.
//!
//! Tags are `<` followed by at least one character other than `>`, then `>`.
//! Only the row markers `<row>` and `<expandRow>` (and their closing forms)
//! carry meaning; every other tag is formatting and is removed.

/// Tag names that delimit trait rows.
pub const ROW_TAGS: [&str; 2] = ["row", "expandRow"];

const LINE_BREAK: &str = "br";

/// Byte length of the tag starting at `i`, if there is one.
fn tag_len(text: &str, i: usize) -> Option<usize> {
    if text.as_bytes().get(i) != Some(&b'<') {
        return None;
    }
    let close = text[i + 1..].find('>')?;
    (close > 0).then_some(close + 2)
}

fn tag_name(tag: &str) -> &str {
    let inner = &tag[1..tag.len() - 1];
    inner.strip_prefix('/').unwrap_or(inner).trim()
}

fn is_row_tag(tag: &str) -> bool {
    ROW_TAGS.contains(&tag_name(tag))
}

/// Rewrite every tag through `keep`: `Some(s)` replaces the tag with `s`.
fn map_tags<F>(text: &str, mut keep: F) -> String
where
    F: FnMut(&str) -> Option<String>,
{
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut i = 0;
    while i < text.len() {
        match tag_len(text, i) {
            Some(len) => {
                out.push_str(&text[copied..i]);
                if let Some(replacement) = keep(&text[i..i + len]) {
                    out.push_str(&replacement);
                }
                i += len;
                copied = i;
            }
            None => i += 1,
        }
    }
    out.push_str(&text[copied..]);
    out
}

fn line_break(tag: &str) -> Option<String> {
    (tag_name(tag).trim_end_matches('/').trim() == LINE_BREAK).then(|| " ".to_string())
}

/// Remove all tags. Line breaks become a space so words stay apart.
pub fn strip_tags(text: &str) -> String {
    map_tags(text, line_break)
}

/// Remove all tags except the row markers.
pub fn strip_tags_keep_rows(text: &str) -> String {
    map_tags(text, |tag| {
        if is_row_tag(tag) {
            Some(tag.to_string())
        } else {
            line_break(tag)
        }
    })
}

/// A template split into its row blocks and everything outside them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowSplit {
    /// Text outside every row block.
    pub base: String,
    /// Non-empty row block contents, in order.
    pub rows: Vec<String>,
    /// Whether any block was opened with `<expandRow>`.
    pub expand: bool,
}

/// Split a template at its row markers.
///
/// A block runs from an opening marker to the next closing marker of either
/// kind. An opening marker with no closing marker stays in the base text.
pub fn split_rows(text: &str) -> RowSplit {
    let mut split = RowSplit::default();
    let mut copied = 0;
    let mut i = 0;
    while i < text.len() {
        let Some(len) = tag_len(text, i) else {
            i += 1;
            continue;
        };
        let tag = &text[i..i + len];
        if !is_row_tag(tag) || tag.starts_with("</") {
            i += len;
            continue;
        }
        let body_start = i + len;
        let Some((body_end, close_len)) = find_row_close(text, body_start) else {
            i += len;
            continue;
        };

        split.base.push_str(&text[copied..i]);
        let body = &text[body_start..body_end];
        if !body.trim().is_empty() {
            split.rows.push(body.to_string());
        }
        if tag_name(tag) == "expandRow" {
            split.expand = true;
        }
        i = body_end + close_len;
        copied = i;
    }
    split.base.push_str(&text[copied..]);
    split
}

fn find_row_close(text: &str, from: usize) -> Option<(usize, usize)> {
    let mut i = from;
    while i < text.len() {
        if let Some(len) = tag_len(text, i) {
            let tag = &text[i..i + len];
            if tag.starts_with("</") && is_row_tag(tag) {
                return Some((i, len));
            }
            i += len;
        } else {
            i += 1;
        }
    }
    None
}
