//! Placeholder token scanning.
//!
//! Two syntaxes are recognized, scanned left to right without overlap:
//! `@name@` (any non-empty run of characters other than `@`) and `{hex}`
//! (lowercase hexadecimal digits only).

/// Which syntax a token was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// `@name@`
    Named,
    /// `{1a2b3c}`
    Hashed,
}

/// A placeholder occurrence in a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    /// Text between the delimiters.
    pub name: &'a str,
    /// The token as written, delimiters included.
    pub raw: &'a str,
    /// Byte offset of the token in the scanned text.
    pub start: usize,
}

impl Token<'_> {
    /// Byte offset just past the token.
    pub fn end(&self) -> usize {
        self.start + self.raw.len()
    }
}

fn is_hex_digit(b: u8) -> bool {
    matches!(b, b'0'..=b'9' | b'a'..=b'f')
}

/// Match a token starting at byte `i`, if any.
fn token_at(text: &str, i: usize) -> Option<Token<'_>> {
    let bytes = text.as_bytes();
    match bytes[i] {
        b'@' => {
            let len = text[i + 1..].find('@')?;
            if len == 0 {
                return None;
            }
            Some(Token {
                kind: TokenKind::Named,
                name: &text[i + 1..i + 1 + len],
                raw: &text[i..i + len + 2],
                start: i,
            })
        }
        b'{' => {
            let len = bytes[i + 1..].iter().take_while(|&&b| is_hex_digit(b)).count();
            if len == 0 || bytes.get(i + 1 + len) != Some(&b'}') {
                return None;
            }
            Some(Token {
                kind: TokenKind::Hashed,
                name: &text[i + 1..i + 1 + len],
                raw: &text[i..i + len + 2],
                start: i,
            })
        }
        _ => None,
    }
}

/// All tokens in `text`, in order of appearance.
pub fn scan(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < text.len() {
        match token_at(text, i) {
            Some(token) => {
                i = token.end();
                tokens.push(token);
            }
            None => i += 1,
        }
    }
    tokens
}

/// Replace every token with the result of `replace`.
pub fn substitute<F>(text: &str, mut replace: F) -> String
where
    F: FnMut(&Token<'_>) -> String,
{
    let mut result = String::with_capacity(text.len());
    let mut copied = 0;
    for token in scan(text) {
        result.push_str(&text[copied..token.start]);
        result.push_str(&replace(&token));
        copied = token.end();
    }
    result.push_str(&text[copied..]);
    result
}
