//! Splitting text into comparison units.
//!
//! Every policy is lossless: concatenating the tokens of a text gives the
//! text back byte-for-byte.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How text is split into comparison units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    /// One unit per line, terminator included.
    #[default]
    Lines,
    /// Alternating runs of whitespace and non-whitespace.
    Words,
    /// One unit per Unicode scalar value.
    Chars,
}

/// A comparison unit borrowed from the source text.
///
/// Two tokens are equal when their full text is equal. For lines that
/// includes the terminator, so `"a"` and `"a\n"` differ.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Token<'a>(&'a str);

impl<'a> Token<'a> {
    pub fn new(text: &'a str) -> Self {
        Self(text)
    }

    /// The full token text, terminator included.
    pub fn as_str(&self) -> &'a str {
        self.0
    }

    /// The token text without a trailing line terminator.
    pub fn content(&self) -> &'a str {
        strip_terminator(self.0)
    }

    /// Whether the token ends with `\n`, `\r\n` or `\r`.
    pub fn has_terminator(&self) -> bool {
        self.0.ends_with('\n') || self.0.ends_with('\r')
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Split `text` according to `granularity`.
///
/// Total over any input; the empty string yields no tokens.
pub fn tokenize(text: &str, granularity: Granularity) -> Vec<Token<'_>> {
    let pieces = match granularity {
        Granularity::Lines => split_lines(text),
        Granularity::Words => split_words(text),
        Granularity::Chars => split_chars(text),
    };
    pieces.into_iter().map(Token).collect()
}

/// Remove one trailing `\r\n`, `\n` or `\r`.
pub fn strip_terminator(line: &str) -> &str {
    line.strip_suffix("\r\n")
        .or_else(|| line.strip_suffix('\n'))
        .or_else(|| line.strip_suffix('\r'))
        .unwrap_or(line)
}

// A line ends after "\n", "\r\n" or a lone "\r". No empty trailing line is
// produced when the text ends with a terminator.
fn split_lines(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        let end = match bytes[i] {
            b'\n' => i + 1,
            b'\r' if bytes.get(i + 1) == Some(&b'\n') => i + 2,
            b'\r' => i + 1,
            _ => {
                i += 1;
                continue;
            }
        };
        lines.push(&text[start..end]);
        start = end;
        i = end;
    }

    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

fn split_words(text: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let mut start = 0;
    let mut in_space: Option<bool> = None;

    for (idx, ch) in text.char_indices() {
        let space = ch.is_whitespace();
        if in_space.is_some_and(|prev| prev != space) {
            words.push(&text[start..idx]);
            start = idx;
        }
        in_space = Some(space);
    }

    if start < text.len() {
        words.push(&text[start..]);
    }
    words
}

fn split_chars(text: &str) -> Vec<&str> {
    text.char_indices()
        .map(|(idx, ch)| &text[idx..idx + ch.len_utf8()])
        .collect()
}
