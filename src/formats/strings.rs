//! Support for Apple `.strings` localization files.
//!
//! Only the single-line form is understood:
//!
//! ```text
//! /* Optional comment */
//! "object-id" = "value";
//! ```
//!
//! Multi-line comments and values spanning several lines are not supported.
//! Lines that are neither blank, a comment, nor an assignment are skipped.

use std::io::BufRead;

use indexmap::IndexMap;

use crate::{error::Error, traits::Parser, types::Entry};

/// Key suffix used by Interface Builder exports for UI text, e.g. `"Lbl-1.text" = ...`.
/// The object identifier is the key without it.
const UI_TEXT_KEY_SUFFIX: &str = ".text\" ";

/// A parsed `.strings` file for one language.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Format {
    /// Pairs keyed by object identifier, in first-seen order.
    /// A repeated identifier keeps its position but takes the later pair.
    pub pairs: IndexMap<String, Pair>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair {
    pub key: String,
    pub value: String,
    /// The comment line directly preceding the pair, markers included.
    pub comment: Option<String>,
}

impl Format {
    /// Turns the pairs into single-language entries for `language`.
    pub fn into_entries(self, language: &str) -> IndexMap<String, Entry> {
        self.pairs
            .into_iter()
            .map(|(id, pair)| {
                let mut entry = Entry::new(pair.key, pair.comment);
                entry.values.insert(language.to_string(), pair.value);
                (id, entry)
            })
            .collect()
    }
}

impl Parser for Format {
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut pairs = IndexMap::new();
        let mut state = CommentState::None;

        for line in reader.lines() {
            let line = line?;
            state = match (Line::classify(&line), state) {
                (Line::Blank | Line::Other, state) => state,
                (Line::Comment(comment), _) => CommentState::Pending(comment.to_string()),
                (Line::Assignment { key, value }, state) => {
                    let pair = Pair {
                        key: key.to_string(),
                        value: value.to_string(),
                        comment: state.take(),
                    };
                    pairs.insert(pair.key.clone(), pair);
                    CommentState::None
                }
            };
        }

        Ok(Format { pairs })
    }
}

/// Whether a comment line is waiting for the next assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
enum CommentState {
    None,
    Pending(String),
}

impl CommentState {
    fn take(self) -> Option<String> {
        match self {
            CommentState::None => None,
            CommentState::Pending(comment) => Some(comment),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Line<'a> {
    Blank,
    Comment(&'a str),
    Assignment { key: &'a str, value: &'a str },
    Other,
}

impl<'a> Line<'a> {
    fn classify(raw: &'a str) -> Self {
        let line = raw.trim_start_matches('\u{feff}').trim();
        if line.is_empty() {
            return Line::Blank;
        }
        if line.starts_with("/*") || line.starts_with("//") {
            return Line::Comment(line);
        }
        if !line.ends_with(';') {
            return Line::Other;
        }
        match line.split_once('=') {
            Some((key, value)) => Line::Assignment {
                key: object_id(key),
                value: string_value(value),
            },
            None => Line::Other,
        }
    }
}

/// `"id" ` and `"id.text" ` both give `id`.
fn object_id(key: &str) -> &str {
    let key = key.trim_start_matches('"');
    match key.strip_suffix(UI_TEXT_KEY_SUFFIX) {
        Some(id) => id,
        None => key.trim_end_matches(|c: char| c == '"' || c.is_whitespace()),
    }
}

/// ` "value";` gives `value`. Escape sequences are kept as written.
fn string_value(value: &str) -> &str {
    let value = value.trim_start();
    let value = value.strip_prefix('"').unwrap_or(value);
    let value = value.strip_suffix(';').unwrap_or(value).trim_end();
    value.strip_suffix('"').unwrap_or(value)
}
