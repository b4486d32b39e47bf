//! Word tokenizer that keeps byte spans into the original text.
//!
//! A word is a run of letters, combining marks and digits. An apostrophe or
//! hyphen sitting between two such runs joins them into one word
//! (`Ben-Hadad`, `don't`). A trailing possessive `'s` is not part of the
//! word, so `God's` yields `God`. Every other character separates words.

use std::sync::LazyLock;

use regex::Regex;

static WORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\p{Alphabetic}\p{M}\p{N}]+(?:['\x{2019}\-][\p{Alphabetic}\p{M}\p{N}]+)*")
        .expect("word pattern is valid")
});

/// A word in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Lowercased form used for dictionary lookup.
    pub normalized: String,
    /// Byte offset of the first character.
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
}

/// Splits `text` into word tokens, left to right.
pub fn tokenize(text: &str) -> Vec<Token> {
    WORD_RE
        .find_iter(text)
        .map(|m| {
            let end = m.start() + possessive_stem_len(m.as_str());
            Token {
                normalized: text[m.start()..end].to_lowercase(),
                start: m.start(),
                end,
            }
        })
        .collect()
}

const POSSESSIVE_SUFFIXES: [&str; 4] = ["'s", "'S", "\u{2019}s", "\u{2019}S"];

/// Byte length of `word` without a trailing `'s` / `’s`.
fn possessive_stem_len(word: &str) -> usize {
    for suffix in POSSESSIVE_SUFFIXES {
        if let Some(stem) = word.strip_suffix(suffix) {
            if !stem.is_empty() {
                return stem.len();
            }
        }
    }
    word.len()
}

/// Lowercased word sequence of `text`, used to key dictionary terms.
pub fn normalize_words(text: &str) -> Vec<String> {
    tokenize(text).into_iter().map(|t| t.normalized).collect()
}

/// True when the text between two adjacent tokens is whitespace only, i.e.
/// a multi-word term may continue across it. A possessive suffix left off
/// `prev` may precede the whitespace (`Lord's Supper`).
pub(crate) fn joined_by_whitespace(text: &str, prev: &Token, next: &Token) -> bool {
    let gap = &text[prev.end..next.start];
    let gap = POSSESSIVE_SUFFIXES
        .iter()
        .find_map(|suffix| gap.strip_prefix(suffix))
        .unwrap_or(gap);
    !gap.is_empty() && gap.chars().all(char::is_whitespace)
}
