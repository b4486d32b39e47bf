//! Greedy longest-match scan of verse text against a [`TermIndex`].
//!
//! The scan walks word tokens left to right. At each token it asks the index
//! for the longest term starting there; a hit is emitted and the scan jumps
//! past its last word, a miss advances one word. Matches therefore never
//! overlap, and a shorter term inside a longer matched phrase is not reported.

use super::term_index::{TermId, TermIndex};
use super::tokenizer::{joined_by_whitespace, tokenize};

pub const DEFAULT_CONTEXT_CHARS: usize = 30;

/// One dictionary term found in a verse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    /// Verse text covered by the match, original casing and spacing.
    pub surface: String,
    pub term_id: TermId,
    /// Dictionary spelling of the matched term (the lemma).
    pub term: String,
    /// Byte offset of the match in the verse text.
    pub start: usize,
    /// Byte offset one past the end of the match.
    pub end: usize,
    /// Surrounding text with the match wrapped in `[` `]`. For display only;
    /// `start` is the position.
    pub context: String,
}

#[derive(Debug, Clone, Copy)]
pub struct Matcher<'a> {
    index: &'a TermIndex,
    context_chars: usize,
}

impl<'a> Matcher<'a> {
    pub fn new(index: &'a TermIndex) -> Self {
        Self {
            index,
            context_chars: DEFAULT_CONTEXT_CHARS,
        }
    }

    /// Characters of context kept on each side of a match.
    pub fn with_context_chars(mut self, chars: usize) -> Self {
        self.context_chars = chars;
        self
    }

    pub fn find_matches(&self, text: &str) -> Vec<MatchRecord> {
        let tokens = tokenize(text);
        let n = tokens.len();
        if n == 0 || self.index.is_empty() {
            return Vec::new();
        }

        // run_end[i]: end (exclusive) of the whitespace-joined word run
        // starting at token i. Terms never continue across punctuation.
        let mut run_end = vec![n; n];
        for i in (0..n - 1).rev() {
            run_end[i] = if joined_by_whitespace(text, &tokens[i], &tokens[i + 1]) {
                run_end[i + 1]
            } else {
                i + 1
            };
        }

        let mut matches = Vec::new();
        let mut i = 0;
        while i < n {
            let words = tokens[i..run_end[i]].iter().map(|t| t.normalized.as_str());
            match self.index.lookup(words) {
                Some((term_id, len)) => {
                    let start = tokens[i].start;
                    let end = tokens[i + len - 1].end;
                    matches.push(MatchRecord {
                        surface: text[start..end].to_string(),
                        term_id,
                        term: self.index.term(term_id).key.clone(),
                        start,
                        end,
                        context: self.context(text, start, end),
                    });
                    i += len;
                }
                None => i += 1,
            }
        }
        matches
    }

    fn context(&self, text: &str, start: usize, end: usize) -> String {
        let before = tail_chars(&text[..start], self.context_chars).trim_start();
        let after = head_chars(&text[end..], self.context_chars).trim_end();
        format!("{before}[{}]{after}", &text[start..end])
    }
}

/// Scans `text` with default settings.
pub fn find_matches(text: &str, index: &TermIndex) -> Vec<MatchRecord> {
    Matcher::new(index).find_matches(text)
}

fn tail_chars(s: &str, n: usize) -> &str {
    if n == 0 {
        return "";
    }
    match s.char_indices().rev().nth(n - 1) {
        Some((i, _)) => &s[i..],
        None => s,
    }
}

fn head_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((i, _)) => &s[..i],
        None => s,
    }
}
