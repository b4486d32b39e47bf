//! Compact per-verse vocabulary: each distinct surface once, in the order it
//! first appears.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::matching::{Matcher, TermIndex};
use crate::types::VerseCorpus;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordEntry {
    pub surface: String,
    pub lemma: String,
}

/// `"chapter:verse"` to the verse's keyword entries, in corpus order.
pub type KeywordMap = IndexMap<String, Vec<KeywordEntry>>;

/// Every verse of `corpus` gets a key, including verses without matches.
pub fn assemble_keywords(corpus: &VerseCorpus, index: &TermIndex) -> KeywordMap {
    let matcher = Matcher::new(index);
    let mut map = KeywordMap::with_capacity(corpus.verse_count());

    for verse in corpus.verses() {
        let mut matches = matcher.find_matches(verse.text);
        matches.sort_by_key(|m| m.start);

        let mut seen = HashSet::new();
        let entries = matches
            .into_iter()
            .filter(|m| seen.insert(m.surface.clone()))
            .map(|m| KeywordEntry {
                surface: m.surface,
                lemma: m.term,
            })
            .collect();
        map.insert(verse.reference.to_string(), entries);
    }

    debug!(verses = map.len(), "assembled keyword map");
    map
}
