//! Verse corpus: chapter → verse → plain text, in document order.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A verse location. Chapter and verse keys are kept as they appear in the
/// source (verse bridges such as `"4-5"` are opaque keys).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VerseRef<'a> {
    pub chapter: &'a str,
    pub verse: &'a str,
}

impl fmt::Display for VerseRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.chapter, self.verse)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verse<'a> {
    pub reference: VerseRef<'a>,
    pub text: &'a str,
}

/// Iteration order is insertion order at both levels. Deserialising from
/// JSON keeps the key order of the file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VerseCorpus {
    chapters: IndexMap<String, IndexMap<String, String>>,
}

impl VerseCorpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a verse. A new chapter is appended after the
    /// existing ones; a replaced verse keeps its original position.
    pub fn insert(
        &mut self,
        chapter: impl Into<String>,
        verse: impl Into<String>,
        text: impl Into<String>,
    ) {
        self.chapters
            .entry(chapter.into())
            .or_default()
            .insert(verse.into(), text.into());
    }

    pub fn verses(&self) -> impl Iterator<Item = Verse<'_>> + '_ {
        self.chapters.iter().flat_map(|(chapter, verses)| {
            verses.iter().map(move |(verse, text)| Verse {
                reference: VerseRef { chapter, verse },
                text,
            })
        })
    }

    pub fn get(&self, chapter: &str, verse: &str) -> Option<&str> {
        self.chapters.get(chapter)?.get(verse).map(String::as_str)
    }

    pub fn chapter_count(&self) -> usize {
        self.chapters.len()
    }

    pub fn verse_count(&self) -> usize {
        self.chapters.values().map(IndexMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.verse_count() == 0
    }
}

impl<C, V, T> FromIterator<(C, V, T)> for VerseCorpus
where
    C: Into<String>,
    V: Into<String>,
    T: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (C, V, T)>>(iter: I) -> Self {
        let mut corpus = Self::new();
        for (chapter, verse, text) in iter {
            corpus.insert(chapter, verse, text);
        }
        corpus
    }
}
