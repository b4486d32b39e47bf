//! Term index: a trie over normalised word tokens.
//!
//! Every dictionary term is split into lowercased words and inserted as a
//! path from the root. Nodes live in a flat arena and reference children by
//! position, so a lookup from any text position walks at most as many nodes
//! as the longest term has words. Terms whose word sequences are equal after
//! normalisation share one path and one entry; their article lists merge.

use std::collections::HashMap;

use tracing::warn;

use super::tokenizer::normalize_words;
use crate::error::IndexError;
use crate::types::{ArticleRef, TermDictionary};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TermId(u32);

impl TermId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A dictionary term after merging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermEntry {
    /// The term as first spelled in the dictionary (trimmed).
    pub key: String,
    /// Lowercased words joined by single spaces.
    pub normalized: String,
    /// Never empty.
    pub articles: Vec<ArticleRef>,
    pub word_count: usize,
}

#[derive(Debug, Clone, Default)]
struct TrieNode {
    children: HashMap<String, u32>,
    term: Option<TermId>,
}

/// Collects terms one by one; each insert reports its own validation error
/// so the caller chooses whether to skip the entry or give up.
#[derive(Debug, Clone)]
pub struct TermIndexBuilder {
    nodes: Vec<TrieNode>,
    terms: Vec<TermEntry>,
}

impl Default for TermIndexBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TermIndexBuilder {
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::default()],
            terms: Vec::new(),
        }
    }

    pub fn insert<S: AsRef<str>>(&mut self, term: &str, articles: &[S]) -> Result<TermId, IndexError> {
        let words = normalize_words(term);
        if words.is_empty() {
            return Err(IndexError::EmptyTerm { term: term.to_string() });
        }
        if articles.is_empty() {
            return Err(IndexError::NoArticles { term: term.to_string() });
        }
        if articles.iter().any(|a| a.as_ref().trim().is_empty()) {
            return Err(IndexError::EmptyArticle { term: term.to_string() });
        }

        let mut node = 0usize;
        for word in &words {
            node = match self.nodes[node].children.get(word) {
                Some(&child) => child as usize,
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(TrieNode::default());
                    self.nodes[node].children.insert(word.clone(), child as u32);
                    child
                }
            };
        }

        let normalized = words.join(" ");
        let parsed = articles.iter().map(|a| ArticleRef::parse(a.as_ref()));

        if let Some(id) = self.nodes[node].term {
            let entry = &mut self.terms[id.index()];
            // One path per word sequence, so a terminal node can only ever
            // hold the same normalised term.
            debug_assert_eq!(entry.normalized, normalized);
            for article in parsed {
                if !entry.articles.contains(&article) {
                    entry.articles.push(article);
                }
            }
            return Ok(id);
        }

        let mut merged: Vec<ArticleRef> = Vec::with_capacity(articles.len());
        for article in parsed {
            if !merged.contains(&article) {
                merged.push(article);
            }
        }

        let id = TermId(self.terms.len() as u32);
        self.terms.push(TermEntry {
            key: term.trim().to_string(),
            normalized,
            articles: merged,
            word_count: words.len(),
        });
        self.nodes[node].term = Some(id);
        Ok(id)
    }

    pub fn build(self) -> TermIndex {
        let max_term_words = self.terms.iter().map(|t| t.word_count).max().unwrap_or(0);
        TermIndex {
            nodes: self.nodes,
            terms: self.terms,
            max_term_words,
        }
    }
}

/// Read-only after construction; share it freely across threads.
#[derive(Debug, Clone)]
pub struct TermIndex {
    nodes: Vec<TrieNode>,
    terms: Vec<TermEntry>,
    max_term_words: usize,
}

impl TermIndex {
    /// Builds the index, failing on the first invalid dictionary entry.
    pub fn build(dictionary: &TermDictionary) -> Result<Self, IndexError> {
        let mut builder = TermIndexBuilder::new();
        for (term, articles) in dictionary {
            builder.insert(term, articles.as_slice())?;
        }
        Ok(builder.build())
    }

    /// Builds the index from the valid entries and returns the rejected ones.
    pub fn build_lenient(dictionary: &TermDictionary) -> (Self, Vec<IndexError>) {
        let mut builder = TermIndexBuilder::new();
        let mut rejected = Vec::new();
        for (term, articles) in dictionary {
            if let Err(e) = builder.insert(term, articles.as_slice()) {
                warn!("skipping dictionary entry: {}", e);
                rejected.push(e);
            }
        }
        (builder.build(), rejected)
    }

    /// Longest term matching a prefix of `words` (already lowercased).
    ///
    /// Returns the term and how many words it spans.
    pub fn lookup<'w, I>(&self, words: I) -> Option<(TermId, usize)>
    where
        I: IntoIterator<Item = &'w str>,
    {
        let mut node = &self.nodes[0];
        let mut best = None;
        for (depth, word) in words.into_iter().enumerate() {
            match node.children.get(word) {
                Some(&child) => {
                    node = &self.nodes[child as usize];
                    if let Some(id) = node.term {
                        best = Some((id, depth + 1));
                    }
                }
                None => break,
            }
        }
        best
    }

    /// Exact lookup of a term by any spelling that normalises to it.
    pub fn get(&self, term: &str) -> Option<&TermEntry> {
        let words = normalize_words(term);
        let (id, len) = self.lookup(words.iter().map(String::as_str))?;
        (len == words.len()).then(|| self.term(id))
    }

    pub fn term(&self, id: TermId) -> &TermEntry {
        &self.terms[id.index()]
    }

    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn max_term_words(&self) -> usize {
        self.max_term_words
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dictionary(entries: &[(&str, &[&str])]) -> TermDictionary {
        entries
            .iter()
            .map(|(term, articles)| (term.to_string(), articles.iter().map(|a| a.to_string()).collect()))
            .collect()
    }

    fn lookup(index: &TermIndex, text: &str) -> Option<(String, usize)> {
        let words = normalize_words(text);
        index
            .lookup(words.iter().map(String::as_str))
            .map(|(id, len)| (index.term(id).key.clone(), len))
    }

    #[test]
    fn longest_term_wins() {
        let index = TermIndex::build(&dictionary(&[
            ("son", &["kt/son"]),
            ("son of god", &["kt/sonofgod"]),
            ("god", &["kt/god"]),
        ]))
        .unwrap();

        assert_eq!(lookup(&index, "Son of God and"), Some(("son of god".into(), 3)));
        assert_eq!(lookup(&index, "son of man"), Some(("son".into(), 1)));
        assert_eq!(lookup(&index, "of God"), None);
        assert_eq!(index.term_count(), 3);
        assert_eq!(index.max_term_words(), 3);
    }

    #[test]
    fn same_term_with_different_casing_merges_articles() {
        let index = TermIndex::build(&dictionary(&[
            ("Lord", &["kt/lord"]),
            ("lord", &["kt/lord", "kt/yahweh"]),
        ]))
        .unwrap();

        assert_eq!(index.term_count(), 1);
        let entry = index.get("LORD").unwrap();
        assert_eq!(entry.key, "Lord");
        let articles: Vec<String> = entry.articles.iter().map(ToString::to_string).collect();
        assert_eq!(articles, ["kt/lord", "kt/yahweh"]);
    }

    #[test]
    fn get_requires_the_whole_term() {
        let index = TermIndex::build(&dictionary(&[("high priest", &["kt/highpriest"])])).unwrap();
        assert!(index.get("high priest").is_some());
        assert!(index.get("High   Priest").is_some());
        assert!(index.get("high").is_none());
        assert!(index.get("high priest Aaron").is_none());
    }

    #[test]
    fn shared_prefixes_share_nodes() {
        let index = TermIndex::build(&dictionary(&[
            ("day of the lord", &["kt/dayofthelord"]),
            ("day of atonement", &["kt/atonement"]),
        ]))
        .unwrap();
        // root + day + of + (the, lord) + atonement
        assert_eq!(index.node_count(), 6);
    }

    #[test]
    fn strict_build_rejects_invalid_entries() {
        let err = TermIndex::build(&dictionary(&[("god", &["kt/god"]), ("  ", &["kt/x"])])).unwrap_err();
        assert_eq!(err, IndexError::EmptyTerm { term: "  ".into() });

        let err = TermIndex::build(&dictionary(&[("grace", &[])])).unwrap_err();
        assert_eq!(err, IndexError::NoArticles { term: "grace".into() });

        let err = TermIndex::build(&dictionary(&[("grace", &["kt/grace", " "])])).unwrap_err();
        assert_eq!(err, IndexError::EmptyArticle { term: "grace".into() });

        let err = TermIndex::build(&dictionary(&[("--", &["kt/x"])])).unwrap_err();
        assert!(matches!(err, IndexError::EmptyTerm { .. }));
    }

    #[test]
    fn lenient_build_skips_invalid_entries() {
        let (index, rejected) = TermIndex::build_lenient(&dictionary(&[
            ("", &["kt/x"]),
            ("god", &["kt/god"]),
            ("faith", &[]),
        ]));
        assert_eq!(index.term_count(), 1);
        assert_eq!(rejected.len(), 2);
        assert!(index.get("god").is_some());
    }

    #[test]
    fn empty_dictionary() {
        let index = TermIndex::build(&TermDictionary::new()).unwrap();
        assert!(index.is_empty());
        assert_eq!(lookup(&index, "anything"), None);
    }

    #[test]
    fn index_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TermIndex>();
    }
}
