//! Per-batch cache of the built term index.
//!
//! A batch run constructs one cache and hands it to each per-book call, so the
//! index is built once no matter how many books are processed. The cache is
//! an ordinary value with the lifetime of the batch; nothing is global.

use tracing::{debug, info};

use super::term_index::TermIndex;
use crate::error::IndexError;
use crate::types::TermDictionary;

#[derive(Debug, Default)]
pub struct TermIndexCache {
    strict: bool,
    entry: Option<(blake3::Hash, TermIndex)>,
    builds: usize,
    rejected: Vec<IndexError>,
}

impl TermIndexCache {
    /// With `strict`, an invalid dictionary entry fails the build; otherwise
    /// invalid entries are skipped and kept in [`Self::rejected`].
    pub fn new(strict: bool) -> Self {
        Self {
            strict,
            ..Self::default()
        }
    }

    /// Returns the index for `dictionary`, building it on first use or when
    /// the dictionary contents differ from the cached one.
    pub fn get_or_build(&mut self, dictionary: &TermDictionary) -> Result<&TermIndex, IndexError> {
        let fingerprint = fingerprint(dictionary);
        let index = match self.entry.take() {
            Some((cached, index)) if cached == fingerprint => {
                debug!("reusing cached term index");
                index
            }
            _ => self.build(dictionary)?,
        };
        Ok(&self.entry.insert((fingerprint, index)).1)
    }

    fn build(&mut self, dictionary: &TermDictionary) -> Result<TermIndex, IndexError> {
        let index = if self.strict {
            TermIndex::build(dictionary)?
        } else {
            let (index, rejected) = TermIndex::build_lenient(dictionary);
            self.rejected = rejected;
            index
        };
        self.builds += 1;
        info!(
            terms = index.term_count(),
            nodes = index.node_count(),
            longest = index.max_term_words(),
            skipped = self.rejected.len(),
            "built term index"
        );
        Ok(index)
    }

    /// Entries skipped by the most recent lenient build.
    pub fn rejected(&self) -> &[IndexError] {
        &self.rejected
    }

    /// How many times an index has been built by this cache.
    pub fn builds(&self) -> usize {
        self.builds
    }
}

fn fingerprint(dictionary: &TermDictionary) -> blake3::Hash {
    let mut hasher = blake3::Hasher::new();
    for (term, articles) in dictionary {
        hasher.update(&(term.len() as u64).to_le_bytes());
        hasher.update(term.as_bytes());
        hasher.update(&(articles.len() as u64).to_le_bytes());
        for article in articles {
            hasher.update(&(article.len() as u64).to_le_bytes());
            hasher.update(article.as_bytes());
        }
    }
    hasher.finalize()
}
