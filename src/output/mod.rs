pub mod keywords;
pub mod tsv;

pub use keywords::{assemble_keywords, KeywordEntry, KeywordMap};
pub use tsv::{assemble_tsv, TsvDocument, TsvOptions, TwlRow, DEFAULT_LINK_PREFIX, TSV_HEADER};

use crate::error::IndexError;
use crate::matching::TermIndex;
use crate::types::{TermDictionary, VerseCorpus};

/// Builds an index from `terms` and renders the TSV for one book with
/// default options. Use [`assemble_tsv`] to reuse an index across books.
pub fn generate_twl_matches(book: &str, terms: &TermDictionary, verses: &VerseCorpus) -> Result<TsvDocument, IndexError> {
    let index = TermIndex::build(terms)?;
    Ok(assemble_tsv(book, verses, &index, &TsvOptions::default()))
}

/// Builds an index from `terms` and returns the keyword map for `verses`.
pub fn generate_keywords_for_verses(terms: &TermDictionary, verses: &VerseCorpus) -> Result<KeywordMap, IndexError> {
    let index = TermIndex::build(terms)?;
    Ok(assemble_keywords(verses, &index))
}
