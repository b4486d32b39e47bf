//! Translation Words List generation: finds dictionary terms in verse text
//! and renders them as TSV rows or per-verse keyword maps.

pub mod books;
pub mod config;
pub mod corpus_io;
pub mod error;
pub mod generation;
pub mod matching;
pub mod output;
pub mod types;

pub use config::Config;
pub use error::{ConfigError, Error, IndexError, Result};
pub use matching::{find_matches, resolve, MatchRecord, Matcher, ResolvedMatch, TermIndex, TermIndexCache};
pub use output::{
    assemble_keywords, assemble_tsv, generate_keywords_for_verses, generate_twl_matches, KeywordEntry, KeywordMap,
    TsvDocument, TsvOptions,
};
pub use types::{ArticleRef, TermDictionary, VerseCorpus};
