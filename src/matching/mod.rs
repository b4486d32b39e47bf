pub mod cache;
pub mod matcher;
pub mod occurrence;
pub mod term_index;
pub mod tokenizer;

pub use cache::TermIndexCache;
pub use matcher::{find_matches, MatchRecord, Matcher, DEFAULT_CONTEXT_CHARS};
pub use occurrence::{resolve, resolve_with, OccurrenceMode, ResolvedMatch};
pub use term_index::{TermEntry, TermId, TermIndex, TermIndexBuilder};
