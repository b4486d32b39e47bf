pub mod corpus;
pub mod terms;

pub use corpus::{Verse, VerseCorpus, VerseRef};
pub use terms::{ArticleRef, TermDictionary};
