//! Term dictionary and article references.

use std::fmt;
use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Term → article references, in the order the dictionary was supplied.
pub type TermDictionary = IndexMap<String, Vec<String>>;

static ARTICLE_PATH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|/)([^/\s]+)/([^/\s]+?)(?:\.md)?/?$").expect("article path pattern is valid")
});

/// A reference to a translation-words article, e.g. `kt/god`.
///
/// Dictionaries spell these several ways (`articles/kt/god`,
/// `bible/kt/god.md`, `kt/god`); all of them normalise to the same
/// category/slug pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArticleRef {
    pub category: Option<String>,
    pub slug: String,
}

impl ArticleRef {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match ARTICLE_PATH_RE.captures(trimmed) {
            Some(caps) => Self {
                category: Some(caps[1].to_string()),
                slug: caps[2].to_string(),
            },
            None => Self {
                category: None,
                slug: trimmed.trim_end_matches(".md").to_string(),
            },
        }
    }

    /// TWL `Tags` value for this article's category.
    pub fn tag(&self) -> &'static str {
        match self.category.as_deref() {
            Some("kt") => "keyterm",
            Some("names") => "name",
            _ => "",
        }
    }

    pub fn link(&self, prefix: &str) -> String {
        format!("{prefix}{self}")
    }
}

impl fmt::Display for ArticleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.category {
            Some(category) => write!(f, "{category}/{}", self.slug),
            None => f.write_str(&self.slug),
        }
    }
}
