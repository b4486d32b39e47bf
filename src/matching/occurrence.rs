//! Occurrence numbering for the matches of one verse.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::matcher::MatchRecord;
use super::tokenizer::{joined_by_whitespace, normalize_words, tokenize, Token};

/// How occurrence numbers are counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OccurrenceMode {
    /// Count earlier matches with the same surface text.
    #[default]
    Matches,
    /// Count earlier whole-word appearances of the surface text anywhere in
    /// the verse, including ones swallowed by a longer match.
    VerseText,
}

/// A match with its 1-based occurrence number within the verse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMatch {
    pub record: MatchRecord,
    pub occurrence: usize,
}

/// Numbers the matches of one verse. `matches` must be in scan order.
///
/// Surfaces compare case-insensitively, so `God` and `GOD` share a counter.
pub fn resolve(matches: Vec<MatchRecord>) -> Vec<ResolvedMatch> {
    debug_assert!(in_scan_order(&matches), "matches must be sorted and non-overlapping");

    let mut seen: HashMap<String, usize> = HashMap::new();
    matches
        .into_iter()
        .map(|record| {
            let count = seen.entry(record.surface.to_lowercase()).or_insert(0);
            *count += 1;
            ResolvedMatch {
                occurrence: *count,
                record,
            }
        })
        .collect()
}

/// Like [`resolve`], with the counting rule chosen by `mode`. `text` is the
/// verse the matches were found in.
pub fn resolve_with(text: &str, matches: Vec<MatchRecord>, mode: OccurrenceMode) -> Vec<ResolvedMatch> {
    match mode {
        OccurrenceMode::Matches => resolve(matches),
        OccurrenceMode::VerseText => resolve_in_text(text, matches),
    }
}

fn resolve_in_text(text: &str, matches: Vec<MatchRecord>) -> Vec<ResolvedMatch> {
    debug_assert!(in_scan_order(&matches), "matches must be sorted and non-overlapping");

    let tokens = tokenize(text);
    matches
        .into_iter()
        .map(|record| {
            let words = normalize_words(&record.surface);
            let earlier = (0..tokens.len())
                .take_while(|&i| tokens[i].start < record.start)
                .filter(|&i| phrase_at(text, &tokens, i, &words))
                .count();
            ResolvedMatch {
                occurrence: earlier + 1,
                record,
            }
        })
        .collect()
}

fn phrase_at(text: &str, tokens: &[Token], at: usize, words: &[String]) -> bool {
    let Some(window) = tokens.get(at..at + words.len()) else {
        return false;
    };
    window.iter().zip(words).all(|(token, word)| token.normalized == *word)
        && window.windows(2).all(|pair| joined_by_whitespace(text, &pair[0], &pair[1]))
}

fn in_scan_order(matches: &[MatchRecord]) -> bool {
    matches.windows(2).all(|pair| pair[0].end <= pair[1].start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::{find_matches, TermIndex};
    use crate::types::TermDictionary;

    fn index() -> TermIndex {
        let dictionary: TermDictionary = [
            ("son of god", "articles/kt/sonofgod"),
            ("god", "articles/kt/god"),
            ("lord", "articles/kt/lord"),
        ]
        .into_iter()
        .map(|(term, article)| (term.to_string(), vec![article.to_string()]))
        .collect();
        TermIndex::build(&dictionary).unwrap()
    }

    fn numbered(resolved: &[ResolvedMatch]) -> Vec<(&str, usize)> {
        resolved.iter().map(|r| (r.record.surface.as_str(), r.occurrence)).collect()
    }

    #[test]
    fn counts_repeated_surfaces() {
        let index = index();
        let text = "The Lord is God; God is the Lord, the LORD our God.";
        let resolved = resolve(find_matches(text, &index));
        assert_eq!(
            numbered(&resolved),
            [("Lord", 1), ("God", 1), ("God", 2), ("Lord", 2), ("LORD", 3), ("God", 3)]
        );
    }

    #[test]
    fn matches_mode_counts_only_reported_matches() {
        let index = index();
        let text = "He is the Son of God and God is good.";
        let resolved = resolve(find_matches(text, &index));
        assert_eq!(numbered(&resolved), [("Son of God", 1), ("God", 1)]);
    }

    #[test]
    fn verse_text_mode_counts_words_inside_longer_matches() {
        let index = index();
        let text = "He is the Son of God and God is good.";
        let resolved = resolve_with(text, find_matches(text, &index), OccurrenceMode::VerseText);
        assert_eq!(numbered(&resolved), [("Son of God", 1), ("God", 2)]);
    }

    #[test]
    fn resolving_is_idempotent() {
        let index = index();
        let text = "God, God, and the Son of God.";
        let first = resolve(find_matches(text, &index));
        let second = resolve(find_matches(text, &index));
        assert_eq!(first, second);
        assert_eq!(numbered(&first), [("God", 1), ("God", 2), ("Son of God", 1)]);
    }

    #[test]
    fn empty_input() {
        assert!(resolve(Vec::new()).is_empty());
        assert!(resolve_with("", Vec::new(), OccurrenceMode::VerseText).is_empty());
    }

    #[test]
    fn mode_names_in_config() {
        let mode: OccurrenceMode = serde_json::from_str("\"verse-text\"").unwrap();
        assert_eq!(mode, OccurrenceMode::VerseText);
        assert_eq!(OccurrenceMode::default(), OccurrenceMode::Matches);
    }
}
