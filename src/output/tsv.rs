//! TSV rendering of a book's matches, one row per resolved match.

use std::collections::HashSet;
use std::fmt;

use tracing::debug;

use crate::matching::{resolve_with, Matcher, OccurrenceMode, ResolvedMatch, TermIndex, DEFAULT_CONTEXT_CHARS};
use crate::types::{VerseCorpus, VerseRef};

pub const TSV_HEADER: &str = "Reference\tID\tTags\tOrigWords\tOccurrence\tTWLink\tDisambiguation\tContext";
pub const DEFAULT_LINK_PREFIX: &str = "rc://*/tw/dict/bible/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsvOptions {
    pub link_prefix: String,
    pub include_header: bool,
    pub context_chars: usize,
    pub occurrence: OccurrenceMode,
}

impl Default for TsvOptions {
    fn default() -> Self {
        Self {
            link_prefix: DEFAULT_LINK_PREFIX.to_string(),
            include_header: true,
            context_chars: DEFAULT_CONTEXT_CHARS,
            occurrence: OccurrenceMode::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TwlRow {
    pub reference: String,
    pub id: String,
    pub tags: String,
    pub orig_words: String,
    pub occurrence: usize,
    pub link: String,
    pub disambiguation: String,
    pub context: String,
}

impl fmt::Display for TwlRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            cell(&self.reference),
            self.id,
            self.tags,
            cell(&self.orig_words),
            self.occurrence,
            cell(&self.link),
            cell(&self.disambiguation),
            cell(&self.context),
        )
    }
}

/// An assembled TSV document. Rows are in verse order, then match order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsvDocument {
    pub rows: Vec<TwlRow>,
    pub include_header: bool,
}

impl TsvDocument {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Newline-joined lines without a trailing newline.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TsvDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        if self.include_header {
            f.write_str(TSV_HEADER)?;
            first = false;
        }
        for row in &self.rows {
            if !first {
                f.write_str("\n")?;
            }
            write!(f, "{row}")?;
            first = false;
        }
        Ok(())
    }
}

/// Runs the matcher and resolver over every verse of `corpus` and renders
/// one row per match.
pub fn assemble_tsv(book: &str, corpus: &VerseCorpus, index: &TermIndex, options: &TsvOptions) -> TsvDocument {
    let matcher = Matcher::new(index).with_context_chars(options.context_chars);
    let mut ids = RowIds::new(book);
    let mut rows = Vec::new();

    for verse in corpus.verses() {
        let matches = matcher.find_matches(verse.text);
        if matches.is_empty() {
            continue;
        }
        let resolved = resolve_with(verse.text, matches, options.occurrence);
        rows.extend(
            resolved
                .iter()
                .map(|m| row(verse.reference, m, index, &options.link_prefix, &mut ids)),
        );
    }

    debug!(book, rows = rows.len(), verses = corpus.verse_count(), "assembled TSV");
    TsvDocument {
        rows,
        include_header: options.include_header,
    }
}

fn row(reference: VerseRef<'_>, resolved: &ResolvedMatch, index: &TermIndex, prefix: &str, ids: &mut RowIds) -> TwlRow {
    let record = &resolved.record;
    let reference = reference.to_string();
    let entry = index.term(record.term_id);
    let links: Vec<String> = entry.articles.iter().map(|a| a.link(prefix)).collect();
    let disambiguation = if links.len() > 1 {
        format!("({})", links.join(", "))
    } else {
        String::new()
    };

    TwlRow {
        id: ids.next(&reference, &record.surface, resolved.occurrence),
        tags: entry.articles[0].tag().to_string(),
        orig_words: record.surface.clone(),
        occurrence: resolved.occurrence,
        link: links[0].clone(),
        disambiguation,
        context: record.context.clone(),
        reference,
    }
}

fn cell(value: &str) -> String {
    value.replace(['\t', '\n', '\r'], " ")
}

/// Deterministic 4-character row ids, unique within one document: a
/// lowercase letter followed by three lowercase alphanumerics.
struct RowIds {
    book: String,
    used: HashSet<String>,
}

impl RowIds {
    const ALPHANUMERIC: &'static [u8; 36] = b"abcdefghijklmnopqrstuvwxyz0123456789";

    fn new(book: &str) -> Self {
        Self {
            book: book.to_lowercase(),
            used: HashSet::new(),
        }
    }

    fn next(&mut self, reference: &str, surface: &str, occurrence: usize) -> String {
        let mut salt = 0u64;
        loop {
            let mut hasher = blake3::Hasher::new();
            for part in [self.book.as_bytes(), reference.as_bytes(), surface.as_bytes()] {
                hasher.update(part);
                hasher.update(&[0]);
            }
            hasher.update(&(occurrence as u64).to_le_bytes());
            hasher.update(&salt.to_le_bytes());
            let hash = hasher.finalize();
            let bytes = hash.as_bytes();

            let mut id = String::with_capacity(4);
            id.push(Self::ALPHANUMERIC[bytes[0] as usize % 26] as char);
            for &b in &bytes[1..4] {
                id.push(Self::ALPHANUMERIC[b as usize % 36] as char);
            }
            if self.used.insert(id.clone()) {
                return id;
            }
            salt += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TermDictionary;

    fn index() -> TermIndex {
        let dictionary: TermDictionary = [
            ("son of god", vec!["articles/kt/sonofgod"]),
            ("god", vec!["articles/kt/god", "articles/other/falsegod"]),
            ("Paul", vec!["names/paul"]),
        ]
        .into_iter()
        .map(|(term, articles)| (term.to_string(), articles.into_iter().map(String::from).collect()))
        .collect();
        TermIndex::build(&dictionary).unwrap()
    }

    fn corpus() -> VerseCorpus {
        [
            ("1", "1", "He is the Son of God and God is good."),
            ("1", "2", ""),
            ("1", "3", "Paul\tgreets God."),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn rows_follow_verse_then_match_order() {
        let doc = assemble_tsv("mat", &corpus(), &index(), &TsvOptions::default());
        let summary: Vec<(&str, &str, usize)> = doc
            .rows
            .iter()
            .map(|r| (r.reference.as_str(), r.orig_words.as_str(), r.occurrence))
            .collect();
        assert_eq!(
            summary,
            [("1:1", "Son of God", 1), ("1:1", "God", 1), ("1:3", "Paul", 1), ("1:3", "God", 1)]
        );
    }

    #[test]
    fn columns_are_filled_from_articles() {
        let doc = assemble_tsv("mat", &corpus(), &index(), &TsvOptions::default());
        let son = &doc.rows[0];
        assert_eq!(son.tags, "keyterm");
        assert_eq!(son.link, "rc://*/tw/dict/bible/kt/sonofgod");
        assert_eq!(son.disambiguation, "");
        assert_eq!(son.context, "He is the [Son of God] and God is good.");

        let god = &doc.rows[1];
        assert_eq!(god.link, "rc://*/tw/dict/bible/kt/god");
        assert_eq!(
            god.disambiguation,
            "(rc://*/tw/dict/bible/kt/god, rc://*/tw/dict/bible/other/falsegod)"
        );

        assert_eq!(doc.rows[2].tags, "name");
    }

    #[test]
    fn rendered_document_has_header_plus_one_line_per_match() {
        let doc = assemble_tsv("mat", &corpus(), &index(), &TsvOptions::default());
        let text = doc.render();
        let lines: Vec<&str> = text.split('\n').collect();
        assert_eq!(lines.len(), doc.row_count() + 1);
        assert_eq!(lines[0], TSV_HEADER);
        assert!(lines.iter().all(|l| l.split('\t').count() == 8));
        assert!(!text.ends_with('\n'));
    }

    #[test]
    fn tabs_in_verse_text_do_not_break_columns() {
        let doc = assemble_tsv("mat", &corpus(), &index(), &TsvOptions::default());
        let line = doc.rows[2].to_string();
        assert_eq!(line.split('\t').count(), 8);
        assert!(line.ends_with("[Paul] greets God."));
    }

    #[test]
    fn ids_are_deterministic_and_unique() {
        let a = assemble_tsv("mat", &corpus(), &index(), &TsvOptions::default());
        let b = assemble_tsv("mat", &corpus(), &index(), &TsvOptions::default());
        assert_eq!(a, b);

        let ids: HashSet<&str> = a.rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids.len(), a.row_count());
        for id in ids {
            assert_eq!(id.len(), 4);
            assert!(id.chars().next().unwrap().is_ascii_lowercase());
            assert!(id.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
        }
    }

    #[test]
    fn row_ids_resolve_collisions() {
        let mut ids = RowIds::new("gen");
        let first = ids.next("1:1", "God", 1);
        ids.used.clear();
        ids.used.insert(first.clone());
        let second = ids.next("1:1", "God", 1);
        assert_ne!(first, second);
    }

    #[test]
    fn empty_corpus_yields_header_only() {
        let doc = assemble_tsv("mat", &VerseCorpus::new(), &index(), &TsvOptions::default());
        assert_eq!(doc.row_count(), 0);
        assert_eq!(doc.render(), TSV_HEADER);

        let options = TsvOptions {
            include_header: false,
            ..TsvOptions::default()
        };
        assert_eq!(assemble_tsv("mat", &VerseCorpus::new(), &index(), &options).render(), "");
    }

    #[test]
    fn verse_text_occurrence_mode() {
        let options = TsvOptions {
            occurrence: OccurrenceMode::VerseText,
            ..TsvOptions::default()
        };
        let doc = assemble_tsv("mat", &corpus(), &index(), &options);
        assert_eq!(doc.rows[1].orig_words, "God");
        assert_eq!(doc.rows[1].occurrence, 2);
    }
}
