//! Catalog of the 66 books, used for file naming and batch selection.

use indexmap::IndexSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Testament {
    Old,
    New,
}

/// Which testament(s) a batch run covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum TestamentFilter {
    Old,
    New,
    #[default]
    All,
}

impl TestamentFilter {
    pub fn admits(self, testament: Testament) -> bool {
        match self {
            TestamentFilter::All => true,
            TestamentFilter::Old => testament == Testament::Old,
            TestamentFilter::New => testament == Testament::New,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Book {
    /// Lowercase three-character id, e.g. `gen`, `1co`.
    pub id: &'static str,
    pub title: &'static str,
    /// Numbered USFM file code, e.g. `01-GEN`.
    pub usfm: &'static str,
    pub testament: Testament,
}

impl Book {
    /// The part of the USFM code after the dash (`GEN` for `01-GEN`).
    pub fn usfm_code(&self) -> &'static str {
        self.usfm.split_once('-').map_or(self.usfm, |(_, code)| code)
    }
}

const fn book(id: &'static str, title: &'static str, usfm: &'static str, testament: Testament) -> Book {
    Book { id, title, usfm, testament }
}

use Testament::{New, Old};

pub static BOOKS: [Book; 66] = [
    book("gen", "Genesis", "01-GEN", Old),
    book("exo", "Exodus", "02-EXO", Old),
    book("lev", "Leviticus", "03-LEV", Old),
    book("num", "Numbers", "04-NUM", Old),
    book("deu", "Deuteronomy", "05-DEU", Old),
    book("jos", "Joshua", "06-JOS", Old),
    book("jdg", "Judges", "07-JDG", Old),
    book("rut", "Ruth", "08-RUT", Old),
    book("1sa", "1 Samuel", "09-1SA", Old),
    book("2sa", "2 Samuel", "10-2SA", Old),
    book("1ki", "1 Kings", "11-1KI", Old),
    book("2ki", "2 Kings", "12-2KI", Old),
    book("1ch", "1 Chronicles", "13-1CH", Old),
    book("2ch", "2 Chronicles", "14-2CH", Old),
    book("ezr", "Ezra", "15-EZR", Old),
    book("neh", "Nehemiah", "16-NEH", Old),
    book("est", "Esther", "17-EST", Old),
    book("job", "Job", "18-JOB", Old),
    book("psa", "Psalms", "19-PSA", Old),
    book("pro", "Proverbs", "20-PRO", Old),
    book("ecc", "Ecclesiastes", "21-ECC", Old),
    book("sng", "Song of Songs", "22-SNG", Old),
    book("isa", "Isaiah", "23-ISA", Old),
    book("jer", "Jeremiah", "24-JER", Old),
    book("lam", "Lamentations", "25-LAM", Old),
    book("ezk", "Ezekiel", "26-EZK", Old),
    book("dan", "Daniel", "27-DAN", Old),
    book("hos", "Hosea", "28-HOS", Old),
    book("jol", "Joel", "29-JOL", Old),
    book("amo", "Amos", "30-AMO", Old),
    book("oba", "Obadiah", "31-OBA", Old),
    book("jon", "Jonah", "32-JON", Old),
    book("mic", "Micah", "33-MIC", Old),
    book("nam", "Nahum", "34-NAM", Old),
    book("hab", "Habakkuk", "35-HAB", Old),
    book("zep", "Zephaniah", "36-ZEP", Old),
    book("hag", "Haggai", "37-HAG", Old),
    book("zec", "Zechariah", "38-ZEC", Old),
    book("mal", "Malachi", "39-MAL", Old),
    book("mat", "Matthew", "41-MAT", New),
    book("mrk", "Mark", "42-MRK", New),
    book("luk", "Luke", "43-LUK", New),
    book("jhn", "John", "44-JHN", New),
    book("act", "Acts", "45-ACT", New),
    book("rom", "Romans", "46-ROM", New),
    book("1co", "1 Corinthians", "47-1CO", New),
    book("2co", "2 Corinthians", "48-2CO", New),
    book("gal", "Galatians", "49-GAL", New),
    book("eph", "Ephesians", "50-EPH", New),
    book("php", "Philippians", "51-PHP", New),
    book("col", "Colossians", "52-COL", New),
    book("1th", "1 Thessalonians", "53-1TH", New),
    book("2th", "2 Thessalonians", "54-2TH", New),
    book("1ti", "1 Timothy", "55-1TI", New),
    book("2ti", "2 Timothy", "56-2TI", New),
    book("tit", "Titus", "57-TIT", New),
    book("phm", "Philemon", "58-PHM", New),
    book("heb", "Hebrews", "59-HEB", New),
    book("jas", "James", "60-JAS", New),
    book("1pe", "1 Peter", "61-1PE", New),
    book("2pe", "2 Peter", "62-2PE", New),
    book("1jn", "1 John", "63-1JN", New),
    book("2jn", "2 John", "64-2JN", New),
    book("3jn", "3 John", "65-3JN", New),
    book("jud", "Jude", "66-JUD", New),
    book("rev", "Revelation", "67-REV", New),
];

/// Looks up a book by id, ignoring case and surrounding whitespace.
pub fn find(id: &str) -> Option<&'static Book> {
    let id = id.trim().to_lowercase();
    BOOKS.iter().find(|b| b.id == id)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Selected books in catalog order.
    pub books: Vec<&'static Book>,
    /// Requested ids that are not in the catalog, normalised.
    pub unknown: Vec<String>,
}

/// Picks the books admitted by `testament` and, when `requested` is given,
/// named in it. Unknown requested ids are reported, not fatal.
pub fn select<S: AsRef<str>>(testament: TestamentFilter, requested: Option<&[S]>) -> Selection {
    let requested: Option<IndexSet<String>> = requested.map(|ids| {
        ids.iter()
            .map(|id| id.as_ref().trim().to_lowercase())
            .filter(|id| !id.is_empty())
            .collect()
    });

    let books = BOOKS
        .iter()
        .filter(|b| testament.admits(b.testament))
        .filter(|b| requested.as_ref().map_or(true, |ids| ids.contains(b.id)))
        .collect();
    let unknown = requested
        .into_iter()
        .flatten()
        .filter(|id| find(id).is_none())
        .collect();

    Selection { books, unknown }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_shape() {
        assert_eq!(BOOKS.iter().filter(|b| b.testament == Testament::Old).count(), 39);
        assert_eq!(BOOKS.iter().filter(|b| b.testament == Testament::New).count(), 27);
        for b in &BOOKS {
            assert_eq!(b.usfm_code(), b.id.to_uppercase(), "{}", b.usfm);
        }
        assert_eq!(find("MAT").unwrap().usfm, "41-MAT");
        assert_eq!(find(" gen ").unwrap().usfm_code(), "GEN");
        assert!(find("xyz").is_none());
    }

    #[test]
    fn selects_by_testament() {
        let old = select::<&str>(TestamentFilter::Old, None);
        assert_eq!(old.books.len(), 39);
        assert_eq!(old.books[0].id, "gen");
        let all = select::<&str>(TestamentFilter::All, None);
        assert_eq!(all.books.len(), 66);
    }

    #[test]
    fn selects_requested_in_catalog_order_and_reports_unknown() {
        let selection = select(TestamentFilter::All, Some(&["MAT", "gen", "foo", " exo"][..]));
        let ids: Vec<&str> = selection.books.iter().map(|b| b.id).collect();
        assert_eq!(ids, ["gen", "exo", "mat"]);
        assert_eq!(selection.unknown, ["foo"]);
    }

    #[test]
    fn testament_and_request_combine() {
        let selection = select(TestamentFilter::New, Some(&["gen", "rom"][..]));
        let ids: Vec<&str> = selection.books.iter().map(|b| b.id).collect();
        assert_eq!(ids, ["rom"]);
        assert!(selection.unknown.is_empty());
    }
}
