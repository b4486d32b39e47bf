//! Per-book TSV runs and the multi-book keyword batch.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::books::{self, TestamentFilter};
use crate::config::Config;
use crate::corpus_io::{load_terms, load_verses, write_keywords, write_tsv};
use crate::error::{Error, Result};
use crate::matching::TermIndexCache;
use crate::output::{assemble_keywords, assemble_tsv};

#[derive(Debug, Clone)]
pub struct TsvArgs {
    pub terms_path: PathBuf,
    pub verses_path: PathBuf,
    /// Catalog id of the book, used for the default file name and row ids.
    pub book: Option<String>,
    pub output_path: Option<PathBuf>,
}

impl TsvArgs {
    /// `--output` if given, else `twl_<BOOK>.tsv`, else `<verses stem>.tsv`.
    pub fn output_file(&self) -> PathBuf {
        if let Some(path) = &self.output_path {
            return path.clone();
        }
        if let Some(book) = &self.book {
            return PathBuf::from(format!("twl_{}.tsv", book.trim().to_uppercase()));
        }
        match self.verses_path.file_stem() {
            Some(stem) => PathBuf::from(format!("{}.tsv", stem.to_string_lossy())),
            None => PathBuf::from("output.tsv"),
        }
    }

    fn book_id(&self) -> String {
        match &self.book {
            Some(book) => book.trim().to_lowercase(),
            None => self
                .verses_path
                .file_stem()
                .map(|s| s.to_string_lossy().to_lowercase())
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsvSummary {
    pub output_path: PathBuf,
    pub matches: usize,
}

/// Generates and writes the TSV for one book.
pub fn run_tsv(config: &Config, args: &TsvArgs, cache: &mut TermIndexCache) -> Result<TsvSummary> {
    if let Some(book) = &args.book {
        if books::find(book).is_none() {
            return Err(Error::UnknownBook(book.clone()));
        }
    }

    let terms = load_terms(&args.terms_path)?;
    let verses = load_verses(&args.verses_path)?;
    info!(path = %args.verses_path.display(), verses = verses.verse_count(), "reading verses");

    let index = cache.get_or_build(&terms)?;
    let document = assemble_tsv(&args.book_id(), &verses, index, &config.tsv_options());

    let output_path = args.output_file();
    write_tsv(&output_path, &document)?;
    info!("TSV file saved as {}", output_path.display());
    info!("Found {} matches", document.row_count());

    Ok(TsvSummary {
        output_path,
        matches: document.row_count(),
    })
}

#[derive(Debug, Clone)]
pub struct KeywordsArgs {
    pub terms_path: PathBuf,
    /// Directory holding one `<id>.json` verse corpus per book.
    pub verses_dir: PathBuf,
    pub books: Option<Vec<String>>,
    pub testament: TestamentFilter,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub written: Vec<PathBuf>,
    /// Selected books whose verse file was absent.
    pub skipped: Vec<String>,
    pub unknown: Vec<String>,
}

/// Writes `keywords_<CODE>.json` into `config.keywords_outdir` for every
/// selected book. The term index is built once for the whole run.
pub fn run_keywords_batch(config: &Config, args: &KeywordsArgs) -> Result<BatchSummary> {
    let selection = books::select(args.testament, args.books.as_deref());
    if !selection.unknown.is_empty() {
        warn!("unknown book ids ignored: {}", selection.unknown.join(", "));
    }
    if selection.books.is_empty() {
        return Err(Error::NoBooksSelected);
    }

    let outdir = &config.keywords_outdir;
    fs::create_dir_all(outdir).map_err(|source| Error::Write {
        path: outdir.clone(),
        source,
    })?;

    let terms = load_terms(&args.terms_path)?;
    let mut cache = TermIndexCache::new(config.strict);
    let mut summary = BatchSummary {
        unknown: selection.unknown,
        ..BatchSummary::default()
    };

    for book in selection.books {
        let verses_path = args.verses_dir.join(format!("{}.json", book.id));
        if !verses_path.is_file() {
            warn!(book = book.id, path = %verses_path.display(), "no verse file, skipping");
            summary.skipped.push(book.id.to_string());
            continue;
        }
        info!("Processing {} ({})...", book.title, book.id);

        let verses = load_verses(&verses_path)?;
        let index = cache.get_or_build(&terms)?;
        let keywords = assemble_keywords(&verses, index);

        let filename = keyword_file(outdir, book.usfm_code());
        write_keywords(&filename, &keywords)?;
        debug!(book = book.id, verses = keywords.len(), "keyword map written");
        info!("Wrote {}", filename.display());
        summary.written.push(filename);
    }

    info!("Done. Generated {} files in {}", summary.written.len(), outdir.display());
    Ok(summary)
}

fn keyword_file(outdir: &Path, usfm_code: &str) -> PathBuf {
    outdir.join(format!("keywords_{usfm_code}.json"))
}
