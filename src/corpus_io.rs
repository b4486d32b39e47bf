//! JSON and TSV file access for dictionaries, verse corpora and outputs.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::output::{KeywordMap, TsvDocument};
use crate::types::{TermDictionary, VerseCorpus};

/// Reads a `{ "<term>": ["<article>", ...] }` dictionary, keeping file order.
pub fn load_terms(path: &Path) -> Result<TermDictionary> {
    read_json(path)
}

/// Reads a `{ "<chapter>": { "<verse>": "<text>" } }` corpus, keeping file order.
pub fn load_verses(path: &Path) -> Result<VerseCorpus> {
    read_json(path)
}

/// Writes the rendered document as is, with no trailing newline.
pub fn write_tsv(path: &Path, document: &TsvDocument) -> Result<()> {
    let write_err = |source| Error::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = BufWriter::new(File::create(path).map_err(write_err)?);
    write!(writer, "{document}").map_err(write_err)?;
    writer.flush().map_err(write_err)
}

/// Writes the map as JSON indented by two spaces.
pub fn write_keywords(path: &Path, keywords: &KeywordMap) -> Result<()> {
    write_json(path, keywords)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| Error::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(|source| Error::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })
}
