//! Format conversion commands.
use std::path::Path;

use log::info;

use crate::corpus::{Corpora, EnrichedPCorpora, PCorpora};
use crate::error::Error;
use crate::io::reader::{rmh_2_corpus, rmh_files};
use crate::io::{read_json, read_pickle, serialize, write_json, write_pickle};

use super::newline_terminated;

/// Convert a binary corpora file to JSON.
///
/// The JSON document is the language → corpus mapping itself.
pub fn pickle_to_json(src: &Path, dst: &Path) -> Result<(), Error> {
    let corpora = read_pickle(src)?;
    info!("converting {:?} (langs: {:?})", src, corpora.langs());
    match &corpora {
        Corpora::Plain(c) => write_json(dst, c),
        Corpora::Enriched(c) => write_json(dst, c),
    }
}

/// Convert a JSON language → corpus mapping to a binary corpora file.
pub fn json_to_pickle(src: &Path, dst: &Path, enriched: bool) -> Result<(), Error> {
    let corpora: Corpora = if enriched {
        read_json::<EnrichedPCorpora>(src)?.into()
    } else {
        read_json::<PCorpora>(src)?.into()
    };
    info!("converting {:?} (langs: {:?})", src, corpora.langs());
    write_pickle(dst, &corpora)
}

/// Extract the text of every RMH file under `dir`, one space separated sentence per line.
pub fn read_rmh(dir: &Path, dst: &Path, threads: usize, chunksize: usize) -> Result<usize, Error> {
    let files = rmh_files(dir)?;
    info!("Processing dir={:?}, files found={}", dir, files.len());
    let sentences = rmh_2_corpus(files, threads, chunksize)?;
    let nb = serialize(dst, newline_terminated(sentences.map(|s| s.map(|s| s.join(" ")))))?;
    info!("{} sentences extracted", nb);
    Ok(nb)
}
