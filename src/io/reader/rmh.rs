/*! Risamálheild (RMH) TEI-XML reading.

RMH files are TEI documents where sentences (`<s>`) live in paragraphs (`<p>`) of the `<body>`,
and each child element of a sentence (`<w>`, `<c>`, …) carries one token as its text.
Header files (`rmh1Hdr.xml`, `rmh2Hdr.xml`) describe the collection and hold no text.
!*/
use std::path::{Path, PathBuf};

use log::{debug, info};
use roxmltree::{Document, Node};

use crate::corpus::Sentence;
use crate::error::Error;
use crate::pipeline::parallel::{par_map, ParConfig};

const TEI_NS: &str = "http://www.tei-c.org/ns/1.0";
const HEADER_SUFFIXES: [&str; 2] = ["rmh1Hdr.xml", "rmh2Hdr.xml"];

fn is_tei(node: &Node, name: &str) -> bool {
    node.is_element() && node.has_tag_name((TEI_NS, name))
}

/// Extract the sentences of a single RMH file, in document order.
///
/// Token elements without text are skipped.
pub fn read_rmh_file(path: &Path) -> Result<Vec<Sentence>, Error> {
    let content = std::fs::read_to_string(path)?;
    let doc = Document::parse(&content)?;

    let sentences: Vec<Sentence> = doc
        .descendants()
        .filter(|n| is_tei(n, "body"))
        .flat_map(|body| body.descendants().filter(|n| is_tei(n, "p")))
        .flat_map(|p| p.descendants().filter(|n| is_tei(n, "s")))
        .map(|s| {
            s.children()
                .filter(Node::is_element)
                .filter_map(|tok| tok.text())
                .filter(|text| !text.is_empty())
                .map(String::from)
                .collect()
        })
        .collect();

    debug!("{:?}: {} sentences", path, sentences.len());
    Ok(sentences)
}

/// Every `.xml` file under `dir` (recursively), header files excluded, sorted by path.
pub fn rmh_files(dir: &Path) -> Result<Vec<PathBuf>, Error> {
    let pattern = dir.join("**").join("*.xml");
    let pattern = pattern
        .to_str()
        .ok_or_else(|| Error::Custom(format!("non UTF-8 path: {:?}", dir)))?;

    let mut files = Vec::new();
    for entry in glob::glob(pattern)? {
        let path = entry?;
        let is_header = path
            .file_name()
            .and_then(|name| name.to_str())
            .map_or(false, |name| HEADER_SUFFIXES.iter().any(|sfx| name.ends_with(sfx)));
        if !is_header {
            files.push(path);
        }
    }
    files.sort();
    info!("found {} rmh files in {:?}", files.len(), dir);
    Ok(files)
}

/// Read RMH files on `threads` workers, `chunksize` files at a time.
///
/// Sentences come out in file order, then document order.
/// A file that fails to read or parse yields an error in its place.
pub fn rmh_2_corpus(
    files: Vec<PathBuf>,
    threads: usize,
    chunksize: usize,
) -> Result<impl Iterator<Item = Result<Sentence, Error>>, Error> {
    let config = ParConfig::chunked(threads, chunksize);
    let per_file = par_map(files.into_iter(), |path: PathBuf| read_rmh_file(&path), config)?;

    Ok(per_file.flat_map(|res| {
        let sentences: Vec<Result<Sentence, Error>> = match res {
            Ok(sentences) => sentences.into_iter().map(Ok).collect(),
            Err(e) => vec![Err(e)],
        };
        sentences
    }))
}
