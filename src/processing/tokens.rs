//! Tokenization and vocabulary commands.
use std::{collections::HashSet, path::Path};

use log::info;

use crate::error::Error;
use crate::io::{deserialize, serialize};
use crate::lang::check_lang;
use crate::pipeline::{self, ParConfig};

use super::newline_terminated;

/// Tokenize `src` into `dst`, one space separated sentence per line.
pub fn tokenize(src: &Path, dst: &Path, lang: &str, config: ParConfig) -> Result<usize, Error> {
    check_lang(lang)?;
    info!("[{}] tokenizing {:?}", lang, src);
    let sentences = pipeline::tokenize(deserialize(src)?, lang, config)?;
    let nb = serialize(dst, newline_terminated(sentences.map(|s| s.map(|s| s.join(" ")))))?;
    info!("[{}] tokenized {} lines", lang, nb);
    Ok(nb)
}

pub fn detokenize(src: &Path, dst: &Path, lang: &str) -> Result<usize, Error> {
    check_lang(lang)?;
    info!("[{}] detokenizing {:?}", lang, src);
    serialize(dst, newline_terminated(pipeline::detokenize(deserialize(src)?, lang)))
}

/// Write the distinct tokens of `src`, one per line.
pub fn extract_known_tokens(src: &Path, dst: &Path) -> Result<usize, Error> {
    let nb = serialize(
        dst,
        newline_terminated(pipeline::extract_known_tokens(deserialize(src)?)),
    )?;
    info!("{} distinct tokens in {:?}", nb, src);
    Ok(nb)
}

/// Write the distinct tokens of `src` that are not listed in `known`, one per line.
///
/// `known` holds a token per line, surrounding whitespace is ignored.
pub fn unknown_tokens(src: &Path, known: &Path, dst: &Path) -> Result<usize, Error> {
    let known: HashSet<String> = deserialize(known)?
        .map(|line| line.map(|l| l.trim().to_string()))
        .collect::<Result<_, Error>>()?;
    info!("{} known tokens", known.len());

    let mut seen = HashSet::new();
    let unknown = pipeline::unknown_tokens(deserialize(src)?, &known).flat_map(|line| {
        let tokens: Vec<Result<String, Error>> = match line {
            Ok(tokens) => tokens.into_iter().map(Ok).collect(),
            Err(e) => vec![Err(e)],
        };
        tokens
    });
    let distinct = unknown.filter(|tok| match tok {
        Ok(t) => seen.insert(t.clone()),
        Err(_) => true,
    });
    let nb = serialize(dst, newline_terminated(distinct))?;
    info!("{} unknown tokens in {:?}", nb, src);
    Ok(nb)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_file() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("in.txt");
        let dst = dir.path().join("out.txt");
        std::fs::write(&src, "Hello, world!\nA B\n").unwrap();

        assert_eq!(tokenize(&src, &dst, "en", ParConfig::sequential()).unwrap(), 2);
        assert_eq!(std::fs::read_to_string(&dst).unwrap(), "Hello , world !\nA B\n");
    }

    #[test]
    fn test_tokenize_bad_lang() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("in.txt");
        std::fs::write(&src, "x\n").unwrap();
        assert!(matches!(
            tokenize(&src, &dir.path().join("out.txt"), "English", ParConfig::sequential()),
            Err(Error::UnknownLang(_))
        ));
    }

    #[test]
    fn test_unknown_tokens_file() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("in.txt");
        let known = dir.path().join("known.txt");
        let dst = dir.path().join("out.txt");
        std::fs::write(&src, "a x b\ny a x\n").unwrap();
        std::fs::write(&known, "a \n b\n").unwrap();

        assert_eq!(unknown_tokens(&src, &known, &dst).unwrap(), 2);
        assert_eq!(std::fs::read_to_string(&dst).unwrap(), "x\ny\n");
    }

    #[test]
    fn test_extract_known_tokens_file() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("in.txt");
        let dst = dir.path().join("out.txt");
        std::fs::write(&src, "b a\na c\n").unwrap();

        assert_eq!(extract_known_tokens(&src, &dst).unwrap(), 3);
        assert_eq!(std::fs::read_to_string(&dst).unwrap(), "b\na\nc\n");
    }
}
