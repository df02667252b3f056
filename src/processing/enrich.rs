/*! Enrichment and factored output commands.

`enrich` writes a JSON object mapping the language code to the list of enriched sentences, which
is what `write_factor` reads back.
!*/
use std::path::Path;

use log::info;

use crate::corpus::{EnrichedCorpus, EnrichedPCorpora};
use crate::error::Error;
use crate::io::writer::moses::{write_moses, Factors};
use crate::io::{deserialize, read_json, write_json};
use crate::lang::check_lang;
use crate::pipeline::{self, LexiconTagger, ParConfig};

/// Tokenize and tag `src`, writing the [EnrichedPCorpora] JSON to `dst`.
///
/// Without a lexicon, tags and lemmas are guessed.
pub fn enrich(
    src: &Path,
    dst: &Path,
    lang: &str,
    lexicon: Option<&Path>,
    config: ParConfig,
    lines: usize,
) -> Result<usize, Error> {
    check_lang(lang)?;
    let tagger = match lexicon {
        Some(path) => LexiconTagger::from_path(path)?,
        None => LexiconTagger::default(),
    };
    let corpus = pipeline::enrich(deserialize(src)?, lang, tagger, config, lines)?
        .collect::<Result<EnrichedCorpus, Error>>()?;
    let nb = corpus.len();

    let mut p_corpora = EnrichedPCorpora::new();
    p_corpora.insert(lang.to_string(), corpus);
    write_json(dst, &p_corpora)?;
    info!("[{}] enriched {} sentences", lang, nb);
    Ok(nb)
}

/// Write the `lang` corpus of an enriched JSON file in Moses factored format.
///
/// `lines` limits output to the first sentences (`0` for all).
pub fn write_factor(
    src: &Path,
    dst: &Path,
    lang: &str,
    factors: Factors,
    config: ParConfig,
    lines: usize,
) -> Result<usize, Error> {
    let mut p_corpora: EnrichedPCorpora = read_json(src)?;
    let corpus = p_corpora
        .remove(lang)
        .ok_or_else(|| Error::UnknownLang(lang.to_string()))?;
    let limit = if lines == 0 { usize::MAX } else { lines };
    let nb = write_moses(dst, corpus.into_iter().take(limit), factors, config)?;
    info!("[{}] wrote {} factored lines", lang, nb);
    Ok(nb)
}
