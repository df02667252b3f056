/*! Enrichment: lemma and part-of-speech annotation.

Taggers implement [Tagger]. The provided [LexiconTagger] reads a tab separated lexicon
(`form<TAB>tag<TAB>lemma`, `#` for comments) and falls back on simple heuristics for
unknown tokens:

- punctuation gets [PUNCT_TAG],
- numbers get [NUMBER_TAG],
- anything else gets [UNKNOWN_TAG], lemma being the lowercased form.

Tag names follow the MIM-GOLD conventions.
!*/
use std::{
    collections::HashMap,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use log::{debug, info};

use crate::corpus::EnrichedSentence;
use crate::error::Error;

use super::parallel::{par_map, ParConfig};
use super::tokenize::{RuleTokenizer, Tokenizer};

pub const PUNCT_TAG: &str = "pl";
pub const NUMBER_TAG: &str = "ta";
pub const UNKNOWN_TAG: &str = "x";

/// Lemma and part-of-speech annotation of tokens.
pub trait Tagger {
    /// Tag a tokenized sentence. The result has one tag and one lemma per token.
    fn tag(&self, tokens: Vec<String>) -> EnrichedSentence;
}

/// Lexicon backed tagger.
#[derive(Debug, Default, Clone)]
pub struct LexiconTagger {
    /// form → (tag, lemma)
    entries: HashMap<String, (String, String)>,
}

impl LexiconTagger {
    /// Load a lexicon file.
    pub fn from_path(src: &Path) -> Result<Self, Error> {
        info!("Reading lexicon={:?}", src);
        let br = BufReader::new(File::open(src)?);
        let mut entries = HashMap::new();
        for (idx, line) in br.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            let fields: Vec<&str> = line.split('\t').collect();
            match fields.as_slice() {
                [form, tag, lemma] => {
                    entries.insert(form.to_string(), (tag.to_string(), lemma.to_string()));
                }
                _ => {
                    return Err(Error::Custom(format!(
                        "malformed lexicon line {} in {:?}: expected 3 fields, got {}",
                        idx + 1,
                        src,
                        fields.len()
                    )))
                }
            }
        }
        debug!("lexicon has {} entries", entries.len());
        Ok(Self { entries })
    }

    /// Add an entry, replacing the previous one for `form`.
    pub fn insert(&mut self, form: &str, tag: &str, lemma: &str) {
        self.entries
            .insert(form.to_string(), (tag.to_string(), lemma.to_string()));
    }

    fn lookup(&self, form: &str) -> Option<&(String, String)> {
        self.entries
            .get(form)
            .or_else(|| self.entries.get(&form.to_lowercase()))
    }

    fn guess(form: &str) -> (String, String) {
        let tag = if form.chars().all(|c| c.is_ascii_punctuation() || !c.is_alphanumeric()) {
            PUNCT_TAG
        } else if form
            .chars()
            .all(|c| c.is_numeric() || c == '.' || c == ',')
        {
            NUMBER_TAG
        } else {
            UNKNOWN_TAG
        };
        (tag.to_string(), form.to_lowercase())
    }
}

impl Tagger for LexiconTagger {
    fn tag(&self, tokens: Vec<String>) -> EnrichedSentence {
        let (pos, lemma): (Vec<String>, Vec<String>) = tokens
            .iter()
            .map(|form| match self.lookup(form) {
                Some((tag, lemma)) => (tag.clone(), lemma.clone()),
                None => Self::guess(form),
            })
            .unzip();
        EnrichedSentence {
            form: tokens,
            pos,
            lemma,
        }
    }
}

/// Tokenize and tag raw lines.
///
/// `max_lines` limits processing to the first lines of the corpus (`0` for all of it).
/// Order of the output is the order of the input.
pub fn enrich<I, T>(
    lines: I,
    lang: &str,
    tagger: T,
    config: ParConfig,
    max_lines: usize,
) -> Result<impl Iterator<Item = Result<EnrichedSentence, Error>>, Error>
where
    I: Iterator<Item = Result<String, Error>>,
    T: Tagger + Sync,
{
    let limit = if max_lines == 0 { usize::MAX } else { max_lines };
    info!("enriching lang={} (limit={})", lang, max_lines);
    let tokenizer = RuleTokenizer::new(lang);

    par_map(
        lines.take(limit),
        move |line: Result<String, Error>| -> Result<EnrichedSentence, Error> {
            let sentence = tagger.tag(tokenizer.tokenize(&line?));
            sentence.check()?;
            Ok(sentence)
        },
        config,
    )
}
