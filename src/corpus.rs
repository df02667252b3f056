/*! Corpus record model.

Sentences are plain token vectors, enriched sentences carry three parallel
sequences (form, part-of-speech tag, lemma).
Parallel corpora are keyed by language code.
!*/
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A tokenized sentence.
pub type Sentence = Vec<String>;

/// Materialized corpus of tokenized sentences.
pub type TokCorpus = Vec<Sentence>;

/// Materialized corpus of enriched sentences.
pub type EnrichedCorpus = Vec<EnrichedSentence>;

/// Language code → corpus.
pub type PCorpora = BTreeMap<String, Vec<String>>;

/// Language code → enriched corpus.
pub type EnrichedPCorpora = BTreeMap<String, EnrichedCorpus>;

/// Surface forms, tags and lemmas of a sentence.
///
/// Serialized as a `[forms, tags, lemmas]` triple.
/// Use [EnrichedSentence::new] to get a checked instance, fields are public so that
/// externally produced (possibly broken) data can still be represented and reported.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(
    from = "(Vec<String>, Vec<String>, Vec<String>)",
    into = "(Vec<String>, Vec<String>, Vec<String>)"
)]
pub struct EnrichedSentence {
    pub form: Vec<String>,
    pub pos: Vec<String>,
    pub lemma: Vec<String>,
}

impl EnrichedSentence {
    /// Builds an enriched sentence, failing if the sequences differ in length.
    pub fn new(form: Vec<String>, pos: Vec<String>, lemma: Vec<String>) -> Result<Self, Error> {
        let sentence = Self { form, pos, lemma };
        sentence.check()?;
        Ok(sentence)
    }

    /// Checks that position i describes the same token in all three sequences.
    pub fn check(&self) -> Result<(), Error> {
        if self.form.len() == self.pos.len() && self.pos.len() == self.lemma.len() {
            Ok(())
        } else {
            Err(Error::Invariant(format!(
                "form/pos/lemma lengths differ: {}/{}/{}",
                self.form.len(),
                self.pos.len(),
                self.lemma.len()
            )))
        }
    }

    pub fn len(&self) -> usize {
        self.form.len()
    }

    pub fn is_empty(&self) -> bool {
        self.form.is_empty()
    }
}

impl From<(Vec<String>, Vec<String>, Vec<String>)> for EnrichedSentence {
    fn from((form, pos, lemma): (Vec<String>, Vec<String>, Vec<String>)) -> Self {
        Self { form, pos, lemma }
    }
}

impl From<EnrichedSentence> for (Vec<String>, Vec<String>, Vec<String>) {
    fn from(s: EnrichedSentence) -> Self {
        (s.form, s.pos, s.lemma)
    }
}

/// Either kind of parallel corpora.
///
/// This is what gets stored in binary corpus files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Corpora {
    Plain(PCorpora),
    Enriched(EnrichedPCorpora),
}

impl Corpora {
    /// Languages present, in key order.
    pub fn langs(&self) -> Vec<&str> {
        match self {
            Corpora::Plain(c) => c.keys().map(String::as_str).collect(),
            Corpora::Enriched(c) => c.keys().map(String::as_str).collect(),
        }
    }
}

impl From<PCorpora> for Corpora {
    fn from(c: PCorpora) -> Self {
        Corpora::Plain(c)
    }
}

impl From<EnrichedPCorpora> for Corpora {
    fn from(c: EnrichedPCorpora) -> Self {
        Corpora::Enriched(c)
    }
}
