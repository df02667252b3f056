/*! Truecasing.

The model counts, for each lowercased word, how often each casing appears *outside* of sentence
starts. Truecasing then replaces sentence-initial words by their most frequent casing, and
unknown casings elsewhere by the best known one.

Detruecasing is a heuristic: it uppercases the first letter of sentence-initial words.
It is lossy and is **not** the inverse of [TruecaseModel::truecase] (a word that was lowercased
mid-sentence can't be told apart from one that was always lowercase).
!*/
use std::{
    collections::{HashMap, HashSet},
    path::Path,
};

use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::io::formats::{read_json, write_json};
use crate::lang::{DELAYED_SENTENCE_START, SENTENCE_END};

/// Number of lines counted at once when training.
const TRAIN_BATCH: usize = 100_000;

type CaseCounts = HashMap<String, HashMap<String, u64>>;

/// Trained truecasing model.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TruecaseModel {
    /// lowercased word → most frequent casing
    best: HashMap<String, String>,
    /// every casing seen in training
    known: HashSet<String>,
}

impl TruecaseModel {
    /// Load a model saved by [TruecaseModel::save].
    pub fn load(src: &Path) -> Result<Self, Error> {
        read_json(src)
    }

    pub fn save(&self, dst: &Path) -> Result<(), Error> {
        write_json(dst, self)
    }

    /// Number of distinct lowercased words.
    pub fn len(&self) -> usize {
        self.best.len()
    }

    pub fn is_empty(&self) -> bool {
        self.best.is_empty()
    }

    /// Best casing of `word`, if any.
    pub fn best(&self, word: &str) -> Option<&str> {
        self.best.get(&word.to_lowercase()).map(String::as_str)
    }

    /// Count casings of a single whitespace-tokenized line.
    fn count_line(line: &str, counts: &mut CaseCounts) {
        let mut first_word = true;
        let mut previous: Option<&str> = None;

        let words = line
            .split_whitespace()
            .skip_while(|w| DELAYED_SENTENCE_START.contains(w));

        for word in words {
            if !first_word && previous.map_or(false, |p| SENTENCE_END.contains(p)) {
                first_word = true;
            }
            previous = Some(word);
            if DELAYED_SENTENCE_START.contains(word) {
                continue;
            }
            if !first_word {
                *counts
                    .entry(word.to_lowercase())
                    .or_default()
                    .entry(word.to_string())
                    .or_default() += 1;
            }
            first_word = false;
        }
    }

    fn merge(mut a: CaseCounts, b: CaseCounts) -> CaseCounts {
        for (lower, casings) in b {
            let entry = a.entry(lower).or_default();
            for (casing, count) in casings {
                *entry.entry(casing).or_default() += count;
            }
        }
        a
    }

    fn from_counts(counts: CaseCounts) -> Self {
        let mut model = Self::default();
        for (lower, casings) in counts {
            // ties are broken on the casing itself so that training is deterministic
            let best = casings
                .iter()
                .max_by(|(wa, ca), (wb, cb)| ca.cmp(cb).then_with(|| wb.cmp(wa)))
                .map(|(w, _)| w.clone());
            if let Some(best) = best {
                model.best.insert(lower, best);
            }
            model.known.extend(casings.into_keys());
        }
        model
    }

    /// Train a model on (tokenized) lines, counting on `threads` workers.
    pub fn train<I>(lines: I, threads: usize) -> Result<Self, Error>
    where
        I: Iterator<Item = Result<String, Error>>,
    {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()?;

        let mut counts = CaseCounts::new();
        let mut lines = lines.peekable();
        let mut nb_lines = 0;
        while lines.peek().is_some() {
            let batch = lines
                .by_ref()
                .take(TRAIN_BATCH)
                .collect::<Result<Vec<String>, Error>>()?;
            nb_lines += batch.len();

            let batch_counts = pool.install(|| {
                batch
                    .par_iter()
                    .fold(CaseCounts::new, |mut acc, line| {
                        Self::count_line(line, &mut acc);
                        acc
                    })
                    .reduce(CaseCounts::new, Self::merge)
            });
            counts = Self::merge(counts, batch_counts);
            debug!("counted {} lines", nb_lines);
        }

        let model = Self::from_counts(counts);
        info!("trained on {} lines, {} words", nb_lines, model.len());
        Ok(model)
    }

    /// Truecase a whitespace-tokenized line.
    ///
    /// The result is space-joined and carries no trailing newline.
    pub fn truecase(&self, line: &str) -> String {
        let mut sentence_start = true;
        let mut out: Vec<&str> = Vec::new();

        for word in line.split_whitespace() {
            let lower = word.to_lowercase();
            let cased = match (sentence_start, self.best.get(&lower)) {
                (true, Some(best)) => best.as_str(),
                _ if self.known.contains(word) => word,
                (false, Some(best)) => best.as_str(),
                _ => word,
            };
            out.push(cased);

            if SENTENCE_END.contains(word) {
                sentence_start = true;
            } else if !DELAYED_SENTENCE_START.contains(word) {
                sentence_start = false;
            }
        }

        out.join(" ")
    }
}

/// Uppercase the first letter of sentence-initial words.
pub fn detruecase_line(line: &str) -> String {
    let mut sentence_start = true;
    let mut out: Vec<String> = Vec::new();

    for word in line.split_whitespace() {
        if sentence_start && word.chars().next().map_or(false, char::is_lowercase) {
            out.push(upper_first(word));
        } else {
            out.push(word.to_string());
        }

        if SENTENCE_END.contains(word) {
            sentence_start = true;
        } else if !DELAYED_SENTENCE_START.contains(word) {
            sentence_start = false;
        }
    }

    out.join(" ")
}

fn upper_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Train a model on `lines` and save it to `save_to`.
///
/// A failure while writing leaves a partial, unusable file behind.
pub fn train_truecase<I>(lines: I, save_to: &Path, threads: usize) -> Result<TruecaseModel, Error>
where
    I: Iterator<Item = Result<String, Error>>,
{
    let model = TruecaseModel::train(lines, threads)?;
    model.save(save_to)?;
    Ok(model)
}

/// Truecase lines with the model stored at `load_from`.
///
/// Lines come out without a trailing newline.
pub fn truecase<I>(lines: I, load_from: &Path) -> Result<impl Iterator<Item = Result<String, Error>>, Error>
where
    I: Iterator<Item = Result<String, Error>>,
{
    let model = TruecaseModel::load(load_from)?;
    Ok(lines.map(move |line| line.map(|l| model.truecase(&l))))
}

/// Detruecase lines. See [detruecase_line].
pub fn detruecase<I>(lines: I) -> impl Iterator<Item = Result<String, Error>>
where
    I: Iterator<Item = Result<String, Error>>,
{
    lines.map(|line| line.map(|l| detruecase_line(&l)))
}
