//! Language rules.
//!
//! Holds the per-language tables used by tokenization, detokenization and
//! (de)truecasing: non-breaking abbreviations and quotation marks.
//!
//! Languages without a dedicated table fall back to [DEFAULT_RULES].
use std::collections::{HashMap, HashSet};

use lazy_static::lazy_static;
use log::debug;

use crate::error::Error;

/// Tables for a single language.
#[derive(Debug)]
pub struct LangRules {
    /// Abbreviations (without the trailing period) that keep their period attached.
    pub nonbreaking: HashSet<&'static str>,
    /// Opening quotation marks: no space after them when detokenizing.
    pub open_quotes: HashSet<&'static str>,
    /// Closing quotation marks: no space before them when detokenizing.
    pub close_quotes: HashSet<&'static str>,
}

impl LangRules {
    fn new(nonbreaking: &[&'static str], open: &[&'static str], close: &[&'static str]) -> Self {
        Self {
            nonbreaking: nonbreaking.iter().copied().collect(),
            open_quotes: open.iter().copied().collect(),
            close_quotes: close.iter().copied().collect(),
        }
    }
}

lazy_static! {
    /// Rules for languages that have no table.
    pub static ref DEFAULT_RULES: LangRules = LangRules::new(&[], &["“", "«"], &["”", "»"]);

    /// Holds rules of languages known by the toolkit.
    pub static ref RULES: HashMap<&'static str, LangRules> = {
        let mut m = HashMap::new();
        m.insert(
            "is",
            LangRules::new(
                &[
                    "a", "e", "o", "u", "t", "þ", "dr", "fr", "frh", "gr", "hr", "hæstv", "kl",
                    "km", "mgr", "nk", "nr", "o.fl", "o.s.frv", "p", "sbr", "skv", "sr", "st",
                    "t.a.m", "t.d", "t.a", "u.þ.b", "þ.e", "þ.m.t", "þús", "ath", "bls", "dags",
                    "ehf", "hf", "m.a", "m.t.t", "ma", "mín", "sek", "ca",
                ],
                &["„", "‚"],
                &["“", "‘"],
            ),
        );
        m.insert(
            "en",
            LangRules::new(
                &[
                    "Mr", "Mrs", "Ms", "Dr", "Prof", "Sr", "Jr", "St", "vs", "etc", "e.g", "i.e",
                    "Inc", "Ltd", "Co", "Corp", "No", "Nos", "Art", "Jan", "Feb", "Mar", "Apr",
                    "Jun", "Jul", "Aug", "Sep", "Sept", "Oct", "Nov", "Dec", "U.S", "U.K",
                ],
                &["“", "‘"],
                &["”", "’"],
            ),
        );
        m
    };

    /// Tokens after which a new sentence starts.
    pub static ref SENTENCE_END: HashSet<&'static str> =
        [".", "!", "?", ":", "…", "..."].iter().copied().collect();

    /// Tokens that do not consume a sentence start (quotes, brackets, dashes).
    pub static ref DELAYED_SENTENCE_START: HashSet<&'static str> = [
        "(", "[", "\"", "'", "&apos;", "&quot;", "&#91;", "&#93;", "„", "“", "”", "‚", "‘", "’",
        "«", "»", "-", "–", "—",
    ]
    .iter()
    .copied()
    .collect();
}

/// Get the rules for `lang`, falling back on [DEFAULT_RULES].
pub fn rules(lang: &str) -> &'static LangRules {
    match RULES.get(lang) {
        Some(r) => r,
        None => {
            debug!("no rules for lang {}, using defaults", lang);
            &DEFAULT_RULES
        }
    }
}

/// Checks that `lang` looks like an ISO 639 code (two or three lowercase letters).
pub fn check_lang(lang: &str) -> Result<(), Error> {
    let valid = (2..=3).contains(&lang.len()) && lang.bytes().all(|b| b.is_ascii_lowercase());
    if valid {
        Ok(())
    } else {
        Err(Error::UnknownLang(lang.to_string()))
    }
}
