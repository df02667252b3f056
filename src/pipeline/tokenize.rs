/*! Tokenization and detokenization.

Tokens are found using Unicode word boundaries ([UAX#29](https://unicode.org/reports/tr29/)),
then fixed up with language rules:

- known abbreviations keep their trailing period (`t.d.`, `Mr.`),
- runs of periods are kept together (`...`),
- intra-word hyphens become `@-@` so that detokenization can glue them back.

Detokenization uses the same tables to decide where to put spaces back.
It is not an exact inverse: apart from intra-word hyphens, no marker records that a
punctuation mark touched its neighbours, so `A/B` comes back as `A / B`, `jon@ru.is` as
`jon @ ru.is` and `--` as `- -`.
!*/
use log::info;
use unicode_segmentation::UnicodeSegmentation;

use crate::corpus::Sentence;
use crate::error::Error;
use crate::lang::{self, LangRules};

use super::parallel::{par_map, ParConfig};

/// Marker for a hyphen that was inside a word.
pub const GLUED_HYPHEN: &str = "@-@";

/// Punctuation that sticks to the preceding token.
const NO_SPACE_BEFORE: [&str; 12] = [".", ",", ";", ":", "!", "?", ")", "]", "}", "%", "…", "..."];

/// Punctuation that sticks to the following token.
const NO_SPACE_AFTER: [&str; 3] = ["(", "[", "{"];

/// Word tokenizer for a given language.
pub trait Tokenizer {
    /// Split a line into tokens.
    fn tokenize(&self, line: &str) -> Sentence;
    /// Join tokens into a line.
    ///
    /// Lossy for punctuation that was glued inside a word, see module documentation.
    fn detokenize<S: AsRef<str>>(&self, tokens: &[S]) -> String;
}

/// Rule based tokenizer backed by [LangRules].
#[derive(Debug, Clone, Copy)]
pub struct RuleTokenizer {
    rules: &'static LangRules,
}

impl RuleTokenizer {
    pub fn new(lang: &str) -> Self {
        Self {
            rules: lang::rules(lang),
        }
    }

    fn is_word(segment: &str) -> bool {
        segment.chars().any(char::is_alphanumeric)
    }

    fn is_periods(segment: &str) -> bool {
        !segment.is_empty() && segment.chars().all(|c| c == '.')
    }
}

impl Tokenizer for RuleTokenizer {
    fn tokenize(&self, line: &str) -> Sentence {
        // segments along with a flag telling if they touch the previous one
        let mut segments: Vec<(&str, bool)> = Vec::new();
        let mut glued = false;
        for segment in line.split_word_bounds() {
            if segment.trim().is_empty() {
                glued = false;
                continue;
            }
            segments.push((segment, glued));
            glued = true;
        }

        let mut tokens: Vec<String> = Vec::with_capacity(segments.len());
        for (idx, (segment, glued)) in segments.iter().enumerate() {
            if let (true, Some(prev)) = (*glued, tokens.last_mut()) {
                if *segment == "." && self.rules.nonbreaking.contains(prev.as_str()) {
                    prev.push('.');
                    continue;
                }
                if Self::is_periods(segment) && Self::is_periods(prev) {
                    prev.push_str(segment);
                    continue;
                }
                if *segment == "-" && Self::is_word(prev) {
                    let next_is_glued_word = segments
                        .get(idx + 1)
                        .map_or(false, |(next, next_glued)| *next_glued && Self::is_word(next));
                    if next_is_glued_word {
                        tokens.push(GLUED_HYPHEN.to_string());
                        continue;
                    }
                }
            }
            tokens.push(segment.to_string());
        }

        tokens
    }

    fn detokenize<S: AsRef<str>>(&self, tokens: &[S]) -> String {
        let mut out = String::new();
        let mut space_next = false;
        let mut in_double_quote = false;

        for token in tokens.iter().map(AsRef::as_ref) {
            if token == GLUED_HYPHEN {
                out.push('-');
                space_next = false;
                continue;
            }

            let (space_before, space_after) = if token == "\"" {
                in_double_quote = !in_double_quote;
                if in_double_quote {
                    (true, false)
                } else {
                    (false, true)
                }
            } else if NO_SPACE_BEFORE.contains(&token) || self.rules.close_quotes.contains(token) {
                (false, true)
            } else if NO_SPACE_AFTER.contains(&token) || self.rules.open_quotes.contains(token) {
                (true, false)
            } else {
                (true, true)
            };

            if space_next && space_before {
                out.push(' ');
            }
            out.push_str(token);
            space_next = space_after;
        }

        out
    }
}

/// Tokenize lines, in parallel.
///
/// Lines are pulled by batches of `config.batch_size` and handed to workers by chunks of
/// `config.chunksize`. The output order is the input order.
pub fn tokenize<I>(
    lines: I,
    lang: &str,
    config: ParConfig,
) -> Result<impl Iterator<Item = Result<Sentence, Error>>, Error>
where
    I: Iterator<Item = Result<String, Error>>,
{
    info!("tokenizing lang={} with {:?}", lang, config);
    let tokenizer = RuleTokenizer::new(lang);
    par_map(
        lines,
        move |line: Result<String, Error>| line.map(|l| tokenizer.tokenize(&l)),
        config,
    )
}

/// Detokenize whitespace-tokenized lines.
pub fn detokenize<I>(lines: I, lang: &str) -> impl Iterator<Item = Result<String, Error>>
where
    I: Iterator<Item = Result<String, Error>>,
{
    let tokenizer = RuleTokenizer::new(lang);
    lines.map(move |line| {
        line.map(|l| {
            let tokens: Vec<&str> = l.split_whitespace().collect();
            tokenizer.detokenize(&tokens)
        })
    })
}
