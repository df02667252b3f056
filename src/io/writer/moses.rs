/*! Moses factored text writer.

Each sentence becomes a line of space separated tokens. Depending on the requested factors a
token is its form, its lemma, its tag or `form|tag|lemma`.
Every factor is escaped (see [escape_token]) so that `|` stays a separator.

Only these combinations are supported:

| form | pos | lemma | token        |
|------|-----|-------|--------------|
| x    |     |       | `form`       |
|      |     | x     | `lemma`      |
|      | x   |       | `tag`        |
| x    | x   | x     | `form|tag|lemma` |

Anything else is an [Error::InvalidConfig].
!*/
use std::path::Path;

use log::info;

use crate::corpus::EnrichedSentence;
use crate::error::Error;
use crate::pipeline::escape::escape_token;
use crate::pipeline::parallel::{par_map, ParConfig};

use super::textwriter::{serialize_into, TextWriter};
use super::WriterTrait;

/// Factors to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Factors {
    pub form: bool,
    pub pos: bool,
    pub lemma: bool,
}

#[derive(Debug, Clone, Copy)]
enum Layout {
    Form,
    Lemma,
    Pos,
    All,
}

impl Factors {
    pub fn new(form: bool, pos: bool, lemma: bool) -> Self {
        Self { form, pos, lemma }
    }

    fn layout(&self) -> Result<Layout, Error> {
        match (self.form, self.pos, self.lemma) {
            (true, false, false) => Ok(Layout::Form),
            (false, false, true) => Ok(Layout::Lemma),
            (false, true, false) => Ok(Layout::Pos),
            (true, true, true) => Ok(Layout::All),
            (form, pos, lemma) => Err(Error::InvalidConfig(format!(
                "unsupported combination: form={}, pos={}, lemma={}",
                form, pos, lemma
            ))),
        }
    }
}

fn escaped_line(tokens: &[String]) -> String {
    let mut line = tokens
        .iter()
        .map(|t| escape_token(t))
        .collect::<Vec<String>>()
        .join(" ");
    line.push('\n');
    line
}

/// Format a sentence as a newline terminated Moses line.
pub fn get_moses_line(
    sentence: &EnrichedSentence,
    write_form: bool,
    write_pos: bool,
    write_lemma: bool,
) -> Result<String, Error> {
    match Factors::new(write_form, write_pos, write_lemma).layout()? {
        Layout::Form => Ok(escaped_line(&sentence.form)),
        Layout::Lemma => Ok(escaped_line(&sentence.lemma)),
        Layout::Pos => Ok(escaped_line(&sentence.pos)),
        Layout::All => {
            sentence.check()?;
            let mut line = sentence
                .form
                .iter()
                .zip(&sentence.pos)
                .zip(&sentence.lemma)
                .map(|((form, pos), lemma)| {
                    format!(
                        "{}|{}|{}",
                        escape_token(form),
                        escape_token(pos),
                        escape_token(lemma)
                    )
                })
                .collect::<Vec<String>>()
                .join(" ");
            line.push('\n');
            Ok(line)
        }
    }
}

/// Format a corpus on a worker pool, keeping sentence order.
pub fn moses_lines<I>(
    corpus: I,
    factors: Factors,
    config: ParConfig,
) -> Result<impl Iterator<Item = Result<String, Error>>, Error>
where
    I: Iterator<Item = EnrichedSentence>,
    I::Item: Send,
{
    // fail before spawning anything
    factors.layout()?;
    par_map(
        corpus,
        move |sentence: EnrichedSentence| {
            get_moses_line(&sentence, factors.form, factors.pos, factors.lemma)
        },
        config,
    )
}

/// Write a corpus in Moses format into `dst`. Returns the number of lines written.
pub fn write_moses<I>(dst: &Path, corpus: I, factors: Factors, config: ParConfig) -> Result<usize, Error>
where
    I: Iterator<Item = EnrichedSentence>,
{
    info!("writing moses file {:?} with {:?}", dst, factors);
    let lines = moses_lines(corpus, factors, config)?;
    let mut writer = TextWriter::create(dst)?;
    serialize_into(&mut writer, lines)?;
    writer.close()?;
    Ok(writer.nb_written())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    fn sentence() -> EnrichedSentence {
        EnrichedSentence::new(s(&["a", "b"]), s(&["N", "V"]), s(&["x", "y"])).unwrap()
    }

    #[test]
    fn test_single_factors() {
        assert_eq!(get_moses_line(&sentence(), true, false, false).unwrap(), "a b\n");
        assert_eq!(get_moses_line(&sentence(), false, true, false).unwrap(), "N V\n");
        assert_eq!(get_moses_line(&sentence(), false, false, true).unwrap(), "x y\n");
    }

    #[test]
    fn test_all_factors() {
        let e = EnrichedSentence::new(s(&["a"]), s(&["N"]), s(&["a"])).unwrap();
        assert_eq!(get_moses_line(&e, true, true, true).unwrap(), "a|N|a\n");
        assert_eq!(
            get_moses_line(&sentence(), true, true, true).unwrap(),
            "a|N|x b|V|y\n"
        );
    }

    #[test]
    fn test_mismatch() {
        let broken = EnrichedSentence {
            form: s(&["a", "b"]),
            pos: s(&["N"]),
            lemma: s(&["a", "b"]),
        };
        assert!(matches!(
            get_moses_line(&broken, true, true, true),
            Err(Error::Invariant(_))
        ));
        // single factors don't look at the other sequences
        assert_eq!(get_moses_line(&broken, true, false, false).unwrap(), "a b\n");
    }

    #[test]
    fn test_unsupported() {
        for (form, pos, lemma) in [
            (true, true, false),
            (true, false, true),
            (false, true, true),
            (false, false, false),
        ] {
            assert!(matches!(
                get_moses_line(&sentence(), form, pos, lemma),
                Err(Error::InvalidConfig(_))
            ));
        }
    }

    #[test]
    fn test_escaping() {
        let e = EnrichedSentence::new(s(&["a|b"]), s(&["N"]), s(&["a|b"])).unwrap();
        let line = get_moses_line(&e, true, true, true).unwrap();
        assert_eq!(line, "a&#124;b|N|a&#124;b\n");
        assert_eq!(line.trim_end().split('|').count(), 3);
    }

    #[test]
    fn test_write_moses_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.factored");
        let corpus: Vec<EnrichedSentence> = (0..100)
            .map(|i| {
                let w = format!("w{}", i);
                EnrichedSentence::new(vec![w.clone()], vec!["N".to_string()], vec![w]).unwrap()
            })
            .collect();

        let nb = write_moses(
            &path,
            corpus.into_iter(),
            Factors::new(true, false, false),
            ParConfig::new(4, 30, 7),
        )
        .unwrap();
        assert_eq!(nb, 100);

        let content = std::fs::read_to_string(&path).unwrap();
        let expected: String = (0..100).map(|i| format!("w{}\n", i)).collect();
        assert_eq!(content, expected);
    }

    #[test]
    fn test_write_moses_unsupported_creates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.factored");
        let res = write_moses(
            &path,
            std::iter::empty(),
            Factors::new(true, true, false),
            ParConfig::sequential(),
        );
        assert!(res.is_err());
        assert!(!path.exists());
    }
}
