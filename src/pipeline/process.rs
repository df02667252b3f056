/*! Pre- and postprocessing chains.

Preprocessing: tokenize → truecase → escape Moses characters.
Postprocessing: unescape → detruecase → detokenize.
!*/
use std::{path::Path, sync::Arc};

use crate::error::Error;

use super::escape::{escape_token, unescape_token};
use super::tokenize::{RuleTokenizer, Tokenizer};
use super::truecase::{detruecase_line, TruecaseModel};

/// Line level chain, reusable by the server.
///
/// Clones share the truecasing model.
#[derive(Debug, Clone)]
pub struct Processor {
    tokenizer: RuleTokenizer,
    model: Option<Arc<TruecaseModel>>,
}

impl Processor {
    /// Processor for `lang`. Without a model, truecasing is skipped.
    pub fn new(lang: &str, model: Option<TruecaseModel>) -> Self {
        Self::shared(lang, model.map(Arc::new))
    }

    /// Same as [Processor::new] with an already shared model.
    pub fn shared(lang: &str, model: Option<Arc<TruecaseModel>>) -> Self {
        Self {
            tokenizer: RuleTokenizer::new(lang),
            model,
        }
    }

    pub fn model(&self) -> Option<&Arc<TruecaseModel>> {
        self.model.as_ref()
    }

    pub fn preprocess_line(&self, line: &str) -> String {
        let tokenized = self.tokenizer.tokenize(line).join(" ");
        let cased = match &self.model {
            Some(model) => model.truecase(&tokenized),
            None => tokenized,
        };
        cased
            .split_whitespace()
            .map(escape_token)
            .collect::<Vec<String>>()
            .join(" ")
    }

    pub fn postprocess_line(&self, line: &str) -> String {
        let unescaped: Vec<String> = line.split_whitespace().map(unescape_token).collect();
        let detruecased = detruecase_line(&unescaped.join(" "));
        let tokens: Vec<&str> = detruecased.split_whitespace().collect();
        self.tokenizer.detokenize(&tokens)
    }
}

/// Preprocess lines with the truecasing model stored at `truecase_model`.
pub fn preprocess<I>(
    lines: I,
    lang: &str,
    truecase_model: &Path,
) -> Result<impl Iterator<Item = Result<String, Error>>, Error>
where
    I: Iterator<Item = Result<String, Error>>,
{
    let processor = Processor::new(lang, Some(TruecaseModel::load(truecase_model)?));
    Ok(lines.map(move |line| line.map(|l| processor.preprocess_line(&l))))
}

/// Postprocess (translated) lines.
pub fn postprocess<I>(lines: I, lang: &str) -> impl Iterator<Item = Result<String, Error>>
where
    I: Iterator<Item = Result<String, Error>>,
{
    let processor = Processor::new(lang, None);
    lines.map(move |line| line.map(|l| processor.postprocess_line(&l)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> TruecaseModel {
        let lines = vec![Ok("Yesterday the Smiths said \" hello \" .".to_string())];
        TruecaseModel::train(lines.into_iter(), 1).unwrap()
    }

    #[test]
    fn test_preprocess_line() {
        let p = Processor::new("en", Some(model()));
        assert_eq!(
            p.preprocess_line("The Smiths said \"hello\"."),
            "the Smiths said &quot; hello &quot; ."
        );
    }

    #[test]
    fn test_postprocess_line() {
        let p = Processor::new("en", None);
        assert_eq!(
            p.postprocess_line("the Smiths said &quot; hello &quot; ."),
            "The Smiths said \"hello\"."
        );
    }

    #[test]
    fn test_clones_share_model() {
        let p = Processor::new("en", Some(model()));
        let q = p.clone();
        match (p.model(), q.model()) {
            (Some(a), Some(b)) => assert!(Arc::ptr_eq(a, b)),
            _ => panic!("model lost on clone"),
        }
        assert_eq!(q.preprocess_line("The Smiths"), "the Smiths");
    }

    #[test]
    fn test_without_model() {
        let p = Processor::new("en", None);
        assert_eq!(p.preprocess_line("A|B test"), "A &#124; B test");
    }

    #[test]
    fn test_preprocess_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tc.model");
        model().save(&path).unwrap();
        let res: Vec<String> = preprocess(vec![Ok("The Smiths".to_string())].into_iter(), "en", &path)
            .unwrap()
            .map(Result::unwrap)
            .collect();
        assert_eq!(res, vec!["the Smiths"]);
    }
}
