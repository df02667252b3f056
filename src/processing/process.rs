//! Pre- and postprocessing commands.
use std::path::Path;

use log::info;

use crate::error::Error;
use crate::io::{deserialize, serialize};
use crate::lang::check_lang;
use crate::pipeline;

use super::newline_terminated;

pub fn preprocess(src: &Path, dst: &Path, lang: &str, truecase_model: &Path) -> Result<usize, Error> {
    check_lang(lang)?;
    info!("[{}] preprocessing {:?}", lang, src);
    let lines = pipeline::preprocess(deserialize(src)?, lang, truecase_model)?;
    serialize(dst, newline_terminated(lines))
}

pub fn postprocess(src: &Path, dst: &Path, lang: &str) -> Result<usize, Error> {
    check_lang(lang)?;
    info!("[{}] postprocessing {:?}", lang, src);
    serialize(dst, newline_terminated(pipeline::postprocess(deserialize(src)?, lang)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::TruecaseModel;

    #[test]
    fn test_pre_then_post() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("in.txt");
        let pre = dir.path().join("pre.txt");
        let post = dir.path().join("post.txt");
        let model = dir.path().join("tc.model");
        TruecaseModel::default().save(&model).unwrap();
        std::fs::write(&src, "Hann sagði [já].\n").unwrap();

        assert_eq!(preprocess(&src, &pre, "is", &model).unwrap(), 1);
        assert_eq!(
            std::fs::read_to_string(&pre).unwrap(),
            "Hann sagði &#91; já &#93; .\n"
        );

        postprocess(&pre, &post, "is").unwrap();
        assert_eq!(std::fs::read_to_string(&post).unwrap(), "Hann sagði [já].\n");
    }
}
