//! Truecasing commands.
use std::path::Path;

use log::info;

use crate::error::Error;
use crate::io::{deserialize, serialize};
use crate::pipeline;

use super::newline_terminated;

/// Train a truecasing model on `src` and save it to `save_to`.
pub fn train_truecase(src: &Path, save_to: &Path, threads: usize) -> Result<(), Error> {
    info!("training truecase model on {:?}, save_to={:?}", src, save_to);
    let model = pipeline::train_truecase(deserialize(src)?, save_to, threads)?;
    info!("done, {} words in model", model.len());
    Ok(())
}

pub fn truecase(src: &Path, dst: &Path, load_from: &Path) -> Result<usize, Error> {
    let lines = pipeline::truecase(deserialize(src)?, load_from)?;
    serialize(dst, newline_terminated(lines))
}

pub fn detruecase(src: &Path, dst: &Path) -> Result<usize, Error> {
    serialize(dst, newline_terminated(pipeline::detruecase(deserialize(src)?)))
}
