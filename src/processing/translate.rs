//! Translation command.
use std::path::Path;

use log::info;

use crate::client::translate_bulk;
use crate::error::Error;
use crate::io::{deserialize, serialize};

use super::newline_terminated;

/// Translate every line of `src` through the endpoint at `url`, writing translations to `dst`.
///
/// Translations of batches preceding a failure are written before the error is returned.
pub fn translate(
    src: &Path,
    dst: &Path,
    lang_from: &str,
    lang_to: &str,
    model: &str,
    url: &str,
    batch_size: usize,
) -> Result<usize, Error> {
    let translated = translate_bulk(deserialize(src)?, url, lang_from, lang_to, model, batch_size)?;
    let nb = serialize(dst, newline_terminated(translated))?;
    info!("translated {} lines", nb);
    Ok(nb)
}
