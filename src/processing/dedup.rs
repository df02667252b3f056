/*! Deduplication

Lines are compared on their exact text by default.
With `digest`, [runiq](https://github.com/whitfin/runiq)'s digest filter is used instead: memory stays
flat on large files, but two distinct lines sharing a 64-bit digest are treated as duplicates.
!*/
use std::collections::HashSet;
use std::path::Path;

use log::info;
use runiq::filters::DigestFilter;

use crate::error::Error;
use crate::io::{deserialize, serialize};
use crate::pipeline::{deduplicate, KnownLines};

use super::newline_terminated;

/// Copy `src` into `dst`, keeping only the first occurrence of each line.
///
/// `digest` trades exactness for memory, see module documentation.
/// Returns the number of lines kept.
pub fn dedup(src: &Path, dst: &Path, digest: bool) -> Result<usize, Error> {
    info!("deduplicating {:?} (digest={})", src, digest);
    let nb_kept = if digest {
        dedup_with(src, dst, &mut DigestFilter::default())?
    } else {
        dedup_with(src, dst, &mut HashSet::<String>::new())?
    };
    info!("deduplication done, {} lines kept", nb_kept);
    Ok(nb_kept)
}

fn dedup_with<K: KnownLines>(src: &Path, dst: &Path, known: &mut K) -> Result<usize, Error> {
    let lines = deserialize(src)?;
    serialize(dst, newline_terminated(deduplicate(lines, known)))
}
