/*! File level commands

Each function here backs a CLI subcommand: it opens its inputs, runs a [crate::pipeline]
transformation and writes the result. Text outputs have one item per line.
!*/
pub mod convert;
pub mod dedup;
pub mod enrich;
pub mod process;
pub mod split;
pub mod tokens;
pub mod translate;
pub mod truecase;

use crate::error::Error;

/// Append `\n` to each line.
pub(crate) fn newline_terminated<I, S>(lines: I) -> impl Iterator<Item = Result<String, Error>>
where
    I: Iterator<Item = Result<S, Error>>,
    S: Into<String>,
{
    lines.map(|line| {
        line.map(|l| {
            let mut l: String = l.into();
            l.push('\n');
            l
        })
    })
}
