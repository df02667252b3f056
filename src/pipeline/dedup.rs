/*! Deduplication

Lines are kept the first time their exact text is seen.
The set of seen lines is owned by the caller and passed by reference, so that it can be reused
across several inputs (or not) on purpose. Use a fresh one per invocation to avoid leaking
state between unrelated runs.

Two implementations of [KnownLines] are provided:
- [HashSet<String>], exact, keeps every line in memory,
- runiq's [DigestFilter](runiq::filters::DigestFilter), keeps 64-bit digests only.
!*/
use std::collections::HashSet;

use runiq::filters::{DigestFilter, Filter};

use crate::error::Error;

/// State of a deduplication run.
pub trait KnownLines {
    /// Record `line`, returning `true` if it had not been seen before.
    fn first_seen(&mut self, line: &str) -> bool;
}

impl KnownLines for HashSet<String> {
    fn first_seen(&mut self, line: &str) -> bool {
        if self.contains(line) {
            false
        } else {
            self.insert(line.to_string())
        }
    }
}

impl KnownLines for DigestFilter {
    fn first_seen(&mut self, line: &str) -> bool {
        self.detect(line.as_bytes())
    }
}

/// Yield lines that are not in `known`, recording them as they pass.
///
/// Errors from the source are forwarded untouched.
pub fn deduplicate<'a, I, K>(lines: I, known: &'a mut K) -> impl Iterator<Item = Result<String, Error>> + 'a
where
    I: Iterator<Item = Result<String, Error>> + 'a,
    K: KnownLines + 'a,
{
    lines.filter(move |line| match line {
        Ok(l) => known.first_seen(l),
        Err(_) => true,
    })
}
