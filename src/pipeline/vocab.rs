//! Vocabulary utilities over whitespace-tokenized lines.
use std::collections::HashSet;

use crate::error::Error;

/// Distinct tokens of `lines`, in order of first occurrence.
pub fn extract_known_tokens<I>(lines: I) -> impl Iterator<Item = Result<String, Error>>
where
    I: Iterator<Item = Result<String, Error>>,
{
    let mut seen: HashSet<String> = HashSet::new();
    lines.flat_map(move |line| {
        let tokens: Vec<Result<String, Error>> = match line {
            Ok(l) => l
                .split_whitespace()
                .filter(|tok| seen.insert(tok.to_string()))
                .map(|tok| Ok(tok.to_string()))
                .collect(),
            Err(e) => vec![Err(e)],
        };
        tokens
    })
}

/// For each line, the tokens that are not in `known`, in line order.
pub fn unknown_tokens<'a, I>(
    lines: I,
    known: &'a HashSet<String>,
) -> impl Iterator<Item = Result<Vec<String>, Error>> + 'a
where
    I: Iterator<Item = Result<String, Error>> + 'a,
{
    lines.map(move |line| {
        line.map(|l| {
            l.split_whitespace()
                .filter(|tok| !known.contains(*tok))
                .map(String::from)
                .collect()
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok_lines(lines: &[&str]) -> std::vec::IntoIter<Result<String, Error>> {
        lines
            .iter()
            .map(|l| Ok(l.to_string()))
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn test_extract_known_tokens() {
        let res: Vec<String> = extract_known_tokens(ok_lines(&["b a b", "c a", "", "d"]))
            .map(Result::unwrap)
            .collect();
        assert_eq!(res, vec!["b", "a", "c", "d"]);
    }

    #[test]
    fn test_unknown_tokens() {
        let known: HashSet<String> = ["a", "b"].iter().map(|s| s.to_string()).collect();
        let res: Vec<Vec<String>> = unknown_tokens(ok_lines(&["a x b y", "a b", "z"]), &known)
            .map(Result::unwrap)
            .collect();
        assert_eq!(
            res,
            vec![vec!["x".to_string(), "y".to_string()], vec![], vec!["z".to_string()]]
        );
    }

    #[test]
    fn test_errors_are_forwarded() {
        let lines = vec![
            Ok("a".to_string()),
            Err(Error::Custom("broken".to_string())),
        ];
        let res: Vec<_> = extract_known_tokens(lines.into_iter()).collect();
        assert!(res[0].is_ok());
        assert!(res[1].is_err());
    }
}
