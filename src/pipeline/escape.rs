/*! Moses special characters.

Moses reads `|` as a factor separator and `<`, `>`, `[`, `]` as markup, so they are replaced by
XML entities (`&` first, so that entities are not escaped twice).
!*/

/// (raw, escaped) pairs, in escaping order.
const ESCAPES: [(&str, &str); 8] = [
    ("&", "&amp;"),
    ("|", "&#124;"),
    ("<", "&lt;"),
    (">", "&gt;"),
    ("'", "&apos;"),
    ("\"", "&quot;"),
    ("[", "&#91;"),
    ("]", "&#93;"),
];

/// Escape a single token.
pub fn escape_token(token: &str) -> String {
    ESCAPES
        .iter()
        .fold(token.to_string(), |acc, (raw, escaped)| acc.replace(raw, escaped))
}

/// Unescape a single token. Inverse of [escape_token].
pub fn unescape_token(token: &str) -> String {
    ESCAPES
        .iter()
        .rev()
        .fold(token.to_string(), |acc, (raw, escaped)| acc.replace(escaped, raw))
}

/// Escape each token.
pub fn escape_moses_chars<I, S>(tokens: I) -> impl Iterator<Item = String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens.into_iter().map(|tok| escape_token(tok.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipe() {
        let escaped: Vec<String> = escape_moses_chars(["a|b"]).collect();
        assert_eq!(escaped, vec!["a&#124;b"]);
        assert_eq!(escaped[0].split('|').count(), 1);
    }

    #[test]
    fn test_ampersand_first() {
        assert_eq!(escape_token("&|"), "&amp;&#124;");
        assert_eq!(escape_token("<a href=\"x\">"), "&lt;a href=&quot;x&quot;&gt;");
    }

    #[test]
    fn test_unescape() {
        for tok in ["a|b", "&amp;", "[x]", "it's", "plain"] {
            assert_eq!(unescape_token(&escape_token(tok)), tok);
        }
    }
}
