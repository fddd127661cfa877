//! Token splitting for action strings.
//!
//! Commas are significant inside a token and never a split point; only
//! whitespace separates tokens. Keyboard and combined strings additionally
//! honor shell-style quoting so a typed payload may contain spaces.

use crate::error::{Error, Result};

/// Split on plain whitespace. Used for mouse-only action strings, whose
/// tokens can never contain spaces.
pub fn split_plain(actions: &str) -> Vec<&str> {
    actions.split_whitespace().collect()
}

/// Split with shell-style quoting, so `T,'Hello World'` survives as one
/// token. An unbalanced quote is a grammar error.
pub fn split_quoted(actions: &str) -> Result<Vec<String>> {
    shlex::split(actions).ok_or_else(|| Error::grammar(actions, "unbalanced quote"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_split_keeps_commas() {
        assert_eq!(
            split_plain("L,100,200  R,300,400\tS,0.5"),
            vec!["L,100,200", "R,300,400", "S,0.5"]
        );
    }

    #[test]
    fn test_plain_split_empty() {
        assert!(split_plain("   ").is_empty());
    }

    #[test]
    fn test_quoted_split_preserves_spaces() {
        assert_eq!(
            split_quoted("S,1.5 T,'Hello World' K,Enter").unwrap(),
            vec!["S,1.5", "T,Hello World", "K,Enter"]
        );
    }

    #[test]
    fn test_double_quotes_work_too() {
        assert_eq!(
            split_quoted("T,\"a b\" K,ctrl+s").unwrap(),
            vec!["T,a b", "K,ctrl+s"]
        );
    }

    #[test]
    fn test_unbalanced_quote_is_an_error() {
        let err = split_quoted("T,'Hello").unwrap_err();
        assert!(err.to_string().contains("unbalanced quote"));
    }
}
