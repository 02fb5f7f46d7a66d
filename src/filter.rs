//! Banned-word filtering.

use std::collections::HashSet;

/// Whether `text` contains any banned word as a standalone token.
///
/// Matching is case-insensitive and on whole-word boundaries: tokens are the
/// maximal alphanumeric runs in the text, so a banned word appearing only as
/// a substring of a longer token does not match.
pub fn contains_banned_word(text: &str, banned: &HashSet<String>) -> bool {
    if banned.is_empty() {
        return false;
    }

    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .any(|token| banned.contains(&token.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn banned(words: &[&str]) -> HashSet<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn standalone_token_matches() {
        assert!(contains_banned_word("foo bar baz", &banned(&["bar"])));
    }

    #[test]
    fn substring_of_longer_token_does_not_match() {
        assert!(!contains_banned_word("barnacle", &banned(&["bar"])));
        assert!(!contains_banned_word("rebar", &banned(&["bar"])));
    }

    #[test]
    fn matching_ignores_case() {
        assert!(contains_banned_word("well BAR then", &banned(&["bar"])));
    }

    #[test]
    fn punctuation_is_a_word_boundary() {
        assert!(contains_banned_word("foo,bar!baz", &banned(&["bar"])));
    }

    #[test]
    fn empty_set_never_matches() {
        assert!(!contains_banned_word("anything at all", &HashSet::new()));
    }
}
