//! Review text normalization

use regex::Regex;
use std::sync::LazyLock;

/// Maximum number of characters the emotion model receives
pub const EMOTION_INPUT_LIMIT: usize = 512;

static NON_WORD_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9_]+").expect("valid non-word pattern"));

/// Lower-case `text`, turn every run of characters outside `[A-Za-z0-9_]`
/// (whitespace included) into a single space, and trim the ends.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    NON_WORD_RUN.replace_all(&lowered, " ").trim().to_string()
}

/// First `limit` characters of `text`
pub fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_strips_punctuation() {
        assert_eq!(
            normalize("This product broke immediately, terrible quality!"),
            "this product broke immediately terrible quality"
        );
    }

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize("  Fast\t\tdelivery \n\n GREAT  "), "fast delivery great");
    }

    #[test]
    fn test_normalize_keeps_underscores_and_digits() {
        assert_eq!(normalize("Size_XL fits 100%"), "size_xl fits 100");
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("?!... ---"), "");
    }

    #[test]
    fn test_normalize_non_ascii_letters_become_spaces() {
        assert_eq!(normalize("Très bon"), "tr s bon");
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("abcdef", 3), "abc");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("héllo", 2), "hé");
    }

    proptest! {
        #[test]
        fn normalized_text_is_canonical(input in ".*") {
            let out = normalize(&input);
            prop_assert!(out.chars().all(|c| c == ' ' || c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'));
            prop_assert!(!out.starts_with(' ') && !out.ends_with(' '));
            prop_assert!(!out.contains("  "));
            prop_assert_eq!(normalize(&out), out);
        }
    }
}
