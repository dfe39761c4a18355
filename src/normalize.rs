//! Text canonicalisation shared by feature composition and bonus matching.
//!
//! Every free-text field passes through [`normalize_text`] before it is
//! compared with anything else, so both sides of a comparison live in the
//! same reduced alphabet: lowercase ASCII letters, digits and single
//! spaces. Numbers and booleans in store records are stringified when the
//! record is deserialized, so only strings arrive here.

use std::sync::LazyLock;

use regex::Regex;

static DISALLOWED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^a-z0-9\s]").expect("static pattern is valid")
});

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("static pattern is valid"));

/// Lowercase `text`, replace anything outside `[a-z0-9]` and whitespace
/// with a space, collapse whitespace runs and trim.
///
/// Non-ASCII letters (accented characters included) become separators
/// rather than being transliterated.
pub fn normalize_text(text: &str) -> String {
    let lowered = text.to_lowercase();
    let replaced = DISALLOWED.replace_all(&lowered, " ");
    WHITESPACE.replace_all(&replaced, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_strips_punctuation() {
        assert_eq!(normalize_text("Software-Engineer!"), "software engineer");
    }

    #[test]
    fn collapses_whitespace_and_trims() {
        assert_eq!(normalize_text("  a\t\tb \n c  "), "a b c");
    }

    #[test]
    fn keeps_digits() {
        assert_eq!(normalize_text("SQL 2019, C#"), "sql 2019 c");
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert_eq!(normalize_text(""), "");
        assert_eq!(normalize_text("!!! ???"), "");
    }

    #[test]
    fn non_ascii_letters_become_separators() {
        assert_eq!(normalize_text("Café Barista"), "caf barista");
    }
}
