//! Whole-word synonym canonicalization.
//!
//! A static table maps single words to replacement words ("soymilk" →
//! "soy milk"). Lookup is exact, whole-word, and case-sensitive; no partial
//! matching. The table is loaded once and never mutated, so `apply` is a pure
//! function and idempotent.

use std::collections::HashMap;

/// Default substitution table compiled into the crate.
const DEFAULT_TABLE: &str = include_str!("../../data/canonicalizations.txt");

/// Immutable word-substitution table.
///
/// # Examples
///
/// ```
/// use larder_engine::text::Canonicalizer;
///
/// let canonicalizer = Canonicalizer::default();
/// assert_eq!(canonicalizer.apply("soymilk"), "soy milk");
/// assert_eq!(canonicalizer.apply("chopped onion"), "chopped onion");
/// ```
#[derive(Debug, Clone)]
pub struct Canonicalizer {
    table: HashMap<String, String>,
}

impl Canonicalizer {
    /// Parse a table from text: one `source,replacement` pair per line,
    /// `#`-prefixed lines ignored. Lines without a comma are skipped.
    pub fn from_table(text: &str) -> Self {
        let mut table = HashMap::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some((source, target)) = line.split_once(',') {
                table.insert(source.trim().to_string(), target.trim().to_string());
            }
        }
        Canonicalizer { table }
    }

    /// An empty table; `apply` only collapses whitespace.
    pub fn empty() -> Self {
        Canonicalizer {
            table: HashMap::new(),
        }
    }

    /// Number of substitution pairs loaded.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Replace every word found verbatim in the table and rejoin with single
    /// spaces. Words absent from the table pass through unchanged.
    pub fn apply(&self, text: &str) -> String {
        text.split_whitespace()
            .map(|word| self.table.get(word).map_or(word, String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for Canonicalizer {
    fn default() -> Self {
        Canonicalizer::from_table(DEFAULT_TABLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_table_loads() {
        let canonicalizer = Canonicalizer::default();
        assert!(!canonicalizer.is_empty());
    }

    #[test]
    fn test_whole_word_substitution() {
        let canonicalizer = Canonicalizer::from_table("soymilk,soy milk\n");
        assert_eq!(canonicalizer.apply("250ml soymilk"), "250ml soy milk");
    }

    #[test]
    fn test_no_partial_word_match() {
        let canonicalizer = Canonicalizer::from_table("soymilk,soy milk\n");
        assert_eq!(canonicalizer.apply("soymilks"), "soymilks");
    }

    #[test]
    fn test_case_sensitive() {
        let canonicalizer = Canonicalizer::from_table("soymilk,soy milk\n");
        assert_eq!(canonicalizer.apply("Soymilk"), "Soymilk");
    }

    #[test]
    fn test_comments_and_blank_lines_ignored() {
        let canonicalizer = Canonicalizer::from_table("# comment\n\nyoghurt,yogurt\n");
        assert_eq!(canonicalizer.len(), 1);
        assert_eq!(canonicalizer.apply("yoghurt"), "yogurt");
    }

    #[test]
    fn test_whitespace_collapsed() {
        let canonicalizer = Canonicalizer::empty();
        assert_eq!(canonicalizer.apply("  soy   milk "), "soy milk");
    }

    proptest! {
        /// canonicalize(canonicalize(x)) == canonicalize(x) for the shipped
        /// table: no replacement target is itself a source.
        #[test]
        fn test_apply_is_idempotent(
            words in prop::collection::vec(
                prop::sample::select(vec![
                    "soymilk", "yoghurt", "chilli", "scallions", "onion", "fresh", "garlic",
                ]),
                0..8,
            )
        ) {
            let canonicalizer = Canonicalizer::default();
            let text = words.join(" ");
            let once = canonicalizer.apply(&text);
            prop_assert_eq!(canonicalizer.apply(&once), once.clone());
        }
    }
}
