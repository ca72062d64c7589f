//! Tokenization and n-gram term generation.
//!
//! Pipeline: split on whitespace → discard noise words (quantities,
//! separators, short fragments) → trim to the alphanumeric core → fold
//! accents and lowercase → snowball stem → drop stopwords → yield n-gram
//! windows, longest first.
//!
//! Stemming is a single pass. Snowball is not idempotent for every word
//! ("mayonnais" restems to "mayonnai"), so applying the stemmer to
//! already-stemmed text is a bug; tests pin the single-pass output.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use rustc_hash::FxHashSet;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Words beginning with a digit ("250ml", "2cups").
static LEADING_QUANTITY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d").unwrap());

/// Digits introduced mid-word by a bracket, comma or slash ("(250ml", "w/2").
static EMBEDDED_QUANTITY: Lazy<Regex> = Lazy::new(|| Regex::new(r"[(, /]\d").unwrap());

/// Words that are nothing but a separator run.
static SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-_]+$").unwrap());

/// At least one run of three non-whitespace characters.
static MIN_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S{3}").unwrap());

/// An ordered tuple of word stems: one n-gram window over a normalized text.
///
/// Terms of different lengths are distinct index keys even when they overlap.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Term(Vec<String>);

impl Term {
    pub fn new(stems: Vec<String>) -> Self {
        Term(stems)
    }

    /// Number of stems in the window.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn stems(&self) -> &[String] {
        &self.0
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.join(" "))
    }
}

impl<S: Into<String>> FromIterator<S> for Term {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Term(iter.into_iter().map(Into::into).collect())
    }
}

/// One surviving stem, with the byte span of its surface word in the
/// original text. Spans exclude leading/trailing punctuation so that
/// highlighting "onion," marks only "onion".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub stem: String,
    pub start: usize,
    pub end: usize,
}

/// A term plus the token positions it covers (inclusive).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermWindow {
    pub term: Term,
    pub first: usize,
    pub last: usize,
}

/// Lowercased stopword set ready for [`Tokenizer::tokens`].
///
/// Built once per catalog snapshot; query resolution then filters by set
/// lookup alone, with no per-query allocation.
pub fn stopword_set(words: &[String]) -> FxHashSet<String> {
    words.iter().map(|word| word.to_lowercase()).collect()
}

/// True if a raw word is quantity or punctuation noise and must never reach
/// the stemmer. Shared between query tokenization and the catalog discard
/// filter so fragments like "250ml" can never become part of a match.
pub fn is_noise_word(word: &str) -> bool {
    LEADING_QUANTITY.is_match(word)
        || EMBEDDED_QUANTITY.is_match(word)
        || SEPARATOR.is_match(word)
        || word.ends_with(':')
        || !MIN_WORD.is_match(word)
}

/// Stemming tokenizer for a single configured language.
///
/// Holds the snowball stemmer instance; immutable once constructed and safe
/// to share across threads.
pub struct Tokenizer {
    stemmer: Stemmer,
}

impl Tokenizer {
    /// English-stemming tokenizer.
    pub fn new() -> Self {
        Tokenizer::with_language(Algorithm::English)
    }

    /// Tokenizer stemming in the given language.
    pub fn with_language(language: Algorithm) -> Self {
        Tokenizer {
            stemmer: Stemmer::create(language),
        }
    }

    /// Fold accents, lowercase, and stem a single word (one pass).
    ///
    /// # Examples
    ///
    /// ```
    /// use larder_engine::text::Tokenizer;
    ///
    /// let tokenizer = Tokenizer::new();
    /// assert_eq!(tokenizer.stem("Beans"), "bean");
    /// assert_eq!(tokenizer.stem("jalapeño"), "jalapeno");
    /// ```
    pub fn stem(&self, word: &str) -> String {
        self.stemmer.stem(&fold(word)).into_owned()
    }

    /// Surviving tokens of `text`, in original order, with surface spans.
    ///
    /// Stopword comparison is against the *stemmed* word; build the set with
    /// [`stopword_set`] so it is case-insensitive. Tokenizing the same text
    /// and stopword set always yields the same sequence.
    pub fn tokens(&self, text: &str, stopwords: &FxHashSet<String>) -> Vec<Token> {
        let mut tokens = Vec::new();
        for (offset, word) in words_with_offsets(text) {
            if is_noise_word(word) {
                continue;
            }
            let Some((core_start, core_end)) = core_span(word) else {
                continue;
            };
            let stem = self.stem(&word[core_start..core_end]);
            if stem.is_empty() || stopwords.contains(&stem) {
                continue;
            }
            tokens.push(Token {
                stem,
                start: offset + core_start,
                end: offset + core_end,
            });
        }
        tokens
    }

    /// Surviving stems of `text`, without span bookkeeping.
    pub fn stems(&self, text: &str, stopwords: &FxHashSet<String>) -> Vec<String> {
        self.tokens(text, stopwords)
            .into_iter()
            .map(|t| t.stem)
            .collect()
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Tokenizer::new()
    }
}

/// NFKD-decompose, strip combining marks, lowercase.
fn fold(word: &str) -> String {
    word.nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Whitespace-split words with their byte offsets in `text`.
fn words_with_offsets(text: &str) -> impl Iterator<Item = (usize, &str)> {
    let base = text.as_ptr() as usize;
    text.split_whitespace()
        .map(move |word| (word.as_ptr() as usize - base, word))
}

/// Byte range of a word's alphanumeric core: leading and trailing
/// punctuation trimmed, interior characters kept ("(roughly" → "roughly").
fn core_span(word: &str) -> Option<(usize, usize)> {
    let start = word
        .char_indices()
        .find(|(_, c)| c.is_alphanumeric())
        .map(|(i, _)| i)?;
    let (last, c) = word
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_alphanumeric())?;
    Some((start, last + c.len_utf8()))
}

/// All contiguous windows over `tokens`, longest first; within one length,
/// left to right. Lazy, finite, and restartable by calling again.
pub fn token_windows(tokens: &[Token]) -> impl Iterator<Item = TermWindow> + '_ {
    let n = tokens.len();
    (1..=n).rev().flat_map(move |k| {
        (0..=n - k).map(move |i| TermWindow {
            term: tokens[i..i + k].iter().map(|t| t.stem.clone()).collect(),
            first: i,
            last: i + k - 1,
        })
    })
}

/// Window generator over bare stems, used when spans are not needed
/// (index construction from a product's cached stem sequence).
pub fn stem_windows(stems: &[String]) -> impl Iterator<Item = Term> + '_ {
    let n = stems.len();
    (1..=n)
        .rev()
        .flat_map(move |k| {
            (0..=n - k).map(move |i| stems[i..i + k].iter().map(String::as_str).collect())
        })
}
