//! Text normalization for catalog names and query strings.
//!
//! - `canonicalizer`: whole-word synonym substitution, applied to catalog
//!   names before any tokenization
//! - `tokenizer`: noise filtering → unicode folding → snowball stemming →
//!   stopword removal → longest-first n-gram term generation

pub mod canonicalizer;
pub mod tokenizer;

pub use canonicalizer::Canonicalizer;
pub use tokenizer::{stem_windows, stopword_set, token_windows, Term, TermWindow, Token, Tokenizer};
