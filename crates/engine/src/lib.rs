//! Matching engine: text normalization, product graph, inverted index.
//!
//! Data flow: raw product records → `text::Canonicalizer` →
//! `text::Tokenizer` → `graph::ProductGraph` (dedup + hierarchy) →
//! `search::SearchIndex` → `search::resolve` (match result + markup).
//!
//! The graph and index are built once per catalog snapshot and are read-only
//! during query resolution; resolution takes no locks and can run on any
//! number of threads concurrently.

pub mod graph;
pub mod search;
pub mod text;

pub use graph::{Product, ProductGraph};
pub use search::{resolve, MatchResult, Posting, SearchIndex};
pub use text::{stopword_set, Canonicalizer, Term, Token, Tokenizer};
