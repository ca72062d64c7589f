//! Inverted index and query resolution.
//!
//! - `index`: term → posting lists with per-product occurrence counts and
//!   document lengths, built once per catalog snapshot
//! - `resolver`: greedy longest-first term matching, length-ratio scoring,
//!   and `<mark>` highlight markup over the original query text

pub mod index;
pub mod resolver;

pub use index::{Posting, SearchIndex};
pub use resolver::{resolve, MatchResult};
