//! Query resolution: greedy longest-first term matching with highlight
//! markup.
//!
//! The resolver scans a query's term windows longest-first and commits to
//! the first window the index knows — it never falls through to shorter
//! windows once a hit exists. Candidates for that window are scored by
//! `term_length / document_length`, favoring products whose entire name is
//! the matched term over longer names that merely contain it.

use larder_core::ProductId;
use rustc_hash::FxHashSet;
use tracing::debug;

use crate::graph::ProductGraph;
use crate::search::SearchIndex;
use crate::text::{token_windows, Tokenizer};

/// Outcome of a successful resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    /// Canonical id of the winning product.
    pub id: ProductId,
    /// The product's canonicalized display name.
    pub product: String,
    /// The original query with the matched span wrapped in
    /// `<mark>...</mark>`; casing and punctuation outside the span are
    /// untouched.
    pub markup: String,
}

/// Resolve free text against a catalog snapshot. The query is tokenized
/// as-is; callers wanting synonym canonicalization apply it before calling,
/// and markup spans index into the text as passed here.
///
/// Returns `None` when the query tokenizes to nothing or no term window is
/// indexed. Ties on score resolve to the first-encountered product.
pub fn resolve(
    graph: &ProductGraph,
    index: &SearchIndex,
    tokenizer: &Tokenizer,
    query: &str,
    stopwords: &FxHashSet<String>,
) -> Option<MatchResult> {
    let tokens = tokenizer.tokens(query, stopwords);

    for window in token_windows(&tokens) {
        let Some(postings) = index.lookup(&window.term) else {
            continue;
        };

        // Commit to this window: pick the best-scored candidate, first one
        // winning ties.
        let mut best_slot = None;
        let mut best_score = f64::NEG_INFINITY;
        for posting in postings {
            let doc_length = f64::from(index.document_length(posting.slot));
            let score = window.term.len() as f64 / doc_length;
            if score > best_score {
                best_score = score;
                best_slot = Some(posting.slot);
            }
        }

        let product = graph.product_at(best_slot?);
        debug!(
            term = %window.term,
            product = %product.id(),
            score = best_score,
            "query matched"
        );

        let start = tokens[window.first].start;
        let end = tokens[window.last].end;
        return Some(MatchResult {
            id: product.id().clone(),
            product: product.name().to_string(),
            markup: highlight(query, start, end),
        });
    }

    debug!(query, "no term matched");
    None
}

/// Wrap `text[start..end]` in a highlight marker.
fn highlight(text: &str, start: usize, end: usize) -> String {
    format!(
        "{}<mark>{}</mark>{}",
        &text[..start],
        &text[start..end],
        &text[end..]
    )
}
