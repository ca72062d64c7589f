//! Inverted index over product name terms.
//!
//! Maps every n-gram term a product's canonical name generates — including
//! its full-name term — to the products producing it, with per-(term,
//! product) occurrence counts and per-product document lengths for scoring.
//! Built once per catalog snapshot; read-only during query resolution.

use rustc_hash::FxHashMap;

use crate::graph::ProductGraph;
use crate::text::{stem_windows, Term};

/// One entry in a posting list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Posting {
    /// Arena slot of the product in the graph it was built from.
    pub slot: usize,
    /// How many times the term occurs in the product's name.
    pub count: u32,
}

/// Immutable inverted index for one catalog snapshot.
#[derive(Debug, Default)]
pub struct SearchIndex {
    postings: FxHashMap<Term, Vec<Posting>>,
    /// Stem count of each product's canonical name, indexed by arena slot.
    doc_lengths: Vec<u32>,
}

impl SearchIndex {
    /// Index every term window of every product in the graph. Posting lists
    /// keep first-seen product order, which drives deterministic
    /// tie-breaking at query time.
    pub fn build(graph: &ProductGraph) -> Self {
        let mut postings: FxHashMap<Term, Vec<Posting>> = FxHashMap::default();
        let mut doc_lengths = Vec::with_capacity(graph.len());

        for (slot, product) in graph.products().enumerate() {
            let stems = product.tokens();
            doc_lengths.push(stems.len() as u32);

            for term in stem_windows(stems) {
                let list = postings.entry(term).or_default();
                match list.iter_mut().find(|posting| posting.slot == slot) {
                    Some(posting) => posting.count += 1,
                    None => list.push(Posting { slot, count: 1 }),
                }
            }
        }

        SearchIndex {
            postings,
            doc_lengths,
        }
    }

    /// Posting list for a term, or None if no product generates it.
    pub fn lookup(&self, term: &Term) -> Option<&[Posting]> {
        self.postings.get(term).map(Vec::as_slice)
    }

    pub fn contains(&self, term: &Term) -> bool {
        self.postings.contains_key(term)
    }

    /// Total stem count of the product at `slot` — the scoring denominator.
    pub fn document_length(&self, slot: usize) -> u32 {
        self.doc_lengths[slot]
    }

    /// Number of distinct terms indexed.
    pub fn term_count(&self) -> usize {
        self.postings.len()
    }

    /// True if some product's name consists entirely of this term: its
    /// occurrence count equals the product's document length.
    pub fn has_exact_match(&self, term: &Term) -> bool {
        self.lookup(term).is_some_and(|postings| {
            postings
                .iter()
                .any(|posting| u64::from(posting.count) * term.len() as u64
                    == u64::from(self.document_length(posting.slot)))
        })
    }
}
