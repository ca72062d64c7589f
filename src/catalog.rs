//! Immutable catalog snapshot serving query resolution.

use std::collections::{HashMap, HashSet};

use rayon::prelude::*;
use rustc_hash::FxHashSet;
use tracing::info;

use larder_core::{ProductId, ProductRecord};
use larder_engine::search::resolve;
use larder_engine::{
    stopword_set, Canonicalizer, MatchResult, ProductGraph, SearchIndex, Tokenizer,
};

use crate::metadata::{product_metadata, EnglishInflector, Inflector, ProductMetadata};

/// A fully-built catalog: product graph, inverted index, canonicalization
/// table, and the stopword set applied to queries.
///
/// Built one-shot and single-threaded; nothing is served until the build
/// completes, and a reload replaces the snapshot wholesale. Resolution is
/// read-only and lock-free, so any number of queries may run concurrently
/// against a shared snapshot.
pub struct Catalog {
    graph: ProductGraph,
    index: SearchIndex,
    tokenizer: Tokenizer,
    canonicalizer: Canonicalizer,
    stopwords: FxHashSet<String>,
}

impl Catalog {
    /// Build a snapshot with the default canonicalization table.
    pub fn build(records: Vec<ProductRecord>, stopwords: Vec<String>) -> Self {
        Catalog::with_canonicalizer(Canonicalizer::default(), records, stopwords)
    }

    /// Build a snapshot with a caller-supplied canonicalization table. The
    /// table is applied to catalog names here and to every query at
    /// resolution time, so "soymilk" and "soy milk" meet on the same terms.
    pub fn with_canonicalizer(
        canonicalizer: Canonicalizer,
        records: Vec<ProductRecord>,
        stopwords: Vec<String>,
    ) -> Self {
        let tokenizer = Tokenizer::new();
        let graph = ProductGraph::build(&canonicalizer, &tokenizer, records);
        let index = SearchIndex::build(&graph);
        let stopwords = stopword_set(&stopwords);
        info!(
            products = graph.len(),
            terms = index.term_count(),
            "catalog snapshot built"
        );
        Catalog {
            graph,
            index,
            tokenizer,
            canonicalizer,
            stopwords,
        }
    }

    /// Resolve one query. The query is canonicalized first, and markup spans
    /// the canonicalized text ("soymilk" resolves with `<mark>soy milk</mark>`).
    /// `None` means the query tokenized to nothing or no term window is
    /// indexed.
    pub fn resolve(&self, query: &str) -> Option<MatchResult> {
        let query = self.canonicalizer.apply(query);
        resolve(
            &self.graph,
            &self.index,
            &self.tokenizer,
            &query,
            &self.stopwords,
        )
    }

    /// Resolve a batch of queries in parallel, one result per unique query
    /// keyed by the original string. Duplicate queries collapse to a single
    /// entry.
    pub fn resolve_all(&self, queries: &[String]) -> HashMap<String, Option<MatchResult>> {
        let unique: HashSet<&String> = queries.iter().collect();
        unique
            .into_par_iter()
            .map(|query| (query.clone(), self.resolve(query)))
            .collect()
    }

    /// Metadata report for a resolved product, using the default English
    /// inflector. See [`crate::metadata::product_metadata`] for custom
    /// inflection.
    pub fn metadata(&self, id: &ProductId) -> Option<ProductMetadata> {
        self.metadata_with(&EnglishInflector, id)
    }

    /// Metadata report with a caller-supplied inflector.
    pub fn metadata_with(
        &self,
        inflector: &dyn Inflector,
        id: &ProductId,
    ) -> Option<ProductMetadata> {
        product_metadata(&self.graph, inflector, id)
    }

    pub fn graph(&self) -> &ProductGraph {
        &self.graph
    }

    pub fn index(&self) -> &SearchIndex {
        &self.index
    }

    pub fn stopwords(&self) -> &FxHashSet<String> {
        &self.stopwords
    }

    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }
}
