//! Product node: canonical name, stem tokens, derived identity, depth memo.

use std::sync::atomic::{AtomicI32, Ordering};

use larder_core::ProductId;

use crate::text::{stopword_set, Canonicalizer, Tokenizer};

/// Sentinel for "depth not yet resolved".
const DEPTH_UNSET: i32 = i32::MIN;

/// One product in the catalog graph.
///
/// Identity is purely a function of the normalized token set: the id is the
/// sorted, de-duplicated stems of the canonical name joined with `_`, so
/// "sprig thyme" and "thyme sprig" collapse to the same node.
///
/// The depth memo is the only field mutated after graph construction. The
/// computation is idempotent, so redundant stores from concurrent callers
/// are harmless and no locking is needed.
#[derive(Debug)]
pub struct Product {
    name: String,
    frequency: u64,
    stopwords: Vec<String>,
    tokens: Vec<String>,
    id: ProductId,
    parent_ids: Vec<ProductId>,
    nutrition: Option<serde_json::Value>,
    depth: AtomicI32,
    /// Arena slots of children, populated when the graph is linked. Derived,
    /// not authoritative.
    pub(crate) children: Vec<usize>,
    /// Arena slots of resolvable parents; the first is the primary parent.
    pub(crate) parents: Vec<usize>,
}

impl Product {
    pub fn new(
        canonicalizer: &Canonicalizer,
        tokenizer: &Tokenizer,
        name: &str,
        frequency: u64,
        parent_id: Option<ProductId>,
    ) -> Self {
        Product::with_stopwords(canonicalizer, tokenizer, name, frequency, parent_id, Vec::new())
    }

    /// Construct with a per-product stopword override list (stems excluded
    /// from this product's tokens, supporting test and metadata scenarios).
    pub fn with_stopwords(
        canonicalizer: &Canonicalizer,
        tokenizer: &Tokenizer,
        name: &str,
        frequency: u64,
        parent_id: Option<ProductId>,
        stopwords: Vec<String>,
    ) -> Self {
        let name = canonicalizer.apply(name);
        let tokens = tokenizer.stems(&name, &stopword_set(&stopwords));
        let id = derive_id(&tokens);
        Product {
            name,
            frequency,
            stopwords,
            tokens,
            id,
            parent_ids: parent_id.into_iter().collect(),
            nutrition: None,
            depth: AtomicI32::new(DEPTH_UNSET),
            children: Vec::new(),
            parents: Vec::new(),
        }
    }

    /// Attach the opaque nutrition payload from the catalog feed.
    pub fn with_nutrition(mut self, nutrition: Option<serde_json::Value>) -> Self {
        self.nutrition = nutrition;
        self
    }

    pub fn id(&self) -> &ProductId {
        &self.id
    }

    /// Canonicalized display name. First-seen among merged duplicates.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Recipe occurrence count, summed across merged duplicates.
    pub fn frequency(&self) -> u64 {
        self.frequency
    }

    /// Stems of the canonical name, in original word order. The index uses
    /// `tokens().len()` as this product's document length.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Tokens rejoined with spaces — the normalized content string.
    pub fn content(&self) -> String {
        self.tokens.join(" ")
    }

    pub fn stopwords(&self) -> &[String] {
        &self.stopwords
    }

    /// Primary parent reference, if any.
    pub fn parent_id(&self) -> Option<&ProductId> {
        self.parent_ids.first()
    }

    /// All distinct parent references accumulated across merges.
    pub fn parent_ids(&self) -> &[ProductId] {
        &self.parent_ids
    }

    pub fn nutrition(&self) -> Option<&serde_json::Value> {
        self.nutrition.as_ref()
    }

    /// Resolved depth, if the memo has been populated. 0 for roots.
    pub fn depth(&self) -> Option<i32> {
        match self.depth.load(Ordering::Relaxed) {
            DEPTH_UNSET => None,
            depth => Some(depth),
        }
    }

    pub(crate) fn set_depth(&self, depth: i32) {
        self.depth.store(depth, Ordering::Relaxed);
    }

    /// Merge a duplicate record (same id) into this node: frequencies sum,
    /// first-seen name wins, parent references accumulate.
    pub(crate) fn merge(&mut self, other: Product) {
        self.frequency += other.frequency;
        for parent in other.parent_ids {
            if !self.parent_ids.contains(&parent) {
                self.parent_ids.push(parent);
            }
        }
        if self.nutrition.is_none() {
            self.nutrition = other.nutrition;
        }
    }
}

/// Sorted, de-duplicated stem set joined with `_`.
fn derive_id(stems: &[String]) -> ProductId {
    let mut unique: Vec<&str> = stems.iter().map(String::as_str).collect();
    unique.sort_unstable();
    unique.dedup();
    ProductId::from(unique.join("_"))
}
