//! Deduplicated product graph with parent/child hierarchy.
//!
//! Built once per catalog snapshot: records are canonicalized, duplicates
//! merged by id, and parent edges linked. Immutable after construction
//! except for the idempotent per-product depth memo, so snapshots are shared
//! freely across query threads.

pub mod product;

pub use product::Product;

use larder_core::{ProductId, ProductRecord};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::warn;

use crate::text::{Canonicalizer, Tokenizer};

/// Arena of products keyed by canonical id.
#[derive(Debug, Default)]
pub struct ProductGraph {
    products: Vec<Product>,
    by_id: FxHashMap<ProductId, usize>,
}

impl ProductGraph {
    /// Build a graph from catalog records: canonicalize names, merge
    /// duplicates by id (summing frequencies, first-seen name wins), then
    /// link parent/child edges. Absent parent references are tolerated and
    /// leave the product a root.
    pub fn build(
        canonicalizer: &Canonicalizer,
        tokenizer: &Tokenizer,
        records: impl IntoIterator<Item = ProductRecord>,
    ) -> Self {
        let products = records.into_iter().map(|record| {
            Product::new(
                canonicalizer,
                tokenizer,
                &record.name,
                record.recipe_count,
                record.parent_id.map(ProductId::from),
            )
            .with_nutrition(record.nutrition)
        });
        ProductGraph::from_products(products)
    }

    /// Build from already-constructed products (used by tests that need
    /// per-product stopword overrides).
    pub fn from_products(products: impl IntoIterator<Item = Product>) -> Self {
        let mut graph = ProductGraph::default();
        for product in products {
            graph.insert(product);
        }
        graph.link();
        graph
    }

    /// Insert one product, merging into an existing node on id collision.
    fn insert(&mut self, product: Product) {
        if product.id().is_empty() {
            // Every word was filtered as noise; the product could never
            // match a query.
            warn!(name = product.name(), "skipping product with no tokens");
            return;
        }
        match self.by_id.get(product.id()).copied() {
            Some(slot) => self.products[slot].merge(product),
            None => {
                let slot = self.products.len();
                self.by_id.insert(product.id().clone(), slot);
                self.products.push(product);
            }
        }
    }

    /// Populate children/parents back-references from parent ids.
    fn link(&mut self) {
        let mut edges: Vec<(usize, usize)> = Vec::new();
        for (child, product) in self.products.iter().enumerate() {
            for parent_id in product.parent_ids() {
                if let Some(&parent) = self.by_id.get(parent_id) {
                    edges.push((child, parent));
                }
            }
        }
        for (child, parent) in edges {
            self.products[child].parents.push(parent);
            self.products[parent].children.push(child);
        }
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.by_id.get(id).map(|&slot| &self.products[slot])
    }

    pub fn contains(&self, id: &ProductId) -> bool {
        self.by_id.contains_key(id)
    }

    /// Products in deterministic first-seen order. Arena position doubles as
    /// the document slot in the search index.
    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    pub(crate) fn slot(&self, id: &ProductId) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    pub(crate) fn product_at(&self, slot: usize) -> &Product {
        &self.products[slot]
    }

    /// Children of a product, in insertion order.
    pub fn children_of<'a>(&'a self, id: &ProductId) -> impl Iterator<Item = &'a Product> {
        self.slot(id)
            .into_iter()
            .flat_map(move |slot| self.products[slot].children.iter())
            .map(move |&child| &self.products[child])
    }

    /// Depth of a product above its root, memoized on first resolution.
    ///
    /// Cycles terminate rather than recurse forever: when the walk reaches a
    /// product already on the current path, that frame records depth 0 and
    /// returns the -1 sentinel so the caller's own depth is not advanced
    /// past the break. Outer frames may later overwrite the provisional 0 —
    /// the resulting assignment around a cycle is a documented quirk of the
    /// traversal order and is pinned by tests.
    pub fn calculate_depth(&self, id: &ProductId) -> Option<i32> {
        let slot = self.slot(id)?;
        Some(self.depth_of(slot, &mut Vec::new()))
    }

    /// Resolve every product's depth. Idempotent.
    pub fn calculate_depths(&self) {
        for slot in 0..self.products.len() {
            self.depth_of(slot, &mut Vec::new());
        }
    }

    fn depth_of(&self, slot: usize, path: &mut Vec<usize>) -> i32 {
        let product = &self.products[slot];
        if let Some(depth) = product.depth() {
            return depth;
        }
        if path.contains(&slot) {
            product.set_depth(0);
            return -1;
        }
        path.push(slot);

        let depth = match self.parent_slot(slot) {
            Some(parent) => self.depth_of(parent, path) + 1,
            None => 0,
        };
        product.set_depth(depth);
        depth
    }

    fn parent_slot(&self, slot: usize) -> Option<usize> {
        self.products[slot]
            .parent_id()
            .and_then(|parent_id| self.slot(parent_id))
    }

    /// Ancestors of a product, nearest first, following primary parents.
    /// Stops at the first missing or already-visited parent, so a cyclic
    /// hierarchy yields a finite sequence bounded by graph size.
    pub fn ancestry<'a>(&'a self, id: &ProductId) -> Ancestry<'a> {
        let start = self.slot(id);
        Ancestry {
            graph: self,
            next: start.and_then(|slot| self.parent_slot(slot)),
            seen: start.into_iter().collect(),
        }
    }
}

/// Lazy ancestor walk; see [`ProductGraph::ancestry`].
pub struct Ancestry<'a> {
    graph: &'a ProductGraph,
    next: Option<usize>,
    seen: FxHashSet<usize>,
}

impl<'a> Iterator for Ancestry<'a> {
    type Item = &'a Product;

    fn next(&mut self) -> Option<&'a Product> {
        let slot = self.next.take()?;
        if !self.seen.insert(slot) {
            return None;
        }
        self.next = self.graph.parent_slot(slot);
        Some(self.graph.product_at(slot))
    }
}
