//! larder — resolves free-text ingredient descriptions ("large onion,
//! diced") to canonical products in a deduplicated parent/child catalog.
//!
//! The crate is a thin facade over `larder-engine`:
//! - `loader`: catalog/stopword ingestion with the discard filter
//! - `catalog`: the immutable `Catalog` snapshot serving queries
//! - `metadata`: inflection, classification, and ancestry reporting
//!
//! # Examples
//!
//! ```
//! use larder::{Catalog, ProductRecord};
//!
//! let catalog = Catalog::build(
//!     vec![
//!         ProductRecord::new("onion", 10),
//!         ProductRecord::new("baked bean", 5).with_parent("bean"),
//!     ],
//!     Vec::new(),
//! );
//!
//! let result = catalog.resolve("large onion, diced").unwrap();
//! assert_eq!(result.id.as_str(), "onion");
//! assert_eq!(result.markup, "large <mark>onion</mark>, diced");
//! ```

pub mod catalog;
pub mod loader;
pub mod metadata;

pub use catalog::Catalog;
pub use loader::{LoaderConfig, QuantityParser};
pub use metadata::{EnglishInflector, Inflector, ProductMetadata};

// Re-exported engine and core types forming the public API.
pub use larder_core::{LarderError, LarderResult, ProductId, ProductRecord};
pub use larder_engine::{Canonicalizer, MatchResult, Product, ProductGraph, SearchIndex, Tokenizer};
