//! Shared foundation for the larder workspace.
//!
//! This crate defines:
//! - `LarderError` / `LarderResult`: the workspace-wide error type
//! - `ProductId`: canonical product identifier newtype
//! - `ProductRecord`: one parsed line of the catalog feed

pub mod error;
pub mod types;

pub use error::{LarderError, LarderResult};
pub use types::{ProductId, ProductRecord};
