//! Product catalog module.
//!
//! Contains the raw document types, the normalized product model, image
//! fallback rewriting and the loaded catalog collection.

mod collection;
mod document;
mod images;
mod lenient;
mod normalize;
mod product;

pub use collection::{Catalog, PriceBounds};
pub use document::{CatalogDocument, CatalogMetadata, ProductRecord, RawArAssets, RawRating};
pub use images::{ImageFallbacks, DEFAULT_BLOCKED_MARKER, DEFAULT_FALLBACK_IMAGE};
pub use normalize::normalize;
pub use product::{ArAssets, ModelScale, Product, ProductSource, Rating};
