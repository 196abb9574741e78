//! Product catalog core for the Showroom AR storefront.
//!
//! This crate provides the synchronous half of the catalog:
//!
//! - **Catalog**: raw document parsing, normalization into one ordered
//!   product collection, image fallback rewriting
//! - **Search**: text search, attribute filters, sorting, pagination,
//!   ranked keyword search and curated listings
//! - **Discovery**: product cards, product grids and the swipe quiz
//!
//! Loading and sharing the catalog across tasks lives in `showroom-store`.
//!
//! # Example
//!
//! ```rust,ignore
//! use showroom_catalog::prelude::*;
//!
//! let document = CatalogDocument::from_slice(&bytes)?;
//! let catalog = normalize(document, &ImageFallbacks::default());
//!
//! let options = SearchOptions::new()
//!     .with_query("chair")
//!     .with_filters(ProductFilters::new().with_price_range(PriceRange::between(20.0, 50.0)))
//!     .with_sort(SortOption::PriceAsc)
//!     .with_pagination(Pagination::limit(10));
//!
//! for product in search(catalog.products(), &options) {
//!     println!("{} - ${:.2}", product.title, product.price);
//! }
//! ```

pub mod error;
pub mod ids;

pub mod catalog;
pub mod discovery;
pub mod search;

pub use error::CatalogError;
pub use ids::*;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CatalogError;
    pub use crate::ids::*;

    // Catalog
    pub use crate::catalog::{
        normalize, ArAssets, Catalog, CatalogDocument, CatalogMetadata, ImageFallbacks,
        ModelScale, PriceBounds, Product, ProductRecord, ProductSource, Rating,
    };

    // Search
    pub use crate::search::{
        search, search_with_total, top_discounts, top_in_category, top_in_price_range,
        KeywordSearch, Pagination, PriceRange, ProductFilters, ScoredProduct, SearchOptions,
        SearchResults, SortOption,
    };

    // Discovery
    pub use crate::discovery::{
        CatalogSummary, GridItem, LikedProduct, ProductCard, ProductGrid, ProductQuiz,
        QuizBuilder, QuizOutcome, QuizSelection, QuizSession,
    };
}
