//! Search module.
//!
//! Text search, attribute filters, sorting and pagination over the loaded
//! product list, plus ranked keyword search and curated listings.

mod engine;
mod filter;
mod keywords;
mod listings;
mod query;
mod results;

pub use engine::{search, search_with_total};
pub use filter::{PriceRange, ProductFilters};
pub use keywords::{KeywordSearch, ScoredProduct};
pub use listings::{top_discounts, top_in_category, top_in_price_range};
pub use query::{SearchOptions, SortOption};
pub use results::{Pagination, SearchResults};
