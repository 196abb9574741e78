//! Search options and sort order.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::search::{Pagination, ProductFilters};

/// Sort options for search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    /// Sort by price, low to high.
    PriceAsc,
    /// Sort by price, high to low.
    PriceDesc,
    /// Sort by highest average rating.
    RatingDesc,
    /// Sort by number of ratings, most first.
    Popularity,
    /// Sort by id, descending.
    Recency,
}

impl SortOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::PriceAsc => "price-asc",
            SortOption::PriceDesc => "price-desc",
            SortOption::RatingDesc => "rating-desc",
            SortOption::Popularity => "popularity",
            SortOption::Recency => "recency",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "price-asc" | "price_asc" | "price" => Some(SortOption::PriceAsc),
            "price-desc" | "price_desc" => Some(SortOption::PriceDesc),
            "rating-desc" | "rating_desc" | "rating" => Some(SortOption::RatingDesc),
            "popularity" | "popular" => Some(SortOption::Popularity),
            "recency" | "newest" => Some(SortOption::Recency),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::PriceAsc => "Price: Low to High",
            SortOption::PriceDesc => "Price: High to Low",
            SortOption::RatingDesc => "Highest Rated",
            SortOption::Popularity => "Most Popular",
            SortOption::Recency => "Newest",
        }
    }

    /// Comparator for a stable sort.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortOption::PriceAsc => a.price.total_cmp(&b.price),
            SortOption::PriceDesc => b.price.total_cmp(&a.price),
            SortOption::RatingDesc => b.rating.average.total_cmp(&a.rating.average),
            SortOption::Popularity => b.rating.count.cmp(&a.rating.count),
            SortOption::Recency => b.id.cmp(&a.id),
        }
    }
}

/// A product search: text query, filters, sort and pagination.
///
/// Evaluated in that fixed order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchOptions {
    /// Case-insensitive substring query.
    pub query: Option<String>,
    #[serde(default)]
    pub filters: ProductFilters,
    pub sort: Option<SortOption>,
    #[serde(flatten)]
    pub pagination: Pagination,
}

impl SearchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text query. Empty queries are ignored.
    pub fn with_query(mut self, q: impl Into<String>) -> Self {
        let q = q.into();
        self.query = (!q.is_empty()).then_some(q);
        self
    }

    pub fn with_filters(mut self, filters: ProductFilters) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_sort(mut self, sort: SortOption) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = pagination;
        self
    }

    /// The lower-cased query, empty when unset.
    pub fn needle(&self) -> String {
        self.query.as_deref().unwrap_or_default().to_lowercase()
    }
}
