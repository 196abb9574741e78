//! Search filter types.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;

/// Inclusive price bounds; either side may be open.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct PriceRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl PriceRange {
    /// Both bounds set.
    pub fn between(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn at_least(min: f64) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    pub fn at_most(max: f64) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    /// Whether a price falls inside the range, bounds included.
    pub fn contains(&self, price: f64) -> bool {
        if let Some(min) = self.min {
            if price < min {
                return false;
            }
        }
        if let Some(max) = self.max {
            if price > max {
                return false;
            }
        }
        true
    }
}

/// Attribute filters, combined with logical AND.
///
/// Unset fields do not filter anything.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductFilters {
    /// Exact category, case-insensitive.
    pub category: Option<String>,
    pub price_range: Option<PriceRange>,
    /// Compared against `stock > 0`.
    pub in_stock: Option<bool>,
    /// Minimum average rating, inclusive.
    #[serde(alias = "rating")]
    pub min_rating: Option<f64>,
    /// Exact brand, case-insensitive.
    pub brand: Option<String>,
}

impl ProductFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_price_range(mut self, range: PriceRange) -> Self {
        self.price_range = Some(range);
        self
    }

    pub fn with_in_stock(mut self, in_stock: bool) -> Self {
        self.in_stock = Some(in_stock);
        self
    }

    pub fn with_min_rating(mut self, rating: f64) -> Self {
        self.min_rating = Some(rating);
        self
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    /// Whether no filter is set.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Check a product against every set filter.
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = &self.category {
            if !product.in_category(category) {
                return false;
            }
        }
        if let Some(range) = &self.price_range {
            if !range.contains(product.price) {
                return false;
            }
        }
        if let Some(in_stock) = self.in_stock {
            if product.is_in_stock() != in_stock {
                return false;
            }
        }
        if let Some(min_rating) = self.min_rating {
            if product.rating.average < min_rating {
                return false;
            }
        }
        if let Some(brand) = &self.brand {
            if !product.has_brand(brand) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ImageFallbacks, ProductRecord, ProductSource, RawRating};
    use crate::ids::ProductId;

    fn product(category: &str, brand: &str, price: f64, stock: f64, rating: f64) -> Product {
        let record = ProductRecord {
            category: Some(category.into()),
            brand: Some(brand.into()),
            price: Some(price),
            stock: Some(stock),
            rating: Some(RawRating::Score(rating)),
            ..Default::default()
        };
        Product::from_record(
            ProductId::new("p"),
            record,
            ProductSource::Regular,
            &ImageFallbacks::default(),
        )
    }

    #[test]
    fn test_price_range_is_inclusive() {
        let range = PriceRange::between(20.0, 50.0);
        assert!(range.contains(20.0));
        assert!(range.contains(50.0));
        assert!(!range.contains(19.99));
        assert!(!range.contains(50.01));
        assert!(PriceRange::default().contains(1e9));
    }

    #[test]
    fn test_category_ignores_case() {
        let p = product("Electronics", "Voltz", 10.0, 1.0, 4.0);
        assert!(ProductFilters::new().with_category("electronics").matches(&p));
        assert!(!ProductFilters::new().with_category("electronic").matches(&p));
    }

    #[test]
    fn test_in_stock_equality() {
        let available = product("a", "b", 1.0, 3.0, 0.0);
        let sold_out = product("a", "b", 1.0, 0.0, 0.0);
        let filter = ProductFilters::new().with_in_stock(true);
        assert!(filter.matches(&available));
        assert!(!filter.matches(&sold_out));
        let filter = ProductFilters::new().with_in_stock(false);
        assert!(!filter.matches(&available));
        assert!(filter.matches(&sold_out));
    }

    #[test]
    fn test_rating_threshold_and_brand() {
        let p = product("a", "Oakly", 1.0, 1.0, 4.5);
        assert!(ProductFilters::new().with_min_rating(4.5).matches(&p));
        assert!(!ProductFilters::new().with_min_rating(4.51).matches(&p));
        assert!(ProductFilters::new().with_brand("OAKLY").matches(&p));
        assert!(!ProductFilters::new().with_brand("Oak").matches(&p));
    }

    #[test]
    fn test_filters_combine_with_and() {
        let p = product("furniture", "Oakly", 80.0, 2.0, 4.0);
        let filter = ProductFilters::new()
            .with_category("Furniture")
            .with_price_range(PriceRange::at_most(100.0))
            .with_brand("oakly");
        assert!(filter.matches(&p));
        assert!(!filter.clone().with_in_stock(false).matches(&p));
        assert!(ProductFilters::new().is_empty());
        assert!(!filter.is_empty());
    }
}
