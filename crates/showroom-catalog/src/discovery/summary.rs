//! Catalog summary.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, PriceBounds};

/// Number of brands listed in a summary.
pub const SUMMARY_BRANDS: usize = 20;

/// A short overview of what the catalog carries.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSummary {
    pub total_products: usize,
    pub ar_products: usize,
    /// Distinct categories, sorted.
    pub categories: Vec<String>,
    /// The first brands in sorted order.
    pub top_brands: Vec<String>,
    pub price_range: PriceBounds,
}

impl CatalogSummary {
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let categories: BTreeSet<String> = catalog.categories().into_iter().collect();
        let brands: BTreeSet<String> = catalog.brands().into_iter().collect();

        Self {
            total_products: catalog.len(),
            ar_products: catalog.ar_products().count(),
            categories: categories.into_iter().collect(),
            top_brands: brands.into_iter().take(SUMMARY_BRANDS).collect(),
            price_range: catalog.price_bounds(),
        }
    }
}

impl fmt::Display for CatalogSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total Products: {}", self.total_products)?;
        writeln!(f, "AR Products: {}", self.ar_products)?;
        writeln!(f, "Categories: {}", self.categories.join(", "))?;
        writeln!(f, "Top Brands: {}", self.top_brands.join(", "))?;
        write!(
            f,
            "Price Range: ${:.2} - ${:.2}",
            self.price_range.min, self.price_range.max
        )
    }
}
