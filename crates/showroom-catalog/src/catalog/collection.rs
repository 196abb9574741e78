//! The loaded, immutable catalog.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogMetadata, Product};
use crate::ids::ProductId;

/// Observed lowest and highest price across a set of products.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct PriceBounds {
    pub min: f64,
    pub max: f64,
}

impl PriceBounds {
    /// Bounds over an iterator of prices; zeros when empty.
    pub fn from_prices(prices: impl IntoIterator<Item = f64>) -> Self {
        let mut prices = prices.into_iter();
        let Some(first) = prices.next() else {
            return Self::default();
        };
        prices.fold(Self { min: first, max: first }, |bounds, price| Self {
            min: bounds.min.min(price),
            max: bounds.max.max(price),
        })
    }
}

/// A normalized product collection plus its metadata.
///
/// Built once per load and never mutated afterwards; a reload produces a new
/// `Catalog`. Products are ordered AR-first, then regular, each group in
/// source order, and ids are unique.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
    metadata: Option<CatalogMetadata>,
}

impl Catalog {
    /// Build a catalog from already de-duplicated products.
    ///
    /// If an id repeats anyway, the first occurrence wins and later ones are
    /// dropped.
    pub fn new(products: Vec<Product>, metadata: Option<CatalogMetadata>) -> Self {
        let mut index = HashMap::with_capacity(products.len());
        let mut unique = Vec::with_capacity(products.len());
        for product in products {
            if index.contains_key(&product.id) {
                continue;
            }
            index.insert(product.id.clone(), unique.len());
            unique.push(product);
        }
        Self {
            products: unique,
            index,
            metadata,
        }
    }

    /// The fail-open catalog: no products, no metadata.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn metadata(&self) -> Option<&CatalogMetadata> {
        self.metadata.as_ref()
    }

    /// Look up a product by id.
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.index.get(id).map(|&i| &self.products[i])
    }

    /// Products sourced from the AR collection.
    pub fn ar_products(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|p| p.has_ar)
    }

    /// Products in a category, compared case-insensitively.
    pub fn by_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Product> {
        self.products.iter().filter(move |p| p.in_category(category))
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<String> {
        distinct(self.products.iter().map(|p| p.category.as_str()))
    }

    /// Categories that have AR products.
    ///
    /// Uses the metadata's `arEnabledCategories` when present, otherwise the
    /// distinct categories of AR-sourced products.
    pub fn ar_categories(&self) -> Vec<String> {
        match &self.metadata {
            Some(meta) if !meta.ar_enabled_categories.is_empty() => {
                meta.ar_enabled_categories.clone()
            }
            _ => distinct(self.ar_products().map(|p| p.category.as_str())),
        }
    }

    /// Distinct brands in first-seen order.
    pub fn brands(&self) -> Vec<String> {
        distinct(self.products.iter().map(|p| p.brand.as_str()))
    }

    /// Lowest and highest current price across all products.
    pub fn price_bounds(&self) -> PriceBounds {
        PriceBounds::from_prices(self.products.iter().map(|p| p.price))
    }
}

/// Distinct non-empty values, keeping first-seen order.
fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| !v.is_empty())
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}
