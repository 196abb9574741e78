//! Ranked multi-keyword search.
//!
//! This is the assistant-facing search: several keywords, list-valued
//! category and brand filters, and a relevance score that favours title
//! hits, well-rated products and deeper discounts.

use serde::{Deserialize, Serialize};
use strsim::jaro_winkler;

use crate::catalog::Product;

const TITLE_HIT: f64 = 3.0;
const DESCRIPTION_HIT: f64 = 2.0;
const OTHER_HIT: f64 = 1.0;
const PER_KEYWORD_BONUS: f64 = 0.5;
const RATING_WEIGHT: f64 = 0.1;
const DISCOUNT_WEIGHT: f64 = 0.01;

/// A product with its relevance score.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScoredProduct {
    pub product: Product,
    pub score: f64,
    /// How many of the keywords matched somewhere.
    pub keywords_matched: usize,
}

/// Keyword search parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct KeywordSearch {
    pub keywords: Vec<String>,
    /// Any of these categories, case-insensitive. Empty means all.
    pub categories: Vec<String>,
    /// Any of these brands, case-insensitive. Empty means all.
    pub brands: Vec<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_rating: Option<f64>,
    pub include_out_of_stock: bool,
    pub limit: usize,
}

impl Default for KeywordSearch {
    fn default() -> Self {
        Self {
            keywords: Vec::new(),
            categories: Vec::new(),
            brands: Vec::new(),
            min_price: None,
            max_price: None,
            min_rating: None,
            include_out_of_stock: true,
            limit: 5,
        }
    }
}

impl KeywordSearch {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keywords: keywords.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.categories = categories;
        self
    }

    pub fn with_brands(mut self, brands: Vec<String>) -> Self {
        self.brands = brands;
        self
    }

    pub fn with_price_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    pub fn with_min_rating(mut self, rating: f64) -> Self {
        self.min_rating = Some(rating);
        self
    }

    pub fn in_stock_only(mut self) -> Self {
        self.include_out_of_stock = false;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    fn passes_filters(&self, product: &Product) -> bool {
        if !self.categories.is_empty() && !self.categories.iter().any(|c| product.in_category(c)) {
            return false;
        }
        if !self.brands.is_empty() && !self.brands.iter().any(|b| product.has_brand(b)) {
            return false;
        }
        if self.min_price.is_some_and(|min| product.price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| product.price > max) {
            return false;
        }
        if self.min_rating.is_some_and(|min| product.rating.average < min) {
            return false;
        }
        self.include_out_of_stock || product.is_in_stock()
    }

    /// Score one product, `None` when no keyword matches.
    fn score(&self, product: &Product, keywords: &[String]) -> Option<ScoredProduct> {
        let haystack = searchable_text(product);
        let title = product.title.to_lowercase();
        let description = product.description.to_lowercase();

        let mut score = 0.0;
        let mut matched = 0;
        for keyword in keywords {
            if !haystack.contains(keyword.as_str()) {
                continue;
            }
            matched += 1;
            score += if title.contains(keyword.as_str()) {
                TITLE_HIT
            } else if description.contains(keyword.as_str()) {
                DESCRIPTION_HIT
            } else {
                OTHER_HIT
            };
            score += jaro_winkler(keyword, &title);
        }

        if matched == 0 {
            return None;
        }

        score += matched as f64 * PER_KEYWORD_BONUS;
        score += product.rating.average * RATING_WEIGHT;
        score += product.discount() * DISCOUNT_WEIGHT;

        Some(ScoredProduct {
            product: product.clone(),
            score,
            keywords_matched: matched,
        })
    }

    /// Rank matching products, best first, at most `limit` of them.
    pub fn run(&self, products: &[Product]) -> Vec<ScoredProduct> {
        let keywords: Vec<String> = self
            .keywords
            .iter()
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        if keywords.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<ScoredProduct> = products
            .iter()
            .filter(|p| self.passes_filters(p))
            .filter_map(|p| self.score(p, &keywords))
            .collect();

        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(self.limit);
        scored
    }
}

/// Everything a keyword may match, lower-cased and space-joined.
fn searchable_text(product: &Product) -> String {
    let price = product.price.to_string();
    let rating = product.rating.average.to_string();
    let mut parts: Vec<&str> = vec![
        product.title.as_str(),
        product.description.as_str(),
        product.category.as_str(),
        product.subcategory.as_str(),
        product.brand.as_str(),
        price.as_str(),
        rating.as_str(),
    ];
    parts.extend(product.tags.iter().map(String::as_str));
    parts.extend(product.features.iter().map(String::as_str));
    parts.extend(product.specifications.values().filter_map(|v| v.as_str()));
    parts
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{normalize, Catalog, CatalogDocument, ImageFallbacks};

    fn catalog() -> Catalog {
        let json = r#"{"products": [
            {"id": 1, "title": "Wireless Headphones", "category": "electronics", "brand": "Voltz",
             "price": 99, "rating": 4.0, "stock": 4, "description": "Noise cancelling"},
            {"id": 2, "title": "Studio Monitor", "category": "electronics", "brand": "Voltz",
             "price": 250, "rating": 4.9, "stock": 0, "description": "Wireless studio sound",
             "discountPercentage": 15},
            {"id": 3, "title": "Oak Table", "category": "furniture", "brand": "Oakly",
             "price": 300, "rating": 4.2, "stock": 2, "tags": ["wireless-charging"]},
            {"id": 4, "title": "Lamp", "category": "lighting", "brand": "Lumen",
             "price": 20, "rating": 3.0, "stock": 9}
        ]}"#;
        normalize(CatalogDocument::from_str(json).unwrap(), &ImageFallbacks::default())
    }

    fn ids(results: &[ScoredProduct]) -> Vec<&str> {
        results.iter().map(|r| r.product.id.as_str()).collect()
    }

    #[test]
    fn test_title_hits_rank_first() {
        let catalog = catalog();
        let results = KeywordSearch::new(["wireless"]).run(catalog.products());
        assert_eq!(ids(&results), vec!["1", "2", "3"]);
        assert!(results[0].score > results[1].score);
        assert!(results.iter().all(|r| r.keywords_matched == 1));
    }

    #[test]
    fn test_no_keyword_hit_is_dropped() {
        let catalog = catalog();
        let results = KeywordSearch::new(["lamp", "submarine"]).run(catalog.products());
        assert_eq!(ids(&results), vec!["4"]);
        assert!(KeywordSearch::new(["submarine"]).run(catalog.products()).is_empty());
        assert!(KeywordSearch::new(["  "]).run(catalog.products()).is_empty());
    }

    #[test]
    fn test_filters_and_stock() {
        let catalog = catalog();
        let results = KeywordSearch::new(["wireless"])
            .with_categories(vec!["Electronics".into()])
            .in_stock_only()
            .run(catalog.products());
        assert_eq!(ids(&results), vec!["1"]);

        let results = KeywordSearch::new(["wireless"])
            .with_price_range(Some(100.0), None)
            .with_min_rating(4.5)
            .run(catalog.products());
        assert_eq!(ids(&results), vec!["2"]);
    }

    #[test]
    fn test_limit() {
        let catalog = catalog();
        let results = KeywordSearch::new(["wireless"]).with_limit(1).run(catalog.products());
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_more_keywords_matched_scores_higher() {
        let catalog = catalog();
        let results = KeywordSearch::new(["voltz", "noise"]).run(catalog.products());
        assert_eq!(results[0].product.id.as_str(), "1");
        assert_eq!(results[0].keywords_matched, 2);
    }
}
