//! Query evaluation over an in-memory product list.

use crate::catalog::Product;
use crate::search::{SearchOptions, SearchResults};

/// Run a search and return the requested page.
///
/// Text search, filters, sort and pagination are applied in that order. The
/// input is never modified; the result is a fresh vector of clones.
pub fn search(products: &[Product], options: &SearchOptions) -> Vec<Product> {
    search_with_total(products, options).items
}

/// Run a search and also report how many products matched before
/// pagination.
pub fn search_with_total(products: &[Product], options: &SearchOptions) -> SearchResults<Product> {
    let needle = options.needle();

    let mut matched: Vec<&Product> = products
        .iter()
        .filter(|p| p.matches_text(&needle))
        .filter(|p| options.filters.matches(p))
        .collect();

    // `sort_by` is stable, so ties keep catalog order.
    if let Some(sort) = options.sort {
        matched.sort_by(|a, b| sort.compare(a, b));
    }

    let total_matches = matched.len();
    let page = options
        .pagination
        .apply(matched)
        .into_iter()
        .cloned()
        .collect();

    SearchResults::new(page, total_matches, options.pagination)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{normalize, Catalog, CatalogDocument, ImageFallbacks};
    use crate::search::{Pagination, PriceRange, ProductFilters, SortOption};

    fn catalog() -> Catalog {
        let json = r#"{
            "arProducts": {
                "ar-2": {"id": "ar-2", "title": "Oak Chair", "category": "Furniture",
                         "brand": "Oakly", "price": 50, "rating": 4.5, "stock": 3,
                         "tags": ["wood"]},
                "ar-1": {"id": "ar-1", "title": "Floor Lamp", "category": "Lighting",
                         "brand": "Lumen", "price": 20, "rating": {"average": 3.9, "count": 40},
                         "stock": 0}
            },
            "products": [
                {"id": "p-1", "title": "Desk", "category": "furniture", "brand": "Oakly",
                 "price": 120, "rating": 4.5, "stock": 5, "description": "Solid oak desk"},
                {"id": "p-2", "title": "Phone", "category": "Electronics", "brand": "Voltz",
                 "price": 19.99, "rating": {"average": 4.8, "count": 900}, "stock": 12},
                {"id": "p-3", "title": "Speaker", "category": "electronics", "brand": "voltz",
                 "price": 50.01, "rating": 4.5, "stock": 1, "features": ["Wireless"]}
            ]
        }"#;
        normalize(CatalogDocument::from_str(json).unwrap(), &ImageFallbacks::default())
    }

    fn ids(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_no_options_returns_everything_in_catalog_order() {
        let catalog = catalog();
        let results = search(catalog.products(), &SearchOptions::new());
        assert_eq!(ids(&results), vec!["ar-2", "ar-1", "p-1", "p-2", "p-3"]);
    }

    #[test]
    fn test_text_search_fields() {
        let catalog = catalog();
        let by = |q: &str| {
            let results = search(catalog.products(), &SearchOptions::new().with_query(q));
            ids(&results).into_iter().map(String::from).collect::<Vec<_>>()
        };
        assert_eq!(by("OAK"), vec!["ar-2", "p-1"]);
        assert_eq!(by("wood"), vec!["ar-2"]);
        assert_eq!(by("wireless"), vec!["p-3"]);
        assert_eq!(by("lumen"), vec!["ar-1"]);
        assert!(by("submarine").is_empty());
    }

    #[test]
    fn test_price_range_inclusive_bounds() {
        let catalog = catalog();
        let options = SearchOptions::new().with_filters(
            ProductFilters::new().with_price_range(PriceRange::between(20.0, 50.0)),
        );
        let results = search(catalog.products(), &options);
        assert_eq!(ids(&results), vec!["ar-2", "ar-1"]);
        assert!(results.iter().all(|p| p.price >= 20.0 && p.price <= 50.0));
    }

    #[test]
    fn test_category_filter_ignores_case() {
        let catalog = catalog();
        let options =
            SearchOptions::new().with_filters(ProductFilters::new().with_category("electronics"));
        assert_eq!(ids(&search(catalog.products(), &options)), vec!["p-2", "p-3"]);
    }

    #[test]
    fn test_rating_sort_is_stable() {
        let catalog = catalog();
        let options = SearchOptions::new().with_sort(SortOption::RatingDesc);
        let results = search(catalog.products(), &options);
        // ar-2, p-1 and p-3 share 4.5 and keep their catalog order.
        assert_eq!(ids(&results), vec!["p-2", "ar-2", "p-1", "p-3", "ar-1"]);
    }

    #[test]
    fn test_other_sorts() {
        let catalog = catalog();
        let sorted = |sort| ids(&search(catalog.products(), &SearchOptions::new().with_sort(sort)))
            .into_iter()
            .map(String::from)
            .collect::<Vec<_>>();
        assert_eq!(sorted(SortOption::PriceAsc), vec!["p-2", "ar-1", "ar-2", "p-3", "p-1"]);
        assert_eq!(sorted(SortOption::PriceDesc), vec!["p-1", "p-3", "ar-2", "ar-1", "p-2"]);
        assert_eq!(sorted(SortOption::Popularity)[..2], ["p-2", "ar-1"]);
        assert_eq!(sorted(SortOption::Recency), vec!["p-3", "p-2", "p-1", "ar-2", "ar-1"]);
    }

    #[test]
    fn test_pipeline_order_and_total() {
        let catalog = catalog();
        let options = SearchOptions::new()
            .with_filters(ProductFilters::new().with_in_stock(true))
            .with_sort(SortOption::PriceAsc)
            .with_pagination(Pagination::new(1, 2));
        let results = search_with_total(catalog.products(), &options);
        assert_eq!(results.total_matches, 4);
        assert_eq!(ids(&results.items), vec!["ar-2", "p-3"]);
        assert!(results.has_more());
    }

    #[test]
    fn test_offset_beyond_results_is_empty() {
        let catalog = catalog();
        let options = SearchOptions::new().with_pagination(Pagination::new(50, 10));
        assert!(search(catalog.products(), &options).is_empty());
    }

    #[test]
    fn test_search_does_not_mutate_catalog() {
        let catalog = catalog();
        let before = catalog.products().to_vec();
        let options = SearchOptions::new().with_sort(SortOption::PriceDesc);
        let first = search(catalog.products(), &options);
        let second = search(catalog.products(), &options);
        assert_eq!(catalog.products(), before.as_slice());
        assert_eq!(first, second);
    }
}
