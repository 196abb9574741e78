//! Curated product listings.

use std::cmp::Ordering;

use crate::catalog::Product;

/// Best rated first, deeper discount breaks ties.
fn by_rating_then_discount(a: &Product, b: &Product) -> Ordering {
    b.rating
        .average
        .total_cmp(&a.rating.average)
        .then_with(|| b.discount().total_cmp(&a.discount()))
}

fn take_sorted<'a, I>(products: I, limit: usize, cmp: fn(&Product, &Product) -> Ordering) -> Vec<Product>
where
    I: Iterator<Item = &'a Product>,
{
    let mut picked: Vec<&Product> = products.collect();
    picked.sort_by(|a, b| cmp(a, b));
    picked.into_iter().take(limit).cloned().collect()
}

/// Discounted products, deepest discount first.
pub fn top_discounts(products: &[Product], limit: usize) -> Vec<Product> {
    take_sorted(
        products.iter().filter(|p| p.is_discounted()),
        limit,
        |a, b| b.discount().total_cmp(&a.discount()),
    )
}

/// Best products in one category, case-insensitive.
pub fn top_in_category(products: &[Product], category: &str, limit: usize) -> Vec<Product> {
    take_sorted(
        products.iter().filter(|p| p.in_category(category)),
        limit,
        by_rating_then_discount,
    )
}

/// Best products with `min <= price <= max`.
pub fn top_in_price_range(products: &[Product], min: f64, max: f64, limit: usize) -> Vec<Product> {
    take_sorted(
        products.iter().filter(|p| p.price >= min && p.price <= max),
        limit,
        by_rating_then_discount,
    )
}
