//! Product cards and product grids.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::ids::{CardId, ProductId};

/// Maximum title length shown in a grid cell.
pub const GRID_TITLE_CHARS: usize = 80;
/// Grid descriptions longer than this are cut and suffixed with `...`.
pub const GRID_DESCRIPTION_CHARS: usize = 60;
/// Maximum brand length shown in a grid cell.
pub const GRID_BRAND_CHARS: usize = 30;
/// Number of tags shown in a grid cell.
pub const GRID_TAGS: usize = 3;

/// A detailed card for a single product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductCard {
    /// Card identifier, unique per card even for the same product.
    pub id: CardId,
    pub product_id: ProductId,
    pub title: String,
    pub description: String,
    /// Current selling price.
    pub price: f64,
    pub original_price: Option<f64>,
    pub discount_percentage: f64,
    pub category: String,
    pub rating: f64,
    pub stock: i64,
    pub brand: String,
    pub image: String,
    pub tags: Vec<String>,
}

impl ProductCard {
    /// Create a card with a fresh id.
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: CardId::generate(),
            product_id: product.id.clone(),
            title: product.title.clone(),
            description: product.description.clone(),
            price: product.price,
            original_price: product.original_price(),
            discount_percentage: product.discount(),
            category: product.category.clone(),
            rating: product.rating.average,
            stock: product.stock,
            brand: product.brand.clone(),
            image: product.thumbnail.clone(),
            tags: product.tags.clone(),
        }
    }

    /// One-line spoken summary of the card.
    pub fn headline(&self) -> String {
        if self.discount_percentage > 0.0 {
            format!(
                "{} at ${:.2} with {:.1}% off",
                self.title, self.price, self.discount_percentage
            )
        } else {
            format!("{} at ${:.2}", self.title, self.price)
        }
    }
}

/// A compact grid cell.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GridItem {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub original_price: Option<f64>,
    pub discount_percentage: f64,
    pub category: String,
    pub rating: f64,
    pub stock: i64,
    pub brand: String,
    pub image: String,
    pub tags: Vec<String>,
}

impl GridItem {
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            title: truncate_chars(&product.title, GRID_TITLE_CHARS).to_string(),
            description: shorten(&product.description, GRID_DESCRIPTION_CHARS),
            price: product.price,
            original_price: product.original_price(),
            discount_percentage: product.discount(),
            category: product.category.clone(),
            rating: product.rating.average,
            stock: product.stock,
            brand: truncate_chars(&product.brand, GRID_BRAND_CHARS).to_string(),
            image: product.thumbnail.clone(),
            tags: product.tags.iter().take(GRID_TAGS).cloned().collect(),
        }
    }
}

/// A titled grid of products.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductGrid {
    pub title: String,
    pub items: Vec<GridItem>,
}

impl ProductGrid {
    pub fn new<'a>(title: impl Into<String>, products: impl IntoIterator<Item = &'a Product>) -> Self {
        Self {
            title: title.into(),
            items: products.into_iter().map(GridItem::from_product).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// The first `max` characters of `s`.
fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

fn shorten(s: &str, max: usize) -> String {
    let cut = truncate_chars(s, max);
    if cut.len() < s.len() {
        format!("{cut}...")
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ImageFallbacks, ProductRecord, ProductSource, RawRating};

    fn product() -> Product {
        let record = ProductRecord {
            title: Some("T".repeat(100)),
            description: Some("d".repeat(61)),
            brand: Some("Brändname".repeat(5)),
            category: Some("furniture".into()),
            price: Some(80.0),
            discount_percentage: Some(20.0),
            rating: Some(RawRating::Score(4.4)),
            stock: Some(3.0),
            tags: Some(vec!["a".into(), "b".into(), "c".into(), "d".into()]),
            thumbnail: Some("/img/chair.png".into()),
            ..Default::default()
        };
        Product::from_record(
            ProductId::new("42"),
            record,
            ProductSource::Regular,
            &ImageFallbacks::default(),
        )
    }

    #[test]
    fn test_card_carries_pricing() {
        let card = ProductCard::from_product(&product());
        assert_eq!(card.product_id.as_str(), "42");
        assert!((card.original_price.unwrap() - 100.0).abs() < 1e-9);
        assert_eq!(card.image, "/img/chair.png");
        assert_eq!(card.tags.len(), 4);
        assert!(card.headline().ends_with("with 20.0% off"));
    }

    #[test]
    fn test_cards_get_distinct_ids() {
        let p = product();
        assert_ne!(ProductCard::from_product(&p).id, ProductCard::from_product(&p).id);
    }

    #[test]
    fn test_grid_item_truncation() {
        let item = GridItem::from_product(&product());
        assert_eq!(item.title.chars().count(), GRID_TITLE_CHARS);
        assert_eq!(item.description, format!("{}...", "d".repeat(60)));
        assert_eq!(item.brand.chars().count(), GRID_BRAND_CHARS);
        assert_eq!(item.tags, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_short_description_kept() {
        assert_eq!(shorten("short", 60), "short");
        assert_eq!(shorten(&"x".repeat(60), 60), "x".repeat(60));
    }

    #[test]
    fn test_grid() {
        let p = product();
        let grid = ProductGrid::new("Picks", [&p, &p]);
        assert_eq!(grid.title, "Picks");
        assert_eq!(grid.len(), 2);
        assert!(ProductGrid::new("Empty", Vec::<&Product>::new()).is_empty());
    }
}
