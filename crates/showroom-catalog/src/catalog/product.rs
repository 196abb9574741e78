//! Normalized product types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::catalog::document::{ProductRecord, RawArAssets, RawRating};
use crate::catalog::ImageFallbacks;
use crate::ids::ProductId;

/// Which source collection a product came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductSource {
    /// The id-keyed AR collection.
    Ar,
    /// The flat product list.
    Regular,
}

impl ProductSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductSource::Ar => "ar",
            ProductSource::Regular => "regular",
        }
    }
}

/// Average rating plus the number of ratings behind it.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Rating {
    pub average: f64,
    pub count: u32,
}

impl Rating {
    pub fn new(average: f64, count: u32) -> Self {
        Self { average, count }
    }
}

/// Scale of a 3D model, either uniform or a `"x y z"` style string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ModelScale {
    Uniform(f64),
    Text(String),
}

/// 3D/AR assets attached to an AR product.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ArAssets {
    #[serde(rename = "model3D")]
    pub model_3d: Option<String>,
    pub model_color: Option<String>,
    pub model_scale: Option<ModelScale>,
}

impl From<&RawArAssets> for ArAssets {
    fn from(raw: &RawArAssets) -> Self {
        let model_scale = match &raw.model_scale {
            Some(Value::Number(n)) => n.as_f64().map(ModelScale::Uniform),
            Some(Value::String(s)) if !s.is_empty() => Some(ModelScale::Text(s.clone())),
            Some(Value::Array(parts)) => {
                let parts: Vec<String> = parts.iter().map(value_to_text).collect();
                (!parts.is_empty()).then(|| ModelScale::Text(parts.join(" ")))
            }
            _ => None,
        };
        Self {
            model_3d: raw.model_3d.clone(),
            model_color: raw.model_color.clone(),
            model_scale,
        }
    }
}

/// A product in the loaded catalog.
///
/// Every field is populated; defaulting happens once in
/// [`Product::from_record`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub brand: String,
    pub category: String,
    pub subcategory: String,
    /// Current selling price.
    pub price: f64,
    /// Discount off the original price, in percent.
    pub discount_percentage: Option<f64>,
    pub rating: Rating,
    pub stock: i64,
    pub description: String,
    pub features: Vec<String>,
    /// Specification values rendered as text, in document order.
    pub specifications: Map<String, Value>,
    pub tags: Vec<String>,
    pub images: Vec<String>,
    pub thumbnail: String,
    #[serde(rename = "hasAR")]
    pub has_ar: bool,
    #[serde(rename = "arAssets", skip_serializing_if = "Option::is_none")]
    pub ar_assets: Option<ArAssets>,
    pub source: ProductSource,
}

impl Product {
    /// Build a fully-populated product from a raw record.
    ///
    /// Image fields are rewritten through `fallbacks`.
    pub fn from_record(
        id: ProductId,
        record: ProductRecord,
        source: ProductSource,
        fallbacks: &ImageFallbacks,
    ) -> Self {
        let title = record.display_title();
        let category = record.category.clone().unwrap_or_default();
        let category_ref = Some(category.as_str()).filter(|c| !c.is_empty());

        let has_ar = source == ProductSource::Ar;
        let ar_assets = if has_ar {
            record.ar_assets().map(ArAssets::from)
        } else {
            None
        };

        let review_count = record.reviews.as_ref().map_or(0, |r| r.len() as u32);
        let rating = match &record.rating {
            Some(RawRating::Score(average)) => Rating::new(*average, review_count),
            Some(RawRating::Summary { average, count }) => {
                Rating::new(average.unwrap_or(0.0), count.unwrap_or(review_count))
            }
            None => Rating::new(0.0, review_count),
        };

        let images = fallbacks.rewrite_images(&record.images.unwrap_or_default(), category_ref);
        let thumbnail = fallbacks.rewrite_thumbnail(record.thumbnail.as_deref(), category_ref);

        let specifications = record
            .specifications
            .unwrap_or_default()
            .into_iter()
            .map(|(k, v)| {
                let text = value_to_text(&v);
                (k, Value::String(text))
            })
            .collect();

        Self {
            id,
            title,
            brand: record.brand.unwrap_or_default(),
            category,
            subcategory: record.subcategory.unwrap_or_default(),
            price: record.price.unwrap_or(0.0),
            discount_percentage: record.discount_percentage,
            rating,
            stock: record.stock.map_or(0, |s| s as i64),
            description: record.description.unwrap_or_default(),
            features: record.features.unwrap_or_default(),
            specifications,
            tags: record.tags.unwrap_or_default(),
            images,
            thumbnail,
            has_ar,
            ar_assets,
            source,
        }
    }

    /// Whether the product can be added to a cart.
    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Discount percentage, zero when absent.
    pub fn discount(&self) -> f64 {
        self.discount_percentage.unwrap_or(0.0)
    }

    /// Whether a positive discount applies.
    pub fn is_discounted(&self) -> bool {
        self.discount() > 0.0
    }

    /// Price before the discount was applied.
    ///
    /// `None` when there is no discount, or when the discount is 100% or more
    /// and the original price cannot be derived.
    pub fn original_price(&self) -> Option<f64> {
        let discount = self.discount_percentage?;
        if discount <= 0.0 || discount >= 100.0 {
            return None;
        }
        Some(self.price / (1.0 - discount / 100.0))
    }

    /// Amount saved against the original price.
    pub fn savings(&self) -> Option<f64> {
        self.original_price().map(|original| original - self.price)
    }

    /// Case-insensitive category comparison.
    pub fn in_category(&self, category: &str) -> bool {
        self.category.to_lowercase() == category.to_lowercase()
    }

    /// Case-insensitive brand comparison.
    pub fn has_brand(&self, brand: &str) -> bool {
        self.brand.to_lowercase() == brand.to_lowercase()
    }

    /// Case-insensitive substring match over title, description, brand,
    /// tags and features. `needle` must already be lower-cased.
    pub fn matches_text(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self.brand.to_lowercase().contains(needle)
            || self.tags.iter().any(|t| t.to_lowercase().contains(needle))
            || self.features.iter().any(|f| f.to_lowercase().contains(needle))
    }
}

fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
