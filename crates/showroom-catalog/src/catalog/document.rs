//! Raw catalog document types.
//!
//! Everything here mirrors the fetched JSON as loosely as possible. Records
//! are parsed one at a time; a field of the wrong type reads as absent, and
//! only an entry that is not an object at all is skipped.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use super::lenient;
use crate::error::CatalogError;
use crate::ids::ProductId;

/// Descriptive metadata block shipped alongside the products.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogMetadata {
    pub version: String,
    pub last_updated: String,
    pub total_products: u64,
    pub categories: Vec<String>,
    pub ar_enabled_categories: Vec<String>,
}

/// A product rating as it appears in the source data.
///
/// Plain numbers are the average; objects may carry a review count.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RawRating {
    Score(f64),
    Summary {
        #[serde(default, alias = "rate", deserialize_with = "lenient::number")]
        average: Option<f64>,
        #[serde(default)]
        count: Option<u32>,
    },
}

/// 3D asset block of an AR record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawArAssets {
    #[serde(default, rename = "model3D", deserialize_with = "lenient::string")]
    pub model_3d: Option<String>,
    #[serde(default, rename = "modelColor", deserialize_with = "lenient::string")]
    pub model_color: Option<String>,
    #[serde(default, rename = "modelScale")]
    pub model_scale: Option<Value>,
}

impl RawArAssets {
    fn is_empty(&self) -> bool {
        self.model_3d.is_none() && self.model_color.is_none() && self.model_scale.is_none()
    }
}

/// A single product record, every field optional.
///
/// Fields of the wrong type read as absent rather than failing the record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub brand: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub subcategory: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub discount_percentage: Option<f64>,
    #[serde(default, deserialize_with = "rating")]
    pub rating: Option<RawRating>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub stock: Option<f64>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub features: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub specifications: Option<Map<String, Value>>,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub tags: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub images: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub thumbnail: Option<String>,
    #[serde(default, deserialize_with = "lenient::array")]
    pub reviews: Option<Vec<Value>>,
    #[serde(default, deserialize_with = "lenient::parsed")]
    pub ar_assets: Option<RawArAssets>,
    /// Flat AR fields, accepted when no `arAssets` block is present.
    #[serde(flatten)]
    pub flat_ar_assets: RawArAssets,
}

/// Ratings may also arrive as numeric strings.
fn rating<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<RawRating>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    if value.is_string() {
        return Ok(lenient::as_number(&value).map(RawRating::Score));
    }
    Ok(serde_json::from_value(value).ok())
}

impl ProductRecord {
    /// The record's own id, if it has a usable one.
    pub fn product_id(&self) -> Option<ProductId> {
        self.id.as_ref().and_then(ProductId::from_json)
    }

    /// Display title, preferring `title` over `name`.
    pub fn display_title(&self) -> String {
        self.title
            .as_deref()
            .filter(|t| !t.is_empty())
            .or(self.name.as_deref())
            .unwrap_or_default()
            .to_string()
    }

    /// AR assets from either the nested block or the flat fields.
    pub fn ar_assets(&self) -> Option<&RawArAssets> {
        match &self.ar_assets {
            Some(assets) if !assets.is_empty() => Some(assets),
            _ if !self.flat_ar_assets.is_empty() => Some(&self.flat_ar_assets),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDocument {
    #[serde(default)]
    catalog: Option<Value>,
    #[serde(default)]
    ar_products: Option<Map<String, Value>>,
    #[serde(default)]
    products: Option<Vec<Value>>,
}

/// The parsed catalog document, before normalization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogDocument {
    /// Metadata block, `None` when absent or unreadable.
    pub metadata: Option<CatalogMetadata>,
    /// AR-enabled records keyed by id, in document order.
    pub ar_products: Vec<(String, ProductRecord)>,
    /// Regular records in list order.
    pub products: Vec<ProductRecord>,
}

impl CatalogDocument {
    /// Parse a document from raw bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CatalogError> {
        let raw: RawDocument = serde_json::from_slice(bytes)?;
        Ok(Self::from_raw(raw))
    }

    /// Parse a document from a string.
    pub fn from_str(text: &str) -> Result<Self, CatalogError> {
        let raw: RawDocument = serde_json::from_str(text)?;
        Ok(Self::from_raw(raw))
    }

    fn from_raw(raw: RawDocument) -> Self {
        let metadata = raw.catalog.and_then(|value| {
            serde_json::from_value::<CatalogMetadata>(value)
                .map_err(|e| warn!(error = %e, "Ignoring unreadable catalog metadata"))
                .ok()
        });

        let ar_products = raw
            .ar_products
            .unwrap_or_default()
            .into_iter()
            .filter_map(|(key, value)| match serde_json::from_value(value) {
                Ok(record) => Some((key, record)),
                Err(e) => {
                    warn!(key = %key, error = %e, "Skipping malformed AR product record");
                    None
                }
            })
            .collect();

        let products = raw
            .products
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .filter_map(|(position, value)| match serde_json::from_value(value) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(position, error = %e, "Skipping malformed product record");
                    None
                }
            })
            .collect();

        Self {
            metadata,
            ar_products,
            products,
        }
    }

    /// Number of raw records in both collections.
    pub fn record_count(&self) -> usize {
        self.ar_products.len() + self.products.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_collections_are_empty() {
        let doc = CatalogDocument::from_str("{}").unwrap();
        assert!(doc.metadata.is_none());
        assert!(doc.ar_products.is_empty());
        assert!(doc.products.is_empty());
    }

    #[test]
    fn test_ar_map_keeps_document_order() {
        let doc = CatalogDocument::from_str(
            r#"{"arProducts": {"z9": {"id": "z9"}, "a1": {"id": "a1"}, "m5": {"id": "m5"}}}"#,
        )
        .unwrap();
        let keys: Vec<_> = doc.ar_products.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["z9", "a1", "m5"]);
    }

    #[test]
    fn test_wrong_typed_fields_are_defaulted() {
        let doc = CatalogDocument::from_str(
            r#"{"products": [
                {"id": 1, "price": "19.99"},
                {"id": 2, "tags": "sale", "price": 5},
                {"id": 3, "price": "free", "stock": [1], "rating": "4.5", "images": {"a": 1}},
                {"id": 4, "title": 404, "features": ["Soft", 2, null], "rating": {"average": "3.5"}}
            ]}"#,
        )
        .unwrap();
        assert_eq!(doc.products.len(), 4);

        assert_eq!(doc.products[0].price, Some(19.99));
        assert_eq!(doc.products[1].tags, Some(vec!["sale".to_string()]));

        let third = &doc.products[2];
        assert_eq!(third.price, None);
        assert_eq!(third.stock, None);
        assert_eq!(third.rating, Some(RawRating::Score(4.5)));
        assert_eq!(third.images, None);

        let fourth = &doc.products[3];
        assert_eq!(fourth.display_title(), "404");
        assert_eq!(
            fourth.features,
            Some(vec!["Soft".to_string(), "2".to_string()])
        );
        assert_eq!(
            fourth.rating,
            Some(RawRating::Summary {
                average: Some(3.5),
                count: None
            })
        );
    }

    #[test]
    fn test_non_object_record_is_skipped() {
        let doc = CatalogDocument::from_str(
            r#"{"products": ["oops", 7, {"id": 2, "price": 10}]}"#,
        )
        .unwrap();
        assert_eq!(doc.products.len(), 1);
        assert_eq!(doc.products[0].product_id(), Some(ProductId::new("2")));
    }

    #[test]
    fn test_metadata_is_parsed() {
        let doc = CatalogDocument::from_str(
            r#"{"catalog": {"version": "2.1", "lastUpdated": "2024-05-01", "totalProducts": 3,
                "categories": ["furniture"], "arEnabledCategories": ["furniture"]}}"#,
        )
        .unwrap();
        let meta = doc.metadata.unwrap();
        assert_eq!(meta.version, "2.1");
        assert_eq!(meta.total_products, 3);
        assert_eq!(meta.ar_enabled_categories, vec!["furniture"]);
    }

    #[test]
    fn test_title_falls_back_to_name() {
        let record: ProductRecord =
            serde_json::from_str(r#"{"id": 1, "name": "Lounge Chair"}"#).unwrap();
        assert_eq!(record.display_title(), "Lounge Chair");

        let record: ProductRecord =
            serde_json::from_str(r#"{"id": 1, "title": "Sofa", "name": "Lounge Chair"}"#).unwrap();
        assert_eq!(record.display_title(), "Sofa");
    }

    #[test]
    fn test_rating_shapes() {
        let record: ProductRecord = serde_json::from_str(r#"{"rating": 4.5}"#).unwrap();
        assert_eq!(record.rating, Some(RawRating::Score(4.5)));

        let record: ProductRecord =
            serde_json::from_str(r#"{"rating": {"average": 4.1, "count": 12}}"#).unwrap();
        assert_eq!(
            record.rating,
            Some(RawRating::Summary {
                average: Some(4.1),
                count: Some(12)
            })
        );
    }

    #[test]
    fn test_flat_ar_fields() {
        let record: ProductRecord = serde_json::from_str(
            r#"{"id": "ar-1", "model3D": "/models/chair.glb", "modelScale": 1.5}"#,
        )
        .unwrap();
        let assets = record.ar_assets().unwrap();
        assert_eq!(assets.model_3d.as_deref(), Some("/models/chair.glb"));
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(matches!(
            CatalogDocument::from_str("{not json"),
            Err(CatalogError::Parse(_))
        ));
    }
}
