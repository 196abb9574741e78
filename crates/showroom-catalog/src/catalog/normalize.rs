//! Normalization from a raw [`CatalogDocument`] into a [`Catalog`].

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::catalog::{Catalog, CatalogDocument, ImageFallbacks, Product, ProductSource};
use crate::ids::ProductId;

/// Merge both source collections into one ordered, de-duplicated catalog.
///
/// AR records come first in document order and win any id collision; a
/// record's own id is preferred over its map key. Regular records follow in
/// list order. Regular records without an id, or whose id is already taken,
/// are dropped.
pub fn normalize(document: CatalogDocument, fallbacks: &ImageFallbacks) -> Catalog {
    let CatalogDocument {
        metadata,
        ar_products,
        products,
    } = document;

    let mut seen: HashSet<ProductId> = HashSet::with_capacity(ar_products.len() + products.len());
    let mut merged = Vec::with_capacity(ar_products.len() + products.len());

    for (key, record) in ar_products {
        let id = record
            .product_id()
            .or_else(|| Some(key.trim()).filter(|k| !k.is_empty()).map(ProductId::new));
        let Some(id) = id else {
            warn!(key = %key, "Skipping AR product without an id");
            continue;
        };
        if !seen.insert(id.clone()) {
            warn!(id = %id, "Skipping duplicate AR product id");
            continue;
        }
        merged.push(Product::from_record(id, record, ProductSource::Ar, fallbacks));
    }

    for (position, record) in products.into_iter().enumerate() {
        let Some(id) = record.product_id() else {
            warn!(position, "Skipping product without an id");
            continue;
        };
        if !seen.insert(id.clone()) {
            debug!(id = %id, "Product id already loaded, keeping the earlier record");
            continue;
        }
        merged.push(Product::from_record(id, record, ProductSource::Regular, fallbacks));
    }

    Catalog::new(merged, metadata)
}
