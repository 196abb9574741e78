//! Image fallback rewriting.
//!
//! Product images hosted on a rate-limited CDN are swapped for locally-hosted
//! placeholders chosen by category, so the storefront never hammers that host.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Host substring of the rate-limited image CDN.
pub const DEFAULT_BLOCKED_MARKER: &str = "cdn.dummyjson.com";

/// Placeholder used for unmapped categories and missing images.
pub const DEFAULT_FALLBACK_IMAGE: &str = "/assets/images/product-placeholder.png";

const CATEGORY_FALLBACKS: &[(&str, &str)] = &[
    ("electronics", "/assets/images/electronics.png"),
    ("furniture", "/assets/images/furniture.png"),
    ("beauty", "/assets/images/beauty.png"),
    ("fragrances", "/assets/images/fragrances.png"),
    ("groceries", "/assets/images/groceries.png"),
    ("home-decoration", "/assets/images/home-decoration.png"),
    ("kitchen-accessories", "/assets/images/kitchen-accessories.png"),
    ("laptops", "/assets/images/laptops.png"),
    ("smartphones", "/assets/images/smartphones.png"),
];

/// Category → local fallback image mapping.
///
/// Rewriting is pure and idempotent. Configured paths that contain the
/// blocked marker are skipped at lookup time, so a rewritten reference is
/// never on the blocked host and a second pass leaves it unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageFallbacks {
    blocked_marker: String,
    default_path: String,
    by_category: HashMap<String, String>,
}

impl Default for ImageFallbacks {
    fn default() -> Self {
        Self {
            blocked_marker: DEFAULT_BLOCKED_MARKER.to_string(),
            default_path: DEFAULT_FALLBACK_IMAGE.to_string(),
            by_category: CATEGORY_FALLBACKS
                .iter()
                .map(|(category, path)| (category.to_string(), path.to_string()))
                .collect(),
        }
    }
}

impl ImageFallbacks {
    /// Create a mapping with no category entries.
    pub fn new(blocked_marker: impl Into<String>, default_path: impl Into<String>) -> Self {
        Self {
            blocked_marker: blocked_marker.into(),
            default_path: default_path.into(),
            by_category: HashMap::new(),
        }
    }

    /// Set the blocked host marker.
    pub fn with_blocked_marker(mut self, marker: impl Into<String>) -> Self {
        self.blocked_marker = marker.into();
        self
    }

    /// Set the default fallback path.
    pub fn with_default(mut self, path: impl Into<String>) -> Self {
        self.default_path = path.into();
        self
    }

    /// Add or replace a category mapping. Categories are case-folded.
    pub fn with_category(mut self, category: &str, path: impl Into<String>) -> Self {
        self.by_category.insert(category.to_lowercase(), path.into());
        self
    }

    pub fn blocked_marker(&self) -> &str {
        &self.blocked_marker
    }

    pub fn default_path(&self) -> &str {
        &self.default_path
    }

    /// Whether a URL points at the blocked host.
    pub fn is_blocked(&self, url: &str) -> bool {
        !self.blocked_marker.is_empty() && url.contains(&self.blocked_marker)
    }

    /// Fallback path for a category, or the default.
    ///
    /// A configured path that is itself on the blocked host is passed over
    /// for the next one: category, then default, then
    /// [`DEFAULT_FALLBACK_IMAGE`], then the empty string.
    pub fn resolve(&self, category: Option<&str>) -> &str {
        category
            .and_then(|c| self.by_category.get(&c.to_lowercase()))
            .map(String::as_str)
            .into_iter()
            .chain([self.default_path.as_str(), DEFAULT_FALLBACK_IMAGE])
            .find(|path| !self.is_blocked(path))
            .unwrap_or_default()
    }

    /// Rewrite a single image reference.
    pub fn rewrite_url(&self, url: &str, category: Option<&str>) -> String {
        if self.is_blocked(url) {
            self.resolve(category).to_string()
        } else if url.trim().is_empty() {
            self.resolve(None).to_string()
        } else {
            url.to_string()
        }
    }

    /// Rewrite every entry of an image list.
    pub fn rewrite_images(&self, images: &[String], category: Option<&str>) -> Vec<String> {
        images
            .iter()
            .map(|url| self.rewrite_url(url, category))
            .collect()
    }

    /// Rewrite a thumbnail, substituting the default when it is missing.
    pub fn rewrite_thumbnail(&self, thumbnail: Option<&str>, category: Option<&str>) -> String {
        match thumbnail {
            Some(url) => self.rewrite_url(url, category),
            None => self.resolve(None).to_string(),
        }
    }
}
