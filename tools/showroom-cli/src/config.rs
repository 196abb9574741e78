//! CLI configuration.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use showroom_catalog::catalog::{ImageFallbacks, DEFAULT_BLOCKED_MARKER, DEFAULT_FALLBACK_IMAGE};
use showroom_data::{CatalogSource, FetchPolicy, RetryPolicy, TimeoutConfig};
use showroom_observability::LogConfig;
use showroom_store::StoreConfig;

/// File names searched for, in order, in each directory.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["showroom.toml", ".showroom.toml", "showroom.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Where and how to fetch the catalog.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Image fallback rewriting.
    #[serde(default)]
    pub images: ImagesConfig,

    /// Log output.
    #[serde(default)]
    pub logging: LogConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Fetch timeouts and retries for the catalog source.
    pub fn fetch_policy(&self) -> FetchPolicy {
        let timeout = match self.catalog.timeout_ms {
            Some(ms) => TimeoutConfig::from_millis(ms),
            None => TimeoutConfig::unbounded(),
        };
        let retry = match self.catalog.retries {
            0 => RetryPolicy::none(),
            n => RetryPolicy::new(n),
        };
        FetchPolicy::new(timeout, retry)
    }

    /// Built-in category fallbacks, overridden by the configured ones.
    pub fn fallbacks(&self) -> ImageFallbacks {
        let base = ImageFallbacks::default()
            .with_blocked_marker(self.images.blocked_marker.clone())
            .with_default(self.images.default.clone());
        self.images
            .categories
            .iter()
            .fold(base, |fallbacks, (category, path)| {
                fallbacks.with_category(category, path.clone())
            })
    }

    pub fn store_config(&self) -> StoreConfig {
        let config = StoreConfig::new().with_fallbacks(self.fallbacks());
        match self.catalog.load_timeout_ms {
            Some(ms) => config.with_load_timeout(Duration::from_millis(ms)),
            None => config,
        }
    }

    /// Errors and warnings for this configuration.
    ///
    /// Relative catalog paths are checked against `cwd`.
    pub fn check(&self, cwd: &Path) -> (Vec<String>, Vec<String>) {
        let mut errors: Vec<String> = Vec::new();
        let mut warnings: Vec<String> = Vec::new();

        match &self.catalog.source {
            CatalogSource::Url(url) if url.trim().is_empty() => {
                errors.push("catalog.source is empty".to_string());
            }
            CatalogSource::File(path) if path.as_os_str().is_empty() => {
                errors.push("catalog.source is empty".to_string());
            }
            CatalogSource::File(path) if !cwd.join(path).is_file() => {
                warnings.push(format!("catalog.source '{}' does not exist", path.display()));
            }
            _ => {}
        }

        if self.catalog.timeout_ms == Some(0) {
            errors.push("catalog.timeout_ms must be greater than 0".to_string());
        }
        if self.catalog.load_timeout_ms == Some(0) {
            errors.push("catalog.load_timeout_ms must be greater than 0".to_string());
        }

        let images = &self.images;
        if images.blocked_marker.trim().is_empty() {
            warnings.push("images.blocked_marker is empty, no images will be rewritten".to_string());
        }
        if images.default.trim().is_empty() {
            errors.push("images.default is required".to_string());
        }
        let marker = images.blocked_marker.as_str();
        if !marker.is_empty() {
            if images.default.contains(marker) {
                errors.push("images.default points at the blocked host".to_string());
            }
            for (category, path) in &images.categories {
                if path.contains(marker) {
                    errors.push(format!("images.categories.{} points at the blocked host", category));
                }
            }
        }

        (errors, warnings)
    }
}

/// Catalog source settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// URL or file path of the catalog document.
    #[serde(default)]
    pub source: CatalogSource,

    /// Per-attempt fetch timeout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,

    /// Retries after the first failed fetch.
    #[serde(default)]
    pub retries: u32,

    /// Upper bound on the whole load, retries included.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_timeout_ms: Option<u64>,
}

/// Image fallback settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImagesConfig {
    /// Image URLs containing this are replaced.
    #[serde(default = "default_blocked_marker")]
    pub blocked_marker: String,

    /// Replacement when the category has no image of its own.
    #[serde(default = "default_image")]
    pub default: String,

    /// Per-category replacements, keyed by lowercase category.
    #[serde(default)]
    pub categories: BTreeMap<String, String>,
}

fn default_blocked_marker() -> String {
    DEFAULT_BLOCKED_MARKER.to_string()
}

fn default_image() -> String {
    DEFAULT_FALLBACK_IMAGE.to_string()
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            blocked_marker: default_blocked_marker(),
            default: default_image(),
            categories: BTreeMap::new(),
        }
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Generate a default showroom.toml config file.
pub fn generate_default_config(source: &str) -> String {
    format!(
        r#"# Showroom catalog configuration

[catalog]
source = "{source}"
# timeout_ms = 5000
retries = 0
# load_timeout_ms = 15000

[images]
blocked_marker = "{marker}"
default = "{image}"

[images.categories]
# electronics = "/assets/images/electronics.png"

[logging]
level = "warn"
format = "human"
"#,
        source = source,
        marker = DEFAULT_BLOCKED_MARKER,
        image = DEFAULT_FALLBACK_IMAGE,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use showroom_observability::{LogFormat, LogLevel};

    #[test]
    fn test_generated_config_parses() {
        let config: CliConfig =
            toml::from_str(&generate_default_config("https://example.com/products.json")).unwrap();

        assert!(config.catalog.source.is_remote());
        assert_eq!(config.catalog.retries, 0);
        assert_eq!(config.catalog.timeout_ms, None);
        assert_eq!(config.images.blocked_marker, DEFAULT_BLOCKED_MARKER);
        assert_eq!(config.logging.level, LogLevel::Warn);
        assert_eq!(config.logging.format, LogFormat::Human);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: CliConfig = toml::from_str("").unwrap();

        assert_eq!(config.catalog.source, CatalogSource::default());
        assert_eq!(config.images.default, DEFAULT_FALLBACK_IMAGE);
        assert_eq!(config.fetch_policy(), FetchPolicy::default());
        assert_eq!(config.store_config().load_timeout, None);
    }

    #[test]
    fn test_fetch_policy_from_config() {
        let config: CliConfig = toml::from_str(
            r#"
            [catalog]
            source = "data/products.json"
            timeout_ms = 2000
            retries = 3
            "#,
        )
        .unwrap();

        let policy = config.fetch_policy();
        assert_eq!(policy.timeout.total, Some(Duration::from_secs(2)));
        assert_eq!(policy.retry.max_attempts, 3);
    }

    #[test]
    fn test_category_overrides() {
        let config: CliConfig = toml::from_str(
            r#"
            [images]
            blocked_marker = "cdn.blocked.com"

            [images.categories]
            furniture = "/img/sofa.png"
            "#,
        )
        .unwrap();

        let fallbacks = config.fallbacks();
        assert_eq!(fallbacks.blocked_marker(), "cdn.blocked.com");
        assert_eq!(fallbacks.resolve(Some("Furniture")), "/img/sofa.png");
        assert_eq!(fallbacks.resolve(Some("unknown")), DEFAULT_FALLBACK_IMAGE);
    }

    #[test]
    fn test_default_config_has_no_errors() {
        let (errors, _) = CliConfig::default().check(&std::env::temp_dir());
        assert!(errors.is_empty());
    }

    #[test]
    fn test_fallback_on_blocked_host_is_an_error() {
        let mut config = CliConfig::default();
        config.images.default = "https://cdn.dummyjson.com/placeholder.png".to_string();
        config
            .images
            .categories
            .insert("beauty".to_string(), "https://cdn.dummyjson.com/beauty.png".to_string());

        let (errors, _) = config.check(&std::env::temp_dir());
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_missing_catalog_file_is_a_warning() {
        let mut config = CliConfig::default();
        config.catalog.source = CatalogSource::parse("does/not/exist.json");
        config.catalog.timeout_ms = Some(0);

        let (errors, warnings) = config.check(&std::env::temp_dir());
        assert_eq!(errors, vec!["catalog.timeout_ms must be greater than 0"]);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_load_json_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("showroom.json");
        std::fs::write(
            &path,
            r#"{"catalog": {"source": "catalog.json", "load_timeout_ms": 500}, "logging": {"level": "debug"}}"#,
        )
        .unwrap();

        let config = CliConfig::load(&path).unwrap();
        assert_eq!(config.catalog.source, CatalogSource::parse("catalog.json"));
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(
            config.store_config().load_timeout,
            Some(Duration::from_millis(500))
        );
    }
}
