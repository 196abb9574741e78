//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context as _, Result};
use showroom_data::{CatalogSource, SourceFetcher};
use showroom_store::{CatalogStore, LoadOutcome};

use crate::config::{CliConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration, with command-line overrides applied.
    pub config: CliConfig,
    /// Config file the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, source: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config_path = match config_path {
            Some(path) => Some(PathBuf::from(path)),
            // Try to find config in current directory or parent directories
            None => find_config(&cwd),
        };
        let mut config = match &config_path {
            Some(path) => CliConfig::load(path)?,
            None => CliConfig::default(),
        };

        if let Some(source) = source {
            config.catalog.source = CatalogSource::parse(source);
        }

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Build a store over the configured source.
    ///
    /// Refuses a configuration that `config validate` would reject.
    pub fn store(&self) -> Result<CatalogStore> {
        let (errors, _) = self.config.check(&self.cwd);
        if !errors.is_empty() {
            bail!(
                "Invalid configuration: {}. Run `showroom config validate` for details.",
                errors.join("; ")
            );
        }

        let source = match &self.config.catalog.source {
            CatalogSource::File(path) => CatalogSource::File(self.resolve_path(path)),
            remote => remote.clone(),
        };
        self.output.debug(&format!("Catalog source: {}", source));

        let fetcher = SourceFetcher::new(source, self.config.fetch_policy())
            .context("Failed to create catalog fetcher")?;
        Ok(CatalogStore::new(
            Arc::new(fetcher),
            self.config.store_config(),
        ))
    }

    /// Build a store and wait for its first load.
    ///
    /// A failed load is reported as a warning; the store then serves an
    /// empty catalog.
    pub async fn load_store(&self) -> Result<CatalogStore> {
        let store = self.store()?;

        let spinner = self.output.spinner("Loading catalog...");
        let catalog = store.init().await;
        spinner.finish_and_clear();

        match store.last_outcome() {
            LoadOutcome::Failed { reason } => {
                self.output.warn(&format!("Catalog load failed: {}", reason));
            }
            _ => self.output.debug(&format!("Loaded {} products", catalog.len())),
        }
        Ok(store)
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }
}

/// Find a config file in the directory tree.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(|dir| {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(config: CliConfig) -> Context {
        Context {
            config,
            config_path: None,
            output: Output::new(false, true),
            cwd: std::env::temp_dir(),
        }
    }

    #[test]
    fn test_store_rejects_blocked_fallback() {
        let mut config = CliConfig::default();
        config.images.default = "https://cdn.dummyjson.com/placeholder.png".to_string();

        let err = context(config).store().err().unwrap();
        assert!(err.to_string().contains("images.default points at the blocked host"));
    }

    #[test]
    fn test_store_accepts_default_config() {
        assert!(context(CliConfig::default()).store().is_ok());
    }

    #[test]
    fn test_find_config_walks_upward() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.path().join("showroom.toml"), "").unwrap();

        assert_eq!(find_config(&nested), Some(root.path().join("showroom.toml")));
    }

    #[test]
    fn test_find_config_prefers_closest() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("shop");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.path().join("showroom.toml"), "").unwrap();
        std::fs::write(nested.join("showroom.json"), "{}").unwrap();

        assert_eq!(find_config(&nested), Some(nested.join("showroom.json")));
    }
}
