//! CLI execution context.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context as _, Result};
use shop_cache::Cache;
use shop_catalog::{CatalogClient, CatalogConfig};
use shop_commerce::cart::CartStore;
use tracing::debug;

use crate::config::{ShopConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// Effective configuration (file plus command-line overrides).
    pub config: ShopConfig,
    /// Where the configuration came from, if a file was found.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from an explicit config file or the nearest one found.
    pub fn load(config_path: Option<&str>, api_url: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (mut config, config_path) = match config_path {
            Some(path) => {
                let path = resolve(&cwd, path);
                (ShopConfig::load(&path)?, Some(path))
            }
            None => match find_config(&cwd) {
                Some(path) => (ShopConfig::load(&path)?, Some(path)),
                None => (ShopConfig::default(), None),
            },
        };

        match &config_path {
            Some(path) => debug!(path = %path.display(), "loaded config"),
            None => debug!(cwd = %cwd.display(), "no config file found, using defaults"),
        }

        if let Some(url) = api_url {
            config.api.base_url = url.to_string();
        }

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Catalog client for the configured API.
    pub fn catalog(&self) -> Result<CatalogClient> {
        let config = CatalogConfig::new(&self.config.api.base_url)?
            .with_timeout(Duration::from_secs(self.config.api.timeout_secs));
        CatalogClient::new(config).context("Failed to set up the catalog client")
    }

    /// Directory holding the cart snapshot.
    pub fn cart_dir(&self) -> PathBuf {
        resolve(&self.cwd, &self.config.cart.storage_dir)
    }

    /// Open the persisted cart, rehydrating the last snapshot.
    pub fn open_cart(&self) -> Result<CartStore> {
        let dir = self.cart_dir();
        debug!(dir = %dir.display(), key = %self.config.cart.key, "opening cart storage");
        let cache = Cache::open_dir(&dir)
            .with_context(|| format!("Failed to open cart storage: {}", dir.display()))?;
        Ok(CartStore::open_with_key(cache, self.config.cart.key.clone()))
    }
}

/// Find the nearest config file, walking up from `start`.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(|dir| {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    })
}

fn resolve(cwd: &Path, path: &str) -> PathBuf {
    let path = Path::new(path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_config_walks_up() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.path().join(".shop.toml"), "").unwrap();

        assert_eq!(find_config(&nested), Some(root.path().join(".shop.toml")));
    }

    #[test]
    fn test_find_config_prefers_nearest_and_name_order() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("inner");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.path().join("shop.toml"), "").unwrap();
        std::fs::write(nested.join("shop.json"), "{}").unwrap();
        std::fs::write(nested.join("shop.toml"), "").unwrap();

        assert_eq!(find_config(&nested), Some(nested.join("shop.toml")));
    }

    #[test]
    fn test_resolve() {
        let cwd = Path::new("/work");
        assert_eq!(resolve(cwd, ".shop"), PathBuf::from("/work/.shop"));
        assert_eq!(resolve(cwd, "/var/shop"), PathBuf::from("/var/shop"));
    }
}
