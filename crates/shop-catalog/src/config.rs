//! Catalog client configuration.

use std::time::Duration;

use url::Url;

use crate::CatalogError;

/// Public catalog API used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "https://fakestoreapi.com";

/// Per-request timeout used when nothing else is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Where the catalog lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    base_url: Url,
    timeout: Duration,
}

impl CatalogConfig {
    /// Validate `base_url` and build a config with the default timeout.
    ///
    /// The URL must be hierarchical (`http://host/...`), since endpoints are
    /// appended to it as path segments.
    pub fn new(base_url: &str) -> Result<Self, CatalogError> {
        let invalid = |reason: String| CatalogError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason,
        };

        let url = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
        if url.cannot_be_a_base() {
            return Err(invalid("URL cannot carry a path".to_string()));
        }
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
        }

        Ok(Self {
            base_url: url,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Absolute URL for the endpoint made of `segments`, each percent-encoded.
    pub fn endpoint<S: AsRef<str>>(&self, segments: &[S]) -> Url {
        let mut url = self.base_url.clone();
        url.set_query(None);
        url.set_fragment(None);
        // Checked hierarchical in `new`, so the segments are always available.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty();
            path.extend(segments.iter().map(AsRef::as_ref));
        }
        url
    }
}
