//! Remote catalog client.

use futures::future::join_all;
use serde::de::DeserializeOwned;
use shop_commerce::catalog::{dedupe_by_id, Product};
use shop_commerce::ProductId;
use shop_data::{FetchClient, FetchError, ReqwestTransport, Transport};
use tracing::{debug, warn};
use url::Url;

use crate::{CatalogConfig, CatalogError, FailureKind, FetchFailure, Fetched};

/// Read-only client for the catalog API.
///
/// Every operation resolves to a [`Fetched`] value: on failure the empty
/// default, with the failure recorded beside it. Nothing here returns an
/// error to the caller.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: FetchClient,
    config: CatalogConfig,
}

impl CatalogClient {
    /// Build a client over the default HTTP transport.
    pub fn new(config: CatalogConfig) -> Result<Self, CatalogError> {
        let transport = ReqwestTransport::new(config.timeout())?;
        Ok(Self::with_transport(config, transport))
    }

    /// Build a client over a caller-supplied transport.
    pub fn with_transport(config: CatalogConfig, transport: impl Transport + 'static) -> Self {
        let http = FetchClient::new(transport).with_default_header("Accept", "application/json");
        Self { http, config }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// `GET /products`.
    pub async fn get_all_products(&self) -> Fetched<Vec<Product>> {
        self.fetch_or_default(self.config.endpoint(&["products"]))
            .await
    }

    /// `GET /products/{id}`. Absent when the id is unknown or the request fails.
    pub async fn get_product_by_id(&self, id: ProductId) -> Fetched<Option<Product>> {
        let url = self.config.endpoint(&["products".to_string(), id.to_string()]);
        match self.fetch_json::<Product>(&url).await {
            Ok(product) => Fetched::ok(Some(product)),
            // The API answers an unknown id with 200 and an empty body.
            Err(failure) if failure.kind == FailureKind::Empty => {
                debug!(product_id = %id, "product not found");
                Fetched::failed(failure)
            }
            Err(failure) => {
                warn!(endpoint = %failure.endpoint, kind = %failure.kind, "catalog request degraded");
                Fetched::failed(failure)
            }
        }
    }

    /// `GET /products/categories`.
    pub async fn get_categories(&self) -> Fetched<Vec<String>> {
        self.fetch_or_default(self.config.endpoint(&["products", "categories"]))
            .await
    }

    /// `GET /products/category/{name}`.
    pub async fn get_products_by_category(&self, category: &str) -> Fetched<Vec<Product>> {
        self.fetch_or_default(self.config.endpoint(&["products", "category", category]))
            .await
    }

    /// Products in any of `categories`, fetched concurrently.
    ///
    /// An empty selection means the whole catalog. Otherwise per-category
    /// results are concatenated in selection order and de-duplicated by id,
    /// first occurrence kept. A failed category contributes nothing but its
    /// failure record.
    pub async fn get_products_by_multiple_categories<S: AsRef<str>>(
        &self,
        categories: &[S],
    ) -> Fetched<Vec<Product>> {
        if categories.is_empty() {
            return self.get_all_products().await;
        }

        let results = join_all(
            categories
                .iter()
                .map(|category| self.get_products_by_category(category.as_ref())),
        )
        .await;

        let mut merged = Vec::new();
        let mut failures = Vec::new();
        for result in results {
            let (products, failed) = result.into_parts();
            merged.extend(products);
            failures.extend(failed);
        }

        let merged = dedupe_by_id(merged);
        debug!(
            categories = categories.len(),
            products = merged.len(),
            failed = failures.len(),
            "merged category results"
        );
        Fetched::ok(merged).with_failures(failures)
    }

    async fn fetch_or_default<T>(&self, url: Url) -> Fetched<T>
    where
        T: DeserializeOwned + Default,
    {
        match self.fetch_json(&url).await {
            Ok(value) => Fetched::ok(value),
            Err(failure) => {
                warn!(endpoint = %failure.endpoint, kind = %failure.kind, "catalog request degraded");
                Fetched::failed(failure)
            }
        }
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, FetchFailure> {
        let endpoint = url.as_str();
        debug!(endpoint, "catalog request");

        let response = self
            .http
            .get(endpoint)
            .send()
            .await
            .map_err(|e| FetchFailure::new(endpoint, classify(&e), e.to_string()))?
            .error_for_status()
            .map_err(|e| FetchFailure::new(endpoint, classify(&e), e.to_string()))?;

        if response.is_empty() {
            return Err(FetchFailure::new(endpoint, FailureKind::Empty, ""));
        }
        response
            .json()
            .map_err(|e| FetchFailure::new(endpoint, FailureKind::Decode, e.to_string()))
    }
}

fn classify(error: &FetchError) -> FailureKind {
    match error {
        FetchError::HttpError { status, .. } => FailureKind::Status(*status),
        FetchError::ParseError(_) => FailureKind::Decode,
        FetchError::RequestError(_) | FetchError::InvalidRequest(_) | FetchError::Timeout => {
            FailureKind::Transport
        }
    }
}
