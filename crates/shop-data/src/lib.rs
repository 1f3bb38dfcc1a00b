//! HTTP client utilities for the storefront.
//!
//! A small builder API over an injectable [`Transport`], with buffered
//! responses and JSON helpers.
//!
//! # Example
//!
//! ```rust,ignore
//! use shop_data::{FetchClient, ReqwestTransport};
//! use std::time::Duration;
//!
//! let client = FetchClient::new(ReqwestTransport::new(Duration::from_secs(10))?)
//!     .with_default_header("Accept", "application/json");
//!
//! let categories: Vec<String> = client
//!     .get("https://fakestoreapi.com/products/categories")
//!     .send()
//!     .await?
//!     .error_for_status()?
//!     .json()?;
//! ```

mod error;
mod request;
mod response;
mod transport;

use std::sync::Arc;

pub use error::FetchError;
pub use http::Method;
pub use request::RequestBuilder;
pub use response::Response;
pub use transport::{ReqwestTransport, Transport};

/// HTTP client for making outbound requests.
#[derive(Clone)]
pub struct FetchClient {
    transport: Arc<dyn Transport>,
    default_headers: Vec<(String, String)>,
}

impl std::fmt::Debug for FetchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchClient")
            .field("default_headers", &self.default_headers)
            .finish_non_exhaustive()
    }
}

impl FetchClient {
    /// Create a client that sends through `transport`.
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Arc::new(transport),
            default_headers: Vec::new(),
        }
    }

    /// Add a default header that will be included in all requests.
    pub fn with_default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.push((key.into(), value.into()));
        self
    }

    /// Create a GET request.
    pub fn get(&self, url: impl Into<String>) -> ClientRequestBuilder {
        let mut builder = RequestBuilder::new(Method::GET, url);
        for (key, value) in &self.default_headers {
            builder = builder.header(key.clone(), value.clone());
        }

        ClientRequestBuilder {
            builder,
            transport: Arc::clone(&self.transport),
        }
    }
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder {
    builder: RequestBuilder,
    transport: Arc<dyn Transport>,
}

impl ClientRequestBuilder {
    /// Send the request and return the buffered response.
    pub async fn send(self) -> Result<Response, FetchError> {
        self.transport.send(self.builder).await
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FetchClient, FetchError, Method, Response, Transport};
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recording {
        sent: Mutex<Vec<RequestBuilder>>,
    }

    #[async_trait]
    impl Transport for Recording {
        async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
            self.sent.lock().unwrap().push(request);
            Response::from_parts(200, br#"["electronics"]"#.to_vec())
        }
    }

    #[tokio::test]
    async fn test_default_headers_are_applied() {
        let recording = Arc::new(Recording::default());
        let client = FetchClient::new(Arc::clone(&recording))
            .with_default_header("Accept", "application/json")
            .with_default_header("X-Trace", "1");

        let categories: Vec<String> = client
            .get("https://example.test/products/categories")
            .send()
            .await
            .unwrap()
            .json()
            .unwrap();
        assert_eq!(categories, vec!["electronics"]);

        let sent = recording.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].method(), &Method::GET);
        assert_eq!(sent[0].url(), "https://example.test/products/categories");
        assert_eq!(sent[0].get_header("accept"), Some("application/json"));
        assert_eq!(sent[0].get_header("x-trace"), Some("1"));
    }
}
