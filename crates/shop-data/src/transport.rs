//! Pluggable request transport.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::{FetchError, RequestBuilder, Response};

/// Sends a built request and buffers the response.
///
/// The HTTP stack is injected through this trait so callers can swap in a
/// fake in tests.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        (**self).send(request).await
    }
}

/// Default transport backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("shop/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        debug!(method = %request.method, url = %request.url, "sending request");

        let mut outbound = self.client.request(request.method, &request.url);
        for (key, value) in &request.headers {
            outbound = outbound.header(key.as_str(), value.as_str());
        }

        let response = outbound.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        debug!(status = status.as_u16(), bytes = body.len(), "received response");
        Ok(Response::new(status, headers, body.to_vec()))
    }
}
