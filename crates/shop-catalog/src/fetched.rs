//! Degraded-outcome wrapper for catalog reads.
//!
//! Catalog reads never fail outright: a broken request yields the empty
//! default. `Fetched` keeps the failures next to the value so "the category
//! really is empty" and "the request failed" stay distinguishable.

use std::fmt;

use serde::Serialize;

/// Why a request contributed nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "status", rename_all = "snake_case")]
pub enum FailureKind {
    /// Connection, DNS, TLS, or timeout trouble.
    Transport,
    /// Non-2xx response.
    Status(u16),
    /// The body was not the expected JSON.
    Decode,
    /// A 2xx response with no body.
    Empty,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Transport => f.write_str("transport error"),
            FailureKind::Status(status) => write!(f, "HTTP {}", status),
            FailureKind::Decode => f.write_str("undecodable response"),
            FailureKind::Empty => f.write_str("empty response"),
        }
    }
}

/// One request that degraded a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchFailure {
    /// The URL that was requested.
    pub endpoint: String,
    pub kind: FailureKind,
    /// Underlying error text, for logs.
    pub detail: String,
}

impl FetchFailure {
    pub fn new(endpoint: impl Into<String>, kind: FailureKind, detail: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            kind,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.endpoint, self.kind)?;
        if !self.detail.is_empty() {
            write!(f, ": {}", self.detail)?;
        }
        Ok(())
    }
}

/// A catalog read: the value plus every failure that degraded it.
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched<T> {
    value: T,
    failures: Vec<FetchFailure>,
}

impl<T> Fetched<T> {
    /// A clean result.
    pub fn ok(value: T) -> Self {
        Self {
            value,
            failures: Vec::new(),
        }
    }

    /// A fallback value standing in for a failed request.
    pub fn degraded(value: T, failure: FetchFailure) -> Self {
        Self {
            value,
            failures: vec![failure],
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn into_value(self) -> T {
        self.value
    }

    pub fn into_parts(self) -> (T, Vec<FetchFailure>) {
        (self.value, self.failures)
    }

    /// Whether any request behind this value failed.
    pub fn is_degraded(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn failures(&self) -> &[FetchFailure] {
        &self.failures
    }

    /// Transform the value, keeping the failures.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Fetched<U> {
        Fetched {
            value: f(self.value),
            failures: self.failures,
        }
    }

    pub(crate) fn with_failures(mut self, failures: impl IntoIterator<Item = FetchFailure>) -> Self {
        self.failures.extend(failures);
        self
    }
}

impl<T: Default> Fetched<T> {
    /// The empty default standing in for a failed request.
    pub fn failed(failure: FetchFailure) -> Self {
        Self::degraded(T::default(), failure)
    }
}
