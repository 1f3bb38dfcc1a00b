//! Catalog setup errors.
//!
//! Only construction can fail. Once a client exists, request failures are
//! reported through [`crate::Fetched`] instead.

use shop_data::FetchError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    /// The configured base URL is unusable.
    #[error("Invalid catalog base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// The HTTP transport could not be built.
    #[error("Transport setup failed: {0}")]
    Transport(#[from] FetchError),
}
