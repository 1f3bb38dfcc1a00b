//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in storefront domain operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product id text is not a valid id.
    #[error("Invalid product id: {0}")]
    InvalidProductId(String),

    /// Price is negative, not finite, or out of range.
    #[error("Invalid price: {0}")]
    InvalidPrice(f64),

    /// Cache error.
    #[error("Cache error: {0}")]
    CacheError(String),
}

impl From<shop_cache::CacheError> for CommerceError {
    fn from(e: shop_cache::CacheError) -> Self {
        CommerceError::CacheError(e.to_string())
    }
}
