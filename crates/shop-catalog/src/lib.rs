//! Catalog query layer.
//!
//! Fetches products from the remote catalog API and shapes them for
//! display: single products, categories, a concurrent multi-category
//! fan-out with de-duplication, and sorted listing loads that ignore
//! superseded responses.
//!
//! # Example
//!
//! ```rust,ignore
//! use shop_catalog::{CatalogClient, CatalogConfig, ListingLoader, DEFAULT_BASE_URL};
//! use shop_commerce::catalog::ListingQuery;
//!
//! let client = CatalogClient::new(CatalogConfig::new(DEFAULT_BASE_URL)?)?;
//! let loader = ListingLoader::new(client);
//!
//! let query = ListingQuery::from_query_string("categories=jewelery,electronics&sort=price-asc");
//! if let Some(listing) = loader.load(&query).await {
//!     if listing.is_degraded() {
//!         eprintln!("some categories failed to load");
//!     }
//!     for product in listing.value() {
//!         println!("{} {}", product.title, product.price);
//!     }
//! }
//! ```

mod client;
mod config;
mod error;
mod fetched;
mod guard;
mod loader;

pub use client::CatalogClient;
pub use config::{CatalogConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::CatalogError;
pub use fetched::{FailureKind, FetchFailure, Fetched};
pub use guard::{RequestGuard, RequestTicket};
pub use loader::ListingLoader;

pub use shop_commerce::catalog::{sort_products, SortOption};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        CatalogClient, CatalogConfig, FailureKind, Fetched, ListingLoader, RequestGuard,
    };
}
