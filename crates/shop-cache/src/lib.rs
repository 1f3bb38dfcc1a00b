//! Pluggable key-value storage for the storefront.
//!
//! Stands in for browser local storage: a string-keyed byte store with a
//! typed JSON wrapper on top. Backends are swappable so the cart can persist
//! to disk in the CLI and to memory in tests.
//!
//! # Example
//!
//! ```rust
//! use shop_cache::Cache;
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Item {
//!     id: u64,
//!     quantity: u32,
//! }
//!
//! let cache = Cache::memory();
//! cache.set("cart", &vec![Item { id: 1, quantity: 2 }]).unwrap();
//!
//! let items: Option<Vec<Item>> = cache.get("cart").unwrap();
//! assert_eq!(items.unwrap()[0].quantity, 2);
//! ```

mod backend;
mod error;
mod kv;

pub use backend::{FileBackend, KvBackend, MemoryBackend};
pub use error::CacheError;
pub use kv::Cache;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileBackend, KvBackend, MemoryBackend};
}
