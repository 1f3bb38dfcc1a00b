//! Storefront domain types and logic.
//!
//! - **Catalog**: products as served by the remote catalog API, sort options,
//!   and the URL-driven listing state (selected categories + sort)
//! - **Cart**: the cart collection and the persisted [`cart::CartStore`]
//!
//! # Example
//!
//! ```rust,ignore
//! use shop_commerce::prelude::*;
//! use shop_cache::Cache;
//!
//! let mut store = CartStore::open(Cache::open_dir(".shop")?);
//! store.add_to_cart(&product);
//! store.add_to_cart(&product);
//!
//! assert_eq!(store.item_count(), 1);
//! println!("Total: {}", store.get_total_price());
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;

pub use error::CommerceError;
pub use ids::ProductId;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::ProductId;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{
        category_label, dedupe_by_id, sort_products, ListingQuery, Product, Rating, SortOption,
    };

    // Cart
    pub use crate::cart::{
        provide_cart, try_use_cart, use_cart, Cart, CartEvent, CartItem, CartListener, CartScope,
        CartStore, SharedCart, CART_STORAGE_KEY,
    };
}
