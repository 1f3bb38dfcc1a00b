//! Product catalog module.
//!
//! Contains the remote product shape, sorting, and the URL-driven listing
//! state that decides what a product listing shows.

mod listing;
mod product;
mod sort;

pub use listing::ListingQuery;
pub use product::{category_label, Product, Rating};
pub use sort::{dedupe_by_id, sort_products, SortOption};
