//! Shopping cart module.
//!
//! Contains the cart collection, the persisted cart store, and the scope
//! through which UI code reaches the store.

mod cart;
mod scope;
mod store;

pub use cart::{Cart, CartEvent, CartItem};
pub use scope::{provide_cart, try_use_cart, use_cart, CartScope, SharedCart};
pub use store::{CartListener, CartStore, CART_STORAGE_KEY};
