//! Scoped access to the shared cart.
//!
//! A caller provides a [`CartStore`] for the duration of a scope with
//! [`provide_cart`]; code running inside reaches it with [`use_cart`].
//! Reaching for the cart with nothing provided is a programming error and
//! panics instead of silently handing back an empty cart.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::cart::CartStore;

/// Handle to the cart shared by everything in a scope.
pub type SharedCart = Rc<RefCell<CartStore>>;

thread_local! {
    // Live scopes, innermost last.
    static SCOPES: RefCell<Vec<(u64, SharedCart)>> = const { RefCell::new(Vec::new()) };
    static NEXT_SCOPE: Cell<u64> = const { Cell::new(0) };
}

/// Guard returned by [`provide_cart`]. Dropping it ends the scope.
///
/// Guards may drop in any order: each one removes only its own cart, so
/// the innermost scope still alive is always the one [`use_cart`] sees.
#[must_use = "the cart is only provided while the scope guard is alive"]
pub struct CartScope {
    id: u64,
    cart: SharedCart,
}

impl CartScope {
    /// The cart this scope provides.
    pub fn cart(&self) -> SharedCart {
        Rc::clone(&self.cart)
    }
}

impl Drop for CartScope {
    fn drop(&mut self) {
        let id = self.id;
        SCOPES.with(|scopes| scopes.borrow_mut().retain(|(scope, _)| *scope != id));
    }
}

/// Provide `store` to the current thread until the returned guard drops.
pub fn provide_cart(store: CartStore) -> CartScope {
    let cart: SharedCart = Rc::new(RefCell::new(store));
    let id = NEXT_SCOPE.with(|next| {
        let id = next.get();
        next.set(id.wrapping_add(1));
        id
    });
    SCOPES.with(|scopes| scopes.borrow_mut().push((id, Rc::clone(&cart))));
    CartScope { id, cart }
}

/// The cart provided by the innermost live scope, if any.
pub fn try_use_cart() -> Option<SharedCart> {
    SCOPES.with(|scopes| scopes.borrow().last().map(|(_, cart)| Rc::clone(cart)))
}

/// The cart provided by the innermost live scope.
///
/// # Panics
///
/// Panics with `CartProvider missing` when called outside any scope.
pub fn use_cart() -> SharedCart {
    match try_use_cart() {
        Some(cart) => cart,
        None => panic!("CartProvider missing: use_cart called outside provide_cart"),
    }
}
