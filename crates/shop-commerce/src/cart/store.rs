//! The persisted cart store.

use shop_cache::Cache;
use tracing::{debug, warn};

use crate::cart::{Cart, CartEvent, CartItem};
use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;

/// Storage key the cart snapshot lives under.
pub const CART_STORAGE_KEY: &str = "cart";

/// Receives cart notifications.
pub trait CartListener {
    fn on_event(&self, event: &CartEvent);
}

impl<F> CartListener for F
where
    F: Fn(&CartEvent),
{
    fn on_event(&self, event: &CartEvent) {
        self(event)
    }
}

/// Authoritative cart state, persisted after every mutation.
///
/// All reads and writes go through the operations below; the collection
/// itself is never handed out mutably.
pub struct CartStore {
    cart: Cart,
    cache: Cache,
    key: String,
    listeners: Vec<Box<dyn CartListener>>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &self.cart)
            .field("key", &self.key)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl CartStore {
    /// Open the store, rehydrating the snapshot saved under [`CART_STORAGE_KEY`].
    pub fn open(cache: Cache) -> Self {
        Self::open_with_key(cache, CART_STORAGE_KEY)
    }

    /// Open the store using a custom storage key.
    ///
    /// A missing snapshot yields an empty cart. So does an unreadable one:
    /// a corrupt snapshot means "no saved cart", not a startup failure.
    pub fn open_with_key(cache: Cache, key: impl Into<String>) -> Self {
        let key = key.into();
        let cart = match cache.get::<Vec<CartItem>>(&key) {
            Ok(Some(items)) => {
                let cart = Cart::from_items(items);
                debug!(key = %key, items = cart.item_count(), "rehydrated cart");
                cart
            }
            Ok(None) => Cart::new(),
            Err(e) => {
                warn!(key = %key, error = %e, "discarding unreadable cart snapshot");
                Cart::new()
            }
        };

        Self {
            cart,
            cache,
            key,
            listeners: Vec::new(),
        }
    }

    /// Register a listener for cart events.
    pub fn subscribe(&mut self, listener: impl CartListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Add one unit of `product`: a new line at quantity 1, or +1 on the
    /// existing line.
    pub fn add_to_cart(&mut self, product: &Product) -> CartEvent {
        let event = self.cart.add(product);
        debug!(product_id = %product.id, "add to cart");
        self.commit();
        self.emit(&event);
        event
    }

    /// Remove the line for `id`. Emits `Removed` only if it was present.
    pub fn remove_from_cart(&mut self, id: ProductId) -> Option<CartEvent> {
        let removed = self.cart.remove(id);
        debug!(product_id = %id, removed, "remove from cart");
        self.commit();
        if !removed {
            return None;
        }
        let event = CartEvent::Removed { id };
        self.emit(&event);
        Some(event)
    }

    /// +1 on the line for `id`; no-op if absent.
    pub fn increase_qty(&mut self, id: ProductId) -> bool {
        let found = self.cart.increase(id);
        debug!(product_id = %id, found, "increase quantity");
        self.commit();
        found
    }

    /// -1 on the line for `id`, dropping the line at zero; no-op if absent.
    pub fn decrease_qty(&mut self, id: ProductId) -> bool {
        let found = self.cart.decrease(id);
        debug!(product_id = %id, found, "decrease quantity");
        self.commit();
        found
    }

    /// Remove every line.
    pub fn clear_cart(&mut self) -> CartEvent {
        self.cart.clear();
        debug!("clear cart");
        self.commit();
        let event = CartEvent::Cleared;
        self.emit(&event);
        event
    }

    /// Sum of price times quantity, computed from the current lines.
    pub fn get_total_price(&self) -> Money {
        self.cart.total_price()
    }

    /// Number of distinct lines (not units).
    pub fn item_count(&self) -> usize {
        self.cart.item_count()
    }

    /// Total units across all lines.
    pub fn unit_count(&self) -> u64 {
        self.cart.unit_count()
    }

    pub fn is_in_cart(&self, id: ProductId) -> bool {
        self.cart.contains(id)
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Lines in the order they were first added.
    pub fn items(&self) -> &[CartItem] {
        self.cart.items()
    }

    /// Read-only view of the collection.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Write the full snapshot to storage.
    pub fn persist(&self) -> Result<(), CommerceError> {
        self.cache.set(&self.key, self.cart.items())?;
        Ok(())
    }

    // Mutations never fail on storage trouble; the in-memory cart stays
    // authoritative for the session.
    fn commit(&self) {
        if let Err(e) = self.persist() {
            warn!(key = %self.key, error = %e, "failed to persist cart");
        }
    }

    fn emit(&self, event: &CartEvent) {
        for listener in &self.listeners {
            listener.on_event(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Rating;
    use crate::money::Currency;
    use shop_cache::{CacheError, KvBackend, MemoryBackend};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn product(id: u64, cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {}", id),
            price: Money::new(cents, Currency::USD),
            description: String::new(),
            category: "jewelery".to_string(),
            image: String::new(),
            rating: Rating::default(),
        }
    }

    fn saved_items(backend: &MemoryBackend) -> Vec<CartItem> {
        let bytes = backend.get(CART_STORAGE_KEY).unwrap().unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_every_mutation_persists() {
        let backend = MemoryBackend::new();
        let mut store = CartStore::open(Cache::new(backend.clone()));
        let p = product(1, 1000);

        store.add_to_cart(&p);
        assert_eq!(saved_items(&backend)[0].quantity, 1);

        store.increase_qty(p.id);
        assert_eq!(saved_items(&backend)[0].quantity, 2);

        store.decrease_qty(p.id);
        store.decrease_qty(p.id);
        assert!(saved_items(&backend).is_empty());

        store.add_to_cart(&p);
        store.clear_cart();
        assert!(saved_items(&backend).is_empty());
    }

    #[test]
    fn test_rehydrates_previous_session() {
        let backend = MemoryBackend::new();
        {
            let mut store = CartStore::open(Cache::new(backend.clone()));
            store.add_to_cart(&product(1, 1000));
            store.add_to_cart(&product(1, 1000));
            store.add_to_cart(&product(2, 500));
        }

        let store = CartStore::open(Cache::new(backend));
        assert_eq!(store.item_count(), 2);
        assert_eq!(store.get_total_price(), Money::new(2500, Currency::USD));
        assert!(store.is_in_cart(ProductId::new(2)));
    }

    #[test]
    fn test_corrupt_snapshot_starts_empty() {
        let cache = Cache::memory();
        cache.set_raw(CART_STORAGE_KEY, b"{\"not\": \"a cart\"").unwrap();

        let mut store = CartStore::open(cache.clone());
        assert!(store.is_empty());

        store.add_to_cart(&product(3, 300));
        let items: Vec<CartItem> = cache.get(CART_STORAGE_KEY).unwrap().unwrap();
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_events_and_listeners() {
        let seen: Rc<RefCell<Vec<CartEvent>>> = Rc::default();
        let mut store = CartStore::open(Cache::memory());
        let sink = Rc::clone(&seen);
        store.subscribe(move |event: &CartEvent| sink.borrow_mut().push(event.clone()));

        let p = product(5, 100);
        store.add_to_cart(&p);
        store.add_to_cart(&p);
        assert_eq!(store.remove_from_cart(ProductId::new(42)), None);
        assert_eq!(
            store.remove_from_cart(p.id),
            Some(CartEvent::Removed { id: p.id })
        );
        store.clear_cart();

        let seen = seen.borrow();
        assert_eq!(seen.len(), 4);
        assert!(matches!(seen[0], CartEvent::Added { .. }));
        assert_eq!(
            seen[1],
            CartEvent::QuantityIncreased {
                id: p.id,
                quantity: 2
            }
        );
        assert_eq!(seen[2], CartEvent::Removed { id: p.id });
        assert_eq!(seen[3], CartEvent::Cleared);
        assert_eq!(seen[1].message(), "quantity increased!");
    }

    #[test]
    fn test_total_and_item_count_example() {
        let mut store = CartStore::open(Cache::memory());
        let ten = product(1, 1000);
        let five = product(2, 500);
        store.add_to_cart(&ten);
        store.increase_qty(ten.id);
        store.add_to_cart(&five);

        assert_eq!(store.get_total_price().amount_cents, 2500);
        assert_eq!(store.item_count(), 2);
        assert_eq!(store.unit_count(), 3);
    }

    struct FailingBackend;

    impl KvBackend for FailingBackend {
        fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, CacheError> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &[u8]) -> Result<(), CacheError> {
            Err(CacheError::StoreError("quota exceeded".into()))
        }

        fn delete(&self, _key: &str) -> Result<(), CacheError> {
            Ok(())
        }

        fn keys(&self) -> Result<Vec<String>, CacheError> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_storage_failure_does_not_fail_mutation() {
        let mut store = CartStore::open(Cache::new(FailingBackend));
        store.add_to_cart(&product(1, 100));

        assert_eq!(store.item_count(), 1);
        assert!(matches!(store.persist(), Err(CommerceError::CacheError(_))));
    }

    #[test]
    fn test_custom_key() {
        let backend = MemoryBackend::new();
        let key = shop_cache::cache_key!(CART_STORAGE_KEY, "guest");
        let mut store = CartStore::open_with_key(Cache::new(backend.clone()), key);
        store.add_to_cart(&product(1, 100));
        assert!(backend.exists("cart:guest").unwrap());
        assert!(!backend.exists(CART_STORAGE_KEY).unwrap());
    }
}
