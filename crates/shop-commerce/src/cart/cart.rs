//! Cart and line item types.

use std::collections::HashSet;

use crate::catalog::Product;
use crate::ids::ProductId;
use crate::money::{decimal::CATALOG_CURRENCY, Money};
use serde::{Deserialize, Serialize};

/// A line in the cart: one product and how many units of it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    /// Product being purchased; unique within a cart.
    pub id: ProductId,
    /// Product title (denormalized for display).
    pub title: String,
    /// Unit price.
    #[serde(with = "crate::money::decimal")]
    pub price: Money,
    /// Product image URL.
    #[serde(default)]
    pub image: String,
    /// Quantity, always at least 1 while the item is in a cart.
    pub quantity: u32,
}

impl CartItem {
    /// A fresh line for `product` with quantity 1.
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            price: product.price,
            image: product.image.clone(),
            quantity: 1,
        }
    }

    /// Price times quantity.
    pub fn line_total(&self) -> Money {
        self.price.saturating_mul(self.quantity)
    }
}

/// Something that happened to the cart, for notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// A new line was appended.
    Added { id: ProductId, title: String },
    /// An existing line went up by one through `add`.
    QuantityIncreased { id: ProductId, quantity: u32 },
    /// A line was removed explicitly.
    Removed { id: ProductId },
    /// Every line was removed.
    Cleared,
}

impl CartEvent {
    /// Short user-facing message for this event.
    pub fn message(&self) -> &'static str {
        match self {
            CartEvent::Added { .. } => "added to cart!",
            CartEvent::QuantityIncreased { .. } => "quantity increased!",
            CartEvent::Removed { .. } => "removed from cart!",
            CartEvent::Cleared => "Cart cleared!",
        }
    }
}

/// The cart collection.
///
/// Lines keep the order in which products were first added and never hold a
/// zero quantity or a repeated id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from previously saved lines.
    ///
    /// Lines with quantity 0 are dropped and repeated ids keep their first
    /// line, so a hand-edited or stale snapshot still yields a valid cart.
    pub fn from_items(items: Vec<CartItem>) -> Self {
        let mut seen = HashSet::with_capacity(items.len());
        let items = items
            .into_iter()
            .filter(|item| item.quantity > 0 && seen.insert(item.id))
            .collect();
        Self { items }
    }

    /// Add one unit of `product`.
    pub fn add(&mut self, product: &Product) -> CartEvent {
        if let Some(existing) = self.items.iter_mut().find(|i| i.id == product.id) {
            existing.quantity = existing.quantity.saturating_add(1);
            return CartEvent::QuantityIncreased {
                id: existing.id,
                quantity: existing.quantity,
            };
        }

        self.items.push(CartItem::from_product(product));
        CartEvent::Added {
            id: product.id,
            title: product.title.clone(),
        }
    }

    /// Remove the line for `id`. Returns whether a line was found.
    pub fn remove(&mut self, id: ProductId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| i.id != id);
        self.items.len() < len_before
    }

    /// Add one unit to the line for `id`. Returns whether a line was found.
    pub fn increase(&mut self, id: ProductId) -> bool {
        match self.items.iter_mut().find(|i| i.id == id) {
            Some(item) => {
                item.quantity = item.quantity.saturating_add(1);
                true
            }
            None => false,
        }
    }

    /// Take one unit off the line for `id`, removing the line when it
    /// reaches zero. Returns whether a line was found.
    pub fn decrease(&mut self, id: ProductId) -> bool {
        let Some(index) = self.items.iter().position(|i| i.id == id) else {
            return false;
        };
        if self.items[index].quantity <= 1 {
            self.items.remove(index);
        } else {
            self.items[index].quantity -= 1;
        }
        true
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of price times quantity over all lines; zero when empty.
    pub fn total_price(&self) -> Money {
        let currency = self
            .items
            .first()
            .map_or(CATALOG_CURRENCY, |i| i.price.currency);
        self.items
            .iter()
            .fold(Money::zero(currency), |acc, i| acc.saturating_add(&i.line_total()))
    }

    /// Number of distinct lines.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Total units across all lines.
    pub fn unit_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Whether a line for `id` exists.
    pub fn contains(&self, id: ProductId) -> bool {
        self.items.iter().any(|i| i.id == id)
    }

    /// Get the line for `id`.
    pub fn get(&self, id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Lines in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Rating;
    use crate::money::Currency;

    fn product(id: u64, cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {}", id),
            price: Money::new(cents, Currency::USD),
            description: String::new(),
            category: "electronics".to_string(),
            image: format!("https://img.example/{}.jpg", id),
            rating: Rating::default(),
        }
    }

    #[test]
    fn test_add_twice_gives_one_line_with_quantity_two() {
        let mut cart = Cart::new();
        let p = product(1, 1000);

        assert!(matches!(cart.add(&p), CartEvent::Added { .. }));
        assert_eq!(
            cart.add(&p),
            CartEvent::QuantityIncreased {
                id: p.id,
                quantity: 2
            }
        );
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.get(p.id).unwrap().quantity, 2);
    }

    #[test]
    fn test_insertion_order_is_first_add_order() {
        let mut cart = Cart::new();
        cart.add(&product(3, 1));
        cart.add(&product(1, 1));
        cart.add(&product(3, 1));
        let ids: Vec<u64> = cart.items().iter().map(|i| i.id.get()).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn test_decrease_from_one_removes_line() {
        let mut cart = Cart::new();
        let p = product(7, 500);
        cart.add(&p);

        assert!(cart.decrease(p.id));
        assert!(!cart.contains(p.id));
        assert!(cart.is_empty());
        assert!(!cart.decrease(p.id));
    }

    #[test]
    fn test_increase_and_decrease() {
        let mut cart = Cart::new();
        let p = product(2, 250);
        cart.add(&p);
        assert!(cart.increase(p.id));
        assert!(cart.increase(p.id));
        assert!(cart.decrease(p.id));
        assert_eq!(cart.get(p.id).unwrap().quantity, 2);
        assert!(!cart.increase(ProductId::new(99)));
    }

    #[test]
    fn test_totals_and_counts() {
        let mut cart = Cart::new();
        let a = product(1, 1000);
        let b = product(2, 500);
        cart.add(&a);
        cart.add(&a);
        cart.add(&b);

        assert_eq!(cart.total_price(), Money::new(2500, Currency::USD));
        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.unit_count(), 3);
        assert_eq!(cart.get(a.id).unwrap().line_total().amount_cents, 2000);
    }

    #[test]
    fn test_empty_cart_total_is_zero() {
        assert!(Cart::new().total_price().is_zero());
    }

    #[test]
    fn test_remove_reports_presence() {
        let mut cart = Cart::new();
        cart.add(&product(1, 100));
        assert!(!cart.remove(ProductId::new(2)));
        assert!(cart.remove(ProductId::new(1)));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_from_items_sanitizes_snapshot() {
        let mut zero = CartItem::from_product(&product(1, 100));
        zero.quantity = 0;
        let first = CartItem::from_product(&product(2, 100));
        let mut duplicate = first.clone();
        duplicate.quantity = 9;

        let cart = Cart::from_items(vec![zero, first, duplicate]);
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.get(ProductId::new(2)).unwrap().quantity, 1);
    }

    #[test]
    fn test_cart_item_snapshot_shape() {
        let item: CartItem = serde_json::from_str(
            r#"{"id":4,"title":"Mens Casual Slim Fit","price":15.99,"description":"extra",
                "category":"men's clothing","image":"i.jpg","rating":{"rate":2.1,"count":430},
                "quantity":3}"#,
        )
        .unwrap();
        assert_eq!(item.price.amount_cents, 1599);
        assert_eq!(item.quantity, 3);

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["price"], serde_json::json!(15.99));
        assert_eq!(json["quantity"], serde_json::json!(3));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Op {
            Add(u64),
            Remove(u64),
            Increase(u64),
            Decrease(u64),
        }

        fn op() -> impl Strategy<Value = Op> {
            prop_oneof![
                (1u64..6).prop_map(Op::Add),
                (1u64..6).prop_map(Op::Remove),
                (1u64..6).prop_map(Op::Increase),
                (1u64..6).prop_map(Op::Decrease),
            ]
        }

        proptest! {
            /// Property: no sequence of operations leaves a zero quantity,
            /// a repeated id, or a total that disagrees with the lines.
            #[test]
            fn bookkeeping_invariants_hold(ops in prop::collection::vec(op(), 0..60)) {
                let mut cart = Cart::new();
                for op in ops {
                    match op {
                        Op::Add(id) => { cart.add(&product(id, id as i64 * 125)); }
                        Op::Remove(id) => { cart.remove(ProductId::new(id)); }
                        Op::Increase(id) => { cart.increase(ProductId::new(id)); }
                        Op::Decrease(id) => { cart.decrease(ProductId::new(id)); }
                    }
                }

                let mut ids = HashSet::new();
                let mut expected = 0i64;
                for item in cart.items() {
                    prop_assert!(item.quantity >= 1);
                    prop_assert!(ids.insert(item.id));
                    expected += item.price.amount_cents * i64::from(item.quantity);
                }
                prop_assert_eq!(cart.total_price().amount_cents, expected);
                prop_assert_eq!(cart.item_count(), ids.len());
            }
        }
    }
}
