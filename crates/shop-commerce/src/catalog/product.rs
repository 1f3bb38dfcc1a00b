//! Product types.

use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A product as served by the catalog API.
///
/// Products are fetched on demand and never mutated locally.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product title.
    pub title: String,
    /// Unit price.
    #[serde(with = "crate::money::decimal")]
    pub price: Money,
    /// Long-form description.
    #[serde(default)]
    pub description: String,
    /// Category name, e.g. "electronics".
    pub category: String,
    /// Image URL.
    #[serde(default)]
    pub image: String,
    /// Customer rating summary.
    #[serde(default)]
    pub rating: Rating,
}

impl Product {
    /// Display label for the product's category.
    pub fn category_label(&self) -> String {
        category_label(&self.category)
    }
}

/// Aggregate customer rating.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Rating {
    /// Average score out of 5.
    pub rate: f64,
    /// Number of ratings.
    pub count: u32,
}

/// Capitalize the first character of a category name for display
/// ("men's clothing" -> "Men's clothing").
pub fn category_label(category: &str) -> String {
    let mut chars = category.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
