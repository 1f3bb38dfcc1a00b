//! Sorting and merging of product listings.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;

use icu_collator::{Collator, CollatorOptions, Strength};
use icu_locid::locale;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::catalog::Product;

/// Sort options for product listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    /// Keep the order the catalog returned.
    #[default]
    Default,
    /// Sort by price, low to high.
    PriceAsc,
    /// Sort by price, high to low.
    PriceDesc,
    /// Sort by title A-Z.
    NameAsc,
    /// Sort by title Z-A.
    NameDesc,
}

impl SortOption {
    /// All options in menu order.
    pub const ALL: [SortOption; 5] = [
        SortOption::Default,
        SortOption::PriceAsc,
        SortOption::PriceDesc,
        SortOption::NameAsc,
        SortOption::NameDesc,
    ];

    /// Parse a URL token. Unknown tokens fall back to `Default`.
    pub fn parse(token: &str) -> Self {
        match token {
            "price-asc" => Self::PriceAsc,
            "price-desc" => Self::PriceDesc,
            "name-asc" => Self::NameAsc,
            "name-desc" => Self::NameDesc,
            _ => Self::Default,
        }
    }

    /// URL token for this option.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
            Self::NameAsc => "name-asc",
            Self::NameDesc => "name-desc",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::PriceAsc => "Price: Low to High",
            Self::PriceDesc => "Price: High to Low",
            Self::NameAsc => "Name: A to Z",
            Self::NameDesc => "Name: Z to A",
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Return a sorted copy of `products`; the input is left untouched.
///
/// All orderings are stable, so ties keep their input order.
pub fn sort_products(products: &[Product], option: SortOption) -> Vec<Product> {
    let mut sorted = products.to_vec();
    match option {
        SortOption::Default => {}
        SortOption::PriceAsc => sorted.sort_by_key(|p| p.price.amount_cents),
        SortOption::PriceDesc => {
            sorted.sort_by(|a, b| b.price.amount_cents.cmp(&a.price.amount_cents))
        }
        SortOption::NameAsc => {
            let collator = title_collator();
            sorted.sort_by(|a, b| collate(collator.as_ref(), &a.title, &b.title))
        }
        SortOption::NameDesc => {
            let collator = title_collator();
            sorted.sort_by(|a, b| collate(collator.as_ref(), &b.title, &a.title))
        }
    }
    sorted
}

/// English collation: base letters first, then accents, then case.
fn title_collator() -> Option<Collator> {
    let mut options = CollatorOptions::new();
    options.strength = Some(Strength::Tertiary);
    match Collator::try_new(&locale!("en").into(), options) {
        Ok(collator) => Some(collator),
        Err(e) => {
            warn!(error = ?e, "title collation unavailable, comparing case-folded text");
            None
        }
    }
}

/// Exact text breaks collation ties so the order is total.
fn collate(collator: Option<&Collator>, a: &str, b: &str) -> Ordering {
    let primary = match collator {
        Some(collator) => collator.compare(a, b),
        None => a
            .chars()
            .flat_map(char::to_lowercase)
            .cmp(b.chars().flat_map(char::to_lowercase)),
    };
    primary.then_with(|| a.cmp(b))
}

/// Drop repeated product ids, keeping the first occurrence.
pub fn dedupe_by_id(products: Vec<Product>) -> Vec<Product> {
    let mut seen = HashSet::with_capacity(products.len());
    products
        .into_iter()
        .filter(|p| seen.insert(p.id))
        .collect()
}
