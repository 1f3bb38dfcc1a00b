//! URL-driven listing state.
//!
//! The query string is the single source of truth for what a product
//! listing shows: `categories` (comma-separated) and `sort` (a
//! [`SortOption`] token). Nothing here is stored; callers re-derive the
//! state from the URL on every render and write it back after a change.

use url::form_urlencoded;

use crate::catalog::SortOption;

const CATEGORIES_PARAM: &str = "categories";
const SORT_PARAM: &str = "sort";

/// Selected categories and sort order, as encoded in a URL query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingQuery {
    categories: Vec<String>,
    sort: SortOption,
}

impl ListingQuery {
    /// Build a query directly.
    pub fn new(categories: Vec<String>, sort: SortOption) -> Self {
        let mut query = Self {
            categories: Vec::with_capacity(categories.len()),
            sort,
        };
        for category in categories {
            if !category.is_empty() && !query.is_selected(&category) {
                query.categories.push(category);
            }
        }
        query
    }

    /// Parse a query string such as `categories=jewelery,electronics&sort=price-asc`.
    ///
    /// A leading `?` is accepted. Absent or empty `categories` means no
    /// filter; absent or unknown `sort` means [`SortOption::Default`].
    /// A repeated parameter keeps its first value.
    pub fn from_query_string(qs: &str) -> Self {
        let qs = qs.strip_prefix('?').unwrap_or(qs);
        let mut categories: Option<Vec<String>> = None;
        let mut sort: Option<SortOption> = None;

        for (key, value) in form_urlencoded::parse(qs.as_bytes()) {
            match key.as_ref() {
                CATEGORIES_PARAM if categories.is_none() => {
                    categories = Some(
                        value
                            .split(',')
                            .filter(|c| !c.is_empty())
                            .map(str::to_string)
                            .collect(),
                    );
                }
                SORT_PARAM if sort.is_none() => sort = Some(SortOption::parse(&value)),
                _ => {}
            }
        }

        Self::new(categories.unwrap_or_default(), sort.unwrap_or_default())
    }

    /// Encode back into a query string (without the leading `?`).
    ///
    /// Parameters holding their default value are omitted, so an unfiltered
    /// default listing encodes as the empty string.
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if !self.categories.is_empty() {
            serializer.append_pair(CATEGORIES_PARAM, &self.categories.join(","));
        }
        if self.sort != SortOption::Default {
            serializer.append_pair(SORT_PARAM, self.sort.as_str());
        }
        serializer.finish()
    }

    /// Selected categories, in selection order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn sort(&self) -> SortOption {
        self.sort
    }

    /// Whether `category` is currently selected.
    pub fn is_selected(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }

    /// Whether any category filter is active.
    pub fn has_filters(&self) -> bool {
        !self.categories.is_empty()
    }

    /// Select `category` if it isn't, deselect it if it is.
    pub fn toggle_category(&mut self, category: &str) {
        if self.is_selected(category) {
            self.categories.retain(|c| c != category);
        } else if !category.is_empty() {
            self.categories.push(category.to_string());
        }
    }

    /// Drop every category filter, keeping the sort.
    pub fn clear_categories(&mut self) {
        self.categories.clear();
    }

    pub fn set_sort(&mut self, sort: SortOption) {
        self.sort = sort;
    }
}
