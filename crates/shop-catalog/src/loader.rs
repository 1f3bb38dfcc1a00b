//! Listing loads driven by URL state.

use shop_commerce::catalog::{sort_products, ListingQuery, Product};
use tracing::debug;

use crate::{CatalogClient, Fetched, RequestGuard};

/// Loads the product listing for a [`ListingQuery`], discarding results
/// that a newer load has superseded.
#[derive(Debug, Clone)]
pub struct ListingLoader {
    client: CatalogClient,
    guard: RequestGuard,
}

impl ListingLoader {
    pub fn new(client: CatalogClient) -> Self {
        Self {
            client,
            guard: RequestGuard::new(),
        }
    }

    pub fn client(&self) -> &CatalogClient {
        &self.client
    }

    pub fn guard(&self) -> &RequestGuard {
        &self.guard
    }

    /// Fetch the query's categories and sort by its sort option.
    ///
    /// Returns `None` when another `load` started before this one resolved.
    pub async fn load(&self, query: &ListingQuery) -> Option<Fetched<Vec<Product>>> {
        let ticket = self.guard.begin();
        let fetched = self
            .client
            .get_products_by_multiple_categories(query.categories())
            .await;

        if !ticket.is_current() {
            debug!(token = ticket.token(), "discarding stale listing");
            return None;
        }
        Some(fetched.map(|products| sort_products(&products, query.sort())))
    }
}
