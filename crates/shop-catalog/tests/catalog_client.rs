//! Catalog client behaviour against an in-process fake API.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use shop_catalog::{CatalogClient, CatalogConfig, FailureKind, ListingLoader};
use shop_commerce::catalog::{ListingQuery, SortOption};
use shop_commerce::ProductId;
use shop_data::{FetchError, RequestBuilder, Response, Transport};

const BASE: &str = "http://catalog.test";

#[derive(Clone)]
enum Route {
    Json(serde_json::Value),
    Raw(u16, &'static str),
    Unreachable,
}

/// Fake catalog API keyed by request path, with optional per-path latency.
#[derive(Default)]
struct FakeApi {
    routes: HashMap<String, Route>,
    delays: HashMap<String, Duration>,
    requested: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakeApi {
    fn route(mut self, path: &str, route: Route) -> Self {
        self.routes.insert(path.to_string(), route);
        self
    }

    fn delay(mut self, path: &str, delay: Duration) -> Self {
        self.delays.insert(path.to_string(), delay);
        self
    }
}

#[async_trait]
impl Transport for FakeApi {
    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        let path = request
            .url()
            .strip_prefix(BASE)
            .unwrap_or(request.url())
            .to_string();
        self.requested.lock().unwrap().push(path.clone());

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        let delay = self.delays.get(&path).copied().unwrap_or(Duration::from_millis(20));
        tokio::time::sleep(delay).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match self.routes.get(&path).cloned() {
            Some(Route::Json(body)) => Response::from_parts(200, body.to_string()),
            Some(Route::Raw(status, body)) => Response::from_parts(status, body),
            Some(Route::Unreachable) => Err(FetchError::RequestError("connection refused".into())),
            None => Response::from_parts(404, "Not Found"),
        }
    }
}

fn product(id: u64, title: &str, price: f64, category: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "price": price,
        "description": "",
        "category": category,
        "image": format!("https://img.test/{}.jpg", id),
        "rating": { "rate": 4.0, "count": 10 }
    })
}

fn client(api: &Arc<FakeApi>) -> CatalogClient {
    CatalogClient::with_transport(CatalogConfig::new(BASE).unwrap(), Arc::clone(api))
}

fn ids(products: &[shop_commerce::catalog::Product]) -> Vec<u64> {
    products.iter().map(|p| p.id.get()).collect()
}

fn storefront() -> FakeApi {
    FakeApi::default()
        .route(
            "/products",
            Route::Json(json!([
                product(1, "Backpack", 109.95, "x"),
                product(2, "T-Shirt", 22.3, "y"),
                product(3, "Ring", 9.99, "jewelery"),
            ])),
        )
        .route("/products/category/x", Route::Json(json!([product(1, "Backpack", 109.95, "x")])))
        .route(
            "/products/category/y",
            Route::Json(json!([
                product(1, "Backpack", 109.95, "x"),
                product(2, "T-Shirt", 22.3, "y"),
            ])),
        )
        .route(
            "/products/category/jewelery",
            Route::Json(json!([product(3, "Ring", 9.99, "jewelery")])),
        )
        .route(
            "/products/categories",
            Route::Json(json!(["electronics", "jewelery", "men's clothing"])),
        )
        .route("/products/1", Route::Json(product(1, "Backpack", 109.95, "x")))
        .route("/products/999", Route::Raw(200, ""))
        .route("/products/category/broken", Route::Raw(500, "boom"))
        .route("/products/category/offline", Route::Unreachable)
        .route("/products/category/garbled", Route::Raw(200, "{\"oops\""))
}

#[tokio::test]
async fn test_multiple_categories_dedupes_keeping_first() {
    let api = Arc::new(storefront());
    let fetched = client(&api)
        .get_products_by_multiple_categories(&["x", "y"])
        .await;

    assert!(!fetched.is_degraded());
    assert_eq!(ids(fetched.value()), vec![1, 2]);
}

#[tokio::test]
async fn test_empty_selection_matches_all_products() {
    let api = Arc::new(storefront());
    let client = client(&api);

    let none: [&str; 0] = [];
    let merged = client.get_products_by_multiple_categories(&none).await;
    let all = client.get_all_products().await;

    assert_eq!(merged, all);
    assert_eq!(ids(merged.value()), vec![1, 2, 3]);
}

#[tokio::test]
async fn test_failed_category_does_not_block_others() {
    let api = Arc::new(storefront());
    let fetched = client(&api)
        .get_products_by_multiple_categories(&["broken", "jewelery", "offline"])
        .await;

    assert_eq!(ids(fetched.value()), vec![3]);
    let kinds: Vec<FailureKind> = fetched.failures().iter().map(|f| f.kind).collect();
    assert_eq!(kinds, vec![FailureKind::Status(500), FailureKind::Transport]);
}

#[tokio::test]
async fn test_category_fetches_run_concurrently() {
    let api = Arc::new(
        storefront()
            .delay("/products/category/x", Duration::from_millis(100))
            .delay("/products/category/y", Duration::from_millis(100))
            .delay("/products/category/jewelery", Duration::from_millis(100)),
    );

    client(&api)
        .get_products_by_multiple_categories(&["x", "y", "jewelery"])
        .await;

    assert_eq!(api.max_in_flight.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_product_by_id() {
    let api = Arc::new(storefront());
    let client = client(&api);

    let found = client.get_product_by_id(ProductId::new(1)).await;
    assert_eq!(found.value().as_ref().map(|p| p.title.as_str()), Some("Backpack"));

    let missing = client.get_product_by_id(ProductId::new(999)).await;
    assert!(missing.value().is_none());
    assert_eq!(missing.failures()[0].kind, FailureKind::Empty);

    let unknown_route = client.get_product_by_id(ProductId::new(404)).await;
    assert!(unknown_route.value().is_none());
    assert_eq!(unknown_route.failures()[0].kind, FailureKind::Status(404));
}

#[tokio::test]
async fn test_categories_and_encoding() {
    let api = Arc::new(storefront());
    let client = client(&api);

    let categories = client.get_categories().await;
    assert_eq!(categories.value().len(), 3);

    let fetched = client.get_products_by_category("men's clothing").await;
    assert!(fetched.value().is_empty());
    assert!(fetched.is_degraded());
    assert!(api
        .requested
        .lock()
        .unwrap()
        .contains(&"/products/category/men's%20clothing".to_string()));
}

#[tokio::test]
async fn test_degraded_empty_is_distinguishable_from_empty() {
    let api = Arc::new(storefront().route("/products/category/empty", Route::Json(json!([]))));
    let client = client(&api);

    let empty = client.get_products_by_category("empty").await;
    assert!(empty.value().is_empty());
    assert!(!empty.is_degraded());

    let garbled = client.get_products_by_category("garbled").await;
    assert!(garbled.value().is_empty());
    assert_eq!(garbled.failures()[0].kind, FailureKind::Decode);
}

#[tokio::test]
async fn test_listing_loader_sorts() {
    let api = Arc::new(storefront());
    let loader = ListingLoader::new(client(&api));

    let query = ListingQuery::from_query_string("sort=price-asc");
    let listing = loader.load(&query).await.unwrap();
    assert_eq!(ids(listing.value()), vec![3, 2, 1]);

    let query = ListingQuery::new(vec!["y".into()], SortOption::NameAsc);
    let listing = loader.load(&query).await.unwrap();
    assert_eq!(ids(listing.value()), vec![1, 2]);
}

#[tokio::test]
async fn test_listing_loader_discards_stale_response() {
    let api = Arc::new(
        storefront()
            .delay("/products/category/x", Duration::from_millis(200))
            .delay("/products/category/y", Duration::from_millis(10)),
    );
    let loader = ListingLoader::new(client(&api));

    let slow = ListingQuery::new(vec!["x".into()], SortOption::Default);
    let fast = ListingQuery::new(vec!["y".into()], SortOption::Default);

    let (stale, fresh) = tokio::join!(loader.load(&slow), async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        loader.load(&fast).await
    });

    assert!(stale.is_none());
    assert_eq!(ids(fresh.unwrap().value()), vec![1, 2]);
}
