//! Product listing, filters and best sellers.

use reqwest::StatusCode;
use shopfront_core::{Filters, FiltersUpdate, Price, Product};
use shopfront_integration_tests::{FakeBackend, Method, RecordedRequest};

fn last_listing(backend: &FakeBackend) -> RecordedRequest {
    backend
        .requests_to(&Method::GET, "/api/products/")
        .pop()
        .expect("products were requested")
}

fn ids(products: &[Product]) -> Vec<i64> {
    products.iter().map(|p| p.id.as_i64()).collect()
}

#[tokio::test]
async fn test_default_filters_send_only_max_price() {
    let backend = FakeBackend::start().await;
    let mut shop = backend.shop();

    shop.fetch_products().await;

    assert_eq!(
        last_listing(&backend).query_pairs(),
        [("max_price".to_string(), "2000".to_string())]
    );
    // Denim Jacket (2499) is above the default bound
    assert_eq!(ids(shop.state().products()), [1, 2, 3, 5, 6]);
    assert!(!shop.state().loading());
}

#[tokio::test]
async fn test_apply_filters_merges_and_refetches() {
    let backend = FakeBackend::start().await;
    let mut shop = backend.shop();

    shop.apply_filters(FiltersUpdate::default().category("Shoes"))
        .await;
    assert_eq!(ids(shop.state().products()), [1, 2]);

    shop.apply_filters(FiltersUpdate::default().is_sale(Some(true)))
        .await;

    let filters = shop.state().filters();
    assert_eq!(filters.category, "Shoes");
    assert_eq!(filters.is_sale, Some(true));
    assert_eq!(filters.max_price, Price::from(2000_u32));
    assert_eq!(
        last_listing(&backend).query_pairs(),
        [
            ("category".to_string(), "Shoes".to_string()),
            ("max_price".to_string(), "2000".to_string()),
            ("is_sale".to_string(), "true".to_string()),
        ]
    );
    assert_eq!(ids(shop.state().products()), [2]);
    assert_eq!(backend.count(&Method::GET, "/api/products/"), 2);
}

#[tokio::test]
async fn test_search_and_price_range() {
    let backend = FakeBackend::start().await;
    let mut shop = backend.shop();

    shop.apply_filters(
        FiltersUpdate::default()
            .search("  linen ")
            .min_price(Price::from(1000_u32))
            .max_price(Price::ZERO),
    )
    .await;

    assert_eq!(
        last_listing(&backend).query_pairs(),
        [
            ("search".to_string(), "linen".to_string()),
            ("min_price".to_string(), "1000".to_string()),
        ]
    );
    assert_eq!(ids(shop.state().products()), [3]);
}

#[tokio::test]
async fn test_clearing_sale_flag_drops_parameter() {
    let backend = FakeBackend::start().await;
    let mut shop = backend.shop();
    shop.apply_filters(FiltersUpdate::default().is_sale(Some(false)))
        .await;
    assert_eq!(ids(shop.state().products()), [1, 3, 5]);

    shop.apply_filters(FiltersUpdate::default().is_sale(None))
        .await;

    assert_eq!(shop.state().filters(), &Filters::default());
    assert!(
        last_listing(&backend)
            .query_pairs()
            .iter()
            .all(|(key, _)| key != "is_sale")
    );
}

#[tokio::test]
async fn test_fetch_products_failure_keeps_listing_and_resets_loading() {
    let backend = FakeBackend::start().await;
    let mut shop = backend.shop();
    shop.fetch_products().await;
    let before = shop.state().products().to_vec();
    assert!(!before.is_empty());

    backend.fail(&Method::GET, "/api/products/", StatusCode::INTERNAL_SERVER_ERROR);
    shop.apply_filters(FiltersUpdate::default().category("Clothing"))
        .await;

    assert_eq!(shop.state().products(), before.as_slice());
    assert!(!shop.state().loading());
    // The filter change itself is kept
    assert_eq!(shop.state().filters().category, "Clothing");
}

#[tokio::test]
async fn test_most_bought_without_orders_is_empty() {
    let backend = FakeBackend::start().await;
    let mut shop = backend.shop();

    shop.fetch_most_bought().await;

    assert!(shop.state().most_bought().is_empty());
    assert_eq!(backend.count(&Method::GET, "/api/products/most_bought/"), 1);
}

#[tokio::test]
async fn test_most_bought_failure_is_swallowed() {
    let backend = FakeBackend::start().await;
    backend.fail(
        &Method::GET,
        "/api/products/most_bought/",
        StatusCode::SERVICE_UNAVAILABLE,
    );
    let mut shop = backend.shop();

    shop.fetch_most_bought().await;

    assert!(shop.state().most_bought().is_empty());
    assert_eq!(backend.count(&Method::GET, "/api/products/most_bought/"), 1);
}
