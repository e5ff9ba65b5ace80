//! Router-level tests driving the storefront handlers in-process.
//!
//! Each test builds the full application router with a fixed catalog and a
//! disabled insight provider, then drives it with `tower::ServiceExt::oneshot`.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header::CONTENT_TYPE};
use http_body_util::BodyExt;
use tower::ServiceExt;

use fruit_stand_core::Catalog;
use fruit_stand_storefront::config::{GeminiConfig, StorefrontConfig};
use fruit_stand_storefront::services::{InsightService, UNAVAILABLE_FALLBACK};
use fruit_stand_storefront::state::AppState;

const TEST_CATALOG: &str = r#"[
  {
    "id": "apple",
    "name": "Red Apple",
    "price": "2.00",
    "image": "/static/images/products/red-apple.jpg",
    "category": "Orchard",
    "is_organic": true
  },
  {
    "id": "mango",
    "name": "Fresh Mango",
    "price": "3.00",
    "image": "/static/images/products/fresh-mango.jpg",
    "discount_badge": "SALE",
    "category": "Tropical",
    "is_tropical": true
  },
  {
    "id": "banana",
    "name": "Cavendish Banana",
    "price": "1.50",
    "image": "/static/images/products/cavendish-banana.jpg",
    "category": "Tropical",
    "is_tropical": true
  }
]"#;

fn test_app() -> Router {
    let config = StorefrontConfig {
        host: "127.0.0.1".parse().expect("valid host"),
        port: 0,
        catalog_path: None,
        gemini: GeminiConfig {
            api_key: None,
            model: "gemini-3-flash-preview".to_owned(),
        },
        sentry_dsn: None,
    };
    let catalog = Catalog::from_json(TEST_CATALOG).expect("valid test catalog");
    let state = AppState::from_parts(config, catalog, InsightService::new(None));
    fruit_stand_storefront::app(state)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    let status = response.status();
    let body = response.into_body().collect().await.expect("body").to_bytes();
    (status, String::from_utf8_lossy(&body).into_owned())
}

async fn post_form(app: &Router, uri: &str, body: &str) -> (StatusCode, String) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body.to_owned()))
                .expect("request"),
        )
        .await
        .expect("response");
    let status = response.status();
    let body = response.into_body().collect().await.expect("body").to_bytes();
    (status, String::from_utf8_lossy(&body).into_owned())
}

#[tokio::test]
async fn health_returns_ok() {
    let app = test_app();
    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn index_renders_catalog_grid() {
    let app = test_app();
    let (status, body) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Red Apple"));
    assert!(body.contains("Fresh Mango"));
    assert!(body.contains("$2.00"));
    assert!(body.contains("SALE"));
}

#[tokio::test]
async fn grid_search_is_case_insensitive() {
    let app = test_app();
    let (status, body) = get(&app, "/grid?q=MANGO").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Fresh Mango"));
    assert!(!body.contains("Red Apple"));
}

#[tokio::test]
async fn grid_filters_and_sorts() {
    let app = test_app();
    let (status, body) = get(&app, "/grid?filter=tropical&sort=price-asc").await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body.contains("Red Apple"));
    let banana = body.find("Cavendish Banana").expect("banana in grid");
    let mango = body.find("Fresh Mango").expect("mango in grid");
    assert!(banana < mango, "price ascending puts banana first");
}

#[tokio::test]
async fn grid_unknown_tokens_fall_back_to_defaults() {
    let app = test_app();
    let (status, body) = get(&app, "/grid?filter=bogus&sort=bogus").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Red Apple"));
}

#[tokio::test]
async fn grid_empty_result_shows_empty_state() {
    let app = test_app();
    let (status, body) = get(&app, "/grid?q=durian").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No fruits found"));
}

#[tokio::test]
async fn add_to_cart_merges_duplicates() {
    let app = test_app();

    let (status, _) = post_form(&app, "/cart/add", "product_id=mango").await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = post_form(&app, "/cart/add", "product_id=mango").await;
    assert_eq!(status, StatusCode::OK);

    let (_, count) = get(&app, "/cart/count").await;
    assert!(count.contains('2'));

    let (_, drawer) = get(&app, "/cart").await;
    assert!(drawer.contains("Fresh Mango"));
    assert!(drawer.contains("$6.00"), "two mangoes total $6.00");
    assert_eq!(drawer.matches("cart-item-name").count(), 1, "one entry, not two");
}

#[tokio::test]
async fn add_unknown_product_is_not_found() {
    let app = test_app();
    let (status, _) = post_form(&app, "/cart/add", "product_id=durian").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_quantity_clamps_at_one() {
    let app = test_app();
    post_form(&app, "/cart/add", "product_id=apple").await;
    post_form(&app, "/cart/update", "product_id=apple&delta=2").await;

    let (_, drawer) = get(&app, "/cart").await;
    assert!(drawer.contains(r#"<span class="quantity">3</span>"#));

    post_form(&app, "/cart/update", "product_id=apple&delta=-100").await;
    let (_, drawer) = get(&app, "/cart").await;
    assert!(
        drawer.contains(r#"<span class="quantity">1</span>"#),
        "quantity floors at 1 instead of removing the entry"
    );
    assert!(drawer.contains("Red Apple"));
}

#[tokio::test]
async fn remove_deletes_entry_and_absent_remove_is_noop() {
    let app = test_app();
    post_form(&app, "/cart/add", "product_id=apple").await;

    let (status, drawer) = post_form(&app, "/cart/remove", "product_id=banana").await;
    assert_eq!(status, StatusCode::OK);
    assert!(drawer.contains("Red Apple"), "removing an absent id changes nothing");

    let (_, drawer) = post_form(&app, "/cart/remove", "product_id=apple").await;
    assert!(drawer.contains("Your cart is empty"));
}

#[tokio::test]
async fn cart_updates_trigger_htmx_refresh() {
    let app = test_app();
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/cart/add")
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("product_id=apple"))
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(
        response
            .headers()
            .get("HX-Trigger")
            .and_then(|v| v.to_str().ok()),
        Some("cart-updated")
    );
}

#[tokio::test]
async fn insight_uses_fallback_when_provider_disabled() {
    let app = test_app();
    let (status, body) = get(&app, "/products/mango/insight").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(UNAVAILABLE_FALLBACK));

    // A second toggle serves from the cache; with no provider configured
    // the text is identical either way.
    let (_, second) = get(&app, "/products/mango/insight").await;
    assert!(second.contains(UNAVAILABLE_FALLBACK));
}

#[tokio::test]
async fn insight_for_unknown_product_is_not_found() {
    let app = test_app();
    let (status, _) = get(&app, "/products/durian/insight").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn checkout_is_a_noop_placeholder() {
    let app = test_app();
    post_form(&app, "/cart/add", "product_id=apple").await;

    let (status, body) = post_form(&app, "/checkout", "").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Checkout is coming soon"));

    // No order, no state transition: the cart is untouched.
    let (_, count) = get(&app, "/cart/count").await;
    assert!(count.contains('1'));
}

#[tokio::test]
async fn suggest_without_provider_renders_nothing() {
    let app = test_app();
    let (status, body) = get(&app, "/search/suggest?q=sweet").await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body.contains("search-suggestions"));
}

#[tokio::test]
async fn responses_carry_request_id_and_security_headers() {
    let app = test_app();
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(
        response
            .headers()
            .get("x-frame-options")
            .and_then(|v| v.to_str().ok()),
        Some("DENY")
    );
    assert!(response.headers().contains_key("content-security-policy"));
}
