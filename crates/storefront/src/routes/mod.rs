//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Storefront page (grid + header + cart drawer)
//! GET  /health                 - Health check
//!
//! # Product grid (HTMX fragments)
//! GET  /grid                   - Product grid fragment (q/filter/sort params)
//! GET  /products/{id}/insight  - Insight overlay fragment (memoized fetch)
//!
//! # Cart (HTMX fragments)
//! GET  /cart                   - Cart drawer items fragment
//! GET  /cart/count             - Cart count badge fragment
//! POST /cart/add               - Add product (form: product_id)
//! POST /cart/update            - Adjust quantity (form: product_id, delta)
//! POST /cart/remove            - Remove entry (form: product_id)
//!
//! # Checkout
//! POST /checkout               - Placeholder; no order is created
//!
//! # Search
//! GET  /search/suggest         - AI search suggestions fragment
//! ```

pub mod cart;
pub mod home;
pub mod insight;
pub mod search;

use axum::{
    Router,
    routing::{get, post},
};
use rust_decimal::Decimal;

use crate::state::AppState;

/// Format a decimal amount as a display price string.
pub(crate) fn format_price(amount: Decimal) -> String {
    format!("${amount:.2}")
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create the search routes router.
pub fn search_routes() -> Router<AppState> {
    Router::new().route("/suggest", get(search::suggest))
}

/// Create the full storefront router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))
        .route("/grid", get(home::grid))
        .route("/products/{id}/insight", get(insight::show))
        .route("/checkout", post(cart::checkout))
        .nest("/cart", cart_routes())
        .nest("/search", search_routes())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price_two_decimals() {
        assert_eq!(format_price("6".parse().unwrap()), "$6.00");
        assert_eq!(format_price("1.5".parse().unwrap()), "$1.50");
        assert_eq!(format_price("0".parse().unwrap()), "$0.00");
    }
}
