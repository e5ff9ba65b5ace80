//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! The cart itself lives in application state; every mutation re-renders
//! the drawer fragment from the ledger.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use fruit_stand_core::{Cart, CartEntry, ProductId};

use super::format_price;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub product_id: String,
    pub name: String,
    pub price: String,
    pub line_price: String,
    pub quantity: u32,
    pub image: String,
}

impl From<&CartEntry> for CartItemView {
    fn from(entry: &CartEntry) -> Self {
        let product = entry.product();
        Self {
            product_id: product.id.to_string(),
            name: product.name.clone(),
            price: format_price(product.price),
            line_price: format_price(entry.line_total()),
            quantity: entry.quantity(),
            image: product.image.clone(),
        }
    }
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    pub item_count: u32,
}

impl CartView {
    /// Build the display view from the ledger.
    #[must_use]
    pub fn from_cart(cart: &Cart) -> Self {
        Self {
            items: cart.entries().iter().map(CartItemView::from).collect(),
            total: format_price(cart.total()),
            item_count: cart.item_count(),
        }
    }

    /// Whether the checkout button should be disabled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: String,
}

/// Update quantity form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: String,
    pub delta: i32,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: String,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Checkout notice fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/checkout_notice.html")]
pub struct CheckoutNoticeTemplate;

fn cart_items_response(state: &AppState) -> Response {
    let cart = state.read_cart(CartView::from_cart);
    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate { cart },
    )
        .into_response()
}

/// Display cart drawer items (HTMX).
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> impl IntoResponse {
    let cart = state.read_cart(CartView::from_cart);
    CartItemsTemplate { cart }
}

/// Cart count badge (HTMX).
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> impl IntoResponse {
    CartCountTemplate {
        count: state.read_cart(Cart::item_count),
    }
}

/// Add one unit of a product to the cart (HTMX).
///
/// Adding a product already in the cart merges into its entry. Returns the
/// count badge with an HTMX trigger so the drawer refreshes itself.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let id = ProductId::new(form.product_id);
    let product = state
        .catalog()
        .get(&id)
        .ok_or_else(|| AppError::unknown_product(&id))?;

    let count = state.mutate_cart(|cart| {
        cart.add(product);
        cart.item_count()
    });

    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartCountTemplate { count },
    )
        .into_response())
}

/// Adjust an entry's quantity by a delta (HTMX).
///
/// Quantities clamp at 1; an unknown product ID is a defined no-op, so the
/// drawer simply re-renders unchanged.
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Form(form): Form<UpdateCartForm>,
) -> impl IntoResponse {
    let id = ProductId::new(form.product_id);
    state.mutate_cart(|cart| cart.update_quantity(&id, form.delta));
    cart_items_response(&state)
}

/// Remove an entry from the cart (HTMX).
///
/// Removing an absent product is a defined no-op.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Form(form): Form<RemoveFromCartForm>,
) -> impl IntoResponse {
    let id = ProductId::new(form.product_id);
    state.mutate_cart(|cart| cart.remove(&id));
    cart_items_response(&state)
}

/// Checkout placeholder.
///
/// Present but intentionally non-functional: no order is created and no
/// state transition occurs. The button is disabled client-side when the
/// cart is empty.
#[instrument(skip(state))]
pub async fn checkout(State(state): State<AppState>) -> impl IntoResponse {
    let count = state.read_cart(Cart::item_count);
    tracing::info!(items = count, "Checkout requested; checkout is not implemented");
    CheckoutNoticeTemplate
}
