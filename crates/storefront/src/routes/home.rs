//! Storefront page and product grid handlers.
//!
//! The grid fragment re-renders over HTMX whenever the search term, facet,
//! or sort order changes; each change is an explicit "derive view, then
//! render" round trip with no hidden dependency tracking.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::instrument;

use fruit_stand_core::{Facet, Product, SortOrder, derive_view};

use super::cart::CartView;
use super::format_price;
use crate::filters;
use crate::state::AppState;

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub price: String,
    pub original_price: Option<String>,
    pub image: String,
    pub discount_badge: Option<String>,
    pub category: String,
}

impl From<&Arc<Product>> for ProductView {
    fn from(product: &Arc<Product>) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            price: format_price(product.price),
            original_price: product.original_price.map(format_price),
            image: product.image.clone(),
            discount_badge: product.discount_badge.clone(),
            category: product.category.clone(),
        }
    }
}

/// A facet toggle button.
pub struct FacetOption {
    pub token: &'static str,
    pub label: &'static str,
    pub active: bool,
}

/// A sort menu entry.
pub struct SortOption {
    pub token: &'static str,
    pub label: &'static str,
    pub active: bool,
}

/// Grid query parameters.
#[derive(Debug, Deserialize)]
pub struct GridQuery {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub filter: String,
    #[serde(default)]
    pub sort: String,
}

impl GridQuery {
    /// Active facet; unknown or missing tokens fall back to `All`.
    fn facet(&self) -> Facet {
        self.filter.parse().unwrap_or_default()
    }

    /// Active sort order; unknown or missing tokens fall back to `Default`.
    fn sort_order(&self) -> SortOrder {
        self.sort.parse().unwrap_or_default()
    }
}

/// Storefront page template.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub query: String,
    pub filter_token: &'static str,
    pub sort_token: &'static str,
    pub facets: Vec<FacetOption>,
    pub sorts: Vec<SortOption>,
    pub products: Vec<ProductView>,
    pub cart: CartView,
}

/// Product grid fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/product_grid.html")]
pub struct ProductGridTemplate {
    pub products: Vec<ProductView>,
}

fn facet_options(active: Facet) -> Vec<FacetOption> {
    Facet::toggles()
        .into_iter()
        .map(|facet| FacetOption {
            token: facet.as_str(),
            label: facet.label(),
            active: facet == active,
        })
        .collect()
}

fn sort_options(active: SortOrder) -> Vec<SortOption> {
    SortOrder::all()
        .into_iter()
        .map(|sort| SortOption {
            token: sort.as_str(),
            label: sort.label(),
            active: sort == active,
        })
        .collect()
}

fn product_views(state: &AppState, query: &GridQuery) -> Vec<ProductView> {
    derive_view(
        state.catalog(),
        &query.q,
        query.facet(),
        query.sort_order(),
    )
    .iter()
    .map(ProductView::from)
    .collect()
}

/// Display the storefront page.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<GridQuery>,
) -> impl IntoResponse {
    let products = product_views(&state, &query);
    let cart = state.read_cart(CartView::from_cart);

    IndexTemplate {
        filter_token: query.facet().as_str(),
        sort_token: query.sort_order().as_str(),
        facets: facet_options(query.facet()),
        sorts: sort_options(query.sort_order()),
        query: query.q,
        products,
        cart,
    }
}

/// Display the product grid fragment (HTMX).
#[instrument(skip(state))]
pub async fn grid(
    State(state): State<AppState>,
    Query(query): Query<GridQuery>,
) -> impl IntoResponse {
    ProductGridTemplate {
        products: product_views(&state, &query),
    }
}
