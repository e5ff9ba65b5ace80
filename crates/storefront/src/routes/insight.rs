//! Product insight overlay handler.
//!
//! The insight fetch is independent of cart and filter state: it only ever
//! fills in one card's overlay, and the insight service guarantees a single
//! provider call per product per session.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use tracing::instrument;

use fruit_stand_core::ProductId;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Insight overlay fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/insight.html")]
pub struct InsightTemplate {
    pub product_id: String,
    pub text: String,
}

/// Display the insight overlay for a product (HTMX).
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<InsightTemplate> {
    let id = ProductId::new(id);
    let product = state
        .catalog()
        .get(&id)
        .ok_or_else(|| AppError::unknown_product(&id))?;

    let text = state.insight().insight_for(&product).await;

    Ok(InsightTemplate {
        product_id: id.to_string(),
        text,
    })
}
