//! AI search suggestion handler.
//!
//! Asks the generative provider which catalog products might match a
//! free-form search intent. Failures collapse to an empty suggestion list;
//! the regular substring search is unaffected either way.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use crate::state::AppState;

/// Search suggestions query parameters.
#[derive(Debug, Deserialize)]
pub struct SuggestQuery {
    #[serde(default)]
    pub q: String,
}

/// Search suggestions template (HTMX fragment).
#[derive(Template, WebTemplate)]
#[template(path = "partials/search_suggestions.html")]
pub struct SuggestionsTemplate {
    pub suggestions: Vec<String>,
}

/// Search suggestions endpoint (HTMX).
///
/// Only names actually present in the catalog are returned, whatever the
/// provider claims.
#[instrument(skip(state))]
pub async fn suggest(
    State(state): State<AppState>,
    Query(query): Query<SuggestQuery>,
) -> impl IntoResponse {
    let query_str = query.q.trim();

    if query_str.is_empty() {
        return SuggestionsTemplate {
            suggestions: Vec::new(),
        };
    }

    let catalog_names: Vec<String> = state
        .catalog()
        .products()
        .map(|p| p.name.clone())
        .collect();

    let suggestions = state
        .insight()
        .suggestions(query_str, &catalog_names)
        .await
        .into_iter()
        .filter(|name| catalog_names.contains(name))
        .collect();

    SuggestionsTemplate { suggestions }
}
