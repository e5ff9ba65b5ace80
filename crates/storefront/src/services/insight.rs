//! Per-product insight text with fetch-once memoization.
//!
//! Each product gets at most one provider call per session. Whatever that
//! call produces - generated text or a fallback sentence - is cached and
//! reused on every later toggle of the card's insight view. A cached
//! fallback is final: the service does not distinguish it from a genuine
//! response for retry purposes.
//!
//! Fetching is fire-and-forget with respect to cart and filter state; the
//! service never returns an error to its caller.

use moka::future::Cache;

use fruit_stand_core::{Product, ProductId};

use super::gemini::{GeminiClient, GeminiError, GenerativeProvider};

/// Shown when the provider answers successfully but with no text.
pub const EMPTY_FALLBACK: &str = "Fresh and nutritious fruit for your health!";

/// Shown when the provider is unconfigured or the call fails for any reason.
pub const UNAVAILABLE_FALLBACK: &str = "High quality fresh fruit selection.";

/// Memoizing facade over the generative provider.
#[derive(Clone)]
pub struct InsightService<P = GeminiClient> {
    provider: Option<P>,
    cache: Cache<ProductId, String>,
}

impl<P: GenerativeProvider + Clone> InsightService<P> {
    /// Create a service. `None` disables the provider; every fetch then
    /// resolves to [`UNAVAILABLE_FALLBACK`].
    #[must_use]
    pub fn new(provider: Option<P>) -> Self {
        Self {
            provider,
            // No TTL: an insight is final for the life of the process.
            cache: Cache::builder().max_capacity(1_000).build(),
        }
    }

    /// Insight text for a product, fetching on first use.
    ///
    /// Concurrent requests for the same product coalesce into a single
    /// provider call via the cache.
    pub async fn insight_for(&self, product: &Product) -> String {
        self.cache
            .get_with(product.id.clone(), async {
                self.fetch_uncached(&product.name).await
            })
            .await
    }

    /// Catalog names matching a free-form search intent.
    ///
    /// Not cached: suggestion queries are open-ended. Failures collapse to
    /// an empty list.
    pub async fn suggestions(&self, query: &str, catalog_names: &[String]) -> Vec<String> {
        let Some(provider) = &self.provider else {
            return Vec::new();
        };

        match provider.matching_names(query, catalog_names).await {
            Ok(names) => names,
            Err(e) => {
                tracing::warn!(error = %e, "Suggestion fetch failed");
                Vec::new()
            }
        }
    }

    async fn fetch_uncached(&self, product_name: &str) -> String {
        let Some(provider) = &self.provider else {
            return UNAVAILABLE_FALLBACK.to_owned();
        };

        match provider.short_fact(product_name).await {
            Ok(text) => text,
            Err(GeminiError::Empty) => EMPTY_FALLBACK.to_owned(),
            Err(e) => {
                tracing::warn!(product = product_name, error = %e, "Insight fetch failed");
                UNAVAILABLE_FALLBACK.to_owned()
            }
        }
    }
}
