//! Application state shared across handlers.

use std::sync::{Arc, PoisonError, RwLock};

use thiserror::Error;

use fruit_stand_core::{Cart, Catalog, CatalogError};

use crate::config::StorefrontConfig;
use crate::services::{GeminiClient, GeminiError, InsightService};

/// Catalog compiled into the binary, used when `CATALOG_PATH` is unset.
const DEFAULT_CATALOG_JSON: &str = include_str!("../content/catalog.json");

/// Error creating application state.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("gemini client error: {0}")]
    Gemini(#[from] GeminiError),
}

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. The cart sits behind an `RwLock` because
/// axum handlers run on a thread pool, but mutations come from a single
/// logical thread of user interaction; the lock simply serializes them.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    cart: RwLock<Cart>,
    insight: InsightService,
}

impl AppState {
    /// Create application state from configuration.
    ///
    /// Loads the catalog (configured path or the compiled-in default) and
    /// builds the Gemini client when an API key is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog fails to load or the Gemini client
    /// fails to build.
    pub fn new(config: StorefrontConfig) -> Result<Self, StateError> {
        let catalog = match &config.catalog_path {
            Some(path) => Catalog::load(path)?,
            None => Catalog::from_json(DEFAULT_CATALOG_JSON)?,
        };

        let client = match &config.gemini.api_key {
            Some(key) => Some(GeminiClient::new(key, &config.gemini)?),
            None => {
                tracing::info!("GEMINI_API_KEY not set; insight fetches will use fallback text");
                None
            }
        };

        Ok(Self::from_parts(config, catalog, InsightService::new(client)))
    }

    /// Assemble state from already-built parts. Used by tests to inject a
    /// fixed catalog and a disabled provider.
    #[must_use]
    pub fn from_parts(
        config: StorefrontConfig,
        catalog: Catalog,
        insight: InsightService,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                cart: RwLock::new(Cart::new()),
                insight,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the insight service.
    #[must_use]
    pub fn insight(&self) -> &InsightService {
        &self.inner.insight
    }

    /// Read the cart under the lock.
    pub fn read_cart<R>(&self, f: impl FnOnce(&Cart) -> R) -> R {
        let guard = self
            .inner
            .cart
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    /// Mutate the cart under the lock.
    ///
    /// The closure runs to completion before any other cart operation can
    /// start; operations never interleave mid-mutation.
    pub fn mutate_cart<R>(&self, f: impl FnOnce(&mut Cart) -> R) -> R {
        let mut guard = self
            .inner
            .cart
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use fruit_stand_core::ProductId;

    fn test_state() -> AppState {
        let config = StorefrontConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 0,
            catalog_path: None,
            gemini: crate::config::GeminiConfig {
                api_key: None,
                model: "gemini-3-flash-preview".to_owned(),
            },
            sentry_dsn: None,
        };
        let catalog = Catalog::from_json(DEFAULT_CATALOG_JSON).unwrap();
        AppState::from_parts(config, catalog, InsightService::new(None))
    }

    #[test]
    fn test_default_catalog_parses_and_is_nonempty() {
        let state = test_state();
        assert!(!state.catalog().is_empty());
        // The mango ships in the default catalog.
        assert!(state.catalog().get(&ProductId::new("mango")).is_some());
    }

    #[test]
    fn test_cart_starts_empty_and_mutates_under_lock() {
        let state = test_state();
        assert!(state.read_cart(Cart::is_empty));

        let mango = state.catalog().get(&ProductId::new("mango")).unwrap();
        state.mutate_cart(|cart| cart.add(mango));
        assert_eq!(state.read_cart(Cart::item_count), 1);
    }

    #[test]
    fn test_state_clones_share_cart() {
        let state = test_state();
        let clone = state.clone();

        let mango = state.catalog().get(&ProductId::new("mango")).unwrap();
        state.mutate_cart(|cart| cart.add(mango));
        assert_eq!(clone.read_cart(Cart::item_count), 1);
    }
}
