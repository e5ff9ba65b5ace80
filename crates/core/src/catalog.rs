//! Catalog store: immutable product records loaded once at startup.
//!
//! The catalog is read from a JSON file into memory and never mutated at
//! runtime. Products are held behind `Arc` so the cart and derived views can
//! reference them without copying.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::ProductId;

/// Errors that can occur while loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Catalog file could not be read.
    #[error("failed to read catalog file: {0}")]
    Io(String),

    /// Catalog JSON could not be parsed.
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two products share the same ID.
    #[error("duplicate product id: {0}")]
    DuplicateId(ProductId),

    /// A product has an empty display name.
    #[error("product {0} has an empty name")]
    EmptyName(ProductId),

    /// A product has a negative price.
    #[error("product {0} has a negative price: {1}")]
    NegativePrice(ProductId, Decimal),
}

/// A single product record.
///
/// Immutable after catalog load. Prices are decimal amounts in the store
/// currency; `original_price` is only used to display a strikethrough
/// discount and carries no pricing semantics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub original_price: Option<Decimal>,
    pub image: String,
    #[serde(default)]
    pub discount_badge: Option<String>,
    pub category: String,
    #[serde(default)]
    pub is_organic: bool,
    #[serde(default)]
    pub is_tropical: bool,
}

impl Product {
    /// Whether the product counts as "on sale".
    ///
    /// On-sale is derived from the presence of a non-empty discount badge,
    /// not stored as its own field.
    #[must_use]
    pub fn is_on_sale(&self) -> bool {
        self.discount_badge.as_deref().is_some_and(|b| !b.is_empty())
    }
}

/// Read-only, ordered collection of products.
///
/// Order is catalog insertion order; it is the tie-break order for every
/// sort the query engine performs.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Arc<Vec<Arc<Product>>>,
}

impl Catalog {
    /// Build a catalog from product records, validating invariants.
    ///
    /// # Errors
    ///
    /// Returns an error if two products share an ID, a name is empty, or a
    /// price is negative.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for product in &products {
            if !seen.insert(product.id.clone()) {
                return Err(CatalogError::DuplicateId(product.id.clone()));
            }
            if product.name.is_empty() {
                return Err(CatalogError::EmptyName(product.id.clone()));
            }
            if product.price < Decimal::ZERO {
                return Err(CatalogError::NegativePrice(
                    product.id.clone(),
                    product.price,
                ));
            }
        }

        Ok(Self {
            products: Arc::new(products.into_iter().map(Arc::new).collect()),
        })
    }

    /// Parse a catalog from a JSON array of products.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or an invariant fails.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::new(products)
    }

    /// Load a catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json =
            std::fs::read_to_string(path).map_err(|e| CatalogError::Io(e.to_string()))?;
        let catalog = Self::from_json(&json)?;
        tracing::info!(
            path = %path.display(),
            products = catalog.len(),
            "Catalog loaded"
        );
        Ok(catalog)
    }

    /// Iterate products in catalog order.
    pub fn products(&self) -> impl Iterator<Item = &Arc<Product>> {
        self.products.iter()
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<Arc<Product>> {
        self.products.iter().find(|p| &p.id == id).cloned()
    }

    /// Number of products in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
