//! Cart ledger: in-memory quantity tracking and derived totals.
//!
//! The cart is an ordered sequence of entries, unique by product ID. All
//! operations are total: adding a duplicate merges quantities, removing an
//! absent entry is a no-op, and decrementing at the floor stays at 1.
//! Removal only happens through the explicit remove operation, never by
//! driving a quantity to zero.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::catalog::Product;
use crate::types::ProductId;

/// One row in the cart: a product reference and a quantity of at least 1.
#[derive(Debug, Clone)]
pub struct CartEntry {
    product: Arc<Product>,
    quantity: u32,
}

impl CartEntry {
    /// The product this entry references.
    #[must_use]
    pub fn product(&self) -> &Arc<Product> {
        &self.product
    }

    /// Current quantity (always ≥ 1).
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Price × quantity for this entry.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

/// Ordered cart of entries, unique by product ID.
///
/// Entries appear in the order products were first added. Totals are
/// recomputed on every read; the catalog is small enough that caching them
/// would buy nothing.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add one unit of a product.
    ///
    /// Increments the existing entry when the product is already in the
    /// cart, otherwise appends a new entry with quantity 1.
    pub fn add(&mut self, product: Arc<Product>) {
        if let Some(entry) = self.entry_mut(&product.id) {
            entry.quantity += 1;
        } else {
            self.entries.push(CartEntry {
                product,
                quantity: 1,
            });
        }
    }

    /// Remove the entry for a product. No-op when the product is absent.
    pub fn remove(&mut self, id: &ProductId) {
        self.entries.retain(|entry| &entry.product.id != id);
    }

    /// Adjust an entry's quantity by `delta`, clamping at 1.
    ///
    /// No-op when the product is absent. A negative delta can never remove
    /// the entry; removal requires [`Cart::remove`].
    pub fn update_quantity(&mut self, id: &ProductId, delta: i32) {
        if let Some(entry) = self.entry_mut(id) {
            let adjusted = i64::from(entry.quantity) + i64::from(delta);
            entry.quantity = u32::try_from(adjusted.max(1)).unwrap_or(u32::MAX);
        }
    }

    /// Sum of price × quantity over all entries.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.entries.iter().map(CartEntry::line_total).sum()
    }

    /// Sum of quantities over all entries, for badge display.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.entries.iter().map(CartEntry::quantity).sum()
    }

    /// Entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    /// Whether the cart has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry_mut(&mut self, id: &ProductId) -> Option<&mut CartEntry> {
        self.entries.iter_mut().find(|entry| &entry.product.id == id)
    }
}
