//! Fruit Stand Core - Catalog, query engine, and cart ledger.
//!
//! This crate holds the domain logic shared by the Fruit Stand storefront:
//! - [`catalog`] - Immutable product records loaded once at startup
//! - [`query`] - Pure derivation of the visible product grid from
//!   search/filter/sort state
//! - [`cart`] - In-memory cart ledger with quantity management and totals
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O beyond
//! catalog file loading, no HTTP clients, no templates. Everything here is
//! synchronous and directly unit-testable without a UI harness. UI state
//! (search term, active filter, open drawers) lives in the storefront crate
//! and is passed in explicitly.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod query;
pub mod types;

pub use cart::{Cart, CartEntry};
pub use catalog::{Catalog, CatalogError, Product};
pub use query::{Facet, SortOrder, derive_view};
pub use types::ProductId;
