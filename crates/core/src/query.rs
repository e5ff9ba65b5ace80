//! Query engine: derive the visible product sequence from UI state.
//!
//! `derive_view` is a pure function; same inputs always produce the same
//! ordered sequence. Steps apply in a fixed order: search match, then facet
//! filter, then sort. The sort must come last so it sees only surviving
//! products, and it must be stable so ties keep catalog order.

use std::str::FromStr;
use std::sync::Arc;

use crate::catalog::{Catalog, Product};

/// A single filterable product attribute.
///
/// Exactly one facet is active at a time; `OnSale` is derived from the
/// discount badge rather than stored on the product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facet {
    #[default]
    All,
    Organic,
    OnSale,
    Tropical,
}

impl Facet {
    /// Query-string token for this facet.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Organic => "organic",
            Self::OnSale => "on-sale",
            Self::Tropical => "tropical",
        }
    }

    /// Display label for filter toggle buttons.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Organic => "Organic",
            Self::OnSale => "On Sale",
            Self::Tropical => "Tropical",
        }
    }

    /// The facets shown as toggle buttons (everything except `All`).
    #[must_use]
    pub const fn toggles() -> [Self; 3] {
        [Self::Organic, Self::OnSale, Self::Tropical]
    }

    fn matches(self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Organic => product.is_organic,
            Self::OnSale => product.is_on_sale(),
            Self::Tropical => product.is_tropical,
        }
    }
}

impl FromStr for Facet {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "organic" => Ok(Self::Organic),
            "on-sale" => Ok(Self::OnSale),
            "tropical" => Ok(Self::Tropical),
            _ => Err(()),
        }
    }
}

/// Sort order for the product grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Catalog insertion order.
    #[default]
    Default,
    PriceAscending,
    PriceDescending,
    Name,
}

impl SortOrder {
    /// Query-string token for this sort order.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::PriceAscending => "price-asc",
            Self::PriceDescending => "price-desc",
            Self::Name => "name",
        }
    }

    /// Display label for the sort menu.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::PriceAscending => "Price: Low to High",
            Self::PriceDescending => "Price: High to Low",
            Self::Name => "Name",
        }
    }

    /// All sort options, in menu order.
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [
            Self::Default,
            Self::PriceAscending,
            Self::PriceDescending,
            Self::Name,
        ]
    }
}

impl FromStr for SortOrder {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(Self::Default),
            "price-asc" => Ok(Self::PriceAscending),
            "price-desc" => Ok(Self::PriceDescending),
            "name" => Ok(Self::Name),
            _ => Err(()),
        }
    }
}

/// Derive the ordered product sequence to display.
///
/// Search is a case-insensitive substring match against the product name.
/// The facet filter then keeps qualifying products, and finally the sort is
/// applied with a stable algorithm so equal keys preserve catalog order.
///
/// An empty result is a valid value; callers never see "not yet computed".
#[must_use]
pub fn derive_view(
    catalog: &Catalog,
    search: &str,
    facet: Facet,
    sort: SortOrder,
) -> Vec<Arc<Product>> {
    let needle = search.to_lowercase();

    let mut view: Vec<Arc<Product>> = catalog
        .products()
        .filter(|p| p.name.to_lowercase().contains(&needle))
        .filter(|p| facet.matches(p))
        .cloned()
        .collect();

    // Vec::sort_by is stable; ties keep the catalog order established above.
    match sort {
        SortOrder::Default => {}
        SortOrder::PriceAscending => view.sort_by(|a, b| a.price.cmp(&b.price)),
        SortOrder::PriceDescending => view.sort_by(|a, b| b.price.cmp(&a.price)),
        SortOrder::Name => {
            view.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        }
    }

    view
}
