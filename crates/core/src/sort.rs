//! Product list ordering.

use std::cmp::Reverse;
use std::fmt;

use crate::types::Product;

/// Named sort order for the product list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    /// Catalog order, untouched.
    #[default]
    Default,
    PriceAsc,
    PriceDesc,
    /// Case-insensitive title, A to Z.
    NameAsc,
    /// Case-insensitive title, Z to A.
    NameDesc,
}

impl SortKey {
    /// All sort keys in display order.
    pub const ALL: [Self; 5] = [
        Self::Default,
        Self::PriceAsc,
        Self::PriceDesc,
        Self::NameAsc,
        Self::NameDesc,
    ];

    /// Parse a query-string token. Unknown tokens mean [`SortKey::Default`].
    #[must_use]
    pub fn from_param(token: Option<&str>) -> Self {
        let token = token.map(str::trim).unwrap_or_default();
        Self::ALL
            .into_iter()
            .find(|key| key.as_param() == token)
            .unwrap_or_default()
    }

    /// Query-string token for this key.
    #[must_use]
    pub const fn as_param(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::PriceAsc => "price_asc",
            Self::PriceDesc => "price_desc",
            Self::NameAsc => "name_asc",
            Self::NameDesc => "name_desc",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::PriceAsc => "Price: low to high",
            Self::PriceDesc => "Price: high to low",
            Self::NameAsc => "Name: A to Z",
            Self::NameDesc => "Name: Z to A",
        }
    }

    /// Sort `products` in place.
    ///
    /// All orders are stable: products that compare equal keep their
    /// relative catalog order, descending orders included.
    pub fn apply(self, products: &mut [Product]) {
        match self {
            Self::Default => {}
            Self::PriceAsc => products.sort_by_key(|p| p.price),
            Self::PriceDesc => products.sort_by_key(|p| Reverse(p.price)),
            Self::NameAsc => products.sort_by_cached_key(|p| p.title.to_lowercase()),
            Self::NameDesc => products.sort_by_cached_key(|p| Reverse(p.title.to_lowercase())),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}
