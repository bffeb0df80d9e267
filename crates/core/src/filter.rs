//! Product list filtering.
//!
//! Predicates run in a fixed order: title search, then category, then price
//! range. A predicate whose criterion is absent is skipped, so an empty
//! [`ProductFilter`] returns its input unchanged.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::types::{CategoryId, Product, parse_category_id};

/// Invalid filter criteria supplied by the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// The price range token is not one of the known buckets.
    #[error("Unknown price range \"{0}\"")]
    UnknownPriceRange(String),

    /// The category value is not an integer id.
    #[error("Invalid category \"{0}\"")]
    InvalidCategory(String),
}

/// A fixed price interval used for filtering.
///
/// `0-50` is closed at both ends; the others are open at the bottom and
/// closed at the top, so 50, 100 and 500 fall in the lower bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriceRange {
    /// `[0, 50]`
    UpTo50,
    /// `(50, 100]`
    From50To100,
    /// `(100, 500]`
    From100To500,
    /// `(500, ∞)`
    Over500,
}

impl PriceRange {
    /// All buckets in display order.
    pub const ALL: [Self; 4] = [
        Self::UpTo50,
        Self::From50To100,
        Self::From100To500,
        Self::Over500,
    ];

    /// Query-string token for this bucket.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::UpTo50 => "0-50",
            Self::From50To100 => "50-100",
            Self::From100To500 => "100-500",
            Self::Over500 => "500+",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::UpTo50 => "$0 - $50",
            Self::From50To100 => "$50 - $100",
            Self::From100To500 => "$100 - $500",
            Self::Over500 => "$500+",
        }
    }

    /// Whether `price` lies in this bucket.
    #[must_use]
    pub fn contains(self, price: Decimal) -> bool {
        let fifty = Decimal::from(50);
        let hundred = Decimal::from(100);
        let five_hundred = Decimal::from(500);

        match self {
            Self::UpTo50 => price >= Decimal::ZERO && price <= fifty,
            Self::From50To100 => price > fifty && price <= hundred,
            Self::From100To500 => price > hundred && price <= five_hundred,
            Self::Over500 => price > five_hundred,
        }
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for PriceRange {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        Self::ALL
            .into_iter()
            .find(|range| range.token() == token)
            .ok_or_else(|| FilterError::UnknownPriceRange(token.to_string()))
    }
}

/// Filter criteria for the product list. All criteria are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Case-insensitive substring matched against the title.
    pub search: Option<String>,
    /// Exact category id.
    pub category: Option<CategoryId>,
    /// Price bucket.
    pub price_range: Option<PriceRange>,
}

impl ProductFilter {
    /// Build a filter from raw query-string values.
    ///
    /// Blank values are treated as absent. Invalid values are dropped from
    /// the filter and reported, so the caller can show them to the user while
    /// still applying the criteria that did parse.
    #[must_use]
    pub fn from_params(
        search: Option<&str>,
        category: Option<&str>,
        price_range: Option<&str>,
    ) -> (Self, Vec<FilterError>) {
        let mut errors = Vec::new();

        let search = non_blank(search).map(str::to_string);

        let category = non_blank(category).and_then(|raw| {
            parse_category_id(raw)
                .map_err(|_| errors.push(FilterError::InvalidCategory(raw.to_string())))
                .ok()
        });

        let price_range = non_blank(price_range).and_then(|raw| {
            raw.parse::<PriceRange>()
                .map_err(|e| errors.push(e))
                .ok()
        });

        (
            Self {
                search,
                category,
                price_range,
            },
            errors,
        )
    }

    /// Whether no criterion is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.search.is_none() && self.category.is_none() && self.price_range.is_none()
    }

    /// Whether `product` passes every set criterion.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        let needle = self.search.as_deref().map(str::to_lowercase);
        self.matches_with(product, needle.as_deref())
    }

    fn matches_with(&self, product: &Product, needle: Option<&str>) -> bool {
        if let Some(needle) = needle
            && !product.title.to_lowercase().contains(needle)
        {
            return false;
        }

        if let Some(category) = self.category
            && product.category_id() != Some(category)
        {
            return false;
        }

        if let Some(range) = self.price_range
            && !range.contains(product.price)
        {
            return false;
        }

        true
    }

    /// Keep only products matching the filter, preserving order.
    #[must_use]
    pub fn apply(&self, mut products: Vec<Product>) -> Vec<Product> {
        if self.is_empty() {
            return products;
        }

        let needle = self.search.as_deref().map(str::to_lowercase);
        products.retain(|product| self.matches_with(product, needle.as_deref()));
        products
    }
}

/// Number of distinct category ids among `products`.
#[must_use]
pub fn distinct_category_count(products: &[Product]) -> usize {
    products
        .iter()
        .filter_map(Product::category_id)
        .collect::<HashSet<_>>()
        .len()
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
