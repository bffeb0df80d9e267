//! Type definitions and conversions for product views.

use catalog_admin_core::{
    Category, FilterError, Page, PriceRange, Product, ProductFilter, SortKey, format_price,
};
use serde::{Deserialize, Serialize};

pub use crate::forms::SelectOption;

/// Words kept in list-card descriptions.
const SUMMARY_WORDS: usize = 15;

/// Page links shown on each side of the current page.
const PAGE_WINDOW: usize = 2;

// =============================================================================
// Query Parameters
// =============================================================================

/// Query parameters for the product list.
#[derive(Debug, Default, Deserialize)]
pub struct ProductsQuery {
    /// Title substring.
    pub search: Option<String>,
    /// Category id.
    pub category: Option<String>,
    /// Price bucket token (`0-50`, `50-100`, `100-500`, `500+`).
    pub price_range: Option<String>,
    /// Sort key token.
    pub sort: Option<String>,
    /// 1-based page number.
    pub page: Option<String>,
}

impl ProductsQuery {
    /// Parse the filter criteria, collecting any invalid values.
    #[must_use]
    pub fn filter(&self) -> (ProductFilter, Vec<FilterError>) {
        ProductFilter::from_params(
            self.search.as_deref(),
            self.category.as_deref(),
            self.price_range.as_deref(),
        )
    }

    #[must_use]
    pub fn sort_key(&self) -> SortKey {
        SortKey::from_param(self.sort.as_deref())
    }

    fn value(field: Option<&String>) -> &str {
        field.map_or("", |s| s.trim())
    }
}

/// Filter and sort parameters to carry into pagination links.
#[must_use]
pub fn build_preserve_params(query: &ProductsQuery) -> String {
    [
        ("search", &query.search),
        ("category", &query.category),
        ("price_range", &query.price_range),
        ("sort", &query.sort),
    ]
    .into_iter()
    .filter_map(|(key, value)| {
        let value = ProductsQuery::value(value.as_ref());
        (!value.is_empty()).then(|| format!("{key}={}", urlencoding::encode(value)))
    })
    .collect::<Vec<_>>()
    .join("&")
}

fn page_url(preserve_params: &str, number: usize) -> String {
    if preserve_params.is_empty() {
        format!("/products?page={number}")
    } else {
        format!("/products?{preserve_params}&page={number}")
    }
}

// =============================================================================
// View Types
// =============================================================================

/// Product view for templates.
#[derive(Debug, Clone)]
pub struct ProductView {
    pub id: String,
    pub title: String,
    /// Formatted price, e.g. `$24.99`.
    pub price: String,
    pub description: String,
    /// First words of the description.
    pub summary: String,
    pub category_name: String,
    pub image: String,
    pub images: Vec<String>,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            title: product.title.clone(),
            price: format_price(product.price),
            description: product.description.clone(),
            summary: summarize(&product.description, SUMMARY_WORDS),
            category_name: product
                .category
                .as_ref()
                .map_or_else(|| "Uncategorized".to_string(), |c| c.name.clone()),
            image: product.primary_image().unwrap_or_default().to_string(),
            images: product.images.clone(),
        }
    }
}

fn summarize(text: &str, limit: usize) -> String {
    let mut words = text.split_whitespace();
    let kept = words.by_ref().take(limit).collect::<Vec<_>>().join(" ");
    if words.next().is_some() {
        format!("{kept}…")
    } else {
        kept
    }
}

/// A numbered pagination link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLink {
    pub number: usize,
    pub url: String,
    pub current: bool,
}

/// Pagination state for templates.
#[derive(Debug, Clone)]
pub struct PageView {
    pub number: usize,
    pub num_pages: usize,
    pub total_items: usize,
    pub start_index: usize,
    pub end_index: usize,
    pub has_previous: bool,
    pub has_next: bool,
    pub first_url: String,
    pub previous_url: String,
    pub next_url: String,
    pub last_url: String,
    /// Links around the current page.
    pub links: Vec<PageLink>,
}

impl PageView {
    pub fn new<T>(page: &Page<T>, preserve_params: &str) -> Self {
        let window_start = page.number.saturating_sub(PAGE_WINDOW).max(1);
        let window_end = (page.number + PAGE_WINDOW).min(page.num_pages);

        Self {
            number: page.number,
            num_pages: page.num_pages,
            total_items: page.total_items,
            start_index: page.start_index(),
            end_index: page.end_index(),
            has_previous: page.has_previous(),
            has_next: page.has_next(),
            first_url: page_url(preserve_params, 1),
            previous_url: page
                .previous_page_number()
                .map(|n| page_url(preserve_params, n))
                .unwrap_or_default(),
            next_url: page
                .next_page_number()
                .map(|n| page_url(preserve_params, n))
                .unwrap_or_default(),
            last_url: page_url(preserve_params, page.num_pages),
            links: (window_start..=window_end)
                .map(|number| PageLink {
                    number,
                    url: page_url(preserve_params, number),
                    current: number == page.number,
                })
                .collect(),
        }
    }

    #[must_use]
    pub const fn is_paginated(&self) -> bool {
        self.num_pages > 1
    }
}

/// Category filter choices with the active one selected.
#[must_use]
pub fn category_filter_options(categories: &[Category], filter: &ProductFilter) -> Vec<SelectOption> {
    categories
        .iter()
        .map(|c| SelectOption {
            value: c.id.to_string(),
            label: c.name.clone(),
            selected: filter.category == Some(c.id),
        })
        .collect()
}

/// Price bucket choices with the active one selected.
#[must_use]
pub fn price_range_options(filter: &ProductFilter) -> Vec<SelectOption> {
    PriceRange::ALL
        .into_iter()
        .map(|range| SelectOption {
            value: range.token().to_string(),
            label: range.label().to_string(),
            selected: filter.price_range == Some(range),
        })
        .collect()
}

/// Sort choices with the active one selected.
#[must_use]
pub fn sort_options(current: SortKey) -> Vec<SelectOption> {
    SortKey::ALL
        .into_iter()
        .map(|key| SelectOption {
            value: key.as_param().to_string(),
            label: key.label().to_string(),
            selected: key == current,
        })
        .collect()
}

// =============================================================================
// JSON Responses
// =============================================================================

/// Result of an asynchronous action.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiResponse {
    pub success: bool,
    pub message: String,
}

impl ApiResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
