//! Catalog Admin Core - Shared catalog types and list pipeline.
//!
//! This crate provides the types used by the admin binary and its tests:
//! - `admin` - Server-rendered product administration front end
//! - `integration-tests` - End-to-end tests against a mocked catalog
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. Products are fetched by the admin crate and then pushed through
//! the pipeline defined here:
//!
//! ```text
//! all products ──► ProductFilter::apply ──► SortKey::apply ──► Paginator::get_page
//! ```
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, products, categories, lenient price decoding
//! - [`filter`] - Search, category, and price-range predicates
//! - [`sort`] - Named sort orders
//! - [`pagination`] - Fixed-size pages with clamped page numbers

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod filter;
pub mod pagination;
pub mod sort;
pub mod types;

pub use filter::{FilterError, PriceRange, ProductFilter, distinct_category_count};
pub use pagination::{PAGE_SIZE, Page, Paginator};
pub use sort::SortKey;
pub use types::*;
