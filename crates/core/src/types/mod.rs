//! Core catalog types.
//!
//! This module provides type-safe wrappers for catalog concepts.

pub mod id;
pub mod price;
pub mod product;

pub use id::*;
pub use price::format_price;
pub use product::{Category, DEFAULT_PLACEHOLDER_IMAGE, Product, ProductInput, builtin_categories};
