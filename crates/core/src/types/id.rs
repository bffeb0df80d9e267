//! Newtype IDs for type-safe catalog references.
//!
//! The remote catalog identifies products and categories with plain integers.
//! Wrapping them keeps a category id from being passed where a product id is
//! expected.

use std::num::ParseIntError;

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `i64` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Ord`, `Hash`
/// - Conversion methods: `new()`, `as_i64()`
/// - `From<i64>`, `Into<i64>`, `Display` and `FromStr` implementations
///
/// # Example
///
/// ```rust
/// # use catalog_admin_core::define_id;
/// define_id!(BrandId);
/// define_id!(SupplierId);
///
/// let brand = BrandId::new(1);
/// let parsed: SupplierId = "7".parse().unwrap();
/// assert_eq!(parsed.as_i64(), 7);
///
/// // These are different types, so this won't compile:
/// // let _: BrandId = parsed;
/// # let _ = brand;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Create a new ID from an i64 value.
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the underlying i64 value.
            #[must_use]
            pub const fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = ::core::num::ParseIntError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                s.trim().parse::<i64>().map(Self)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(ProductId);
define_id!(CategoryId);

/// Parse a category id from a query or form value.
///
/// # Errors
///
/// Returns the integer parse error for non-numeric input.
pub fn parse_category_id(raw: &str) -> Result<CategoryId, ParseIntError> {
    raw.parse()
}
