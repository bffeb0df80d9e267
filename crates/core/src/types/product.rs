//! Products and categories as served by the remote catalog API.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use super::id::{CategoryId, ProductId};
use super::price;

/// Image used when a product has no images of its own.
pub const DEFAULT_PLACEHOLDER_IMAGE: &str = "https://placeimg.com/640/480/any";

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

impl Category {
    /// Create a category.
    #[must_use]
    pub fn new(id: i64, name: &str) -> Self {
        Self {
            id: CategoryId::new(id),
            name: name.to_string(),
        }
    }
}

/// Categories offered when the catalog cannot provide any.
///
/// Order is fixed: Clothes, Electronics, Furniture, Shoes, Others.
#[must_use]
pub fn builtin_categories() -> Vec<Category> {
    vec![
        Category::new(1, "Clothes"),
        Category::new(2, "Electronics"),
        Category::new(3, "Furniture"),
        Category::new(4, "Shoes"),
        Category::new(5, "Others"),
    ]
}

/// A catalog product.
///
/// Missing and `null` fields decode as empty values, so one incomplete
/// record cannot break a whole listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Unit price. Malformed upstream values decode as zero.
    #[serde(default, deserialize_with = "price::deserialize_lenient")]
    pub price: Decimal,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default)]
    pub category: Option<Category>,
    /// Image URLs; `null` entries are dropped.
    #[serde(default, deserialize_with = "deserialize_images")]
    pub images: Vec<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn deserialize_images<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let images = Option::<Vec<Option<String>>>::deserialize(deserializer)?;
    Ok(images.into_iter().flatten().flatten().collect())
}

impl Product {
    /// Id of the embedded category, if any.
    #[must_use]
    pub fn category_id(&self) -> Option<CategoryId> {
        self.category.as_ref().map(|c| c.id)
    }

    /// First image URL, if any.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Replace an empty image list with a single placeholder.
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.images.retain(|url| !url.trim().is_empty());
        if self.images.is_empty() {
            self.images.push(placeholder.to_string());
        }
        self
    }
}

/// Request body for creating or updating a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub title: String,
    /// Sent as a JSON number.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub description: String,
    pub category_id: CategoryId,
    pub images: Vec<String>,
}
