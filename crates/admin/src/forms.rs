//! Product form parsing and validation.
//!
//! Form posts arrive as raw strings. [`validate`] turns them into a
//! [`ValidProduct`] or a set of per-field messages that the form template
//! shows next to each input, together with the submitted values.
//!
//! # Field Rules
//!
//! | Field         | Rule |
//! |---------------|------|
//! | `title`       | required, at most 200 characters, at least 3 after trimming |
//! | `price`       | decimal (exponent notation allowed), at least 0.01, at most 2 decimal places as written and 8 integer digits |
//! | `description` | required, trimmed |
//! | `category_id` | integer, at least 1, one of the offered categories |
//! | `image_url`   | optional http(s) URL; `http://` is assumed when no scheme is given |

use std::str::FromStr;

use catalog_admin_core::{Category, CategoryId, Product, ProductInput};
use rust_decimal::Decimal;
use serde::Deserialize;
use url::Url;

/// Maximum title length in characters.
pub const TITLE_MAX_CHARS: usize = 200;

/// Minimum title length in characters, after trimming.
pub const TITLE_MIN_CHARS: usize = 3;

/// Maximum digits before the decimal point in a price.
const PRICE_MAX_INTEGER_DIGITS: usize = 8;

/// Maximum digits after the decimal point in a price.
const PRICE_MAX_DECIMAL_PLACES: u32 = 2;

const REQUIRED: &str = "This field is required.";

/// Raw product form submission.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProductFormInput {
    pub title: String,
    pub price: String,
    pub description: String,
    pub category_id: String,
    pub image_url: String,
}

/// Categories a submitted `category_id` must belong to.
///
/// Built from live catalog categories, or the built-in set when those are
/// unavailable, and passed in when the form is constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryOptions {
    categories: Vec<Category>,
}

impl CategoryOptions {
    #[must_use]
    pub const fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    #[must_use]
    pub fn builtin() -> Self {
        Self::new(catalog_admin_core::builtin_categories())
    }

    #[must_use]
    pub fn contains(&self, id: CategoryId) -> bool {
        self.categories.iter().any(|c| c.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }
}

/// Per-field validation messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub title: Option<String>,
    pub price: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<String>,
    pub image_url: Option<String>,
    /// Errors not tied to a single field, e.g. an upstream failure.
    pub non_field: Option<String>,
}

impl FormErrors {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.price.is_none()
            && self.description.is_none()
            && self.category_id.is_none()
            && self.image_url.is_none()
            && self.non_field.is_none()
    }

    /// Message for `field`, or an empty string.
    #[must_use]
    pub fn message(&self, field: &str) -> &str {
        let message = match field {
            "title" => &self.title,
            "price" => &self.price,
            "description" => &self.description,
            "category_id" => &self.category_id,
            "image_url" => &self.image_url,
            _ => &self.non_field,
        };
        message.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn has(&self, field: &str) -> bool {
        !self.message(field).is_empty()
    }
}

/// A submission that passed every field rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidProduct {
    /// Trimmed title.
    pub title: String,
    pub price: Decimal,
    pub description: String,
    pub category_id: CategoryId,
    /// Normalized image URL, if one was given.
    pub image_url: Option<String>,
}

impl ValidProduct {
    /// Request body for the catalog, with `images` used when no image URL
    /// was submitted.
    #[must_use]
    pub fn into_input(self, images: Vec<String>) -> ProductInput {
        let images = self.image_url.map_or(images, |url| vec![url]);

        ProductInput {
            title: self.title,
            price: self.price,
            description: self.description,
            category_id: self.category_id,
            images,
        }
    }
}

/// Validate a submission against `categories`.
///
/// # Errors
///
/// Returns the per-field messages when any rule fails.
pub fn validate(
    input: &ProductFormInput,
    categories: &CategoryOptions,
) -> Result<ValidProduct, FormErrors> {
    let title = validate_title(&input.title);
    let price = validate_price(&input.price);
    let description = validate_description(&input.description);
    let category_id = validate_category(&input.category_id, categories);
    let image_url = validate_image_url(&input.image_url);

    match (title, price, description, category_id, image_url) {
        (Ok(title), Ok(price), Ok(description), Ok(category_id), Ok(image_url)) => {
            Ok(ValidProduct {
                title,
                price,
                description,
                category_id,
                image_url,
            })
        }
        (title, price, description, category_id, image_url) => Err(FormErrors {
            title: title.err(),
            price: price.err(),
            description: description.err(),
            category_id: category_id.err(),
            image_url: image_url.err(),
            non_field: None,
        }),
    }
}

/// Trim and check a title.
///
/// # Errors
///
/// Returns the message to show beside the field.
pub fn validate_title(raw: &str) -> Result<String, String> {
    let title = raw.trim();
    let chars = title.chars().count();

    if chars == 0 {
        return Err(REQUIRED.to_string());
    }
    if chars > TITLE_MAX_CHARS {
        return Err(format!(
            "Ensure this value has at most {TITLE_MAX_CHARS} characters (it has {chars})."
        ));
    }
    if chars < TITLE_MIN_CHARS {
        return Err(format!(
            "Title must be at least {TITLE_MIN_CHARS} characters long."
        ));
    }

    Ok(title.to_string())
}

/// Parse and check a price.
///
/// # Errors
///
/// Returns the message to show beside the field.
pub fn validate_price(raw: &str) -> Result<Decimal, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(REQUIRED.to_string());
    }

    // "1.990" has three decimal places even though the value has two.
    let price = Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|_| "Enter a number.".to_string())?;

    if price <= Decimal::ZERO {
        return Err("Price must be greater than 0.".to_string());
    }

    if price.scale() > PRICE_MAX_DECIMAL_PLACES {
        return Err(format!(
            "Ensure that there are no more than {PRICE_MAX_DECIMAL_PLACES} decimal places."
        ));
    }
    if price.trunc().to_string().len() > PRICE_MAX_INTEGER_DIGITS {
        return Err(format!(
            "Ensure that there are no more than {PRICE_MAX_INTEGER_DIGITS} digits before the decimal point."
        ));
    }

    Ok(price)
}

fn validate_description(raw: &str) -> Result<String, String> {
    let description = raw.trim();
    if description.is_empty() {
        Err(REQUIRED.to_string())
    } else {
        Ok(description.to_string())
    }
}

fn validate_category(raw: &str, categories: &CategoryOptions) -> Result<CategoryId, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(REQUIRED.to_string());
    }

    let id = raw
        .parse::<CategoryId>()
        .map_err(|_| "Enter a whole number.".to_string())?;

    if id.as_i64() < 1 {
        return Err("Ensure this value is greater than or equal to 1.".to_string());
    }
    if !categories.contains(id) {
        return Err(format!(
            "Select a valid choice. {id} is not one of the available choices."
        ));
    }

    Ok(id)
}

/// Normalize an optional image URL. Blank input means "no image".
fn validate_image_url(raw: &str) -> Result<Option<String>, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    let candidate = if raw.contains("://") {
        raw.to_string()
    } else {
        format!("http://{raw}")
    };

    match Url::parse(&candidate) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.host().is_some() => {
            Ok(Some(candidate))
        }
        _ => Err("Enter a valid URL.".to_string()),
    }
}

/// A `<select>` option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// Form state handed to the template: values, messages, and choices.
#[derive(Debug, Clone)]
pub struct ProductForm {
    pub values: ProductFormInput,
    pub errors: FormErrors,
    pub categories: CategoryOptions,
}

impl ProductForm {
    /// Blank form for creating a product.
    #[must_use]
    pub fn empty(categories: CategoryOptions) -> Self {
        Self {
            values: ProductFormInput::default(),
            errors: FormErrors::default(),
            categories,
        }
    }

    /// Form pre-filled from an existing product.
    ///
    /// The category defaults to 1 when the product has none; the image URL is
    /// the product's first image, or blank when that is only `placeholder`.
    #[must_use]
    pub fn from_product(
        product: &Product,
        placeholder: &str,
        categories: CategoryOptions,
    ) -> Self {
        let category_id = product.category_id().unwrap_or(CategoryId::new(1));

        Self {
            values: ProductFormInput {
                title: product.title.clone(),
                price: product.price.to_string(),
                description: product.description.clone(),
                category_id: category_id.to_string(),
                image_url: product
                    .primary_image()
                    .filter(|url| *url != placeholder)
                    .unwrap_or_default()
                    .to_string(),
            },
            errors: FormErrors::default(),
            categories,
        }
    }

    /// Submitted values with their validation messages.
    #[must_use]
    pub const fn rejected(
        values: ProductFormInput,
        errors: FormErrors,
        categories: CategoryOptions,
    ) -> Self {
        Self {
            values,
            errors,
            categories,
        }
    }

    /// Category choices with the current value selected.
    #[must_use]
    pub fn category_options(&self) -> Vec<SelectOption> {
        let current = self.values.category_id.trim();

        self.categories
            .iter()
            .map(|c| {
                let value = c.id.to_string();
                SelectOption {
                    selected: value == current,
                    label: c.name.clone(),
                    value,
                }
            })
            .collect()
    }
}
