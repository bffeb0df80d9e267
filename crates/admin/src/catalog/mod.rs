//! Remote catalog API client.
//!
//! The catalog is a third-party REST service and the only store of products
//! and categories; nothing is cached or persisted locally.
//!
//! # Endpoints
//!
//! | Operation        | Request                 | Success |
//! |------------------|-------------------------|---------|
//! | list products    | `GET products/`         | 200     |
//! | get product      | `GET products/{id}`     | 200     |
//! | list categories  | `GET categories/`       | 200     |
//! | create product   | `POST products/`        | 201     |
//! | update product   | `PUT products/{id}`     | 200     |
//! | delete product   | `DELETE products/{id}`  | 200     |
//!
//! Every call is made once. There are no retries and no timeout beyond the
//! HTTP client defaults.

mod fetched;

pub use fetched::Fetched;

use std::sync::Arc;

use catalog_admin_core::{Category, Product, ProductId, ProductInput, builtin_categories};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::instrument;
use url::Url;

use crate::config::CatalogConfig;

/// User agent sent with every catalog request.
const USER_AGENT: &str = concat!("catalog-admin/", env!("CARGO_PKG_VERSION"));

/// Maximum number of body characters kept in error values and logs.
const ERROR_BODY_LIMIT: usize = 500;

/// Errors that can occur when talking to the catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with an unexpected status.
    #[error("API error: {status} - {body}")]
    Status { status: StatusCode, body: String },

    /// The requested resource does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The response body did not decode.
    #[error("Parse error: {0}")]
    Parse(String),

    /// An endpoint URL could not be built.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Client for the remote catalog API.
///
/// Cheap to clone; constructed once at startup and shared through
/// [`crate::state::AppState`].
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: Url,
    placeholder_image: String,
}

impl CatalogClient {
    /// Create a new catalog client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client,
                base_url: config.base_url.clone(),
                placeholder_image: config.placeholder_image.clone(),
            }),
        })
    }

    /// Image used for products without images.
    #[must_use]
    pub fn placeholder_image(&self) -> &str {
        &self.inner.placeholder_image
    }

    /// Fetch every product.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` on transport failure, non-200 status, or an
    /// undecodable body.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, CatalogError> {
        let url = self.endpoint("products/")?;
        let response = self.inner.client.get(url).send().await;
        let products: Vec<Product> = Self::expect_json(response, StatusCode::OK)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to fetch products"))?;

        Ok(products
            .into_iter()
            .map(|p| p.with_placeholder(self.placeholder_image()))
            .collect())
    }

    /// Fetch one product.
    ///
    /// The catalog answers unknown ids with 400 or 404; both map to
    /// [`CatalogError::NotFound`].
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` for unknown ids, other variants for
    /// upstream failures.
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        let url = self.endpoint(&format!("products/{id}"))?;
        let response = self.inner.client.get(url).send().await;

        match Self::expect_json::<Product>(response, StatusCode::OK).await {
            Ok(product) => Ok(product.with_placeholder(self.placeholder_image())),
            Err(CatalogError::Status { status, .. })
                if status == StatusCode::NOT_FOUND || status == StatusCode::BAD_REQUEST =>
            {
                tracing::warn!(product_id = %id, %status, "Product not found");
                Err(CatalogError::NotFound(format!("product {id}")))
            }
            Err(e) => {
                tracing::error!(product_id = %id, error = %e, "Failed to fetch product");
                Err(e)
            }
        }
    }

    /// Fetch every category.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` on transport failure, non-200 status, or an
    /// undecodable body.
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> Result<Vec<Category>, CatalogError> {
        let url = self.endpoint("categories/")?;
        let response = self.inner.client.get(url).send().await;
        Self::expect_json(response, StatusCode::OK)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to fetch categories"))
    }

    /// Categories for form and filter choices.
    ///
    /// Falls back to the built-in set when the catalog is unreachable or has
    /// no categories.
    pub async fn categories_or_builtin(&self) -> Vec<Category> {
        match Fetched::list(self.list_categories().await) {
            Fetched::Found(categories) => categories,
            Fetched::Empty => {
                tracing::info!("Catalog returned no categories, using built-in set");
                builtin_categories()
            }
            Fetched::Unavailable(_) => {
                tracing::warn!("Catalog categories unavailable, using built-in set");
                builtin_categories()
            }
        }
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` unless the API answers 201 with the new product.
    #[instrument(skip(self, input), fields(title = %input.title))]
    pub async fn create_product(&self, input: &ProductInput) -> Result<Product, CatalogError> {
        let url = self.endpoint("products/")?;
        let response = self.inner.client.post(url).json(input).send().await;
        Self::expect_json(response, StatusCode::CREATED)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to create product"))
    }

    /// Replace a product's fields.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` unless the API answers 200 with the product.
    #[instrument(skip(self, input), fields(title = %input.title))]
    pub async fn update_product(
        &self,
        id: ProductId,
        input: &ProductInput,
    ) -> Result<Product, CatalogError> {
        let url = self.endpoint(&format!("products/{id}"))?;
        let response = self.inner.client.put(url).json(input).send().await;
        Self::expect_json(response, StatusCode::OK)
            .await
            .inspect_err(|e| tracing::error!(product_id = %id, error = %e, "Failed to update product"))
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` unless the API answers 200.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: ProductId) -> Result<(), CatalogError> {
        let url = self.endpoint(&format!("products/{id}"))?;
        let response = self.inner.client.delete(url).send().await?;

        let status = response.status();
        if status == StatusCode::OK {
            return Ok(());
        }

        let err = status_error(status, response).await;
        tracing::error!(product_id = %id, error = %err, "Failed to delete product");
        Err(err)
    }

    /// Resolve a path relative to the configured base URL.
    fn endpoint(&self, path: &str) -> Result<Url, CatalogError> {
        Ok(self.inner.base_url.join(path)?)
    }

    /// Check the status and decode a JSON body.
    async fn expect_json<T: DeserializeOwned>(
        response: Result<reqwest::Response, reqwest::Error>,
        expected: StatusCode,
    ) -> Result<T, CatalogError> {
        let response = response?;
        let status = response.status();

        if status != expected {
            return Err(status_error(status, response).await);
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::debug!(
                body = %truncate(&body),
                "Catalog response did not match the expected shape"
            );
            CatalogError::Parse(e.to_string())
        })
    }
}

impl std::fmt::Debug for CatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogClient")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}

/// Build a `Status` error, keeping a prefix of the body for diagnostics.
async fn status_error(status: StatusCode, response: reqwest::Response) -> CatalogError {
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());

    CatalogError::Status {
        status,
        body: truncate(&body),
    }
}

fn truncate(body: &str) -> String {
    body.chars().take(ERROR_BODY_LIMIT).collect()
}
