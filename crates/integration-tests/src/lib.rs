//! Integration tests for the catalog admin.
//!
//! Each test starts a mocked catalog API (`httpmock`) and the real admin
//! router on an ephemeral port, then drives it over HTTP with a
//! cookie-keeping `reqwest` client so flash messages survive redirects.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p catalog-admin-integration-tests
//! ```
//!
//! No network access or external services are needed.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::missing_panics_doc, clippy::expect_used)]

use catalog_admin::config::AdminConfig;
use catalog_admin::routes;
use catalog_admin::state::AppState;
use httpmock::prelude::*;
use reqwest::{Client, Response, header, redirect};
use serde_json::{Value, json};

pub use catalog_admin_core::DEFAULT_PLACEHOLDER_IMAGE;

/// Catalog address with nothing listening; connections are refused at once.
pub const UNREACHABLE_CATALOG_URL: &str = "http://127.0.0.1:1/";

/// A running admin server backed by a mocked catalog.
pub struct TestContext {
    /// Mocked catalog API. Register expectations before making requests.
    pub catalog: MockServer,
    /// HTTP client with a cookie store; redirects are not followed.
    pub client: Client,
    base_url: String,
}

impl TestContext {
    /// Admin server talking to a fresh mock catalog.
    pub async fn new() -> Self {
        let catalog = MockServer::start_async().await;
        let catalog_url = catalog.base_url();
        Self::serve(catalog, &catalog_url).await
    }

    /// Admin server whose catalog cannot be reached.
    pub async fn with_unreachable_catalog() -> Self {
        let catalog = MockServer::start_async().await;
        Self::serve(catalog, UNREACHABLE_CATALOG_URL).await
    }

    async fn serve(catalog: MockServer, catalog_url: &str) -> Self {
        let config = AdminConfig::with_catalog_url(catalog_url).expect("valid catalog url");
        let state = AppState::new(config).expect("Failed to create application state");
        let app = routes::app(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to address");
        let addr = listener.local_addr().expect("bound address");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server error");
        });

        let client = Client::builder()
            .cookie_store(true)
            .redirect(redirect::Policy::none())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            catalog,
            client,
            base_url: format!("http://{addr}"),
        }
    }

    /// Absolute URL for an admin path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub async fn get(&self, path: &str) -> Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("GET request failed")
    }

    /// Body text of a GET that must succeed.
    pub async fn get_text(&self, path: &str) -> String {
        let resp = self.get(path).await;
        assert_eq!(resp.status(), 200, "GET {path}");
        resp.text().await.expect("Failed to read response")
    }

    /// POST an url-encoded form.
    pub async fn post_form(&self, path: &str, fields: &[(&str, &str)]) -> Response {
        let body = fields
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        self.client
            .post(self.url(path))
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await
            .expect("POST request failed")
    }

    pub async fn post(&self, path: &str) -> Response {
        self.client
            .post(self.url(path))
            .send()
            .await
            .expect("POST request failed")
    }

    /// Serve `products` from the catalog's list endpoint.
    pub async fn mock_products(&self, products: Value) {
        self.catalog
            .mock_async(|when, then| {
                when.method(GET).path("/products/");
                then.status(200).json_body(products);
            })
            .await;
    }

    /// Serve `categories` from the catalog's category endpoint.
    pub async fn mock_categories(&self, categories: Value) {
        self.catalog
            .mock_async(|when, then| {
                when.method(GET).path("/categories/");
                then.status(200).json_body(categories);
            })
            .await;
    }

    /// Serve one product from the catalog's detail endpoint.
    pub async fn mock_product(&self, product: Value) {
        let path = format!("/products/{}", product["id"]);
        self.catalog
            .mock_async(|when, then| {
                when.method(GET).path(path);
                then.status(200).json_body(product);
            })
            .await;
    }

    /// Answer a detail lookup the way the catalog does for unknown ids.
    pub async fn mock_missing_product(&self, id: i64) {
        self.catalog
            .mock_async(|when, then| {
                when.method(GET).path(format!("/products/{id}"));
                then.status(400)
                    .json_body(json!({"name": "EntityNotFoundError", "message": "not found"}));
            })
            .await;
    }
}

/// A catalog product record.
pub fn product(id: i64, title: &str, price: f64, category_id: i64) -> Value {
    json!({
        "id": id,
        "title": title,
        "price": price,
        "description": format!("{title} description"),
        "category": {"id": category_id, "name": format!("Category {category_id}")},
        "images": [format!("https://img.example/{id}.jpg")]
    })
}

/// Product ids in the order they appear on a rendered list page.
pub fn listed_ids(body: &str) -> Vec<i64> {
    body.split("data-product-id=\"")
        .skip(1)
        .filter_map(|rest| rest.split('"').next())
        .filter_map(|id| id.parse().ok())
        .collect()
}

/// Path from a redirect's `Location` header.
pub fn location(resp: &Response) -> String {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
