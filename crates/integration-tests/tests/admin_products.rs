//! Integration tests for admin product management.
//!
//! Each test runs the admin router against its own mocked catalog.
//!
//! Run with: cargo test -p catalog-admin-integration-tests

#![allow(clippy::unwrap_used)]

use catalog_admin_integration_tests::{
    DEFAULT_PLACEHOLDER_IMAGE, TestContext, listed_ids, location, product,
};
use httpmock::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

fn builtin_categories() -> Value {
    json!([
        {"id": 1, "name": "Clothes"},
        {"id": 2, "name": "Electronics"},
        {"id": 3, "name": "Furniture"},
        {"id": 4, "name": "Shoes"},
        {"id": 5, "name": "Others"}
    ])
}

fn valid_form<'a>(title: &'a str, image_url: &'a str) -> Vec<(&'a str, &'a str)> {
    vec![
        ("title", title),
        ("price", "24.99"),
        ("description", "Adjustable arm"),
        ("category_id", "3"),
        ("image_url", image_url),
    ]
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_and_root_redirect() {
    let ctx = TestContext::new().await;

    assert_eq!(ctx.get_text("/health").await, "ok");

    let resp = ctx.get("/").await;
    assert!(resp.status().is_redirection());
    assert_eq!(location(&resp), "/products");
}

#[tokio::test]
async fn test_readiness_reports_catalog_outage() {
    let ctx = TestContext::with_unreachable_catalog().await;
    assert_eq!(ctx.get("/health/ready").await.status(), 503);

    let ctx = TestContext::new().await;
    ctx.mock_categories(builtin_categories()).await;
    assert_eq!(ctx.get("/health/ready").await.status(), 200);
}

// ============================================================================
// List, Filter, Sort & Pagination
// ============================================================================

#[tokio::test]
async fn test_list_sorted_by_price_descending() {
    let ctx = TestContext::new().await;
    ctx.mock_products(json!([
        product(1, "Socks", 10.0, 1),
        product(2, "Kettle", 75.0, 2),
        product(3, "Sofa", 600.0, 3),
    ]))
    .await;
    ctx.mock_categories(builtin_categories()).await;

    let body = ctx.get_text("/products?sort=price_desc").await;

    assert_eq!(listed_ids(&body), vec![3, 2, 1]);
    assert!(body.contains("$600.00"));
}

#[tokio::test]
async fn test_list_filters_by_category_and_price() {
    let ctx = TestContext::new().await;
    ctx.mock_products(json!([
        product(1, "Red Shirt", 50.0, 1),
        product(2, "Blue Shirt", 50.01, 1),
        product(3, "Red Lamp", 40.0, 2),
    ]))
    .await;
    ctx.mock_categories(builtin_categories()).await;

    let body = ctx.get_text("/products?category=1&price_range=0-50").await;
    assert_eq!(listed_ids(&body), vec![1]);

    let body = ctx.get_text("/products?search=%20red%20").await;
    assert_eq!(listed_ids(&body), vec![1, 3]);
}

#[tokio::test]
async fn test_list_paginates_and_keeps_filters_in_links() {
    let ctx = TestContext::new().await;
    let products: Vec<Value> = (1..=14)
        .map(|id| product(id, &format!("Item {id:02}"), 20.0, 1))
        .collect();
    ctx.mock_products(Value::Array(products)).await;
    ctx.mock_categories(builtin_categories()).await;

    let first = ctx.get_text("/products?search=item").await;
    assert_eq!(listed_ids(&first).len(), 12);
    assert!(first.contains("Page 1 of 2"));
    assert!(first.contains("href=\"/products?search=item&#38;page=2\""));

    let second = ctx.get_text("/products?search=item&page=2").await;
    assert_eq!(listed_ids(&second), vec![13, 14]);

    let clamped = ctx.get_text("/products?search=item&page=99").await;
    assert_eq!(listed_ids(&clamped), vec![13, 14]);

    let garbage = ctx.get_text("/products?page=abc").await;
    assert!(garbage.contains("Page 1 of 2"));
}

#[tokio::test]
async fn test_invalid_filter_is_reported_and_ignored() {
    let ctx = TestContext::new().await;
    ctx.mock_products(json!([
        product(1, "Cheap", 10.0, 1),
        product(2, "Dear", 900.0, 2),
    ]))
    .await;
    ctx.mock_categories(builtin_categories()).await;

    let body = ctx
        .get_text("/products?price_range=cheap&category=2")
        .await;

    assert!(body.contains("Unknown price range"));
    // The valid category criterion still applies.
    assert_eq!(listed_ids(&body), vec![2]);
}

#[tokio::test]
async fn test_list_shows_outage_notice_when_catalog_unreachable() {
    let ctx = TestContext::with_unreachable_catalog().await;

    let body = ctx.get_text("/products").await;

    assert!(body.contains("The catalog is unavailable right now"));
    assert!(listed_ids(&body).is_empty());
}

// ============================================================================
// Detail
// ============================================================================

#[tokio::test]
async fn test_detail_renders_product() {
    let ctx = TestContext::new().await;
    ctx.mock_product(product(7, "Oak Chair", 45.5, 3)).await;

    let body = ctx.get_text("/products/7").await;

    assert!(body.contains("Oak Chair"));
    assert!(body.contains("$45.50"));
    assert!(body.contains("https://img.example/7.jpg"));
}

#[tokio::test]
async fn test_detail_not_found_redirects_with_flash() {
    let ctx = TestContext::new().await;
    ctx.mock_missing_product(999).await;
    ctx.mock_products(json!([])).await;
    ctx.mock_categories(builtin_categories()).await;

    let resp = ctx.get("/products/999").await;
    assert!(resp.status().is_redirection());
    assert_eq!(location(&resp), "/products");

    let body = ctx.get_text("/products").await;
    assert!(body.contains("Product not found"));

    // Shown once only.
    let body = ctx.get_text("/products").await;
    assert!(!body.contains("Product not found"));
}

#[tokio::test]
async fn test_detail_unreachable_catalog_redirects_with_flash() {
    let ctx = TestContext::with_unreachable_catalog().await;

    let resp = ctx.get("/products/7").await;
    assert!(resp.status().is_redirection());
    assert_eq!(location(&resp), "/products");

    let body = ctx.get_text("/products").await;
    assert!(body.contains(
        "<div class=\"flash flash-error\" role=\"status\">The catalog is unavailable right now. Please try again later.</div>"
    ));
}

// ============================================================================
// Create
// ============================================================================

#[tokio::test]
async fn test_new_form_falls_back_to_builtin_categories() {
    let ctx = TestContext::with_unreachable_catalog().await;

    let body = ctx.get_text("/products/new").await;

    let positions: Vec<usize> = [
        "<option value=\"1\">Clothes</option>",
        "<option value=\"2\">Electronics</option>",
        "<option value=\"3\">Furniture</option>",
        "<option value=\"4\">Shoes</option>",
        "<option value=\"5\">Others</option>",
    ]
    .iter()
    .map(|option| body.find(option).unwrap())
    .collect();

    let mut sorted = positions.clone();
    sorted.sort_unstable();
    assert_eq!(positions, sorted);
    assert_eq!(body.matches("<option value=").count(), 5);
}

#[tokio::test]
async fn test_create_rejects_invalid_submission() {
    let ctx = TestContext::new().await;
    ctx.mock_categories(builtin_categories()).await;
    let create = ctx
        .catalog
        .mock_async(|when, then| {
            when.method(POST).path("/products/");
            then.status(201).json_body(json!({"id": 1}));
        })
        .await;

    let resp = ctx
        .post_form(
            "/products/new",
            &[
                ("title", "ab"),
                ("price", "0"),
                ("description", "Thing"),
                ("category_id", "42"),
            ],
        )
        .await;

    assert_eq!(resp.status(), 200);
    let body = resp.text().await.unwrap();
    assert!(body.contains("Title must be at least 3 characters long."));
    assert!(body.contains("Price must be greater than 0."));
    assert!(body.contains("is not one of the available choices"));
    assert!(body.contains("value=\"ab\""));
    create.assert_hits_async(0).await;
}

#[tokio::test]
async fn test_create_success_redirects_and_flashes() {
    let ctx = TestContext::new().await;
    ctx.mock_categories(builtin_categories()).await;
    ctx.mock_products(json!([])).await;
    let create = ctx
        .catalog
        .mock_async(|when, then| {
            when.method(POST).path("/products/").json_body(json!({
                "title": "Desk Lamp",
                "price": 24.99,
                "description": "Adjustable arm",
                "categoryId": 3,
                "images": [DEFAULT_PLACEHOLDER_IMAGE]
            }));
            then.status(201)
                .json_body(product(50, "Desk Lamp", 24.99, 3));
        })
        .await;

    let resp = ctx
        .post_form("/products/new", &valid_form("  Desk Lamp ", ""))
        .await;

    create.assert_async().await;
    assert!(resp.status().is_redirection());
    assert_eq!(location(&resp), "/products");

    let body = ctx.get_text("/products").await;
    assert!(body.contains("Desk Lamp"));
    assert!(body.contains("created successfully"));
}

#[tokio::test]
async fn test_create_upstream_failure_rerenders_form() {
    let ctx = TestContext::new().await;
    ctx.mock_categories(builtin_categories()).await;
    ctx.catalog
        .mock_async(|when, then| {
            when.method(POST).path("/products/");
            then.status(500);
        })
        .await;

    let resp = ctx
        .post_form(
            "/products/new",
            &valid_form("Desk Lamp", "img.example/lamp.jpg"),
        )
        .await;

    assert_eq!(resp.status(), 200);
    let body = resp.text().await.unwrap();
    assert!(body.contains("Error creating the product"));
    assert!(body.contains("value=\"Desk Lamp\""));
}

// ============================================================================
// Edit
// ============================================================================

#[tokio::test]
async fn test_edit_form_is_prefilled() {
    let ctx = TestContext::new().await;
    ctx.mock_product(product(5, "Oak Chair", 45.5, 3)).await;
    ctx.mock_categories(builtin_categories()).await;

    let body = ctx.get_text("/products/5/edit").await;

    assert!(body.contains("value=\"Oak Chair\""));
    assert!(body.contains("value=\"45.5\""));
    assert!(body.contains("<option value=\"3\" selected>Furniture</option>"));
    assert!(body.contains("action=\"/products/5/edit\""));
}

#[tokio::test]
async fn test_edit_keeps_existing_images_and_redirects_to_detail() {
    let ctx = TestContext::new().await;
    ctx.mock_categories(builtin_categories()).await;
    ctx.mock_product(json!({
        "id": 5,
        "title": "Oak Chair",
        "price": 45.5,
        "description": "Solid oak",
        "category": {"id": 3, "name": "Furniture"},
        "images": ["https://img.example/a.jpg", "https://img.example/b.jpg"]
    }))
    .await;
    let update = ctx
        .catalog
        .mock_async(|when, then| {
            when.method(PUT).path("/products/5").json_body(json!({
                "title": "Desk Lamp",
                "price": 24.99,
                "description": "Adjustable arm",
                "categoryId": 3,
                "images": ["https://img.example/a.jpg", "https://img.example/b.jpg"]
            }));
            then.status(200)
                .json_body(product(5, "Desk Lamp", 24.99, 3));
        })
        .await;

    let resp = ctx
        .post_form("/products/5/edit", &valid_form("Desk Lamp", ""))
        .await;

    update.assert_async().await;
    assert!(resp.status().is_redirection());
    assert_eq!(location(&resp), "/products/5");
}

#[tokio::test]
async fn test_edit_form_leaves_placeholder_image_blank() {
    let ctx = TestContext::new().await;
    ctx.mock_categories(builtin_categories()).await;
    ctx.mock_product(json!({
        "id": 8, "title": "Bare Stool", "price": 12, "description": "No photo", "images": []
    }))
    .await;

    let body = ctx.get_text("/products/8/edit").await;

    assert!(body.contains("name=\"image_url\" type=\"url\" value=\"\""));
}

#[tokio::test]
async fn test_edit_rejects_invalid_submission() {
    let ctx = TestContext::new().await;
    ctx.mock_categories(builtin_categories()).await;
    ctx.mock_product(product(5, "Oak Chair", 45.5, 3)).await;
    let update = ctx
        .catalog
        .mock_async(|when, then| {
            when.method(PUT).path("/products/5");
            then.status(200).json_body(product(5, "ab", 45.5, 3));
        })
        .await;

    let resp = ctx
        .post_form(
            "/products/5/edit",
            &[
                ("title", "ab"),
                ("price", "1.999"),
                ("description", "Solid oak"),
                ("category_id", "3"),
            ],
        )
        .await;

    assert_eq!(resp.status(), 200);
    let body = resp.text().await.unwrap();
    assert!(body.contains("Title must be at least 3 characters long."));
    assert!(body.contains("no more than 2 decimal places"));
    assert!(body.contains("value=\"ab\""));
    assert!(body.contains("action=\"/products/5/edit\""));
    update.assert_hits_async(0).await;
}

#[tokio::test]
async fn test_edit_upstream_failure_rerenders_form() {
    let ctx = TestContext::new().await;
    ctx.mock_categories(builtin_categories()).await;
    ctx.mock_product(product(5, "Oak Chair", 45.5, 3)).await;
    ctx.catalog
        .mock_async(|when, then| {
            when.method(PUT).path("/products/5");
            then.status(500);
        })
        .await;

    let resp = ctx
        .post_form("/products/5/edit", &valid_form("Desk Lamp", ""))
        .await;

    assert_eq!(resp.status(), 200);
    let body = resp.text().await.unwrap();
    assert!(body.contains("Error updating the product"));
    assert!(body.contains("value=\"Desk Lamp\""));
}

#[tokio::test]
async fn test_edit_new_image_replaces_existing_images() {
    let ctx = TestContext::new().await;
    ctx.mock_categories(builtin_categories()).await;
    ctx.mock_product(product(5, "Oak Chair", 45.5, 3)).await;
    let update = ctx
        .catalog
        .mock_async(|when, then| {
            when.method(PUT).path("/products/5").json_body(json!({
                "title": "Desk Lamp",
                "price": 24.99,
                "description": "Adjustable arm",
                "categoryId": 3,
                "images": ["http://img.example/new.jpg"]
            }));
            then.status(200)
                .json_body(product(5, "Desk Lamp", 24.99, 3));
        })
        .await;

    let resp = ctx
        .post_form("/products/5/edit", &valid_form("Desk Lamp", "img.example/new.jpg"))
        .await;

    update.assert_async().await;
    assert!(resp.status().is_redirection());
    assert_eq!(location(&resp), "/products/5");
}

#[tokio::test]
async fn test_edit_missing_product_redirects_to_list() {
    let ctx = TestContext::new().await;
    ctx.mock_missing_product(404).await;

    let resp = ctx.get("/products/404/edit").await;

    assert!(resp.status().is_redirection());
    assert_eq!(location(&resp), "/products");
}

// ============================================================================
// Delete
// ============================================================================

#[tokio::test]
async fn test_delete_success_returns_json_and_flashes() {
    let ctx = TestContext::new().await;
    ctx.mock_product(product(5, "Oak Chair", 45.5, 3)).await;
    ctx.mock_products(json!([])).await;
    ctx.mock_categories(builtin_categories()).await;
    let delete = ctx
        .catalog
        .mock_async(|when, then| {
            when.method(DELETE).path("/products/5");
            then.status(200).body("true");
        })
        .await;

    let resp = ctx.post("/products/5/delete").await;

    delete.assert_async().await;
    assert_eq!(resp.status(), 200);
    let result: Value = resp.json().await.unwrap();
    assert_eq!(
        result,
        json!({"success": true, "message": "Product deleted successfully"})
    );

    let body = ctx.get_text("/products").await;
    assert!(body.contains("deleted successfully"));
}

#[tokio::test]
async fn test_delete_reports_missing_product() {
    let ctx = TestContext::new().await;
    ctx.mock_missing_product(6).await;

    let result: Value = ctx.post("/products/6/delete").await.json().await.unwrap();

    assert_eq!(
        result,
        json!({"success": false, "message": "Product not found"})
    );
}

#[tokio::test]
async fn test_delete_reports_upstream_failure() {
    let ctx = TestContext::new().await;
    ctx.mock_product(product(7, "Lamp", 20.0, 2)).await;
    ctx.catalog
        .mock_async(|when, then| {
            when.method(DELETE).path("/products/7");
            then.status(500);
        })
        .await;

    let result: Value = ctx.post("/products/7/delete").await.json().await.unwrap();

    assert_eq!(
        result,
        json!({"success": false, "message": "Error deleting the product"})
    );
}

#[tokio::test]
async fn test_delete_rejects_other_methods() {
    let ctx = TestContext::new().await;

    let resp = ctx.get("/products/5/delete").await;

    assert_eq!(resp.status(), 405);
    let result: Value = resp.json().await.unwrap();
    assert_eq!(
        result,
        json!({"success": false, "message": "Method not allowed"})
    );
}

#[tokio::test]
async fn test_delete_reports_unreachable_catalog() {
    let ctx = TestContext::with_unreachable_catalog().await;

    let result: Value = ctx.post("/products/5/delete").await.json().await.unwrap();

    assert_eq!(
        result,
        json!({"success": false, "message": "Error deleting the product"})
    );
}

#[tokio::test]
async fn test_delete_non_numeric_id_reports_not_found() {
    let ctx = TestContext::new().await;

    let resp = ctx.post("/products/abc/delete").await;

    assert_eq!(resp.status(), 200);
    let result: Value = resp.json().await.unwrap();
    assert_eq!(
        result,
        json!({"success": false, "message": "Product not found"})
    );
}
