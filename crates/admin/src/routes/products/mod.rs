//! Product management route handlers.
//!
//! This module contains handlers for the product list, detail view,
//! create/edit forms, and asynchronous deletion.

mod delete;
mod detail;
mod form;
mod list;
pub mod types;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

pub use delete::{delete, method_not_allowed};
pub use detail::{NOT_FOUND_MESSAGE, ProductShowTemplate, UNAVAILABLE_MESSAGE, show};
pub use form::{FormAction, ProductFormTemplate, create, edit, new, update};
pub use list::{ProductsIndexTemplate, index};
pub use types::{ApiResponse, PageLink, PageView, ProductView, ProductsQuery};

/// Build the products router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", get(index))
        .route("/products/new", get(new).post(create))
        .route("/products/{id}", get(show))
        .route("/products/{id}/edit", get(edit).post(update))
        .route(
            "/products/{id}/delete",
            post(delete).fallback(method_not_allowed),
        )
}
