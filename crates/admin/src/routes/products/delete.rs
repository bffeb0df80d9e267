//! Product deletion, called from the list and detail pages via `fetch`.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use catalog_admin_core::ProductId;
use tower_sessions::Session;
use tracing::instrument;

use crate::{
    catalog::Fetched,
    error::AppError,
    flash::{self, FlashMessage},
    state::AppState,
};

use super::detail::NOT_FOUND_MESSAGE;
use super::types::ApiResponse;

const DELETE_FAILED_MESSAGE: &str = "Error deleting the product";

/// Delete a product and report the outcome as JSON.
///
/// The product is fetched first so the confirmation can name it. On success
/// a flash message is queued for the page the client navigates to next.
/// Ids that are not numbers are reported as not found.
#[instrument(skip(state, session))]
pub async fn delete(
    State(state): State<AppState>,
    session: Session,
    Path(raw_id): Path<String>,
) -> Result<Json<ApiResponse>, AppError> {
    let Ok(id) = raw_id.parse::<ProductId>() else {
        return Ok(Json(ApiResponse::failed(NOT_FOUND_MESSAGE)));
    };

    let product = match Fetched::single(state.catalog().get_product(id).await) {
        Fetched::Found(product) => product,
        Fetched::Empty => return Ok(Json(ApiResponse::failed(NOT_FOUND_MESSAGE))),
        Fetched::Unavailable(_) => return Ok(Json(ApiResponse::failed(DELETE_FAILED_MESSAGE))),
    };

    if state.catalog().delete_product(id).await.is_err() {
        return Ok(Json(ApiResponse::failed(DELETE_FAILED_MESSAGE)));
    }

    tracing::info!(product_id = %id, "Product deleted");
    flash::push(
        &session,
        FlashMessage::success(format!("Product \"{}\" deleted successfully", product.title)),
    )
    .await?;

    Ok(Json(ApiResponse::ok("Product deleted successfully")))
}

/// Any method other than POST on the delete route.
pub async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ApiResponse::failed("Method not allowed")),
    )
}
