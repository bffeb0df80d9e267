//! Product detail page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use catalog_admin_core::ProductId;
use tower_sessions::Session;
use tracing::instrument;

use crate::{
    catalog::Fetched,
    error::AppError,
    filters,
    flash::{self, FlashMessage},
    state::AppState,
};

use super::types::ProductView;

/// Flash shown when a product id does not exist.
pub const NOT_FOUND_MESSAGE: &str = "Product not found";

/// Flash shown when the catalog cannot be reached.
pub const UNAVAILABLE_MESSAGE: &str = "The catalog is unavailable right now. Please try again later.";

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub flashes: Vec<FlashMessage>,
    pub product: ProductView,
}

/// Product detail page handler.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<ProductId>,
) -> Result<Response, AppError> {
    match Fetched::single(state.catalog().get_product(id).await) {
        Fetched::Found(product) => Ok(ProductShowTemplate {
            flashes: flash::take(&session).await,
            product: ProductView::from(&product),
        }
        .into_response()),
        Fetched::Empty => redirect_to_list(&session, FlashMessage::error(NOT_FOUND_MESSAGE)).await,
        Fetched::Unavailable(_) => {
            redirect_to_list(&session, FlashMessage::error(UNAVAILABLE_MESSAGE)).await
        }
    }
}

/// Flash `message` and send the browser back to the list.
pub(super) async fn redirect_to_list(
    session: &Session,
    message: FlashMessage,
) -> Result<Response, AppError> {
    flash::push(session, message).await?;
    Ok(Redirect::to("/products").into_response())
}
