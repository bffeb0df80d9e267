//! Create and edit form handlers.
//!
//! Both forms share one template. Validation failures and upstream errors
//! re-render the form with the submitted values; success flashes a message
//! and redirects (create to the list, edit to the detail page).

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
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
    forms::{self, CategoryOptions, ProductForm, ProductFormInput, SelectOption},
    state::AppState,
};

use super::detail::{NOT_FOUND_MESSAGE, UNAVAILABLE_MESSAGE, redirect_to_list};
use super::types::ProductView;

/// Which form is being shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    Create,
    Edit,
}

impl FormAction {
    #[must_use]
    pub const fn heading(self) -> &'static str {
        match self {
            Self::Create => "New product",
            Self::Edit => "Edit product",
        }
    }

    #[must_use]
    pub const fn submit_label(self) -> &'static str {
        match self {
            Self::Create => "Create product",
            Self::Edit => "Save changes",
        }
    }
}

/// Product create/edit form template.
#[derive(Template, WebTemplate)]
#[template(path = "products/form.html")]
pub struct ProductFormTemplate {
    pub flashes: Vec<FlashMessage>,
    pub action: FormAction,
    /// Form `action` attribute.
    pub submit_url: String,
    /// Where "Cancel" leads.
    pub cancel_url: String,
    pub form: ProductForm,
    pub category_options: Vec<SelectOption>,
    /// Product being edited, shown beside the form.
    pub product: Option<ProductView>,
}

impl ProductFormTemplate {
    async fn create(session: &Session, form: ProductForm) -> Self {
        Self {
            flashes: flash::take(session).await,
            action: FormAction::Create,
            submit_url: "/products/new".to_string(),
            cancel_url: "/products".to_string(),
            category_options: form.category_options(),
            form,
            product: None,
        }
    }

    async fn edit(session: &Session, product: ProductView, form: ProductForm) -> Self {
        Self {
            flashes: flash::take(session).await,
            action: FormAction::Edit,
            submit_url: format!("/products/{}/edit", product.id),
            cancel_url: format!("/products/{}", product.id),
            category_options: form.category_options(),
            form,
            product: Some(product),
        }
    }

    #[must_use]
    pub const fn is_edit(&self) -> bool {
        matches!(self.action, FormAction::Edit)
    }

    /// Image shown in the edit sidebar.
    #[must_use]
    pub fn preview_image(&self) -> &str {
        self.product.as_ref().map_or("", |p| p.image.as_str())
    }
}

/// Category choices for the form, falling back to the built-in set.
async fn category_options(state: &AppState) -> CategoryOptions {
    CategoryOptions::new(state.catalog().categories_or_builtin().await)
}

/// New product form.
#[instrument(skip(state, session))]
pub async fn new(State(state): State<AppState>, session: Session) -> ProductFormTemplate {
    let categories = category_options(&state).await;
    ProductFormTemplate::create(&session, ProductForm::empty(categories)).await
}

/// Create product submission.
#[instrument(skip(state, session, input))]
pub async fn create(
    State(state): State<AppState>,
    session: Session,
    Form(input): Form<ProductFormInput>,
) -> Result<Response, AppError> {
    let categories = category_options(&state).await;

    let valid = match forms::validate(&input, &categories) {
        Ok(valid) => valid,
        Err(errors) => {
            tracing::debug!(?errors, "Product form rejected");
            let form = ProductForm::rejected(input, errors, categories);
            return Ok(ProductFormTemplate::create(&session, form)
                .await
                .into_response());
        }
    };

    let body = valid.into_input(vec![state.catalog().placeholder_image().to_string()]);

    match state.catalog().create_product(&body).await {
        Ok(created) => {
            tracing::info!(product_id = %created.id, "Product created");
            flash::push(
                &session,
                FlashMessage::success(format!(
                    "Product \"{}\" created successfully",
                    created.title
                )),
            )
            .await?;
            Ok(Redirect::to("/products").into_response())
        }
        Err(_) => {
            let mut form = ProductForm::rejected(input, forms::FormErrors::default(), categories);
            form.errors.non_field = Some("Error creating the product".to_string());
            Ok(ProductFormTemplate::create(&session, form)
                .await
                .into_response())
        }
    }
}

/// Edit product form, pre-filled from the catalog.
#[instrument(skip(state, session))]
pub async fn edit(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<ProductId>,
) -> Result<Response, AppError> {
    let product = match Fetched::single(state.catalog().get_product(id).await) {
        Fetched::Found(product) => product,
        Fetched::Empty => {
            return redirect_to_list(&session, FlashMessage::error(NOT_FOUND_MESSAGE)).await;
        }
        Fetched::Unavailable(_) => {
            return redirect_to_list(&session, FlashMessage::error(UNAVAILABLE_MESSAGE)).await;
        }
    };

    let categories = category_options(&state).await;
    let form =
        ProductForm::from_product(&product, state.catalog().placeholder_image(), categories);

    Ok(
        ProductFormTemplate::edit(&session, ProductView::from(&product), form)
            .await
            .into_response(),
    )
}

/// Edit product submission.
///
/// Existing images are kept unless a new image URL is submitted.
#[instrument(skip(state, session, input))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<ProductId>,
    Form(input): Form<ProductFormInput>,
) -> Result<Response, AppError> {
    let product = match Fetched::single(state.catalog().get_product(id).await) {
        Fetched::Found(product) => product,
        Fetched::Empty => {
            return redirect_to_list(&session, FlashMessage::error(NOT_FOUND_MESSAGE)).await;
        }
        Fetched::Unavailable(_) => {
            return redirect_to_list(&session, FlashMessage::error(UNAVAILABLE_MESSAGE)).await;
        }
    };

    let categories = category_options(&state).await;
    let view = ProductView::from(&product);

    let valid = match forms::validate(&input, &categories) {
        Ok(valid) => valid,
        Err(errors) => {
            tracing::debug!(?errors, "Product form rejected");
            let form = ProductForm::rejected(input, errors, categories);
            return Ok(ProductFormTemplate::edit(&session, view, form)
                .await
                .into_response());
        }
    };

    let body = valid.into_input(product.images);

    match state.catalog().update_product(id, &body).await {
        Ok(updated) => {
            tracing::info!(product_id = %id, "Product updated");
            flash::push(
                &session,
                FlashMessage::success(format!(
                    "Product \"{}\" updated successfully",
                    updated.title
                )),
            )
            .await?;
            Ok(Redirect::to(&format!("/products/{id}")).into_response())
        }
        Err(_) => {
            let mut form = ProductForm::rejected(input, forms::FormErrors::default(), categories);
            form.errors.non_field = Some("Error updating the product".to_string());
            Ok(ProductFormTemplate::edit(&session, view, form)
                .await
                .into_response())
        }
    }
}
