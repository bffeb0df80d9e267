//! Products list page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use catalog_admin_core::{PAGE_SIZE, Paginator, distinct_category_count};
use tower_sessions::Session;
use tracing::instrument;

use crate::{
    catalog::Fetched,
    filters,
    flash::{self, FlashMessage},
    state::AppState,
};

use super::types::{
    PageView, ProductView, ProductsQuery, SelectOption, build_preserve_params,
    category_filter_options, price_range_options, sort_options,
};

/// Products list page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub flashes: Vec<FlashMessage>,
    /// Products on the current page.
    pub products: Vec<ProductView>,
    pub page: PageView,
    /// Products in the catalog before filtering.
    pub total_products: usize,
    /// Products matching the active filters, when any filter is active.
    pub filtered_count: Option<usize>,
    /// Distinct categories among all products.
    pub total_categories: usize,
    /// Current search value.
    pub search: String,
    pub category_options: Vec<SelectOption>,
    pub price_range_options: Vec<SelectOption>,
    pub sort_options: Vec<SelectOption>,
    /// Rejected filter values, shown above the list.
    pub filter_errors: Vec<String>,
    /// The catalog could not be reached.
    pub catalog_unavailable: bool,
}

impl ProductsIndexTemplate {
    /// Whether a filtered count should be shown.
    #[must_use]
    pub const fn is_filtered(&self) -> bool {
        self.filtered_count.is_some()
    }

    #[must_use]
    pub fn filtered_total(&self) -> usize {
        self.filtered_count.unwrap_or(self.total_products)
    }
}

/// Products list page handler.
///
/// Fetches every product, filters, sorts, and paginates in memory.
#[instrument(skip(state, session))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ProductsQuery>,
) -> ProductsIndexTemplate {
    let products = Fetched::list(state.catalog().list_products().await);
    let catalog_unavailable = products.is_unavailable();
    let all_products = products.into_items();

    let categories = state.catalog().categories_or_builtin().await;

    let (filter, errors) = query.filter();
    if !errors.is_empty() {
        tracing::info!(?errors, "Ignoring invalid filter values");
    }
    let sort = query.sort_key();

    let total_products = all_products.len();
    let total_categories = distinct_category_count(&all_products);

    let mut matching = filter.apply(all_products);
    let filtered_count = (!filter.is_empty()).then_some(matching.len());
    sort.apply(&mut matching);

    let page = Paginator::new(matching, PAGE_SIZE).get_page(query.page.as_deref());
    let preserve_params = build_preserve_params(&query);

    ProductsIndexTemplate {
        flashes: flash::take(&session).await,
        products: page.items.iter().map(ProductView::from).collect(),
        page: PageView::new(&page, &preserve_params),
        total_products,
        filtered_count,
        total_categories,
        search: filter.search.clone().unwrap_or_default(),
        category_options: category_filter_options(&categories, &filter),
        price_range_options: price_range_options(&filter),
        sort_options: sort_options(sort),
        filter_errors: errors.iter().map(ToString::to_string).collect(),
        catalog_unavailable,
    }
}
