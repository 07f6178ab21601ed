use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Extension, Json,
};
use babyhub_core::{CatalogView, PriceRange, Product, ProductFilters};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{product_not_found, ApiError, ApiResponse, AppState};

/// Catalog listing query. Absent price bounds are unbounded; `0` is a literal
/// bound. An empty `category` matches every category.
#[derive(Debug, Default, Deserialize)]
pub(super) struct ProductQuery {
    pub category: Option<String>,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
    pub page: Option<usize>,
}

impl ProductQuery {
    fn filters(&self) -> ProductFilters {
        ProductFilters::new(
            self.category
                .as_deref()
                .filter(|c| !c.is_empty())
                .map(ToOwned::to_owned),
            PriceRange::new(self.min_price, self.max_price),
        )
    }
}

/// Owned copy of a [`CatalogView`] for the response body.
#[derive(Debug, Serialize)]
pub(super) struct CatalogPage {
    products: Vec<Product>,
    page: usize,
    total_pages: usize,
    total_matches: usize,
    min_price: Option<u64>,
    max_price: Option<u64>,
}

impl From<CatalogView<'_>> for CatalogPage {
    fn from(view: CatalogView<'_>) -> Self {
        Self {
            products: view.products.into_iter().cloned().collect(),
            page: view.page,
            total_pages: view.total_pages,
            total_matches: view.total_matches,
            min_price: view.min_price,
            max_price: view.max_price,
        }
    }
}

pub(super) async fn list_categories(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<String>>> {
    Json(ApiResponse::new(state.catalog.categories().to_vec(), req_id.0))
}

pub(super) async fn list_products(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    query: Result<Query<ProductQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<CatalogPage>>, ApiError> {
    let Query(query) = query.map_err(|e| {
        ApiError::new(req_id.0.clone(), "validation_error", e.body_text())
    })?;

    if let (Some(min), Some(max)) = (query.min_price, query.max_price) {
        if min > max {
            return Err(ApiError::new(
                req_id.0,
                "validation_error",
                format!("min_price ({min}) must not exceed max_price ({max})"),
            ));
        }
    }

    let filters = query.filters();
    let view = CatalogView::build(&state.catalog, &filters, query.page.unwrap_or(1));

    tracing::debug!(
        ?filters,
        page = view.page,
        total_matches = view.total_matches,
        "catalog view built"
    );

    Ok(Json(ApiResponse::new(CatalogPage::from(view), req_id.0)))
}

pub(super) async fn get_product(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Product>>, ApiError> {
    let product = state
        .catalog
        .find_product(&id)
        .cloned()
        .ok_or_else(|| product_not_found(req_id.0.clone(), &id))?;

    Ok(Json(ApiResponse::new(product, req_id.0)))
}
