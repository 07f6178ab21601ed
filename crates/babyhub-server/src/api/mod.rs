mod assist;
mod products;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use babyhub_assist::AssistClient;
use babyhub_core::Catalog;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{limit_assist_calls, request_id, AssistQuota, RequestId};

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub assist: AssistClient,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    catalog_products: usize,
    assist: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    pub(super) fn new(data: T, request_id: String) -> Self {
        Self {
            data,
            meta: ResponseMeta::new(request_id),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "rate_limited" => StatusCode::TOO_MANY_REQUESTS,
            "upstream_error" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

pub(super) fn product_not_found(request_id: String, id: &str) -> ApiError {
    ApiError::new(request_id, "not_found", format!("product '{id}' not found"))
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static("x-request-id"),
        ])
}

/// Routes answered from the in-memory catalog.
fn catalog_router() -> Router<AppState> {
    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/categories", get(products::list_categories))
        .route("/api/v1/products", get(products::list_products))
        .route("/api/v1/products/{id}", get(products::get_product))
}

/// Routes that proxy to the assist service and draw on `quota`.
fn assist_router(quota: AssistQuota) -> Router<AppState> {
    Router::new()
        .route(
            "/api/v1/products/{id}/recommendations",
            get(assist::list_recommendations),
        )
        .route("/api/v1/products/{id}/seo", get(assist::get_seo))
        .route("/api/v1/faq", get(assist::ask_faq))
        .route("/api/v1/reviews/analyze", post(assist::analyze_reviews))
        .layer(axum::middleware::from_fn_with_state(
            quota,
            limit_assist_calls,
        ))
}

pub fn build_app(state: AppState, quota: AssistQuota) -> Router {
    Router::new()
        .merge(catalog_router())
        .merge(assist_router(quota))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    let assist = match state.assist.health().await {
        Ok(h) if h.is_healthy() => "ok",
        Ok(h) => {
            tracing::warn!(status = %h.status, "health check: assist service degraded");
            "degraded"
        }
        Err(e) => {
            tracing::warn!(error = %e, "health check: assist service unavailable");
            "unavailable"
        }
    };

    let data = HealthData {
        status: if assist == "ok" { "ok" } else { "degraded" },
        catalog_products: state.catalog.len(),
        assist,
    };
    (StatusCode::OK, Json(ApiResponse::new(data, req_id.0)))
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
