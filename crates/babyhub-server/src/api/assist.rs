//! Routes backed by the assist service. Upstream failures stop here: the
//! recommendations panel degrades to empty, everything else answers 502.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Extension, Json,
};
use babyhub_assist::{FaqReply, Language, Review, ReviewReport, SeoMetadata, SeoTemplate};
use babyhub_core::Product;
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{product_not_found, ApiError, ApiResponse, AppState};

#[derive(Debug, Serialize)]
pub(super) struct RecommendationsData {
    recommendations: Vec<Product>,
}

#[derive(Debug, Deserialize)]
pub(super) struct SeoQuery {
    pub language: Option<String>,
    pub template: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct FaqQuery {
    pub question: Option<String>,
    pub language: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct AnalyzeReviewsBody {
    pub reviews: Option<Vec<Review>>,
    pub language: Option<String>,
}

fn parse_language(request_id: &str, raw: Option<&str>) -> Result<Language, ApiError> {
    raw.map_or(Ok(Language::default()), str::parse::<Language>)
        .map_err(|e: babyhub_assist::AssistError| {
            ApiError::new(request_id, "validation_error", e.to_string())
        })
}

pub(super) async fn list_recommendations(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<RecommendationsData>>, ApiError> {
    if state.catalog.find_product(&id).is_none() {
        return Err(product_not_found(req_id.0, &id));
    }

    let recommendations = state.assist.recommendations_or_empty(&id).await;

    Ok(Json(ApiResponse::new(
        RecommendationsData { recommendations },
        req_id.0,
    )))
}

pub(super) async fn get_seo(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<String>,
    Query(query): Query<SeoQuery>,
) -> Result<Json<ApiResponse<SeoMetadata>>, ApiError> {
    let product = state
        .catalog
        .find_product(&id)
        .ok_or_else(|| product_not_found(req_id.0.clone(), &id))?;

    let language = parse_language(&req_id.0, query.language.as_deref())?;
    let template = query
        .template
        .as_deref()
        .map_or(Ok(SeoTemplate::default()), str::parse::<SeoTemplate>)
        .map_err(|e: babyhub_assist::AssistError| {
            ApiError::new(req_id.0.clone(), "validation_error", e.to_string())
        })?;

    let seo = state
        .assist
        .generate_seo(product, language, template)
        .await
        .map_err(|e| {
            tracing::error!(product_id = %id, error = %e, "SEO generation failed");
            ApiError::new(
                req_id.0.clone(),
                "upstream_error",
                "failed to generate SEO metadata",
            )
        })?;

    Ok(Json(ApiResponse::new(seo, req_id.0)))
}

pub(super) async fn ask_faq(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<FaqQuery>,
) -> Result<Json<ApiResponse<FaqReply>>, ApiError> {
    let question = query
        .question
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| ApiError::new(req_id.0.clone(), "validation_error", "question is required"))?;

    let language = parse_language(&req_id.0, query.language.as_deref())?;

    let reply = state
        .assist
        .get_faq_answer(question, language)
        .await
        .map_err(|e| {
            tracing::error!(%language, error = %e, "FAQ lookup failed");
            ApiError::new(
                req_id.0.clone(),
                "upstream_error",
                "Failed to get answer. Please try again.",
            )
        })?;

    Ok(Json(ApiResponse::new(reply, req_id.0)))
}

pub(super) async fn analyze_reviews(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<AnalyzeReviewsBody>, JsonRejection>,
) -> Result<Json<ApiResponse<ReviewReport>>, ApiError> {
    let Json(body) = body.map_err(|e| {
        ApiError::new(req_id.0.clone(), "validation_error", e.body_text())
    })?;
    let reviews = body
        .reviews
        .ok_or_else(|| ApiError::new(req_id.0.clone(), "validation_error", "reviews are required"))?;
    let language = parse_language(&req_id.0, body.language.as_deref())?;

    let report = state
        .assist
        .analyze_reviews(&reviews, language)
        .await
        .map_err(|e| {
            tracing::error!(count = reviews.len(), %language, error = %e, "review analysis failed");
            ApiError::new(
                req_id.0.clone(),
                "upstream_error",
                "failed to analyze reviews",
            )
        })?;

    Ok(Json(ApiResponse::new(report, req_id.0)))
}
