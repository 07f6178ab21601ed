//! HTTP client for the assist service.
//!
//! Wraps `reqwest` with the service's error convention (non-2xx responses
//! carry `{"error": "..."}`), bounded retries, and typed decoding.

use std::time::Duration;

use babyhub_core::Product;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;

use crate::error::AssistError;
use crate::retry::retry_with_backoff;
use crate::types::{
    FaqReply, Language, RecommendationsResponse, Review, ReviewReport, ReviewsRequest,
    SeoMetadata, SeoRequest, SeoTemplate, ServiceHealth,
};

/// Client for the recommendation / FAQ / SEO service.
///
/// Use [`AssistClient::new`] with the service's `/api` base URL, e.g.
/// `http://127.0.0.1:5001/api`.
#[derive(Debug, Clone)]
pub struct AssistClient {
    client: Client,
    base_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl AssistClient {
    /// Creates a client that does not retry. `timeout_secs` bounds a whole
    /// request; `connect_timeout_secs` bounds establishing the connection.
    ///
    /// # Errors
    ///
    /// Returns [`AssistError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`AssistError::InvalidBaseUrl`] if
    /// `base_url` is not an absolute URL.
    pub fn new(
        base_url: &str,
        timeout_secs: u64,
        connect_timeout_secs: u64,
    ) -> Result<Self, AssistError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .user_agent("babyhub/0.1 (storefront)")
            .build()?;

        // A trailing slash makes `Url::join` append endpoints below the
        // `/api` prefix instead of replacing it.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url =
            Url::parse(&normalised).map_err(|_| AssistError::InvalidBaseUrl(base_url.to_string()))?;

        Ok(Self {
            client,
            base_url,
            max_retries: 0,
            backoff_base_ms: 0,
        })
    }

    /// Retries transient failures up to `max_retries` times.
    #[must_use]
    pub fn with_retry(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    /// Fetches products similar to `product_id`.
    ///
    /// # Errors
    ///
    /// - [`AssistError::Status`] if the service rejects the request.
    /// - [`AssistError::Http`] on network failure.
    /// - [`AssistError::Deserialize`] if the body lacks a `recommendations`
    ///   array of products.
    pub async fn get_recommendations(&self, product_id: &str) -> Result<Vec<Product>, AssistError> {
        let url = self.build_url("recommend", &[("product_id", product_id)]);
        let response: RecommendationsResponse = self
            .send_json(&format!("recommend(product_id={product_id})"), || {
                self.client.get(url.clone())
            })
            .await?;
        Ok(response.recommendations)
    }

    /// Like [`AssistClient::get_recommendations`], but any failure is logged
    /// and turned into an empty list.
    pub async fn recommendations_or_empty(&self, product_id: &str) -> Vec<Product> {
        match self.get_recommendations(product_id).await {
            Ok(products) => {
                tracing::debug!(product_id, count = products.len(), "fetched recommendations");
                products
            }
            Err(e) => {
                tracing::warn!(product_id, error = %e, "recommendations unavailable");
                Vec::new()
            }
        }
    }

    /// Asks the FAQ bot a free-text question.
    ///
    /// A question the bot cannot match is not an error; it comes back as
    /// [`FaqReply::Unanswered`].
    ///
    /// # Errors
    ///
    /// - [`AssistError::Status`] if the service rejects the request, e.g. an
    ///   empty question.
    /// - [`AssistError::Http`] on network failure.
    /// - [`AssistError::Deserialize`] if the body is neither an answer nor an
    ///   error payload.
    pub async fn get_faq_answer(
        &self,
        question: &str,
        language: Language,
    ) -> Result<FaqReply, AssistError> {
        let url = self.build_url(
            "faq",
            &[("question", question), ("language", language.as_str())],
        );
        self.send_json(&format!("faq(language={language})"), || {
            self.client.get(url.clone())
        })
        .await
    }

    /// Generates page metadata for `product`.
    ///
    /// # Errors
    ///
    /// - [`AssistError::Status`] if the service rejects the product.
    /// - [`AssistError::Http`] on network failure.
    /// - [`AssistError::Deserialize`] if the metadata is incomplete.
    pub async fn generate_seo(
        &self,
        product: &Product,
        language: Language,
        template: SeoTemplate,
    ) -> Result<SeoMetadata, AssistError> {
        let url = self.build_url("generate-seo", &[]);
        let body = SeoRequest {
            product,
            language,
            template_type: template,
        };
        self.send_json(&format!("generate-seo(product_id={})", product.id), || {
            self.client.post(url.clone()).json(&body)
        })
        .await
    }

    /// Runs sentiment and phrase analysis over `reviews`. An empty slice is
    /// valid and yields a zeroed analysis.
    ///
    /// # Errors
    ///
    /// - [`AssistError::Status`] if the service rejects the payload.
    /// - [`AssistError::Http`] on network failure.
    /// - [`AssistError::Deserialize`] if the report is missing fields.
    pub async fn analyze_reviews(
        &self,
        reviews: &[Review],
        language: Language,
    ) -> Result<ReviewReport, AssistError> {
        let url = self.build_url("analyze-reviews", &[]);
        let body = ReviewsRequest { reviews, language };
        let context = format!("analyze-reviews(count={}, language={language})", reviews.len());
        self.send_json(&context, || self.client.post(url.clone()).json(&body))
            .await
    }

    /// Reports the service's own view of its components.
    ///
    /// # Errors
    ///
    /// Returns any transport, status, or decode error; health is never retried.
    pub async fn health(&self) -> Result<ServiceHealth, AssistError> {
        let url = self.build_url("health", &[]);
        let response = self.client.get(url.clone()).send().await?;
        Self::decode(url.as_str(), response).await
    }

    /// Joins `endpoint` onto the base URL and appends percent-encoded query
    /// parameters.
    fn build_url(&self, endpoint: &str, params: &[(&str, &str)]) -> Url {
        let mut url = self
            .base_url
            .join(endpoint)
            .unwrap_or_else(|_| self.base_url.clone());
        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        url
    }

    /// Sends the request built by `request`, retrying transient failures, and
    /// decodes the JSON body as `T`.
    async fn send_json<T, F>(&self, context: &str, request: F) -> Result<T, AssistError>
    where
        T: DeserializeOwned,
        F: Fn() -> RequestBuilder,
    {
        let request = &request;
        retry_with_backoff(self.max_retries, self.backoff_base_ms, move || async move {
            let response = request().send().await?;
            Self::decode(context, response).await
        })
        .await
    }

    /// Maps non-2xx statuses to [`AssistError::Status`] and decodes the body.
    async fn decode<T: DeserializeOwned>(
        context: &str,
        response: reqwest::Response,
    ) -> Result<T, AssistError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(AssistError::Status {
                status: status.as_u16(),
                message: error_message(&body)
                    .unwrap_or_else(|| format!("request failed with status {status}")),
            });
        }

        serde_json::from_str(&body).map_err(|e| AssistError::Deserialize {
            context: context.to_string(),
            source: e,
        })
    }
}

/// Pulls the `error` field out of a JSON error body.
fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()?
        .get("error")?
        .as_str()
        .map(ToOwned::to_owned)
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
