//! Request and response shapes for the assist service.

use std::collections::BTreeMap;
use std::str::FromStr;

use babyhub_core::Product;
use serde::{Deserialize, Serialize};

use crate::error::AssistError;

/// Languages the FAQ bot and SEO generator answer in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Hi,
}

impl Language {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hi => "hi",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = AssistError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Language::En),
            "hi" => Ok(Language::Hi),
            other => Err(AssistError::UnsupportedLanguage(other.to_string())),
        }
    }
}

/// Copy style the SEO generator should use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeoTemplate {
    #[default]
    Default,
    Sale,
    New,
}

impl FromStr for SeoTemplate {
    type Err = AssistError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(SeoTemplate::Default),
            "sale" => Ok(SeoTemplate::Sale),
            "new" => Ok(SeoTemplate::New),
            other => Err(AssistError::UnknownTemplate(other.to_string())),
        }
    }
}

/// `GET /recommend` response body.
#[derive(Debug, Deserialize)]
pub(crate) struct RecommendationsResponse {
    pub recommendations: Vec<Product>,
}

/// A matched FAQ entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaqAnswer {
    pub answer: String,
    /// Match score in percent, when the bot reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    /// The canonical FAQ question that was matched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
}

/// What the FAQ bot said: either an answer or an `{ "error": ... }` payload
/// such as "No answer found".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FaqReply {
    Answered(FaqAnswer),
    Unanswered { error: String },
}

impl FaqReply {
    #[must_use]
    pub fn answer(&self) -> Option<&FaqAnswer> {
        match self {
            FaqReply::Answered(answer) => Some(answer),
            FaqReply::Unanswered { .. } => None,
        }
    }
}

/// `POST /generate-seo` request body.
#[derive(Debug, Serialize)]
pub(crate) struct SeoRequest<'a> {
    pub product: &'a Product,
    pub language: Language,
    pub template_type: SeoTemplate,
}

/// Page metadata produced by the SEO generator, including OpenGraph and
/// Twitter card fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeoMetadata {
    pub title: String,
    pub description: String,
    /// Comma-separated keyword list.
    pub keywords: String,
    #[serde(rename = "og:title")]
    pub og_title: String,
    #[serde(rename = "og:description")]
    pub og_description: String,
    #[serde(rename = "og:type")]
    pub og_type: String,
    #[serde(rename = "og:image")]
    pub og_image: String,
    #[serde(rename = "twitter:card")]
    pub twitter_card: String,
    #[serde(rename = "twitter:title")]
    pub twitter_title: String,
    #[serde(rename = "twitter:description")]
    pub twitter_description: String,
    #[serde(rename = "twitter:image")]
    pub twitter_image: String,
}

/// One shopper review as the review analyzer expects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub text: String,
    /// Star rating, when the shopper gave one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
}

/// `POST /analyze-reviews` request body.
#[derive(Debug, Serialize)]
pub(crate) struct ReviewsRequest<'a> {
    pub reviews: &'a [Review],
    pub language: Language,
}

/// A recurring phrase and how many times it appeared across the reviews.
/// Sent on the wire as a `[phrase, count]` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phrase(pub String, pub u32);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProsAndCons {
    #[serde(default)]
    pub pros: Vec<Phrase>,
    #[serde(default)]
    pub cons: Vec<Phrase>,
}

/// Structured result of a review analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewAnalysis {
    pub summary: ProsAndCons,
    /// Mean polarity in `-1.0..=1.0`.
    pub sentiment_score: f64,
    /// Review count per star rating. Keys are the ratings as strings.
    #[serde(default)]
    pub rating_distribution: BTreeMap<String, u32>,
    pub total_reviews: usize,
    /// Absent when no reviews were sent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
}

/// `POST /analyze-reviews` response body: the analysis plus a prose summary
/// in the requested language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewReport {
    pub analysis: ReviewAnalysis,
    pub summary: String,
}

/// `GET /health` response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceHealth {
    pub status: String,
    /// Per-component availability, e.g. `"recommender": true`.
    #[serde(default)]
    pub services: BTreeMap<String, bool>,
}

impl ServiceHealth {
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}
