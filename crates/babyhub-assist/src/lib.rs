//! Client for the storefront's assist service: product recommendations, the
//! FAQ bot, review analysis and SEO metadata generation.
//!
//! Failures here never reach the catalog core. Callers decide how to degrade;
//! [`AssistClient::recommendations_or_empty`] covers the common case.

pub mod client;
pub mod error;
pub(crate) mod retry;
pub mod types;

pub use client::AssistClient;
pub use error::AssistError;
pub use types::{
    FaqAnswer, FaqReply, Language, Phrase, ProsAndCons, Review, ReviewAnalysis, ReviewReport,
    SeoMetadata, SeoTemplate, ServiceHealth,
};
