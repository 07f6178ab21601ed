//! Commands that call the assist service.

use std::path::Path;

use anyhow::Context;
use babyhub_assist::{AssistClient, FaqReply, Language, Phrase, Review};
use babyhub_core::Catalog;

use crate::catalog::print_product_rows;

/// Print recommendations for a catalog product. The service being down is
/// reported as "no recommendations", matching the storefront.
///
/// # Errors
///
/// Returns an error if the product is not in the catalog.
pub(crate) async fn run_recommend(
    catalog: &Catalog,
    client: &AssistClient,
    id: &str,
) -> anyhow::Result<()> {
    let product = catalog
        .find_product(id)
        .ok_or_else(|| anyhow::anyhow!("product '{id}' not found"))?;

    let recommendations = client.recommendations_or_empty(id).await;
    if recommendations.is_empty() {
        println!("no recommendations for '{}'", product.name);
        return Ok(());
    }

    println!("customers who viewed '{}' also liked:\n", product.name);
    print_product_rows(&recommendations);
    Ok(())
}

/// # Errors
///
/// Returns an error if the FAQ service cannot be reached or answers with a
/// failure status.
pub(crate) async fn run_faq(
    client: &AssistClient,
    question: &str,
    language: Language,
) -> anyhow::Result<()> {
    let question = question.trim();
    anyhow::ensure!(!question.is_empty(), "question is required");

    let reply = client
        .get_faq_answer(question, language)
        .await
        .map_err(|e| {
            tracing::error!(%language, error = %e, "FAQ lookup failed");
            anyhow::anyhow!("Failed to get answer. Please try again.")
        })?;

    match reply {
        FaqReply::Answered(answer) => {
            if let Some(matched) = &answer.question {
                println!("Q: {matched}");
            }
            println!("{}", answer.answer);
            if let Some(confidence) = answer.confidence {
                println!("(confidence {confidence:.0}%)");
            }
        }
        FaqReply::Unanswered { error } => println!("{error}"),
    }
    Ok(())
}

/// # Errors
///
/// Returns an error if the file cannot be read or is not a JSON array of
/// reviews.
pub(crate) fn read_reviews(path: &Path) -> anyhow::Result<Vec<Review>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading reviews from {}", path.display()))?;
    parse_reviews(&raw).with_context(|| format!("parsing reviews in {}", path.display()))
}

pub(crate) fn parse_reviews(raw: &str) -> anyhow::Result<Vec<Review>> {
    Ok(serde_json::from_str(raw)?)
}

fn fmt_phrases(phrases: &[Phrase]) -> String {
    phrases
        .iter()
        .map(|Phrase(text, count)| format!("{text} (x{count})"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// # Errors
///
/// Returns an error if the review analyzer cannot be reached or rejects the
/// reviews.
pub(crate) async fn run_reviews(
    client: &AssistClient,
    reviews: &[Review],
    language: Language,
) -> anyhow::Result<()> {
    let report = client
        .analyze_reviews(reviews, language)
        .await
        .map_err(|e| {
            tracing::error!(count = reviews.len(), %language, error = %e, "review analysis failed");
            anyhow::anyhow!("Failed to analyze reviews. Please try again.")
        })?;

    println!("{}\n", report.summary);
    let analysis = &report.analysis;
    println!("sentiment: {:+.2}", analysis.sentiment_score);
    if !analysis.summary.pros.is_empty() {
        println!("pros:      {}", fmt_phrases(&analysis.summary.pros));
    }
    if !analysis.summary.cons.is_empty() {
        println!("cons:      {}", fmt_phrases(&analysis.summary.cons));
    }
    for (rating, count) in analysis.rating_distribution.iter().rev() {
        println!("{rating} star: {count}");
    }
    Ok(())
}
