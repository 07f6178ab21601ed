//! Integration tests for `AssistClient` using wiremock HTTP mocks.

use babyhub_assist::{AssistClient, AssistError, FaqReply, Language, Review, SeoTemplate};
use babyhub_core::Product;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> AssistClient {
    AssistClient::new(&format!("{}/api", server.uri()), 5, 2)
        .expect("client construction should not fail")
}

fn product_json(id: &str, name: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": name,
        "description": "Gentle on skin",
        "price": 49900,
        "category": "Bath",
        "image": format!("/images/{id}.jpg"),
        "affiliateUrl": format!("https://shop.example.com/{id}"),
        "brand": "Sebamed"
    })
}

fn sample_product() -> Product {
    serde_json::from_value(product_json("18", "Sebamed Baby Cream")).expect("product")
}

#[tokio::test]
async fn get_recommendations_returns_products() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/recommend"))
        .and(query_param("product_id", "16"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "recommendations": [
                product_json("17", "Himalaya Baby Massage Oil"),
                product_json("18", "Sebamed Baby Cream")
            ]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let products = client
        .get_recommendations("16")
        .await
        .expect("should parse recommendations");

    let ids: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["17", "18"]);
    assert_eq!(products[0].affiliate_url, "https://shop.example.com/17");
}

#[tokio::test]
async fn recommendations_degrade_to_empty_on_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/recommend"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(serde_json::json!({ "error": "Recommender not initialized" })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    assert!(client.recommendations_or_empty("16").await.is_empty());

    let err = client.get_recommendations("16").await.unwrap_err();
    assert!(
        matches!(err, AssistError::Status { status: 500, ref message } if message == "Recommender not initialized"),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn recommendations_degrade_to_empty_on_malformed_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/recommend"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "recommendations": "nope" })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    assert!(matches!(
        client.get_recommendations("1").await,
        Err(AssistError::Deserialize { .. })
    ));
    assert!(client.recommendations_or_empty("1").await.is_empty());
}

#[tokio::test]
async fn retries_transient_failures() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/recommend"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/recommend"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "recommendations": [product_json("3", "MamyPoko Pants")]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server).with_retry(2, 0);
    let products = client
        .get_recommendations("1")
        .await
        .expect("second attempt should succeed");
    assert_eq!(products.len(), 1);
}

#[tokio::test]
async fn get_faq_answer_sends_question_and_language() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/faq"))
        .and(query_param("question", "diaper kitni baar badlein?"))
        .and(query_param("language", "hi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "question": "डायपर कितनी बार बदलें?",
            "answer": "हर 2-3 घंटे में डायपर बदलें।",
            "confidence": 72
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let reply = client
        .get_faq_answer("diaper kitni baar badlein?", Language::Hi)
        .await
        .expect("should parse FAQ answer");

    let answer = reply.answer().expect("expected an answer");
    assert_eq!(answer.confidence, Some(72.0));
    assert!(answer.answer.starts_with("हर"));
}

#[tokio::test]
async fn get_faq_answer_passes_through_no_answer_payload() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/faq"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "error": "No answer found" })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    let reply = client
        .get_faq_answer("what is the meaning of life", Language::En)
        .await
        .expect("an unanswered question is not an error");

    assert_eq!(
        reply,
        FaqReply::Unanswered {
            error: "No answer found".to_string()
        }
    );
}

#[tokio::test]
async fn get_faq_answer_surfaces_bad_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/faq"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(serde_json::json!({ "error": "Question is required" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server).with_retry(3, 0);
    let err = client.get_faq_answer("", Language::En).await.unwrap_err();

    assert!(
        err.to_string().contains("Question is required"),
        "unexpected error: {err}"
    );
}

#[tokio::test]
async fn generate_seo_posts_product_and_options() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate-seo"))
        .and(body_partial_json(serde_json::json!({
            "product": { "id": "18" },
            "language": "en",
            "template_type": "sale"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "title": "Sebamed Baby Cream on Sale",
            "description": "Save on Sebamed Baby Cream",
            "keywords": "sebamed, baby cream",
            "og:title": "Sebamed Baby Cream on Sale",
            "og:description": "Save on Sebamed Baby Cream",
            "og:type": "product",
            "og:image": "/images/18.jpg",
            "twitter:card": "product",
            "twitter:title": "Sebamed Baby Cream on Sale",
            "twitter:description": "Save on Sebamed Baby Cream",
            "twitter:image": "/images/18.jpg"
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let seo = client
        .generate_seo(&sample_product(), Language::En, SeoTemplate::Sale)
        .await
        .expect("should parse SEO metadata");

    assert_eq!(seo.title, "Sebamed Baby Cream on Sale");
    assert_eq!(seo.og_image, "/images/18.jpg");
}

#[tokio::test]
async fn health_reports_components() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "healthy",
            "services": { "recommender": true, "faq_bot": true }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let health = client.health().await.expect("should parse health");

    assert!(health.is_healthy());
    assert_eq!(health.services.get("recommender"), Some(&true));
}

#[tokio::test]
async fn analyze_reviews_posts_reviews_and_language() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/analyze-reviews"))
        .and(body_partial_json(serde_json::json!({
            "reviews": [
                { "text": "Very soft and comfortable for my baby", "rating": 5 },
                { "text": "Soft but a bit expensive" }
            ],
            "language": "hi"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "analysis": {
                "summary": { "pros": [["soft and comfortable for", 2]], "cons": [] },
                "sentiment_score": 0.35,
                "rating_distribution": { "5": 1 },
                "total_reviews": 2,
                "language": "hi"
            },
            "summary": "2 समीक्षाओं के आधार पर:"
        })))
        .mount(&server)
        .await;

    let reviews = vec![
        Review {
            text: "Very soft and comfortable for my baby".to_string(),
            rating: Some(5),
        },
        Review {
            text: "Soft but a bit expensive".to_string(),
            rating: None,
        },
    ];

    let client = test_client(&server);
    let report = client
        .analyze_reviews(&reviews, Language::Hi)
        .await
        .expect("should parse review report");

    assert_eq!(report.analysis.total_reviews, 2);
    assert_eq!(report.analysis.summary.pros[0].1, 2);
    assert_eq!(report.analysis.language, Some(Language::Hi));
    assert!(report.summary.starts_with('2'));
}

#[tokio::test]
async fn analyze_reviews_surfaces_service_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/analyze-reviews"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(serde_json::json!({ "error": "Reviews data is required" })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client
        .analyze_reviews(&[], Language::En)
        .await
        .unwrap_err();

    assert!(
        matches!(err, AssistError::Status { status: 400, ref message } if message == "Reviews data is required"),
        "unexpected error: {err:?}"
    );
}
