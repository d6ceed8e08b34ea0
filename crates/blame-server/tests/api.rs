use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum_test::TestServer;
use blame_core::Pipeline;
use blame_server::{router, AppState, ArticleFuture, ArticleSource, HeadlineCache, RateLimiter};
use news_feed::Article;
use serde_json::{json, Value};
use tempfile::TempDir;

/// Source that serves a fixed batch of articles and counts fetches.
struct FixedSource {
    articles: Vec<Article>,
    calls: AtomicUsize,
}

impl ArticleSource for FixedSource {
    fn fetch_articles(&self) -> ArticleFuture<'_> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.articles.clone())
        })
    }
}

fn article(title: &str, summary: &str) -> Article {
    Article {
        title: title.to_string(),
        summary: summary.to_string(),
        description: summary.to_string(),
        link: Some(format!("https://example.com/{}", title.len())),
        source: "Test Wire".to_string(),
        category: "world".to_string(),
        published_at: None,
    }
}

struct TestApp {
    server: TestServer,
    source: Arc<FixedSource>,
    _static_dir: TempDir,
}

fn create_test_app(articles: Vec<Article>, rate_limit_max: u32) -> TestApp {
    let static_dir = tempfile::tempdir().unwrap();
    std::fs::write(static_dir.path().join("index.html"), "<html>client</html>").unwrap();
    std::fs::write(static_dir.path().join("app.js"), "console.log('hi')").unwrap();

    let source = Arc::new(FixedSource {
        articles,
        calls: AtomicUsize::new(0),
    });
    let pipeline = Arc::new(Pipeline::default());
    let cache = Arc::new(HeadlineCache::new(
        source.clone(),
        Arc::clone(&pipeline),
        Duration::from_secs(1800),
    ));
    let limiter = RateLimiter::new(rate_limit_max, Duration::from_secs(900));
    let app = router(AppState::new(cache, limiter, pipeline), static_dir.path());

    TestApp {
        server: TestServer::new(app).unwrap(),
        source,
        _static_dir: static_dir,
    }
}

fn mixed_articles() -> Vec<Article> {
    vec![
        article(
            "Population decline threatens species",
            "Numbers of rare frogs fell sharply.",
        ),
        article("New park opens downtown", "The mayor cut the ribbon."),
        article(
            "Polar bear population is declining due to climate change",
            "Sea ice is shrinking.",
        ),
    ]
}

#[tokio::test]
async fn test_health_endpoint_returns_healthy() {
    let app = create_test_app(vec![], 100);

    let response = app.server.get("/health").await;

    response.assert_status_ok();
    response.assert_text("Healthy");
}

#[tokio::test]
async fn test_headlines_returns_transformed_records() {
    let app = create_test_app(mixed_articles(), 100);

    let response = app.server.get("/api/headlines").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 3);
    let headlines = body["headlines"].as_array().unwrap();
    assert_eq!(headlines.len(), 3);

    let first = &headlines[0];
    assert_eq!(first["original"]["title"], "Population decline threatens species");
    assert_eq!(first["suitable"], true);
    assert!(first["transformed"]
        .as_str()
        .unwrap()
        .to_lowercase()
        .contains("mother"));
    assert!(first["funnySummary"].as_str().unwrap().contains("your mother's fault"));
    assert_eq!(headlines[1]["suitable"], false);
}

#[tokio::test]
async fn test_headlines_filters_and_limits() {
    let app = create_test_app(mixed_articles(), 100);

    let response = app
        .server
        .get("/api/headlines")
        .add_query_param("suitable", "true")
        .add_query_param("limit", "1")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    // count is taken before the limit
    assert_eq!(body["count"], 2);
    assert_eq!(body["headlines"].as_array().unwrap().len(), 1);
    assert_eq!(body["headlines"][0]["suitable"], true);

    let unparsable: Value = app
        .server
        .get("/api/headlines")
        .add_query_param("limit", "lots")
        .await
        .json();
    assert_eq!(unparsable["headlines"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_cache_is_reused_until_refresh() {
    let app = create_test_app(mixed_articles(), 100);

    app.server.get("/api/headlines").await.assert_status_ok();
    app.server.get("/api/random").await.assert_status_ok();
    assert_eq!(app.source.calls.load(Ordering::SeqCst), 1);

    let response = app.server.get("/api/refresh").await;
    response.assert_status_ok();
    response.assert_json(&json!({
        "success": true,
        "message": "Headlines refreshed",
        "count": 3,
    }));
    assert_eq!(app.source.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_random_prefers_suitable_records() {
    let app = create_test_app(mixed_articles(), 100);

    for _ in 0..10 {
        let body: Value = app.server.get("/api/random").await.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["headline"]["suitable"], true);
    }
}

#[tokio::test]
async fn test_random_falls_back_to_any_record() {
    let app = create_test_app(vec![article("New park opens downtown", "")], 100);

    let body: Value = app.server.get("/api/random").await.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["headline"]["original"]["title"], "New park opens downtown");
}

#[tokio::test]
async fn test_random_with_no_records() {
    let app = create_test_app(vec![], 100);

    let response = app.server.get("/api/random").await;

    response.assert_status_ok();
    response.assert_json(&json!({
        "success": false,
        "error": "No headlines available at the moment",
    }));
}

#[tokio::test]
async fn test_transform_rewrites_headline() {
    let app = create_test_app(vec![], 100);

    let response = app
        .server
        .post("/api/transform")
        .json(&json!({ "headline": "BBC reports pollution in rivers" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["original"], "BBC reports pollution in rivers");
    let transformed = body["transformed"].as_str().unwrap();
    assert!(transformed.starts_with("BBC reports"));
    assert!(transformed.contains("your mother"));
    assert_eq!(body["funnySummary"], "");
    assert_eq!(body["suitable"], true);
}

#[tokio::test]
async fn test_transform_includes_summary() {
    let app = create_test_app(vec![], 100);

    let body: Value = app
        .server
        .post("/api/transform")
        .json(&json!({
            "headline": "New park opens downtown",
            "summary": "Shares in Apple fell sharply.",
        }))
        .await
        .json();

    assert_eq!(body["suitable"], false);
    let summary = body["funnySummary"].as_str().unwrap();
    assert!(summary.contains("your mother's bridge club"));
    assert!(summary.ends_with("it's all your mother's fault."));
}

#[tokio::test]
async fn test_transform_requires_headline() {
    let app = create_test_app(vec![], 100);
    let expected = json!({ "success": false, "error": "Headline is required" });

    let missing = app.server.post("/api/transform").json(&json!({})).await;
    missing.assert_status(StatusCode::BAD_REQUEST);
    missing.assert_json(&expected);

    let blank = app
        .server
        .post("/api/transform")
        .json(&json!({ "headline": "   " }))
        .await;
    blank.assert_status(StatusCode::BAD_REQUEST);
    blank.assert_json(&expected);

    let garbage = app.server.post("/api/transform").text("not json").await;
    garbage.assert_status(StatusCode::BAD_REQUEST);
    garbage.assert_json(&expected);
}

#[tokio::test]
async fn test_unknown_api_path_is_json_404() {
    let app = create_test_app(vec![], 100);

    let response = app.server.get("/api/nope").await;

    response.assert_status(StatusCode::NOT_FOUND);
    response.assert_json(&json!({ "success": false, "error": "Not found" }));
}

#[tokio::test]
async fn test_static_files_and_client_fallback() {
    let app = create_test_app(vec![], 100);

    let asset = app.server.get("/app.js").await;
    asset.assert_status_ok();
    asset.assert_text("console.log('hi')");

    let route = app.server.get("/some/client/route").await;
    route.assert_status_ok();
    route.assert_text("<html>client</html>");
}

#[tokio::test]
async fn test_api_is_rate_limited() {
    let app = create_test_app(mixed_articles(), 2);

    app.server.get("/api/headlines").await.assert_status_ok();
    app.server.get("/api/headlines").await.assert_status_ok();

    let limited = app.server.get("/api/headlines").await;
    limited.assert_status(StatusCode::TOO_MANY_REQUESTS);
    limited.assert_json(&json!({
        "success": false,
        "error": "Too many requests from this IP, please try again later.",
    }));
    assert!(!limited.header("retry-after").is_empty());

    // health sits outside the limited API
    app.server.get("/health").await.assert_status_ok();
}
