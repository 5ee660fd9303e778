//! End-to-end route tests: the router driven in-process, no sockets.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    routing::post,
    Router,
};
use casavida_api::{routes::PROVIDER_HEADER, router, AppState};
use casavida_core::{config::AppConfig, store::CasaStore};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

// ── Helpers ──────────────────────────────────────────────────────────────────

fn app() -> Router {
    app_with(&AppConfig::default_test())
}

fn app_with(config: &AppConfig) -> Router {
    let store = CasaStore::in_memory().expect("in-memory store");
    store.migrate().expect("migration");
    router(AppState::new(store, config))
}

/// Config with a text credential pointed at `base_url`.
fn live_text_config(base_url: &str) -> AppConfig {
    let mut config = AppConfig::default_test();
    config.providers.text.api_key = Some("sk-test".into());
    config.providers.text.base_url = base_url.into();
    config.providers.request_timeout_secs = 5;
    config
}

/// Local chat-completions endpoint that always answers 429.
async fn rate_limited_provider() -> String {
    let stub = Router::new().route(
        "/chat/completions",
        post(|| async { (StatusCode::TOO_MANY_REQUESTS, "quota exceeded") }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, stub).await.unwrap();
    });
    format!("http://{addr}")
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

async fn send_json(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, bytes) = send(app, method, uri, body).await;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into()))
    };
    (status, value)
}

// ── Dataset ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn before_dataset_starts_with_first_homemaker() {
    let app = app();
    let (status, body) = send_json(&app, Method::GET, "/dataset/customers?period=before", None).await;
    assert_eq!(status, StatusCode::OK);

    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 7190);
    assert_eq!(rows[0]["id"], 1);
    assert_eq!(rows[0]["customerId"], "FH-0001");
    assert_eq!(rows[0]["segment"], "Functional Homemakers");
    assert_eq!(rows[7189]["customerId"], "OB-2100");
}

#[tokio::test]
async fn unknown_or_missing_period_means_before() {
    let app = app();
    let (_, explicit) = send(&app, Method::GET, "/dataset/customers?period=before", None).await;
    let (_, missing) = send(&app, Method::GET, "/dataset/customers", None).await;
    let (_, odd) = send(&app, Method::GET, "/dataset/customers?period=later", None).await;
    assert!(explicit == missing, "missing period should match before");
    assert!(explicit == odd, "unknown period should match before");

    let (_, after) = send(&app, Method::GET, "/dataset/customers?period=after", None).await;
    assert!(explicit != after);
}

#[tokio::test]
async fn after_summary_shows_healthier_homemakers() {
    let app = app();
    let (_, before) = send_json(&app, Method::GET, "/dataset/summary?period=before", None).await;
    let (status, after) = send_json(&app, Method::GET, "/dataset/summary?period=after", None).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(after[0]["prefix"], "FH");
    assert_eq!(after[0]["count"], 4200);
    let health_before = before[0]["avgHealthScore"].as_f64().unwrap();
    let health_after = after[0]["avgHealthScore"].as_f64().unwrap();
    assert!(health_after > health_before);
    let churn_before = before[0]["avgPredictedChurn"].as_f64().unwrap();
    let churn_after = after[0]["avgPredictedChurn"].as_f64().unwrap();
    assert!(churn_after < churn_before);
}

// ── CRUD ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn segment_crud_lifecycle() {
    let app = app();
    let (status, created) = send_json(
        &app,
        Method::POST,
        "/segments",
        Some(json!({"name": "Home Enhancers", "customer_count": 890, "churn_rate": 0.22, "avg_clv": 1850.0, "health_score": 42})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().unwrap().to_string();

    let (status, fetched) = send_json(&app, Method::GET, &format!("/segments/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["name"], "Home Enhancers");

    let (status, updated) = send_json(
        &app,
        Method::PUT,
        &format!("/segments/{id}"),
        Some(json!({"name": "Home Enhancers", "customer_count": 900, "churn_rate": 0.18, "health_score": 55})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["customer_count"], 900);
    assert_eq!(updated["created_at"], created["created_at"]);

    let (status, _) = send(&app, Method::DELETE, &format!("/segments/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, Method::GET, &format!("/segments/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_entities_are_bad_requests() {
    let app = app();
    let (status, body) = send_json(
        &app,
        Method::POST,
        "/competitors",
        Some(json!({"name": "Nordhaus", "market_share": 1.7})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.as_str().unwrap().contains("market_share"));

    let (status, _) = send(
        &app,
        Method::POST,
        "/initiatives",
        Some(json!({"title": "Loyalty", "segment_id": "does-not-exist"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn seed_then_list_everything() {
    let app = app();
    let (status, summary) = send_json(&app, Method::POST, "/seed", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary, json!({"segments": 3, "competitors": 4, "initiatives": 4, "campaigns": 0}));

    let (_, segments) = send_json(&app, Method::GET, "/segments", None).await;
    assert_eq!(segments.as_array().unwrap().len(), 3);
    let (_, competitors) = send_json(&app, Method::GET, "/competitors", None).await;
    assert_eq!(competitors[0]["name"], "Nordhaus Living");
    let (_, initiatives) = send_json(&app, Method::GET, "/initiatives", None).await;
    assert_eq!(initiatives.as_array().unwrap().len(), 4);
    let (_, campaigns) = send_json(&app, Method::GET, "/campaigns", None).await;
    assert!(campaigns.as_array().unwrap().is_empty());
}

// ── Creative Studio (mocked: no credentials in the test config) ──────────────

#[tokio::test]
async fn copy_falls_back_to_mock_and_can_be_saved() {
    let app = app();
    let (status, body) = send_json(
        &app,
        Method::POST,
        "/creative/copy",
        Some(json!({
            "segment": "Functional Homemakers",
            "product": "Linnea sofa bed",
            "tone": "friendly",
            "variations": 9,
            "save": true,
            "channel": "sms"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["provider"], "mock");
    assert_eq!(body["variations"].as_array().unwrap().len(), 5);
    assert_eq!(body["campaign"]["channel"], "sms");
    assert_eq!(body["campaign"]["content"], body["variations"][0]);

    let (_, campaigns) = send_json(&app, Method::GET, "/campaigns", None).await;
    assert_eq!(campaigns.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn copy_without_save_stores_nothing() {
    let app = app();
    let (status, body) = send_json(
        &app,
        Method::POST,
        "/creative/copy",
        Some(json!({"segment": "Home Enhancers", "product": "oak table"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["variations"].as_array().unwrap().len(), 3);
    assert!(body.get("campaign").is_none());

    let (_, campaigns) = send_json(&app, Method::GET, "/campaigns", None).await;
    assert!(campaigns.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn image_and_voice_return_binary_mocks() {
    let app = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/creative/image")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({"prompt": "sunlit living room"}).to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/svg+xml");
    assert_eq!(response.headers()[PROVIDER_HEADER], "mock");
    let svg = response.into_body().collect().await.unwrap().to_bytes();
    assert!(String::from_utf8_lossy(&svg).contains("sunlit living room"));

    let request = Request::builder()
        .method(Method::POST)
        .uri("/creative/voice")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({"text": "Welcome back to CasaVida."}).to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "audio/mpeg");
    let audio = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&audio[..2], &[0xFFu8, 0xFB]);
}

#[tokio::test]
async fn empty_creative_inputs_are_rejected() {
    let app = app();
    let (status, _) = send(&app, Method::POST, "/creative/image", Some(json!({"prompt": "  "}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = send(&app, Method::POST, "/creative/voice", Some(json!({"text": ""}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ── Creative Studio (live: a credential is configured) ───────────────────────

#[tokio::test]
async fn unreachable_text_provider_is_an_error_not_a_mock() {
    let app = app_with(&live_text_config("http://127.0.0.1:1"));
    let (status, body) = send(
        &app,
        Method::POST,
        "/creative/copy",
        Some(json!({"segment": "Functional Homemakers", "product": "sofa bed", "save": true})),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let body = String::from_utf8_lossy(&body);
    assert!(body.contains("Provider request failed"), "body: {body}");
    assert!(!body.contains("\"provider\":\"mock\""));

    let (_, campaigns) = send_json(&app, Method::GET, "/campaigns", None).await;
    assert!(campaigns.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn provider_error_status_is_reported() {
    let base_url = rate_limited_provider().await;
    let app = app_with(&live_text_config(&base_url));
    let (status, body) = send(
        &app,
        Method::POST,
        "/creative/copy",
        Some(json!({"segment": "Home Enhancers", "product": "oak table"})),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let body = String::from_utf8_lossy(&body);
    assert_eq!(body, "openai returned HTTP 429: quota exceeded");
}

// ── Health ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn health_reports_ok() {
    let app = app();
    let (status, body) = send_json(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
