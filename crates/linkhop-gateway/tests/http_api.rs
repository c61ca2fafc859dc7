use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use linkhop_core::{Destination, Shortener, ShortenerError, StorageError, Token};
use linkhop_gateway::middleware::{LATENCY_HEADER, MAX_BUFFERED_BODY_BYTES};
use linkhop_gateway::{App, AppState};
use linkhop_generator::SeqGenerator;
use linkhop_shortener::LinkService;
use linkhop_storage::InMemoryRepository;
use serde_json::{json, Value};
use tower::ServiceExt;

const BASE_URL: &str = "http://localhost:8000";

fn app() -> Router {
    let service = LinkService::new(InMemoryRepository::new(), SeqGenerator::with_prefix("lh"));
    App::router(AppState::new(Arc::new(service), BASE_URL))
}

/// A store whose backend is down.
struct BrokenShortener;

#[async_trait]
impl Shortener for BrokenShortener {
    async fn create_link(&self, _destination: Destination) -> Result<Token, ShortenerError> {
        Err(StorageError::Unavailable("connection refused".to_string()).into())
    }

    async fn get_real_link(&self, _token: &str) -> Result<Option<Destination>, ShortenerError> {
        Err(StorageError::Unavailable("connection refused".to_string()).into())
    }
}

/// A store that panics on every call.
struct PanickingShortener;

#[async_trait]
impl Shortener for PanickingShortener {
    async fn create_link(&self, _destination: Destination) -> Result<Token, ShortenerError> {
        panic!("boom")
    }

    async fn get_real_link(&self, _token: &str) -> Result<Option<Destination>, ShortenerError> {
        panic!("boom")
    }
}

async fn post_link(app: &Router, body: Value) -> Response {
    app.clone()
        .oneshot(
            Request::post("/link")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn get(app: &Router, uri: &str) -> Response {
    app.clone()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

async fn json_body(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

#[tokio::test]
async fn shorten_then_redirect_permanently() {
    let app = app();

    let response = post_link(&app, json!({ "link": "github.com/foo" })).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let short_link = body["link"].as_str().unwrap().to_string();
    assert_eq!(short_link, format!("{BASE_URL}/lh1"));

    let token = short_link.rsplit('/').next().unwrap();
    let response = get(&app, &format!("/{token}")).await;
    assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(
        response.headers()[header::LOCATION],
        "https://github.com/foo"
    );
}

#[tokio::test]
async fn absolute_links_are_stored_verbatim() {
    let app = app();

    let response = post_link(&app, json!({ "link": "http://example.com/a?b=c" })).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(&app, "/lh1").await;
    assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(
        response.headers()[header::LOCATION],
        "http://example.com/a?b=c"
    );
}

#[tokio::test]
async fn unknown_token_is_not_found() {
    let app = app();

    let response = get(&app, "/unknown-token").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        json_body(response).await,
        json!({ "detail": "Short link not found :(" })
    );
}

#[tokio::test]
async fn malformed_token_is_not_found() {
    let app = app();

    let response = get(&app, "/not%20a%20token").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_link_is_unprocessable() {
    let app = app();

    let response = post_link(&app, json!({ "link": "" })).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        json_body(response).await,
        json!({ "detail": "Invalid link: https://" })
    );

    let response = post_link(&app, json!({ "link": "https:///x" })).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        json_body(response).await,
        json!({ "detail": "Invalid link: https:///x" })
    );
}

#[tokio::test]
async fn missing_link_field_is_rejected() {
    let app = app();

    let response = post_link(&app, json!({ "url": "example.com" })).await;
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn oversized_body_is_payload_too_large() {
    let response = app()
        .oneshot(
            Request::post("/link")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(vec![b' '; MAX_BUFFERED_BODY_BYTES + 1]))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn every_response_carries_latency_header() {
    let app = app();

    let ok = post_link(&app, json!({ "link": "example.com" })).await;
    let not_found = get(&app, "/missing").await;
    let health = get(&app, "/health").await;

    for response in [ok, not_found, health] {
        let latency = response.headers()[LATENCY_HEADER].to_str().unwrap();
        let millis = latency.strip_suffix("ms").unwrap();
        assert!(millis.parse::<f64>().unwrap() >= 0.0);
        assert_eq!(millis.split('.').nth(1).map(str::len), Some(2));
    }
}

#[tokio::test]
async fn health_reports_ok() {
    let response = get(&app(), "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({ "status": "ok" }));
}

#[tokio::test]
async fn storage_failure_is_a_generic_500() {
    let app = App::router(AppState::new(Arc::new(BrokenShortener), BASE_URL));

    let response = post_link(&app, json!({ "link": "example.com" })).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.headers().contains_key(LATENCY_HEADER));
    assert_eq!(body_bytes(response).await, b"Internal Server Error");

    let response = get(&app, "/abc").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_bytes(response).await, b"Internal Server Error");
}

#[tokio::test]
async fn validation_happens_before_storage() {
    let app = App::router(AppState::new(Arc::new(BrokenShortener), BASE_URL));

    let response = post_link(&app, json!({ "link": "" })).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn handler_panic_is_a_generic_500() {
    let app = App::router(AppState::new(Arc::new(PanickingShortener), BASE_URL));

    let response = post_link(&app, json!({ "link": "example.com" })).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.headers().contains_key(LATENCY_HEADER));
    assert_eq!(body_bytes(response).await, b"Internal Server Error");
}
