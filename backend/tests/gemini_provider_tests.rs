//! Gemini provider integration tests
//!
//! Runs the real HTTP client against local axum stubs standing in for the
//! Generative Language API.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use crop_advisor::error::{ProviderError, RECOMMENDATION_FAILED_MESSAGE};
use crop_advisor::external::GeminiProvider;
use crop_advisor::models::SessionStatus;
use crop_advisor::services::{Controller, RecommendationClient};
use serde_json::{json, Value};
use shared::{QueryParameters, Season};

const MODEL: &str = "gemini-2.0-flash";
const API_KEY: &str = "test-key";

#[derive(Clone, Default)]
struct StubState {
    last_body: Arc<Mutex<Option<Value>>>,
    last_key: Arc<Mutex<Option<String>>>,
}

fn candidate_body(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }]
    })
}

/// Serve `router` on an ephemeral port and return the API base URL
async fn spawn_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}/v1beta", addr)
}

/// A stub that records the request and answers with a fixed status and body
async fn spawn_fixed(status: StatusCode, body: Value) -> (String, StubState) {
    let state = StubState::default();
    let router = Router::new()
        .route(
            "/v1beta/models/:action",
            post(
                move |State(stub): State<StubState>, headers: HeaderMap, Json(request): Json<Value>| {
                    let body = body.clone();
                    async move {
                        *stub.last_body.lock().unwrap() = Some(request);
                        *stub.last_key.lock().unwrap() = headers
                            .get("x-goog-api-key")
                            .and_then(|v| v.to_str().ok())
                            .map(str::to_string);
                        (status, Json(body))
                    }
                },
            ),
        )
        .with_state(state.clone());
    (spawn_stub(router).await, state)
}

fn client_for(base_url: String, timeout: Duration) -> RecommendationClient {
    let provider = GeminiProvider::with_base_url(API_KEY.into(), MODEL.into(), base_url, timeout)
        .expect("client should build");
    RecommendationClient::new(Arc::new(provider))
}

#[tokio::test]
async fn test_success_returns_crops_in_provider_order() {
    let text = r#"{"crops": [
        {"name": "Wheat", "description": "Cool-season cereal", "icon": "🌾", "score": 0.92},
        {"name": "Mustard", "description": "Low water oilseed", "icon": "🌼", "score": 0.81},
        {"name": "Chickpea", "description": "Hardy pulse", "icon": "🫘", "score": 0.77}
    ]}"#;
    let (base_url, stub) = spawn_fixed(StatusCode::OK, candidate_body(text)).await;
    let client = client_for(base_url, Duration::from_secs(5));

    let params = QueryParameters::new(18.0, 600.0, Season::Rabi);
    let set = client.recommend(&params).await.unwrap();

    let scores: Vec<f64> = set.crops.iter().map(|c| c.score).collect();
    assert_eq!(scores, vec![0.92, 0.81, 0.77]);
    assert_eq!(set.crops[0].name, "Wheat");
    assert_eq!(set.provider, "gemini");
    assert_eq!(set.model, MODEL);

    assert_eq!(stub.last_key.lock().unwrap().as_deref(), Some(API_KEY));
    let request = stub.last_body.lock().unwrap().clone().unwrap();
    let prompt = request["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(prompt.contains("Season: Rabi"));
    assert!(prompt.contains("Annual rainfall: 600 mm"));
    assert_eq!(
        request["generationConfig"]["responseMimeType"],
        "application/json"
    );
}

#[tokio::test]
async fn test_missing_score_is_malformed() {
    let text = r#"{"crops": [{"name": "Rice", "description": "Paddy", "icon": "🌾"}]}"#;
    let (base_url, _) = spawn_fixed(StatusCode::OK, candidate_body(text)).await;
    let client = client_for(base_url, Duration::from_secs(5));

    let result = client.recommend(&QueryParameters::default()).await;
    assert!(matches!(result, Err(ProviderError::MalformedResponse(_))));
}

#[tokio::test]
async fn test_empty_candidates_is_malformed() {
    let (base_url, _) = spawn_fixed(StatusCode::OK, json!({ "candidates": [] })).await;
    let client = client_for(base_url, Duration::from_secs(5));

    let result = client.recommend(&QueryParameters::default()).await;
    assert!(matches!(result, Err(ProviderError::MalformedResponse(_))));
}

#[tokio::test]
async fn test_blocked_prompt_is_malformed() {
    let (base_url, _) = spawn_fixed(
        StatusCode::OK,
        json!({ "promptFeedback": { "blockReason": "SAFETY" } }),
    )
    .await;
    let client = client_for(base_url, Duration::from_secs(5));

    let result = client.recommend(&QueryParameters::default()).await;
    assert!(matches!(result, Err(ProviderError::MalformedResponse(_))));
}

#[tokio::test]
async fn test_invalid_key_is_auth_failure() {
    let body = json!({
        "error": {
            "code": 400,
            "message": "API key not valid. Please pass a valid API key.",
            "status": "INVALID_ARGUMENT",
            "details": [{ "reason": "API_KEY_INVALID" }]
        }
    });
    let (base_url, _) = spawn_fixed(StatusCode::BAD_REQUEST, body).await;
    let client = client_for(base_url, Duration::from_secs(5));

    let result = client.recommend(&QueryParameters::default()).await;
    assert!(matches!(result, Err(ProviderError::AuthFailure(_))));
}

#[tokio::test]
async fn test_forbidden_is_auth_failure() {
    let body = json!({ "error": { "message": "denied", "status": "PERMISSION_DENIED" } });
    let (base_url, _) = spawn_fixed(StatusCode::FORBIDDEN, body).await;
    let client = client_for(base_url, Duration::from_secs(5));

    let result = client.recommend(&QueryParameters::default()).await;
    assert!(matches!(result, Err(ProviderError::AuthFailure(_))));
}

#[tokio::test]
async fn test_server_error_is_network_failure() {
    let body = json!({ "error": { "message": "internal", "status": "INTERNAL" } });
    let (base_url, _) = spawn_fixed(StatusCode::INTERNAL_SERVER_ERROR, body).await;
    let client = client_for(base_url, Duration::from_secs(5));

    let result = client.recommend(&QueryParameters::default()).await;
    assert!(matches!(result, Err(ProviderError::NetworkFailure(_))));
}

#[tokio::test]
async fn test_unreachable_provider_is_network_failure() {
    // Reserve a port, then close it so nothing is listening
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(format!("http://{}/v1beta", addr), Duration::from_secs(2));
    let result = client.recommend(&QueryParameters::default()).await;
    assert!(matches!(result, Err(ProviderError::NetworkFailure(_))));
}

async fn spawn_slow() -> String {
    let router = Router::new().route(
        "/v1beta/models/:action",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(candidate_body(r#"{"crops": []}"#))
        }),
    );
    spawn_stub(router).await
}

#[tokio::test]
async fn test_timeout_is_network_failure() {
    let client = client_for(spawn_slow().await, Duration::from_millis(200));

    let result = client.recommend(&QueryParameters::default()).await;
    assert!(matches!(result, Err(ProviderError::NetworkFailure(_))));
}

#[tokio::test]
async fn test_timeout_through_controller_sets_failure_only() {
    let controller = Controller::new(client_for(spawn_slow().await, Duration::from_millis(200)));

    controller.submit().await;

    let view = controller.snapshot();
    assert_eq!(view.status, SessionStatus::Failure);
    assert_eq!(view.error.as_deref(), Some(RECOMMENDATION_FAILED_MESSAGE));
    assert!(view.results.is_none());
    assert!(controller.results().is_none());
}
