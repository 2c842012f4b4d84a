//! GeminiClient against a local stub of the generateContent endpoint

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use pactlens_analyzer::{GeminiClient, GeminiConfig};
use pactlens_core::{Error, GenerationConfig, GenerativeModel};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// What the stub saw on its last request
#[derive(Debug, Clone, Default)]
struct Captured {
    call: String,
    api_key: Option<String>,
    body: Value,
}

type Seen = Arc<Mutex<Option<Captured>>>;

async fn record(
    State(seen): State<Seen>,
    Path(call): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    let api_key = headers
        .get("x-goog-api-key")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    *seen.lock().unwrap() = Some(Captured { call, api_key, body });

    Json(json!({
        "candidates": [{
            "content": {
                "parts": [{ "text": "{\"summary\":" }, { "text": "\"ok\"}" }],
                "role": "model"
            },
            "finishReason": "STOP"
        }]
    }))
}

async fn overloaded() -> impl IntoResponse {
    (StatusCode::SERVICE_UNAVAILABLE, "model overloaded")
}

async fn slow() -> Json<Value> {
    tokio::time::sleep(Duration::from_secs(5)).await;
    Json(json!({ "candidates": [] }))
}

async fn no_candidates() -> Json<Value> {
    Json(json!({ "candidates": [] }))
}

async fn not_json() -> &'static str {
    "<html>gateway</html>"
}

/// Serve `app` on an ephemeral port and return its base URL
async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/v1beta", addr)
}

fn client(endpoint: String, timeout_secs: u64) -> GeminiClient {
    let config = GeminiConfig {
        endpoint,
        timeout_secs,
        ..GeminiConfig::default()
    };
    GeminiClient::new(&config, "test-key").unwrap()
}

fn approx(value: &Value, expected: f64) -> bool {
    value.as_f64().map_or(false, |v| (v - expected).abs() < 1e-6)
}

#[tokio::test]
async fn test_request_carries_key_and_generation_config() {
    let seen: Seen = Arc::default();
    let app = Router::new()
        .route("/v1beta/models/:call", post(record))
        .with_state(Arc::clone(&seen));
    let client = client(serve(app).await, 10);

    let text = client
        .generate("Analyze this lease", &GenerationConfig::default())
        .await
        .unwrap();
    assert_eq!(text, r#"{"summary":"ok"}"#);

    let captured = seen.lock().unwrap().clone().unwrap();
    assert_eq!(captured.call, "gemini-flash-latest:generateContent");
    assert_eq!(captured.api_key.as_deref(), Some("test-key"));

    let body = captured.body;
    assert_eq!(body["contents"][0]["role"], "user");
    assert_eq!(body["contents"][0]["parts"][0]["text"], "Analyze this lease");
    let generation = &body["generationConfig"];
    assert!(approx(&generation["temperature"], 0.4));
    assert!(approx(&generation["topP"], 0.8));
    assert_eq!(generation["topK"], 40);
    assert_eq!(generation["maxOutputTokens"], 8192);
}

#[tokio::test]
async fn test_error_status_maps_to_model_error() {
    let app = Router::new().route("/v1beta/models/:call", post(overloaded));
    let client = client(serve(app).await, 10);

    let err = client
        .generate("prompt", &GenerationConfig::default())
        .await
        .unwrap_err();
    match err {
        Error::Model(msg) => {
            assert!(msg.starts_with("HTTP 503"), "unexpected message: {}", msg);
            assert!(msg.contains("model overloaded"));
        }
        other => panic!("expected model error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_slow_endpoint_times_out() {
    let app = Router::new().route("/v1beta/models/:call", post(slow));
    let client = client(serve(app).await, 1);

    let err = client
        .generate("prompt", &GenerationConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Timeout), "expected timeout, got {:?}", err);
}

#[tokio::test]
async fn test_empty_candidates_is_error() {
    let app = Router::new().route("/v1beta/models/:call", post(no_candidates));
    let client = client(serve(app).await, 10);

    let err = client
        .generate("prompt", &GenerationConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Model(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_invalid_success_body_is_error() {
    let app = Router::new().route("/v1beta/models/:call", post(not_json));
    let client = client(serve(app).await, 10);

    let err = client
        .generate("prompt", &GenerationConfig::default())
        .await
        .unwrap_err();
    match err {
        Error::Model(msg) => assert!(msg.starts_with("Invalid response body"), "{}", msg),
        other => panic!("expected model error, got {:?}", other),
    }
}
