//! End-to-end tests against a local mock chat-completions server.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::Query;
use axum::http::{HeaderMap, StatusCode};
use axum::response::Json;
use axum::routing::post;
use serde_json::{Value, json};

use chatbot::config::{AzureConfig, SarvamConfig};
use chatbot::llm::{ChatClient, LLMError};

/// Bind a router on an ephemeral port and return its base URL.
async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn reply_body(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "choices": [
            {
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }
        ],
        "usage": { "prompt_tokens": 9, "completion_tokens": 3, "total_tokens": 12 }
    })
}

fn sarvam_client(base: &str, api_key: &str) -> ChatClient {
    ChatClient::sarvam(SarvamConfig::new(api_key).with_base_url(format!("{base}/v1")))
}

#[tokio::test]
async fn sarvam_chat_returns_reply_text() {
    type Captured = Arc<Mutex<Option<(HeaderMap, Value)>>>;
    let captured: Captured = Arc::default();

    let router = Router::new().route(
        "/v1/chat/completions",
        post({
            let captured = captured.clone();
            move |headers: HeaderMap, Json(body): Json<Value>| {
                let captured = captured.clone();
                async move {
                    *captured.lock().unwrap() = Some((headers, body));
                    Json(reply_body("hello"))
                }
            }
        }),
    );

    let base = serve(router).await;
    let reply = sarvam_client(&base, "test-key")
        .complete("hi")
        .await
        .unwrap();
    assert_eq!(reply.text, "hello");

    let (headers, body) = captured.lock().unwrap().take().unwrap();
    assert_eq!(headers["authorization"], "Bearer test-key");
    assert_eq!(headers["content-type"], "application/json");

    assert_eq!(body["model"], "sarvam-m");
    assert_eq!(body["temperature"], 0.7);
    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["role"], "system");
    assert_eq!(messages[0]["content"], "You are a helpful assistant.");
    assert_eq!(messages[1]["role"], "user");
    assert_eq!(messages[1]["content"], "hi");
}

#[tokio::test]
async fn sarvam_http_500_is_api_error() {
    let router = Router::new().route(
        "/v1/chat/completions",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded") }),
    );

    let base = serve(router).await;
    let err = sarvam_client(&base, "test-key")
        .complete("hi")
        .await
        .unwrap_err();

    match err {
        LLMError::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "upstream exploded");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn sarvam_empty_choices_is_response_error() {
    let router = Router::new().route(
        "/v1/chat/completions",
        post(|| async { Json(json!({ "id": "chatcmpl-test", "choices": [] })) }),
    );

    let base = serve(router).await;
    let err = sarvam_client(&base, "test-key")
        .complete("hi")
        .await
        .unwrap_err();

    assert!(matches!(err, LLMError::Response(_)), "got {err:?}");
}

#[tokio::test]
async fn sarvam_non_json_body_is_request_error() {
    let router = Router::new().route("/v1/chat/completions", post(|| async { "not json" }));

    let base = serve(router).await;
    let err = sarvam_client(&base, "test-key")
        .complete("hi")
        .await
        .unwrap_err();

    assert!(matches!(err, LLMError::Request(_)), "got {err:?}");
}

#[tokio::test]
async fn sarvam_connection_refused_is_request_error() {
    // Nothing is listening here.
    let err = sarvam_client("http://127.0.0.1:1", "test-key")
        .complete("hi")
        .await
        .unwrap_err();

    assert!(matches!(err, LLMError::Request(_)), "got {err:?}");
}

#[tokio::test]
async fn azure_chat_hits_deployment_url_with_api_key() {
    type Captured = Arc<Mutex<Option<(HashMap<String, String>, HeaderMap, Value)>>>;
    let captured: Captured = Arc::default();

    let router = Router::new().route(
        "/openai/deployments/gpt-test/chat/completions",
        post({
            let captured = captured.clone();
            move |Query(query): Query<HashMap<String, String>>,
                  headers: HeaderMap,
                  Json(body): Json<Value>| {
                let captured = captured.clone();
                async move {
                    *captured.lock().unwrap() = Some((query, headers, body));
                    Json(reply_body("bonjour"))
                }
            }
        }),
    );

    let base = serve(router).await;
    let client = ChatClient::azure(AzureConfig {
        api_key: "azure-key".to_string(),
        endpoint: base,
        deployment: "gpt-test".to_string(),
        api_version: AzureConfig::DEFAULT_API_VERSION.to_string(),
    });

    let reply = client.complete("salut").await.unwrap();
    assert_eq!(reply.text, "bonjour");

    let (query, headers, body) = captured.lock().unwrap().take().unwrap();
    assert_eq!(query["api-version"], "2024-12-01-preview");
    assert_eq!(headers["api-key"], "azure-key");
    assert!(headers.get("authorization").is_none());

    assert_eq!(body["model"], "gpt-test");
    assert_eq!(body["temperature"], 0.7);
    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1]["content"], "salut");
}

#[tokio::test]
async fn azure_http_401_is_api_error() {
    let router = Router::new().route(
        "/openai/deployments/gpt-test/chat/completions",
        post(|| async { (StatusCode::UNAUTHORIZED, "invalid api key") }),
    );

    let base = serve(router).await;
    let client = ChatClient::azure(AzureConfig {
        api_key: "wrong-key".to_string(),
        endpoint: base,
        deployment: "gpt-test".to_string(),
        api_version: AzureConfig::DEFAULT_API_VERSION.to_string(),
    });

    let err = client.complete("hi").await.unwrap_err();
    match err {
        LLMError::Api { status, .. } => assert_eq!(status, 401),
        other => panic!("expected Api error, got {other:?}"),
    }
}
