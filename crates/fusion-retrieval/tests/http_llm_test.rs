//! HttpLlmClient contract tests against a mock OpenAI-compatible server.

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use fusion_core::config::ClassifierConfig;
use fusion_core::errors::BackendError;
use fusion_core::models::ClassificationSource;
use fusion_core::traits::LlmClient;
use fusion_core::{Intent, WeightProfiles};
use fusion_retrieval::adapters::{HttpLlmClient, HttpLlmConfig};
use fusion_retrieval::IntentClassifier;

fn completion(content: &str) -> serde_json::Value {
    json!({
        "id": "cmpl-1",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
}

fn client(server: &MockServer) -> HttpLlmClient {
    let config = HttpLlmConfig::new(server.uri(), "test-model").with_api_key("test-key");
    HttpLlmClient::new(config).unwrap()
}

#[tokio::test]
async fn sends_model_prompt_and_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({
            "model": "test-model",
            "messages": [{"role": "user", "content": "hello"}],
            "stream": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("hi")))
        .expect(1)
        .mount(&server)
        .await;

    let reply = client(&server).complete("hello").await.unwrap();
    assert_eq!(reply, "hi");
}

#[tokio::test]
async fn unauthorized_maps_to_backend_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"error": {"message": "invalid api key"}})),
        )
        .mount(&server)
        .await;

    let err = client(&server).complete("hello").await.unwrap_err();
    assert!(matches!(err, BackendError::Unauthorized { ref reason } if reason.contains("invalid api key")));
}

#[tokio::test]
async fn missing_content_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let err = client(&server).complete("hello").await.unwrap_err();
    assert!(matches!(err, BackendError::InvalidResponse { .. }));
}

#[tokio::test]
async fn unreachable_server_is_unreachable() {
    let config = HttpLlmConfig::new("http://127.0.0.1:9", "m");
    let err = HttpLlmClient::new(config).unwrap().complete("x").await.unwrap_err();
    assert!(matches!(err, BackendError::Unreachable { .. }));
}

#[tokio::test]
async fn classifier_uses_http_llm() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("KEYWORD")))
        .expect(1)
        .mount(&server)
        .await;

    let llm: Arc<dyn LlmClient> = Arc::new(client(&server));
    let classifier = IntentClassifier::new(
        WeightProfiles::default(),
        Some(llm),
        ClassifierConfig {
            llm_timeout_ms: 2_000,
            ..ClassifierConfig::default()
        },
    );

    let first = classifier.classify("tokio runtime").await;
    let second = classifier.classify("tokio runtime").await;
    assert_eq!(first.intent, Intent::Keyword);
    assert_eq!(first.source, ClassificationSource::Llm);
    assert_eq!(first, second);
}
