use std::sync::Arc;

use askforge_relay::{router, ChatRequest, CompletionClient, RelayConfig, RelayState, WireMessage};
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::Value;
use tower::ServiceExt;
use wiremock::matchers::{header as req_header, method, path};
use wiremock::{Match, Mock, MockServer, Request as MockRequest, ResponseTemplate};

fn test_config(upstream_base: String) -> RelayConfig {
    RelayConfig {
        bind_address: "127.0.0.1:0".to_owned(),
        upstream_base,
        api_key: "test-key".to_owned(),
        site_url: "http://localhost".to_owned(),
        site_name: "AskForge Test".to_owned(),
        model: "deepseek/deepseek-r1-0528:free".to_owned(),
    }
}

fn test_router(server: &MockServer) -> axum::Router {
    let config = test_config(server.uri());
    router(Arc::new(RelayState {
        client: CompletionClient::new(config),
    }))
}

fn chat_request(messages: Vec<WireMessage>) -> Request<Body> {
    let body = serde_json::to_vec(&ChatRequest { messages }).unwrap();
    Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap()
}

fn user(content: &str) -> WireMessage {
    WireMessage {
        role: "user".to_owned(),
        content: content.to_owned(),
    }
}

fn sse_body(deltas: &[&str]) -> String {
    let mut body = String::new();
    for delta in deltas {
        let record = serde_json::json!({ "choices": [{ "delta": { "content": delta } }] });
        body.push_str(&format!("data: {record}\n\n"));
    }
    body.push_str("data: [DONE]\n\n");
    body
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Asserts the outbound completion request: the policy prompt leads the
/// message list and the configured model is named.
struct CompletionBodyMatcher;

impl Match for CompletionBodyMatcher {
    fn matches(&self, request: &MockRequest) -> bool {
        let Ok(body) = serde_json::from_slice::<Value>(&request.body) else {
            return false;
        };
        let model_ok = body["model"] == "deepseek/deepseek-r1-0528:free";
        let stream_ok = body["stream"] == true;
        let first_role_ok = body["messages"][0]["role"] == "system";
        model_ok && stream_ok && first_role_ok
    }
}

#[tokio::test]
async fn relays_deltas_as_plain_text_with_emoji_removed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(sse_body(&["Hi ", "\u{1F600}there"]), "text/event-stream"),
        )
        .mount(&server)
        .await;

    let response = test_router(&server)
        .oneshot(chat_request(vec![user("hello")]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/plain; charset=utf-8"
    );
    assert_eq!(response.headers()[header::CACHE_CONTROL], "no-cache");
    assert_eq!(body_text(response).await, "Hi there");
}

#[tokio::test]
async fn stops_at_done_sentinel() {
    let server = MockServer::start().await;
    let mut body = sse_body(&["before"]);
    body.push_str("data: {\"choices\":[{\"delta\":{\"content\":\"after\"}}]}\n\n");
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/event-stream"))
        .mount(&server)
        .await;

    let response = test_router(&server)
        .oneshot(chat_request(vec![user("hello")]))
        .await
        .unwrap();

    assert_eq!(body_text(response).await, "before");
}

#[tokio::test]
async fn sends_policy_prompt_model_and_identification_headers_upstream() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(req_header("Authorization", "Bearer test-key"))
        .and(req_header("HTTP-Referer", "http://localhost"))
        .and(req_header("X-Title", "AskForge Test"))
        .and(CompletionBodyMatcher)
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(sse_body(&["ok"]), "text/event-stream"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let response = test_router(&server)
        .oneshot(chat_request(vec![user("hello")]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "ok");
}

#[tokio::test]
async fn rejects_empty_message_list() {
    let server = MockServer::start().await;

    let response = test_router(&server)
        .oneshot(chat_request(Vec::new()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["error"], "messages must not be empty");
}

#[tokio::test]
async fn maps_upstream_failure_to_bad_gateway_without_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("provider exploded"))
        .mount(&server)
        .await;

    let response = test_router(&server)
        .oneshot(chat_request(vec![user("hello")]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["error"], "upstream provider error");
}

#[tokio::test]
async fn records_without_content_contribute_nothing() {
    let server = MockServer::start().await;
    let body = concat!(
        ": keep-alive\n\n",
        "data: {\"choices\":[{\"delta\":{}}]}\n\n",
        "data: {\"choices\":[{\"delta\":{\"content\":\"text\"}}]}\n\n",
        "data: [DONE]\n\n",
    );
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/event-stream"))
        .mount(&server)
        .await;

    let response = test_router(&server)
        .oneshot(chat_request(vec![user("hello")]))
        .await
        .unwrap();

    assert_eq!(body_text(response).await, "text");
}
