use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use fcm_relay::{MockProvider, PushProvider, RelayConfig, RelayHttpServer};
use serde_json::{json, Value};
use tower::ServiceExt;

/// 用指定 provider 构建完整路由（与生产路径一致）
fn app(provider: Arc<dyn PushProvider>) -> Router {
    let config = Arc::new(RelayConfig {
        port: 0,
        api_key: "test-key".to_string(),
        sender_id: "test-sender".to_string(),
        debug: false,
    });
    RelayHttpServer::new(config, provider).router()
}

async fn post_message(app: Router, body: impl Into<Body>) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/message")
                .header(header::CONTENT_TYPE, "application/json")
                .body(body.into())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn test_http_protocol_success_returns_provider_response() {
    // 场景 1：HTTP 协议 + 成功的 provider → 200，body 就是 provider 响应
    let body = r#"{"protocol":"HTTP","message":{"to":"abc","data":{"k":"v"}}}"#;
    let (status, value) = post_message(app(Arc::new(MockProvider::new())), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        value,
        json!({
            "multicast_id": 216,
            "success": 1,
            "failure": 0,
            "canonical_ids": 0,
            "results": [{"message_id": "1:mock"}]
        })
    );
}

#[tokio::test]
async fn test_xmpp_protocol_success_returns_ack() {
    let body = r#"{"protocol":"xmpp","message":{"to":"abc","message_id":"m-1"}}"#;
    let (status, value) = post_message(app(Arc::new(MockProvider::new())), body).await;

    assert_eq!(status, StatusCode::OK);
    // CCS ack 原样透传；内部 message_id 返回值不上浮为独立字段
    assert_eq!(value["message_type"], "ack");
    assert_eq!(value["message_id"], "m-1");
    assert_eq!(value["from"], "abc");
}

#[tokio::test]
async fn test_protocol_is_case_insensitive() {
    for protocol in ["http", "HTTP", "Http", "xmpp", "XMPP", "XmPp"] {
        let body = format!(r#"{{"protocol":"{}","message":{{"to":"abc"}}}}"#, protocol);
        let (status, _) = post_message(app(Arc::new(MockProvider::new())), body).await;
        assert_eq!(status, StatusCode::OK, "protocol {} should be accepted", protocol);
    }
}

#[tokio::test]
async fn test_provider_failure_returns_500() {
    // 场景 2：provider 报错 → 500，body 是序列化后的错误
    let body = r#"{"protocol":"xmpp","message":{"to":"abc"}}"#;
    let provider = Arc::new(MockProvider::failing("DeviceMessageRateExceeded"));
    let (status, value) = post_message(app(provider), body).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(value, json!({"error": "DeviceMessageRateExceeded"}));
}

#[tokio::test]
async fn test_malformed_body_returns_406() {
    // 场景 3：不是 JSON → 406，error 消息非空
    let (status, value) = post_message(app(Arc::new(MockProvider::new())), "not json").await;

    assert_eq!(status, StatusCode::NOT_ACCEPTABLE);
    let message = value["error"].as_str().unwrap();
    assert!(!message.is_empty());
}

#[tokio::test]
async fn test_malformed_inner_payload_returns_406() {
    // 信封合法但内层 payload 不是对象，同样走 406
    let body = r#"{"protocol":"http","message":"not an object"}"#;
    let (status, value) = post_message(app(Arc::new(MockProvider::new())), body).await;

    assert_eq!(status, StatusCode::NOT_ACCEPTABLE);
    assert!(!value["error"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_protocol_returns_400_with_fixed_message() {
    // 场景 4：未知协议 → 400，错误消息是固定文案
    let body = r#"{"protocol":"carrier-pigeon","message":{}}"#;
    let (status, value) = post_message(app(Arc::new(MockProvider::new())), body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(value, json!({"error": "protocol should be HTTP or XMPP only."}));
}

#[tokio::test]
async fn test_missing_protocol_returns_400() {
    // protocol 字段缺失按空串处理，和未知协议走同一个 400 分支
    let body = r#"{"message":{"to":"abc"}}"#;
    let (status, value) = post_message(app(Arc::new(MockProvider::new())), body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(value, json!({"error": "protocol should be HTTP or XMPP only."}));
}

#[tokio::test]
async fn test_empty_protocol_returns_400() {
    let body = r#"{"protocol":"","message":{"to":"abc"}}"#;
    let (status, value) = post_message(app(Arc::new(MockProvider::new())), body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(value["error"], "protocol should be HTTP or XMPP only.");
}

#[tokio::test]
async fn test_oversized_body_rejected_with_413() {
    // 超过 1 MiB 上限的请求体直接拒绝，不截断
    let padding = "x".repeat(1_100_000);
    let body = format!(r#"{{"protocol":"http","message":{{"to":"{}"}}}}"#, padding);
    let (status, value) = post_message(app(Arc::new(MockProvider::new())), body).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(!value["error"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_body_read_failure_returns_400() {
    // 传输中途断掉的请求体是请求级 400，不是 413，更不会影响进程
    let stream = futures::stream::iter(vec![
        Ok::<_, std::io::Error>(axum::body::Bytes::from_static(b"{\"protocol\":")),
        Err(std::io::Error::new(
            std::io::ErrorKind::ConnectionReset,
            "connection reset by peer",
        )),
    ]);
    let (status, value) =
        post_message(app(Arc::new(MockProvider::new())), Body::from_stream(stream)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!value["error"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_error_responses_are_json() {
    let response = app(Arc::new(MockProvider::new()))
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/message")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_ACCEPTABLE);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(content_type.starts_with("application/json"));
}

#[tokio::test]
async fn test_only_post_is_registered() {
    let response = app(Arc::new(MockProvider::new()))
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/message")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
