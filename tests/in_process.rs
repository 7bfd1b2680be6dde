//! Drive the full server stack in process, without a listener.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use api_path_rewrite::config::GatewayConfig;
use api_path_rewrite::http::HttpServer;

mod common;

#[tokio::test]
async fn test_app_rewrites_before_forwarding() {
    let upstream = common::start_echo_backend().await;
    let mut config = GatewayConfig::default();
    config.upstream.address = upstream.to_string();

    let app = HttpServer::new(config).unwrap().app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/audio/speech?format=mp3")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = String::from_utf8(body.to_vec()).unwrap();
    assert!(body.starts_with("/v1/audio/speech?format=mp3|"), "body: {body}");
}

#[tokio::test]
async fn test_encoded_path_rewritten_before_forwarding() {
    let upstream = common::start_echo_backend().await;
    let mut config = GatewayConfig::default();
    config.upstream.address = upstream.to_string();

    let response = HttpServer::new(config)
        .unwrap()
        .app()
        .oneshot(
            Request::builder()
                .uri("/chat%2Fcompletions")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = String::from_utf8(body.to_vec()).unwrap();
    assert!(body.starts_with("/v1/chat%2Fcompletions|"), "body: {body}");
}

#[tokio::test]
async fn test_request_id_assigned_ahead_of_rewrite() {
    let upstream = common::unused_addr().await;
    let mut config = GatewayConfig::default();
    config.upstream.address = upstream.to_string();
    config.timeouts.connect_secs = 1;

    let response = HttpServer::new(config)
        .unwrap()
        .app()
        .oneshot(
            Request::builder()
                .uri("/models/gemini-pro:generateContent")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let request_id = response.headers().get("x-request-id").unwrap();
    assert!(!request_id.is_empty());
}
