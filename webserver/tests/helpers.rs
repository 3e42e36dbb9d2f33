//! Test helper utilities for webserver integration tests

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

/// Send one request through the router and collect status and body
pub async fn send(router: &Router, method: Method, uri: &str) -> (StatusCode, Vec<u8>) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

pub async fn send_json(router: &Router, method: Method, uri: &str) -> (StatusCode, Value) {
    let (status, body) = send(router, method, uri).await;
    let value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, value)
}
