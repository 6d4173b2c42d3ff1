// ABOUTME: Integration tests for the Ollama estimator against a local stub HTTP server
// ABOUTME: Covers the request shape, success, service errors, unreachable endpoints and odd replies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use calorie_tracker::config::EstimatorConfig;
use calorie_tracker::errors::ErrorCode;
use calorie_tracker::llm::{NutritionEstimator, OllamaEstimator};
use common::init_test_logging;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Serve one request with a canned reply; the handle yields the request body
async fn stub_server(
    status: &'static str,
    body: &'static str,
) -> (SocketAddr, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        let request_body = read_request_body(&mut socket).await;

        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.expect("write");
        socket.shutdown().await.ok();
        request_body
    });

    (addr, handle)
}

async fn read_request_body(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0_u8; 1024];
    loop {
        let n = socket.read(&mut chunk).await.expect("read");
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf).into_owned();
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            let body_start = header_end + 4;
            if buf.len() >= body_start + content_length {
                return String::from_utf8_lossy(&buf[body_start..body_start + content_length])
                    .into_owned();
            }
        }
    }
    String::new()
}

fn estimator_for(addr: SocketAddr, timeout: Duration) -> OllamaEstimator {
    init_test_logging();
    OllamaEstimator::new(EstimatorConfig {
        endpoint: format!("http://{addr}/api/generate"),
        model: "qwen3:8b".to_owned(),
        timeout,
    })
    .unwrap()
}

#[tokio::test]
async fn test_successful_estimate() {
    let (addr, server) = stub_server(
        "200 OK",
        r#"{"model":"qwen3:8b","response":"Protein: 12.5g, Carbs: 40g, Fat: 3g, Calories: 310","done":true}"#,
    )
    .await;
    let estimator = estimator_for(addr, Duration::from_secs(5));

    let estimate = estimator.estimate("1 bowl oatmeal").await.unwrap();

    assert!((estimate.proteins() - 12.5).abs() < f64::EPSILON);
    assert!((estimate.calories() - 310.0).abs() < f64::EPSILON);

    let request: serde_json::Value = serde_json::from_str(&server.await.unwrap()).unwrap();
    assert_eq!(request["model"], "qwen3:8b");
    assert_eq!(request["stream"], false);
    assert!(request["prompt"]
        .as_str()
        .unwrap()
        .contains("Your user ate 1 bowl oatmeal,"));
}

#[tokio::test]
async fn test_service_error_status() {
    let (addr, server) = stub_server(
        "500 Internal Server Error",
        r#"{"error":"model runner crashed"}"#,
    )
    .await;
    let estimator = estimator_for(addr, Duration::from_secs(5));

    let error = estimator.estimate("2 slices pizza").await.unwrap_err();

    assert_eq!(error.code, ErrorCode::EstimationFailed);
    assert!(error.message.contains("model runner crashed"));
    server.await.unwrap();
}

#[tokio::test]
async fn test_unknown_model() {
    let (addr, server) =
        stub_server("404 Not Found", r#"{"error":"model 'qwen3:8b' not found"}"#).await;
    let estimator = estimator_for(addr, Duration::from_secs(5));

    let error = estimator.estimate("1 apple").await.unwrap_err();

    assert_eq!(error.code, ErrorCode::EstimationFailed);
    assert!(error.message.contains("not found"));
    server.await.unwrap();
}

#[tokio::test]
async fn test_reply_without_response_field() {
    let (addr, server) = stub_server("200 OK", r#"{"done":true}"#).await;
    let estimator = estimator_for(addr, Duration::from_secs(5));

    let error = estimator.estimate("1 apple").await.unwrap_err();

    assert_eq!(error.code, ErrorCode::EstimateParseFailed);
    server.await.unwrap();
}

#[tokio::test]
async fn test_reply_that_is_not_json() {
    let (addr, server) = stub_server("200 OK", "<html>proxy</html>").await;
    let estimator = estimator_for(addr, Duration::from_secs(5));

    let error = estimator.estimate("1 apple").await.unwrap_err();

    assert_eq!(error.code, ErrorCode::EstimationFailed);
    server.await.unwrap();
}

#[tokio::test]
async fn test_unreachable_endpoint() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let estimator = estimator_for(addr, Duration::from_secs(5));

    let error = estimator.estimate("1 apple").await.unwrap_err();

    assert_eq!(error.code, ErrorCode::EstimationFailed);
    assert!(error.message.contains(&addr.to_string()));
}

#[tokio::test]
async fn test_silent_service_times_out() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(3)).await;
        drop(socket);
    });
    let estimator = estimator_for(addr, Duration::from_secs(1));

    let error = estimator.estimate("1 apple").await.unwrap_err();

    assert_eq!(error.code, ErrorCode::EstimationFailed);
    server.abort();
}
