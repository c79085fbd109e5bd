//! Canned-response DynamoDB endpoint for tests
//!
//! Serves one HTTP response per connection, in order, from a local
//! `TcpListener`, so the real SDK request/response path runs without AWS.

use aws_sdk_dynamodb::config::{retry::RetryConfig, BehaviorVersion, Credentials, Region};
use aws_sdk_dynamodb::Client as DynamoDbSdkClient;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use crate::config::Settings;
use crate::db::DynamoDbClient;

/// Start the endpoint; returns its base URL
pub async fn serve_responses(responses: Vec<(u16, &'static str)>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        for (status, body) in responses {
            let (mut socket, _) = listener.accept().await.unwrap();
            read_request(&mut socket).await;

            let reason = if status == 200 { "OK" } else { "Bad Request" };
            let response = format!(
                "HTTP/1.1 {} {}\r\n\
                 Content-Type: application/x-amz-json-1.0\r\n\
                 x-amzn-RequestId: test-request\r\n\
                 Content-Length: {}\r\n\
                 Connection: close\r\n\r\n{}",
                status,
                reason,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        }
    });

    format!("http://{}", addr)
}

/// Read one request (headers plus Content-Length body)
async fn read_request(socket: &mut TcpStream) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            return;
        }
        buf.extend_from_slice(&chunk[..n]);

        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&buf[..end]).to_lowercase();
            let body_len = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + body_len {
                return;
            }
        }
    }
}

/// SDK client pointed at `endpoint` with static credentials and no retries
pub fn sdk_client(endpoint: &str) -> DynamoDbSdkClient {
    let config = aws_sdk_dynamodb::Config::builder()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new("eu-north-1"))
        .credentials_provider(Credentials::new("test", "test", None, None, "test"))
        .endpoint_url(endpoint)
        .retry_config(RetryConfig::disabled())
        .build();
    DynamoDbSdkClient::from_conf(config)
}

pub fn dynamodb_client(endpoint: &str, settings: Settings) -> DynamoDbClient {
    DynamoDbClient::new(Arc::new(settings), sdk_client(endpoint))
}

pub fn error_body(code: &str) -> &'static str {
    match code {
        "ResourceInUseException" => {
            r#"{"__type":"com.amazonaws.dynamodb.v20120810#ResourceInUseException","message":"Table already exists: Users"}"#
        }
        "AccessDeniedException" => {
            r#"{"__type":"com.amazon.coral.service#AccessDeniedException","message":"User is not authorized to perform: dynamodb:CreateTable"}"#
        }
        "ProvisionedThroughputExceededException" => {
            r#"{"__type":"com.amazonaws.dynamodb.v20120810#ProvisionedThroughputExceededException","message":"Rate exceeded"}"#
        }
        other => panic!("no canned body for {}", other),
    }
}
