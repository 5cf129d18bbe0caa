//! Test fixtures: request builders and sample image bytes.

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde_json::Value;
use tower::ServiceExt;

/// Multipart boundary used by the test upload bodies.
pub const BOUNDARY: &str = "shutter-test-boundary";

/// Username/password matching `AppConfig::for_testing()`.
pub const TEST_USER: &str = "admin";
pub const TEST_PASSWORD: &str = "test-password";

/// A tiny but valid JPEG header plus padding; enough for byte-identity checks.
#[allow(dead_code)]
pub fn test_jpeg_data() -> Vec<u8> {
    let mut data = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
    data.extend_from_slice(b"JFIF\0");
    data.extend_from_slice(&[0xAB; 256]);
    data.extend_from_slice(&[0xFF, 0xD9]);
    data
}

/// Basic auth header value for the test credentials.
#[allow(dead_code)]
pub fn basic_auth(username: &str, password: &str) -> String {
    format!("Basic {}", BASE64.encode(format!("{username}:{password}")))
}

/// One field of a multipart body.
#[allow(dead_code)]
pub enum Part<'a> {
    /// A file part with filename, content type and bytes.
    File {
        name: &'a str,
        filename: &'a str,
        content_type: &'a str,
        data: &'a [u8],
    },
    /// A plain text field.
    Text { name: &'a str, value: &'a str },
}

/// Assemble a multipart/form-data body from parts.
#[allow(dead_code)]
pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::File {
                name,
                filename,
                content_type,
                data,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                         Content-Type: {content_type}\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(data);
                body.extend_from_slice(b"\r\n");
            }
            Part::Text { name, value } => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
                body.extend_from_slice(b"\r\n");
            }
        }
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// POST a multipart upload with the test credentials.
#[allow(dead_code)]
pub async fn upload_request(
    router: &axum::Router,
    uri: &str,
    parts: &[Part<'_>],
) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::AUTHORIZATION, basic_auth(TEST_USER, TEST_PASSWORD))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);
    (status, json)
}

/// Upload a standard test JPEG, returning the assigned id.
#[allow(dead_code)]
pub async fn upload_test_jpeg(router: &axum::Router, original_name: &str) -> String {
    let data = test_jpeg_data();
    let (status, body) = upload_request(
        router,
        "/upload",
        &[Part::File {
            name: "file",
            filename: original_name,
            content_type: "image/jpeg",
            data: &data,
        }],
    )
    .await;
    assert_eq!(status, StatusCode::OK, "upload failed: {body}");
    body["id"].as_str().expect("upload response has id").to_string()
}

/// GET a path and return (status, headers, body bytes).
#[allow(dead_code)]
pub async fn get_raw(
    router: &axum::Router,
    uri: &str,
) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();
    (status, headers, body)
}

/// DELETE a path, optionally with an Authorization header.
#[allow(dead_code)]
pub async fn delete_request(
    router: &axum::Router,
    uri: &str,
    auth: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method("DELETE").uri(uri);
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    let response = router
        .clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);
    (status, json)
}
