//! Request Value Object Tests

use shim_domain::constants::IDEMPOTENCY_KEY;
use shim_domain::header::{CONTENT_LENGTH, CONTENT_TYPE};
use shim_domain::{
    Error, FormData, Headers, HttpRequest, HttpResponse, Method, MultipartBody, ReadableStream,
    RequestBody, RequestOptions,
};

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_request_types_are_thread_safe() {
    assert_send_sync::<RequestOptions>();
    assert_send_sync::<RequestBody>();
    assert_send_sync::<ReadableStream>();
    assert_send_sync::<FormData>();
    assert_send_sync::<HttpRequest>();
}

#[test]
fn test_clone_without_body_keeps_settings() {
    let options = RequestOptions::new()
        .with_method(Method::POST)
        .with_header("X-Custom", "1")
        .unwrap()
        .with_body(RequestBody::Stream(ReadableStream::empty()));

    let copy = options.clone_without_body();
    assert!(copy.body.is_none());
    assert_eq!(copy.method, Some(Method::POST));
    assert_eq!(copy.headers.get("x-custom"), Some("1"));
    assert!(options.body.is_some());
}

#[test]
fn test_with_header_rejects_injection() {
    let result = RequestOptions::new().with_header("X-Bad", "v\r\nInjected: 1");
    assert!(matches!(result, Err(Error::InvalidArgument { .. })));
}

#[test]
fn test_from_options_adds_multipart_framing() {
    let body = MultipartBody::new(
        ReadableStream::from_bytes("xyz"),
        "multipart/form-data; boundary=b",
        3,
    );
    let mut options = RequestOptions::new()
        .with_method(Method::POST)
        .with_body(RequestBody::Multipart(body));
    options.idempotency_key = Some("key-1".to_string());

    let request = HttpRequest::from_options("https://api.example.com/v1/files", options).unwrap();

    assert_eq!(request.method, Method::POST);
    assert!(request.body.is_multipart());
    assert_eq!(request.headers.get(CONTENT_LENGTH), Some("3"));
    assert_eq!(
        request.headers.get(CONTENT_TYPE),
        Some("multipart/form-data; boundary=b")
    );
    assert_eq!(request.headers.get(IDEMPOTENCY_KEY), Some("key-1"));
}

#[test]
fn test_from_options_rejects_bad_idempotency_key() {
    let mut options = RequestOptions::new();
    options.idempotency_key = Some("key\n2".to_string());

    let result = HttpRequest::from_options("https://api.example.com/v1/files", options);
    assert!(matches!(result, Err(Error::InvalidArgument { .. })));
}

#[test]
fn test_try_clone_refuses_streams() {
    assert!(RequestBody::Json(serde_json::json!({"a": 1})).try_clone().is_some());
    assert!(RequestBody::Stream(ReadableStream::empty()).try_clone().is_none());
}

#[tokio::test]
async fn test_response_json() {
    let response = HttpResponse::new(
        201,
        Headers::try_from([("content-type", "application/json")]).unwrap(),
        ReadableStream::from_bytes(r#"{"id":"file-1"}"#),
    );
    assert!(response.ok());

    let value: serde_json::Value = response.json().await.unwrap();
    assert_eq!(value["id"], "file-1");
}
