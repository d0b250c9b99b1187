//! Request and response value objects
//!
//! [`RequestOptions`] is what the transport core builds per API call;
//! [`HttpRequest`] and [`HttpResponse`] are the wire-level objects a runtime's
//! `fetch` consumes and produces.

use std::fmt;
use std::time::Duration;

use bytes::Bytes;
use http::header::{CONTENT_LENGTH, CONTENT_TYPE, HeaderName, HeaderValue};
use http::Method;
use serde::de::DeserializeOwned;

use super::abort::AbortSignal;
use super::headers::Headers;
use super::stream::ReadableStream;
use crate::constants::IDEMPOTENCY_KEY;
use crate::error::Result;
use crate::ports::SharedAgent;

/// Encoded multipart body with its framing headers
pub struct MultipartBody {
    stream: ReadableStream,
    content_type: String,
    content_length: u64,
}

impl MultipartBody {
    /// Wrap an encoded multipart stream
    pub fn new<T: Into<String>>(stream: ReadableStream, content_type: T, content_length: u64) -> Self {
        Self {
            stream,
            content_type: content_type.into(),
            content_length,
        }
    }

    /// `multipart/form-data; boundary=...`
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Exact number of bytes the stream yields
    pub fn content_length(&self) -> u64 {
        self.content_length
    }

    /// Take the encoded stream
    pub fn into_stream(self) -> ReadableStream {
        self.stream
    }
}

impl fmt::Debug for MultipartBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultipartBody")
            .field("content_type", &self.content_type)
            .field("content_length", &self.content_length)
            .finish_non_exhaustive()
    }
}

/// Request body
#[derive(Debug, Default)]
pub enum RequestBody {
    /// No body
    #[default]
    Empty,
    /// Raw bytes
    Bytes(Bytes),
    /// JSON document, serialized at dispatch
    Json(serde_json::Value),
    /// Encoded multipart form
    Multipart(MultipartBody),
    /// Arbitrary byte stream
    Stream(ReadableStream),
}

impl RequestBody {
    /// Whether there is no body
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Whether this is a multipart body
    pub fn is_multipart(&self) -> bool {
        matches!(self, Self::Multipart(_))
    }

    /// Copy the body when it is not a one-shot stream
    pub fn try_clone(&self) -> Option<RequestBody> {
        match self {
            Self::Empty => Some(Self::Empty),
            Self::Bytes(bytes) => Some(Self::Bytes(bytes.clone())),
            Self::Json(value) => Some(Self::Json(value.clone())),
            Self::Multipart(_) | Self::Stream(_) => None,
        }
    }
}

/// Per-call options assembled by the transport core
#[derive(Debug, Default)]
pub struct RequestOptions {
    /// HTTP method
    pub method: Option<Method>,
    /// Path relative to the client's base URL
    pub path: Option<String>,
    /// Query parameters
    pub query: Option<serde_json::Value>,
    /// Request headers
    pub headers: Headers,
    /// Request body
    pub body: Option<RequestBody>,
    /// Retry budget for this call
    pub max_retries: Option<u32>,
    /// Whether the caller wants a streamed response
    pub stream: bool,
    /// Per-call timeout
    pub timeout: Option<Duration>,
    /// Agent overriding the runtime default
    pub http_agent: Option<SharedAgent>,
    /// Cancellation signal
    pub signal: Option<AbortSignal>,
    /// Idempotency key sent with the request
    pub idempotency_key: Option<String>,
}

impl RequestOptions {
    /// Empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a header
    ///
    /// Fails with `InvalidArgument` when the name or value is not a valid
    /// HTTP header.
    pub fn with_header<K, V>(mut self, name: K, value: V) -> Result<Self>
    where
        HeaderName: TryFrom<K>,
        <HeaderName as TryFrom<K>>::Error: Into<http::Error>,
        HeaderValue: TryFrom<V>,
        <HeaderValue as TryFrom<V>>::Error: Into<http::Error>,
    {
        self.headers.set(name, value)?;
        Ok(self)
    }

    /// Set the body
    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = Some(body);
        self
    }

    /// Set the method
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Copy every setting, leaving the body behind
    ///
    /// Stream bodies can only be consumed once, so this is the copy used
    /// when a new body is about to replace the old one.
    pub fn clone_without_body(&self) -> RequestOptions {
        RequestOptions {
            method: self.method.clone(),
            path: self.path.clone(),
            query: self.query.clone(),
            headers: self.headers.clone(),
            body: None,
            max_retries: self.max_retries,
            stream: self.stream,
            timeout: self.timeout,
            http_agent: self.http_agent.clone(),
            signal: self.signal.clone(),
            idempotency_key: self.idempotency_key.clone(),
        }
    }
}

/// Wire-level request handed to `fetch`
#[derive(Debug)]
pub struct HttpRequest {
    /// HTTP method
    pub method: Method,
    /// Absolute URL
    pub url: String,
    /// Request headers
    pub headers: Headers,
    /// Request body
    pub body: RequestBody,
    /// Cancellation signal
    pub signal: Option<AbortSignal>,
    /// Agent to send through; the runtime default when absent
    pub agent: Option<SharedAgent>,
    /// Whole-request timeout
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    /// Create a request with no headers or body
    pub fn new<U: Into<String>>(method: Method, url: U) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Headers::new(),
            body: RequestBody::Empty,
            signal: None,
            agent: None,
            timeout: None,
        }
    }

    /// GET request
    pub fn get<U: Into<String>>(url: U) -> Self {
        Self::new(Method::GET, url)
    }

    /// POST request
    pub fn post<U: Into<String>>(url: U) -> Self {
        Self::new(Method::POST, url)
    }

    /// Build a request for `url` from transport options
    ///
    /// Multipart bodies contribute their framing headers unless the options
    /// already carry them; the idempotency key becomes a header.
    pub fn from_options<U: Into<String>>(url: U, options: RequestOptions) -> Result<Self> {
        let mut request = Self::new(options.method.unwrap_or(Method::GET), url);
        request.headers = options.headers;
        if let Some(key) = options.idempotency_key {
            request.headers.set(IDEMPOTENCY_KEY, key)?;
        }
        if let Some(RequestBody::Multipart(body)) = &options.body {
            if !request.headers.contains(CONTENT_TYPE) {
                request.headers.set(CONTENT_TYPE, body.content_type())?;
            }
            if !request.headers.contains(CONTENT_LENGTH) {
                request.headers.set(CONTENT_LENGTH, body.content_length())?;
            }
        }
        request.body = options.body.unwrap_or_default();
        request.signal = options.signal;
        request.agent = options.http_agent;
        request.timeout = options.timeout;
        Ok(request)
    }

    /// Add or replace a header
    pub fn with_header<K, V>(mut self, name: K, value: V) -> Result<Self>
    where
        HeaderName: TryFrom<K>,
        <HeaderName as TryFrom<K>>::Error: Into<http::Error>,
        HeaderValue: TryFrom<V>,
        <HeaderValue as TryFrom<V>>::Error: Into<http::Error>,
    {
        self.headers.set(name, value)?;
        Ok(self)
    }

    /// Set the body
    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    /// Attach a cancellation signal
    pub fn with_signal(mut self, signal: AbortSignal) -> Self {
        self.signal = Some(signal);
        self
    }

    /// Send through a specific agent
    pub fn with_agent(mut self, agent: SharedAgent) -> Self {
        self.agent = Some(agent);
        self
    }

    /// Set the whole-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Wire-level response produced by `fetch`
#[derive(Debug)]
pub struct HttpResponse {
    status: u16,
    headers: Headers,
    url: String,
    body: ReadableStream,
}

impl HttpResponse {
    /// Create a response
    pub fn new(status: u16, headers: Headers, body: ReadableStream) -> Self {
        Self {
            status,
            headers,
            url: String::new(),
            body,
        }
    }

    /// Record the final URL after redirects
    pub fn with_url<U: Into<String>>(mut self, url: U) -> Self {
        self.url = url.into();
        self
    }

    /// Status code
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Whether the status is in the 2xx range
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Response headers
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Final URL, empty for synthetic responses
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Read the whole body
    pub async fn bytes(self) -> Result<Bytes> {
        self.body.collect().await
    }

    /// Read the whole body as UTF-8, invalid sequences replaced
    pub async fn text(self) -> Result<String> {
        let bytes = self.bytes().await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Read the whole body as JSON
    pub async fn json<T: DeserializeOwned>(self) -> Result<T> {
        let bytes = self.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Take the body stream
    pub fn into_stream(self) -> ReadableStream {
        self.body
    }
}
