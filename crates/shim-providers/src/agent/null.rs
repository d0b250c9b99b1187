//! Null agent for testing
//!
//! Never touches the network. Every dispatched request is drained and
//! recorded, and answered with a canned response.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use shim_domain::error::{Error, Result};
use shim_domain::{
    AgentScheme, ConnectionAgent, Headers, HttpRequest, HttpResponse, Method, ReadableStream,
    RequestBody,
};
use tokio::sync::Mutex;

use crate::constants::{AGENT_KEEP_ALIVE_TIMEOUT_MS, NULL_AGENT_PROVIDER};

/// A request as seen by [`NullAgent`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    /// HTTP method
    pub method: Method,
    /// Target URL
    pub url: String,
    /// Request headers
    pub headers: Headers,
    /// Fully drained body
    pub body: Bytes,
}

/// Agent that records requests instead of sending them
#[derive(Debug)]
pub struct NullAgent {
    scheme: AgentScheme,
    status: u16,
    response_body: Bytes,
    recorded: Mutex<Vec<RecordedRequest>>,
}

impl NullAgent {
    /// Create a null agent answering `200` with an empty body
    pub fn new(scheme: AgentScheme) -> Self {
        Self {
            scheme,
            status: 200,
            response_body: Bytes::new(),
            recorded: Mutex::new(Vec::new()),
        }
    }

    /// Answer with `status` and `body` instead
    pub fn with_response<B: Into<Bytes>>(mut self, status: u16, body: B) -> Self {
        self.status = status;
        self.response_body = body.into();
        self
    }

    /// Requests dispatched so far
    pub async fn recorded(&self) -> Vec<RecordedRequest> {
        self.recorded.lock().await.clone()
    }
}

#[async_trait]
impl ConnectionAgent for NullAgent {
    fn scheme(&self) -> AgentScheme {
        self.scheme
    }

    fn keep_alive_timeout(&self) -> Duration {
        Duration::from_millis(AGENT_KEEP_ALIVE_TIMEOUT_MS)
    }

    async fn dispatch(&self, request: HttpRequest) -> Result<HttpResponse> {
        if request.signal.as_ref().is_some_and(|signal| signal.is_aborted()) {
            return Err(Error::Aborted);
        }

        let body = match request.body {
            RequestBody::Empty => Bytes::new(),
            RequestBody::Bytes(bytes) => bytes,
            RequestBody::Json(value) => Bytes::from(serde_json::to_vec(&value)?),
            RequestBody::Multipart(multipart) => multipart.into_stream().collect().await?,
            RequestBody::Stream(stream) => stream.collect().await?,
        };

        self.recorded.lock().await.push(RecordedRequest {
            method: request.method,
            url: request.url.clone(),
            headers: request.headers,
            body,
        });

        Ok(HttpResponse::new(
            self.status,
            Headers::new(),
            ReadableStream::from_bytes(self.response_body.clone()),
        )
        .with_url(request.url))
    }

    fn provider_name(&self) -> &str {
        NULL_AGENT_PROVIDER
    }
}
