//! Pooled agent backed by reqwest
//!
//! One `PooledAgent` owns one `reqwest::Client`, and with it one connection
//! pool. Runtimes create one per scheme and share it for their lifetime.

use std::io;
use std::time::Duration;

use async_trait::async_trait;
use futures::{Stream, StreamExt};
use reqwest::{Body, Client};
use shim_domain::error::{Error, Result};
use shim_domain::header::CONTENT_TYPE;
use shim_domain::{
    AbortSignal, AgentScheme, ConnectionAgent, Headers, HeaderValue, HttpRequest, HttpResponse,
    ReadableStream, RequestBody,
};
use tracing::debug;

use super::config::AgentConfig;
use crate::constants::POOLED_AGENT_PROVIDER;

/// Keep-alive connection pool for one scheme
#[derive(Debug, Clone)]
pub struct PooledAgent {
    scheme: AgentScheme,
    client: Client,
    config: AgentConfig,
}

impl PooledAgent {
    /// Create an agent with default configuration
    pub fn new(scheme: AgentScheme) -> Result<Self> {
        Self::with_config(scheme, AgentConfig::default())
    }

    /// Create an agent with custom configuration
    pub fn with_config(scheme: AgentScheme, config: AgentConfig) -> Result<Self> {
        let client = Client::builder()
            .pool_max_idle_per_host(config.max_idle_per_host)
            .pool_idle_timeout(config.keep_alive_timeout())
            .tcp_keepalive(config.tcp_keepalive())
            .connect_timeout(config.connect_timeout())
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| Error::network_with_source(format!("Failed to build {scheme} agent"), e))?;

        debug!(
            scheme = %scheme,
            keep_alive_ms = config.keep_alive_timeout_ms,
            "Pooled agent created"
        );
        Ok(Self {
            scheme,
            client,
            config,
        })
    }

    /// Underlying reqwest client
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Agent configuration
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    fn build_request(&self, request: HttpRequest) -> Result<reqwest::RequestBuilder> {
        let HttpRequest {
            method,
            url,
            headers,
            body,
            timeout,
            ..
        } = request;

        let mut headers = headers.into_map();
        if matches!(body, RequestBody::Json(_)) && !headers.contains_key(CONTENT_TYPE) {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        let mut builder = self.client.request(method, &url).headers(headers);

        builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Bytes(bytes) => builder.body(bytes),
            RequestBody::Json(value) => builder.body(serde_json::to_vec(&value)?),
            RequestBody::Multipart(multipart) => {
                builder.body(Body::wrap_stream(multipart.into_stream()))
            }
            RequestBody::Stream(stream) => builder.body(Body::wrap_stream(stream)),
        };

        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(builder)
    }
}

#[async_trait]
impl ConnectionAgent for PooledAgent {
    fn scheme(&self) -> AgentScheme {
        self.scheme
    }

    fn keep_alive_timeout(&self) -> Duration {
        self.config.keep_alive_timeout()
    }

    async fn dispatch(&self, request: HttpRequest) -> Result<HttpResponse> {
        let url = request.url.clone();
        let signal = request.signal.clone();
        let pending = self.build_request(request)?.send();

        let response = match &signal {
            Some(signal) => {
                tokio::select! {
                    biased;
                    () = signal.aborted() => return Err(Error::Aborted),
                    response = pending => response,
                }
            }
            None => pending.await,
        }
        .map_err(|e| Error::network_with_source(format!("Request to {url} failed"), e))?;

        Ok(into_http_response(response, signal))
    }

    fn provider_name(&self) -> &str {
        POOLED_AGENT_PROVIDER
    }
}

fn into_http_response(response: reqwest::Response, signal: Option<AbortSignal>) -> HttpResponse {
    let status = response.status().as_u16();
    let url = response.url().to_string();

    let headers = Headers::from(response.headers().clone());

    let chunks = response.bytes_stream().map(|chunk| chunk.map_err(io::Error::other));
    let body = match signal {
        Some(signal) => ReadableStream::from_stream(abortable(chunks, signal)),
        None => ReadableStream::from_stream(chunks),
    };

    HttpResponse::new(status, headers, body).with_url(url)
}

/// Stop `chunks` with an `Aborted` error as soon as `signal` fires
fn abortable<S>(chunks: S, signal: AbortSignal) -> impl Stream<Item = io::Result<bytes::Bytes>>
where
    S: Stream<Item = io::Result<bytes::Bytes>> + Send + 'static,
{
    async_stream::stream! {
        futures::pin_mut!(chunks);
        loop {
            let next = tokio::select! {
                biased;
                () = signal.aborted() => None,
                next = chunks.next() => Some(next),
            };
            match next {
                None => {
                    yield Err(io::Error::other(Error::Aborted));
                    break;
                }
                Some(Some(chunk)) => yield chunk,
                Some(None) => break,
            }
        }
    }
}
