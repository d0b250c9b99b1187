//! Connection Agent Port
//!
//! A connection agent owns a pool of keep-alive connections and dispatches
//! requests over it. Runtimes keep one agent per URL scheme for the whole
//! lifetime of their context.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::constants::HTTPS_SCHEME_PREFIX;
use crate::error::Result;
use crate::value_objects::{HttpRequest, HttpResponse};

/// Transport scheme an agent serves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentScheme {
    /// Unencrypted connections
    Http,
    /// Encrypted connections
    Https,
}

impl AgentScheme {
    /// Scheme whose agent should carry `url`
    ///
    /// Matches the literal `https` prefix; anything else is plain http.
    pub fn for_url(url: &str) -> Self {
        if url.starts_with(HTTPS_SCHEME_PREFIX) {
            Self::Https
        } else {
            Self::Http
        }
    }
}

impl fmt::Display for AgentScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http => write!(f, "http"),
            Self::Https => write!(f, "https"),
        }
    }
}

/// Pooled-connection manager
#[async_trait]
pub trait ConnectionAgent: Send + Sync + fmt::Debug {
    /// Scheme this agent was created for
    fn scheme(&self) -> AgentScheme;

    /// How long idle pooled connections are kept open
    fn keep_alive_timeout(&self) -> Duration;

    /// Send `request` over the pool
    async fn dispatch(&self, request: HttpRequest) -> Result<HttpResponse>;

    /// Name of the implementation
    fn provider_name(&self) -> &str;
}

/// Shared agent handle
pub type SharedAgent = Arc<dyn ConnectionAgent>;
