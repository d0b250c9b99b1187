//! Connection agents
//!
//! Implements the `ConnectionAgent` port. [`PooledAgent`] wraps a reqwest
//! client per scheme; [`NullAgent`] records requests for tests.
//! [`DefaultAgents`] is the encrypted/unencrypted pair a runtime selects from.

pub mod config;
pub mod null;
pub mod pooled;

use std::sync::Arc;

use shim_domain::error::Result;
use shim_domain::{AgentScheme, SharedAgent};

pub use config::AgentConfig;
pub use null::{NullAgent, RecordedRequest};
pub use pooled::PooledAgent;

/// The per-scheme agent pair shared by every bundle of a runtime context
#[derive(Debug, Clone)]
pub struct DefaultAgents {
    http: SharedAgent,
    https: SharedAgent,
}

impl DefaultAgents {
    /// Pair two existing agents
    pub fn new(http: SharedAgent, https: SharedAgent) -> Self {
        Self { http, https }
    }

    /// Build both pooled agents from one configuration
    pub fn from_config(config: &AgentConfig) -> Result<Self> {
        let http = PooledAgent::with_config(AgentScheme::Http, config.clone())?;
        let https = PooledAgent::with_config(AgentScheme::Https, config.clone())?;
        Ok(Self::new(Arc::new(http), Arc::new(https)))
    }

    /// Agent for `url`
    pub fn select(&self, url: &str) -> SharedAgent {
        match AgentScheme::for_url(url) {
            AgentScheme::Https => Arc::clone(&self.https),
            AgentScheme::Http => Arc::clone(&self.http),
        }
    }

    /// Unencrypted-connection agent
    pub fn http(&self) -> &SharedAgent {
        &self.http
    }

    /// Encrypted-connection agent
    pub fn https(&self) -> &SharedAgent {
        &self.https
    }
}
