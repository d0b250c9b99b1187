//! Agent configuration
//!
//! Controls connection pooling and timeouts of the pooled agents. Durations
//! are stored in milliseconds so the struct maps cleanly onto TOML and
//! environment variables.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    AGENT_CONNECT_TIMEOUT_MS, AGENT_KEEP_ALIVE_TIMEOUT_MS, AGENT_MAX_IDLE_PER_HOST,
    AGENT_TCP_KEEPALIVE_MS,
};

/// Pooled agent configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// How long idle pooled connections stay open
    pub keep_alive_timeout_ms: u64,
    /// Maximum idle connections per host
    pub max_idle_per_host: usize,
    /// TCP keep-alive interval
    pub tcp_keepalive_ms: u64,
    /// Connection establishment timeout
    pub connect_timeout_ms: u64,
    /// User agent string
    pub user_agent: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            keep_alive_timeout_ms: AGENT_KEEP_ALIVE_TIMEOUT_MS,
            max_idle_per_host: AGENT_MAX_IDLE_PER_HOST,
            tcp_keepalive_ms: AGENT_TCP_KEEPALIVE_MS,
            connect_timeout_ms: AGENT_CONNECT_TIMEOUT_MS,
            user_agent: format!("shim/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl AgentConfig {
    /// Configuration with a custom keep-alive timeout only
    pub fn with_keep_alive_timeout(timeout: Duration) -> Self {
        Self {
            keep_alive_timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            ..Default::default()
        }
    }

    /// Idle pooled connection lifetime
    pub fn keep_alive_timeout(&self) -> Duration {
        Duration::from_millis(self.keep_alive_timeout_ms)
    }

    /// TCP keep-alive interval
    pub fn tcp_keepalive(&self) -> Duration {
        Duration::from_millis(self.tcp_keepalive_ms)
    }

    /// Connect timeout
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}
