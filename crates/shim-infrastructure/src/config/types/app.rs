//! Main shim configuration

use serde::{Deserialize, Serialize};
use shim_providers::AgentConfig;

use super::{LoggingConfig, RuntimeConfig};

/// Root configuration, one field per TOML section
///
/// ```toml
/// [agents]
/// keep_alive_timeout_ms = 300000
///
/// [runtime]
/// polyfill_abort_controller = true
///
/// [logging]
/// level = "info"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShimConfig {
    /// Pooled connection agents
    pub agents: AgentConfig,

    /// Runtime capability switches
    pub runtime: RuntimeConfig,

    /// Logging setup
    pub logging: LoggingConfig,
}
