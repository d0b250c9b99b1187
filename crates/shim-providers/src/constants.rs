//! Provider-specific constants

use shim_domain::constants::DEFAULT_KEEP_ALIVE_TIMEOUT_MS;

// ============================================================================
// AGENT CONSTANTS
// ============================================================================

/// Keep-alive timeout for pooled agents in milliseconds
pub const AGENT_KEEP_ALIVE_TIMEOUT_MS: u64 = DEFAULT_KEEP_ALIVE_TIMEOUT_MS;

/// Maximum idle connections kept per host
pub const AGENT_MAX_IDLE_PER_HOST: usize = 10;

/// TCP keep-alive interval in milliseconds
pub const AGENT_TCP_KEEPALIVE_MS: u64 = 60_000;

/// Connection establishment timeout in milliseconds
pub const AGENT_CONNECT_TIMEOUT_MS: u64 = 10_000;

/// Provider name reported by pooled agents
pub const POOLED_AGENT_PROVIDER: &str = "reqwest";

/// Provider name reported by null agents
pub const NULL_AGENT_PROVIDER: &str = "null";

// ============================================================================
// MULTIPART CONSTANTS
// ============================================================================

/// Characters a generated boundary suffix is drawn from
pub const BOUNDARY_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Line terminator used throughout multipart framing
pub const CRLF: &str = "\r\n";

// ============================================================================
// ABORT CONTROLLER CONSTANTS
// ============================================================================

/// Name of the tokio-util backed abort-controller factory
pub const NATIVE_ABORT_FACTORY: &str = "tokio-util";

/// Name of the factory that links controllers to a parent token
pub const LINKED_ABORT_FACTORY: &str = "linked";
