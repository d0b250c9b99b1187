//! Domain layer constants
//!
//! Values that are part of the shim contract itself. Tunables that belong
//! to a particular runtime live in `shim_providers::constants`.

use http::HeaderName;

// ============================================================================
// AGENT CONSTANTS
// ============================================================================

/// URL prefix that selects the encrypted-connection agent
pub const HTTPS_SCHEME_PREFIX: &str = "https";

/// Keep-alive timeout for pooled agents in milliseconds (5 minutes)
pub const DEFAULT_KEEP_ALIVE_TIMEOUT_MS: u64 = 5 * 60 * 1000;

// ============================================================================
// MULTIPART CONSTANTS
// ============================================================================

/// Prefix of every generated multipart boundary
pub const MULTIPART_BOUNDARY_PREFIX: &str = "form-data-boundary-";

/// Number of random characters appended to the boundary prefix
pub const MULTIPART_BOUNDARY_RANDOM_LEN: usize = 16;

/// Content type used for file parts without an explicit type
pub const DEFAULT_FILE_CONTENT_TYPE: &str = "application/octet-stream";

// ============================================================================
// HEADER NAMES
// ============================================================================

/// Idempotency key header name
///
/// Standard names come from `http::header`.
pub const IDEMPOTENCY_KEY: HeaderName = HeaderName::from_static("idempotency-key");
