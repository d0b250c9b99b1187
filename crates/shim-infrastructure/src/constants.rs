//! Infrastructure layer constants
//!
//! Domain constants live in `shim_domain::constants`, agent defaults in
//! `shim_providers::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "shim.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "shim";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "SHIM";

/// Separator between the prefix and nested keys of environment variables
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the configured log filter
pub const LOG_ENV_FILTER: &str = "SHIM_LOG";

/// File name prefix used when the log file path has no stem
pub const DEFAULT_LOG_FILE_PREFIX: &str = "shim";
