//! # Runtime Shims - Native Providers
//!
//! Implementations of the `shim-domain` ports for the tokio + reqwest
//! runtime.
//!
//! ## Provider Categories
//!
//! | Category | Port | Implementations |
//! |----------|------|-----------------|
//! | Agents | `ConnectionAgent` | PooledAgent, Null |
//! | Files | `FileLoader` | DiskFileLoader (feature `file-from-path`) |
//! | Abort | `AbortControllerFactory` | Native, Linked |
//! | Bundle | `RuntimeShims` | NativeShims |
//!
//! ## Usage
//!
//! ```ignore
//! use shim_providers::agent::{AgentConfig, DefaultAgents};
//! use shim_providers::runtime::NativeShims;
//!
//! let agents = DefaultAgents::from_config(&AgentConfig::default())?;
//! let shims = NativeShims::new(agents);
//! ```

// Re-export shim-domain types commonly used with providers
pub use shim_domain::error::{Error, Result};
pub use shim_domain::{ConnectionAgent, FileLoader, RuntimeShims};

/// Provider-specific constants
pub mod constants;

/// Pooled connection agents
pub mod agent;

/// File loaders behind `file_from_path`
pub mod files;

/// multipart/form-data encoding
pub mod multipart;

/// Native capability bundle
pub mod runtime;

pub use agent::{AgentConfig, DefaultAgents, NullAgent, PooledAgent};
pub use multipart::FormDataEncoder;
pub use runtime::{DeprecationNotice, NativeShims};
