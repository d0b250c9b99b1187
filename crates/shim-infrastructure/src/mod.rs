//! # Infrastructure Layer
//!
//! Cross-cutting concerns around the native runtime shims.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | figment configuration: defaults, `shim.toml`, `SHIM__` env |
//! | [`logging`] | Structured logging with tracing |
//! | [`error_ext`] | Context extensions for foreign errors |
//! | [`bootstrap`] | `RuntimeContext` composition root and host environment |
//! | [`registry`] | Installation point for the active bundle |
//! | [`constants`] | Infrastructure constants |

pub mod bootstrap;
pub mod config;
pub mod constants;
pub mod error_ext;
pub mod logging;
pub mod registry;

// Re-export commonly used types
pub use bootstrap::{HostEnvironment, RuntimeContext};
pub use config::{ConfigLoader, ShimConfig};
pub use error_ext::ErrorContext;
pub use registry::ShimRegistry;
