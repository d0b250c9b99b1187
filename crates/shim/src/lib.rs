//! # Runtime Shims
//!
//! Networking primitives for an environment-agnostic HTTP client SDK,
//! resolved for the native tokio + reqwest runtime and exposed through one
//! capability bundle.
//!
//! ## Example
//!
//! ```ignore
//! use shim::{FormData, HttpRequest, Method, RequestOptions};
//!
//! let runtime = shim::get_runtime()?;
//!
//! let mut form = FormData::new();
//! form.append("purpose", "fine-tune");
//! let options = runtime
//!     .get_multipart_request_options(&form, &RequestOptions::new().with_method(Method::POST))
//!     .await?;
//!
//! let response = runtime
//!     .fetch(HttpRequest::from_options("https://api.example.com/v1/files", options)?)
//!     .await?;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - ports, value objects and the error type
//! - `providers` - pooled agents, multipart encoder, native bundle
//! - `infrastructure` - configuration, logging, runtime context, registry

use std::sync::OnceLock;

use tracing::debug;

/// Domain layer - ports, value objects and errors
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use shim_domain::*;
}

/// Provider layer - native runtime implementations
///
/// Re-exports from the providers crate for convenience
pub mod providers {
    pub use shim_providers::*;
}

/// Infrastructure layer - config, logging and bootstrap
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use shim_infrastructure::*;
}

// Re-export commonly used domain types at the crate root
pub use domain::*;

pub use infrastructure::{ConfigLoader, HostEnvironment, RuntimeContext, ShimConfig, ShimRegistry};

static DEFAULT_CONTEXT: OnceLock<RuntimeContext> = OnceLock::new();

/// Set up the process-wide context from `config` and apply its logging
///
/// Must run before the first [`get_runtime`]; afterwards the context is
/// fixed and this returns a configuration error. To honour `shim.toml` and
/// `SHIM__*` variables, pass `ConfigLoader::new().load()?`. A global tracing
/// subscriber installed by the host is left alone.
pub fn init(config: ShimConfig) -> Result<()> {
    if DEFAULT_CONTEXT.get().is_some() {
        return Err(Error::config("Runtime context already initialized"));
    }
    infrastructure::logging::init_logging(&config.logging)?;
    let context = RuntimeContext::new(config)?;
    DEFAULT_CONTEXT
        .set(context)
        .map_err(|_| Error::config("Runtime context already initialized"))
}

/// The process-wide context
///
/// Without a prior [`init`] this is built from `ShimConfig::default()`;
/// configuration files and environment variables are only read when the
/// caller loads them and passes the result to [`init`].
pub fn default_context() -> Result<&'static RuntimeContext> {
    if let Some(context) = DEFAULT_CONTEXT.get() {
        return Ok(context);
    }

    let context = RuntimeContext::new(ShimConfig::default())?;
    if DEFAULT_CONTEXT.set(context).is_err() {
        debug!("Runtime context initialized concurrently; discarding duplicate");
    }
    DEFAULT_CONTEXT
        .get()
        .ok_or_else(|| Error::internal("Runtime context missing after initialization"))
}

/// Capability bundle of the process-wide context
///
/// Every bundle shares the same pair of pooled agents.
pub fn get_runtime() -> Result<SharedShims> {
    Ok(default_context()?.get_runtime())
}

/// Install `shims` as the bundle the transport core uses
pub fn install_shims(shims: SharedShims) -> Result<()> {
    ShimRegistry::global().install(shims, false)
}

/// Installed bundle, installing the default one automatically if needed
pub fn shims() -> Result<SharedShims> {
    let registry = ShimRegistry::global();
    if let Some(shims) = registry.current() {
        return Ok(shims);
    }
    registry.install(get_runtime()?, true)?;
    registry
        .current()
        .ok_or_else(|| Error::internal("Shim registry empty after installation"))
}
