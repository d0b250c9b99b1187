//! Runtime bootstrap
//!
//! [`RuntimeContext`] is the composition root producing capability
//! bundles; [`HostEnvironment`] holds what the embedding process provides.

pub mod context;
pub mod host;

pub use context::RuntimeContext;
pub use host::HostEnvironment;
