//! Ports implemented by runtimes and consumed by the transport core

pub mod agent;
pub mod runtime;

pub use agent::{AgentScheme, ConnectionAgent, SharedAgent};
pub use runtime::{
    AbortControllerFactory, FileLoader, RuntimeKind, RuntimeShims, SharedShims,
};
