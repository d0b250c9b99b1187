//! # Runtime Shims - Domain Layer
//!
//! Environment-agnostic types and ports shared by the transport core and
//! every runtime implementation.
//!
//! ## Contents
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error`] | Domain error type and `Result` alias |
//! | [`constants`] | Contract-level constants (scheme prefix, boundaries, headers) |
//! | [`value_objects`] | Headers, Blob/File, FormData, streams, abort primitives, requests |
//! | [`ports`] | `RuntimeShims`, `ConnectionAgent`, `FileLoader`, `AbortControllerFactory` |

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
pub use ports::{
    AbortControllerFactory, AgentScheme, ConnectionAgent, FileLoader, RuntimeKind, RuntimeShims,
    SharedAgent, SharedShims,
};
pub use value_objects::*;

// HTTP types used across the public API
pub use http::{HeaderMap, HeaderName, HeaderValue, Method, header};
