//! Runtime Shims Port
//!
//! The capability bundle a runtime hands to the transport core. The core
//! only ever talks to `dyn RuntimeShims`, which keeps it independent of the
//! HTTP stack underneath.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use super::agent::SharedAgent;
use crate::error::Result;
use crate::value_objects::{
    AbortController, File, FileFromPathOptions, FormData, HttpRequest, HttpResponse,
    RequestOptions, Uploadable,
};

/// Which runtime produced a bundle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuntimeKind {
    /// tokio + reqwest
    Native,
    /// Runtime supplied by the embedding application
    Custom(&'static str),
}

impl fmt::Display for RuntimeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native => write!(f, "native"),
            Self::Custom(name) => write!(f, "{name}"),
        }
    }
}

/// Capability bundle consumed by the transport core
#[async_trait]
pub trait RuntimeShims: Send + Sync {
    /// Runtime that produced this bundle
    fn kind(&self) -> RuntimeKind;

    /// Issue an HTTP request
    ///
    /// Uses the request's agent when set, otherwise the default agent for
    /// its URL. An attached abort signal cancels the call.
    async fn fetch(&self, request: HttpRequest) -> Result<HttpResponse>;

    /// New abort controller from the host environment's factory
    fn abort_controller(&self) -> AbortController;

    /// Return new options carrying `form` as an encoded multipart body
    ///
    /// Neither `form` nor `options` is modified.
    async fn get_multipart_request_options(
        &self,
        form: &FormData,
        options: &RequestOptions,
    ) -> Result<RequestOptions>;

    /// Agent for `url`: the https agent for `https` URLs, else the http one
    fn get_default_agent(&self, url: &str) -> SharedAgent;

    /// Load a file from disk as an upload payload
    #[deprecated(note = "open an `FsReadStream` and upload it instead")]
    async fn file_from_path(&self, path: &Path, options: FileFromPathOptions) -> Result<File>;

    /// Whether `value` is a file-system read stream
    fn is_fs_read_stream(&self, value: &Uploadable) -> bool;

    /// Whether `value` is any readable stream
    fn is_readable(&self, value: &Uploadable) -> bool;
}

/// Shared bundle handle
pub type SharedShims = Arc<dyn RuntimeShims>;

/// Loads files from disk as upload payloads
#[async_trait]
pub trait FileLoader: Send + Sync {
    /// Create a file for `path`
    async fn load(&self, path: &Path, options: &FileFromPathOptions) -> Result<File>;
}

/// Creates abort controllers for the host environment
pub trait AbortControllerFactory: Send + Sync {
    /// New controller
    fn create(&self) -> AbortController;

    /// Name of the implementation
    fn name(&self) -> &str;
}
