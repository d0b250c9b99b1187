//! Native runtime bundle
//!
//! `NativeShims` is the capability bundle for the tokio + reqwest runtime.
//! It owns nothing long-lived itself: agents, the deprecation flag and the
//! abort-controller factory are handed in by the context that builds it, so
//! every bundle from one context shares them.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use shim_domain::error::{Error, Result};
use shim_domain::{
    AbortController, AbortControllerFactory, File, FileFromPathOptions, FileLoader, FormData,
    HttpRequest, HttpResponse, RequestOptions, RuntimeKind, RuntimeShims, SharedAgent,
    Uploadable,
};
use tracing::debug;

use super::abort::NativeAbortControllerFactory;
use super::deprecation::DeprecationNotice;
use crate::agent::DefaultAgents;
use crate::multipart::multipart_request_options;

/// Feature name attached to the `file_from_path` deprecation warning
const FILE_FROM_PATH_FEATURE: &str = "file_from_path";

/// Capability bundle of the native runtime
pub struct NativeShims {
    agents: DefaultAgents,
    abort_factory: Arc<dyn AbortControllerFactory>,
    file_loader: Option<Arc<dyn FileLoader>>,
    file_from_path_notice: Arc<DeprecationNotice>,
}

impl NativeShims {
    /// Bundle over `agents` with a native abort factory and no file loader
    pub fn new(agents: DefaultAgents) -> Self {
        Self {
            agents,
            abort_factory: Arc::new(NativeAbortControllerFactory),
            file_loader: None,
            file_from_path_notice: Arc::new(DeprecationNotice::new()),
        }
    }

    /// Use `factory` for [`RuntimeShims::abort_controller`]
    pub fn with_abort_factory(mut self, factory: Arc<dyn AbortControllerFactory>) -> Self {
        self.abort_factory = factory;
        self
    }

    /// Enable `file_from_path` through `loader`
    pub fn with_file_loader(mut self, loader: Option<Arc<dyn FileLoader>>) -> Self {
        self.file_loader = loader;
        self
    }

    /// Share the deprecation flag with other bundles
    pub fn with_deprecation_notice(mut self, notice: Arc<DeprecationNotice>) -> Self {
        self.file_from_path_notice = notice;
        self
    }

    /// Agent pair this bundle selects from
    pub fn agents(&self) -> &DefaultAgents {
        &self.agents
    }
}

#[async_trait]
impl RuntimeShims for NativeShims {
    fn kind(&self) -> RuntimeKind {
        RuntimeKind::Native
    }

    async fn fetch(&self, request: HttpRequest) -> Result<HttpResponse> {
        if request.signal.as_ref().is_some_and(|signal| signal.is_aborted()) {
            return Err(Error::Aborted);
        }
        let agent = match &request.agent {
            Some(agent) => Arc::clone(agent),
            None => self.get_default_agent(&request.url),
        };

        debug!(
            method = %request.method,
            url = %request.url,
            scheme = %agent.scheme(),
            agent = agent.provider_name(),
            "Dispatching request"
        );
        agent.dispatch(request).await
    }

    fn abort_controller(&self) -> AbortController {
        self.abort_factory.create()
    }

    async fn get_multipart_request_options(
        &self,
        form: &FormData,
        options: &RequestOptions,
    ) -> Result<RequestOptions> {
        multipart_request_options(form, options)
    }

    fn get_default_agent(&self, url: &str) -> SharedAgent {
        self.agents.select(url)
    }

    async fn file_from_path(&self, path: &Path, options: FileFromPathOptions) -> Result<File> {
        let loader = self.file_loader.as_ref().ok_or_else(|| {
            Error::unsupported("file_from_path is not available in this build")
        })?;

        self.file_from_path_notice
            .warn_once(FILE_FROM_PATH_FEATURE, || {
                format!(
                    "file_from_path is deprecated; use FsReadStream::open({:?}) instead",
                    path.display().to_string()
                )
            });

        loader.load(path, &options).await
    }

    fn is_fs_read_stream(&self, value: &Uploadable) -> bool {
        value.is_fs_read_stream()
    }

    fn is_readable(&self, value: &Uploadable) -> bool {
        value.is_readable()
    }
}
