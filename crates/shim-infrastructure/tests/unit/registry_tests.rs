//! Shim Registry Tests

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use shim_domain::error::{Error, Result};
use shim_domain::{
    AbortController, AgentScheme, File, FileFromPathOptions, FormData, HttpRequest, HttpResponse,
    RequestOptions, RuntimeKind, RuntimeShims, SharedAgent, SharedShims, Uploadable,
};
use shim_infrastructure::ShimRegistry;
use shim_providers::{DefaultAgents, NativeShims, NullAgent};

/// Native bundle reporting a custom runtime kind
struct EdgeShims(NativeShims);

#[async_trait]
impl RuntimeShims for EdgeShims {
    fn kind(&self) -> RuntimeKind {
        RuntimeKind::Custom("edge")
    }

    async fn fetch(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.0.fetch(request).await
    }

    fn abort_controller(&self) -> AbortController {
        self.0.abort_controller()
    }

    async fn get_multipart_request_options(
        &self,
        form: &FormData,
        options: &RequestOptions,
    ) -> Result<RequestOptions> {
        self.0.get_multipart_request_options(form, options).await
    }

    fn get_default_agent(&self, url: &str) -> SharedAgent {
        self.0.get_default_agent(url)
    }

    async fn file_from_path(&self, _path: &Path, _options: FileFromPathOptions) -> Result<File> {
        Err(Error::unsupported("no file system"))
    }

    fn is_fs_read_stream(&self, value: &Uploadable) -> bool {
        self.0.is_fs_read_stream(value)
    }

    fn is_readable(&self, value: &Uploadable) -> bool {
        self.0.is_readable(value)
    }
}

fn native() -> NativeShims {
    NativeShims::new(DefaultAgents::new(
        Arc::new(NullAgent::new(AgentScheme::Http)),
        Arc::new(NullAgent::new(AgentScheme::Https)),
    ))
}

fn native_shims() -> SharedShims {
    Arc::new(native())
}

fn edge_shims() -> SharedShims {
    Arc::new(EdgeShims(native()))
}

#[test]
fn test_empty_registry() {
    let registry = ShimRegistry::new();
    assert!(registry.current().is_none());
    assert!(registry.kind().is_none());
    assert!(!registry.is_auto());
}

#[test]
fn test_same_kind_is_noop() {
    let registry = ShimRegistry::new();
    let first = native_shims();
    registry.install(Arc::clone(&first), false).unwrap();
    registry.install(native_shims(), false).unwrap();

    assert!(Arc::ptr_eq(&first, &registry.current().unwrap()));
}

#[test]
fn test_different_kind_after_explicit_install_fails() {
    let registry = ShimRegistry::new();
    registry.install(native_shims(), false).unwrap();

    let result = registry.install(edge_shims(), false);
    assert!(matches!(result, Err(Error::Configuration { .. })));
    assert_eq!(registry.kind(), Some(RuntimeKind::Native));
}

#[test]
fn test_explicit_install_replaces_auto() {
    let registry = ShimRegistry::new();
    registry.install(native_shims(), true).unwrap();
    assert!(registry.is_auto());

    registry.install(edge_shims(), false).unwrap();
    assert_eq!(registry.kind(), Some(RuntimeKind::Custom("edge")));
    assert!(!registry.is_auto());
}
