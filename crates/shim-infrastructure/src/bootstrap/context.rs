//! Runtime context
//!
//! Composition root of the native runtime. A context builds the agent pair
//! and resolves the file loader once, then hands out capability bundles
//! that all share them.
//!
//! ```text
//! ShimConfig → RuntimeContext ─┬─ DefaultAgents (built once)
//!                              ├─ FileLoader (feature + config)
//!                              ├─ DeprecationNotice
//!                              └─ HostEnvironment (abort factory slot)
//!                                        │
//!                        get_runtime() → Arc<NativeShims>
//! ```

use std::sync::Arc;

use shim_domain::error::Result;
use shim_domain::{AbortControllerFactory, FileLoader, SharedShims};
use shim_providers::files::default_file_loader;
use shim_providers::runtime::NativeAbortControllerFactory;
use shim_providers::{DefaultAgents, DeprecationNotice, NativeShims};
use tracing::{debug, info};

use super::host::HostEnvironment;
use crate::config::ShimConfig;

/// Shared state behind every bundle of one runtime
pub struct RuntimeContext {
    config: Arc<ShimConfig>,
    agents: DefaultAgents,
    file_loader: Option<Arc<dyn FileLoader>>,
    file_from_path_notice: Arc<DeprecationNotice>,
    host: Arc<HostEnvironment>,
    private_abort_factory: Arc<dyn AbortControllerFactory>,
}

impl RuntimeContext {
    /// Context on the process-wide host environment
    pub fn new(config: ShimConfig) -> Result<Self> {
        Self::with_host(config, HostEnvironment::shared())
    }

    /// Context on a specific host environment
    pub fn with_host(config: ShimConfig, host: Arc<HostEnvironment>) -> Result<Self> {
        let agents = DefaultAgents::from_config(&config.agents)?;
        info!(
            keep_alive_ms = config.agents.keep_alive_timeout_ms,
            "Created pooled connection agents"
        );
        Ok(Self::from_parts(config, agents, host))
    }

    /// Context over an existing agent pair
    pub fn from_parts(config: ShimConfig, agents: DefaultAgents, host: Arc<HostEnvironment>) -> Self {
        let file_loader = if config.runtime.file_from_path {
            default_file_loader()
        } else {
            None
        };
        debug!(
            file_from_path = file_loader.is_some(),
            polyfill_abort_controller = config.runtime.polyfill_abort_controller,
            "Resolved runtime capabilities"
        );

        Self {
            config: Arc::new(config),
            agents,
            file_loader,
            file_from_path_notice: Arc::new(DeprecationNotice::new()),
            host,
            private_abort_factory: Arc::new(NativeAbortControllerFactory),
        }
    }

    /// Replace the resolved file loader
    pub fn with_file_loader(mut self, loader: Option<Arc<dyn FileLoader>>) -> Self {
        self.file_loader = loader;
        self
    }

    /// Configuration this context was built from
    pub fn config(&self) -> &ShimConfig {
        &self.config
    }

    /// Agent pair shared by every bundle
    pub fn agents(&self) -> &DefaultAgents {
        &self.agents
    }

    /// Host environment this context installs into
    pub fn host(&self) -> &Arc<HostEnvironment> {
        &self.host
    }

    /// Once-only flag of the `file_from_path` deprecation warning
    pub fn file_from_path_notice(&self) -> &Arc<DeprecationNotice> {
        &self.file_from_path_notice
    }

    /// Build a capability bundle
    ///
    /// Installs the native abort-controller factory into the host
    /// environment when the host has none and polyfilling is enabled. An
    /// installed factory is never replaced.
    pub fn get_runtime(&self) -> SharedShims {
        let shims = NativeShims::new(self.agents.clone())
            .with_abort_factory(self.resolve_abort_factory())
            .with_file_loader(self.file_loader.clone())
            .with_deprecation_notice(Arc::clone(&self.file_from_path_notice));
        Arc::new(shims)
    }

    fn resolve_abort_factory(&self) -> Arc<dyn AbortControllerFactory> {
        if let Some(factory) = self.host.abort_factory() {
            return factory;
        }
        if !self.config.runtime.polyfill_abort_controller {
            return Arc::clone(&self.private_abort_factory);
        }

        if self
            .host
            .install_abort_factory(Arc::clone(&self.private_abort_factory))
        {
            info!(
                factory = self.private_abort_factory.name(),
                "Installed abort controller factory into host environment"
            );
        }
        // A concurrent installer may have won; use whatever the host holds
        self.host
            .abort_factory()
            .unwrap_or_else(|| Arc::clone(&self.private_abort_factory))
    }
}
