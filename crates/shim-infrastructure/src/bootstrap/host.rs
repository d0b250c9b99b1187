//! Host environment slots
//!
//! The pieces of process state a runtime may find already provided by the
//! embedding application. Each slot is written at most once.

use std::fmt;
use std::sync::{Arc, LazyLock, OnceLock};

use shim_domain::AbortControllerFactory;

static SHARED_HOST: LazyLock<Arc<HostEnvironment>> =
    LazyLock::new(|| Arc::new(HostEnvironment::new()));

/// Capabilities installed into the hosting process
#[derive(Default)]
pub struct HostEnvironment {
    abort_factory: OnceLock<Arc<dyn AbortControllerFactory>>,
}

impl HostEnvironment {
    /// Empty environment
    pub fn new() -> Self {
        Self::default()
    }

    /// Environment that already provides an abort-controller factory
    pub fn with_abort_factory(factory: Arc<dyn AbortControllerFactory>) -> Self {
        let host = Self::new();
        host.install_abort_factory(factory);
        host
    }

    /// The process-wide environment used by default contexts
    pub fn shared() -> Arc<Self> {
        Arc::clone(&SHARED_HOST)
    }

    /// Installed abort-controller factory, if any
    pub fn abort_factory(&self) -> Option<Arc<dyn AbortControllerFactory>> {
        self.abort_factory.get().cloned()
    }

    /// Whether an abort-controller factory is installed
    pub fn has_abort_factory(&self) -> bool {
        self.abort_factory.get().is_some()
    }

    /// Install `factory` unless one is already present
    ///
    /// Returns whether this call installed it.
    pub fn install_abort_factory(&self, factory: Arc<dyn AbortControllerFactory>) -> bool {
        self.abort_factory.set(factory).is_ok()
    }
}

impl fmt::Debug for HostEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostEnvironment")
            .field(
                "abort_factory",
                &self.abort_factory.get().map(|factory| factory.name().to_string()),
            )
            .finish()
    }
}
