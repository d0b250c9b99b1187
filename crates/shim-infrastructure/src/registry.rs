//! Shim registry
//!
//! The installation point for the bundle the transport core uses. An
//! application may install a bundle explicitly; otherwise the first caller
//! installs the default one automatically.

use std::sync::{LazyLock, RwLock};

use shim_domain::error::{Error, Result};
use shim_domain::{RuntimeKind, SharedShims};
use tracing::{debug, info};

use crate::error_ext::infra::infrastructure_error_msg;

static GLOBAL_REGISTRY: LazyLock<ShimRegistry> = LazyLock::new(ShimRegistry::new);

struct Installed {
    shims: SharedShims,
    auto: bool,
}

/// Holds the installed capability bundle
#[derive(Default)]
pub struct ShimRegistry {
    slot: RwLock<Option<Installed>>,
}

impl ShimRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry
    pub fn global() -> &'static ShimRegistry {
        &GLOBAL_REGISTRY
    }

    /// Install `shims`
    ///
    /// Reinstalling the kind already present is a no-op. Replacing a
    /// different kind is only allowed over an automatic installation.
    pub fn install(&self, shims: SharedShims, auto: bool) -> Result<()> {
        let mut slot = self
            .slot
            .write()
            .map_err(|_| infrastructure_error_msg("Shim registry lock poisoned"))?;

        if let Some(existing) = slot.as_ref() {
            let current = existing.shims.kind();
            if current == shims.kind() {
                debug!(kind = %current, "Shims already installed");
                return Ok(());
            }
            if !existing.auto {
                return Err(Error::config(format!(
                    "Cannot install '{}' shims after '{current}' shims were installed",
                    shims.kind()
                )));
            }
        }

        info!(kind = %shims.kind(), auto, "Installed runtime shims");
        *slot = Some(Installed { shims, auto });
        Ok(())
    }

    /// Installed bundle, if any
    pub fn current(&self) -> Option<SharedShims> {
        self.slot
            .read()
            .ok()
            .and_then(|slot| slot.as_ref().map(|installed| installed.shims.clone()))
    }

    /// Kind of the installed bundle
    pub fn kind(&self) -> Option<RuntimeKind> {
        self.current().map(|shims| shims.kind())
    }

    /// Whether the installed bundle was installed automatically
    pub fn is_auto(&self) -> bool {
        self.slot
            .read()
            .ok()
            .and_then(|slot| slot.as_ref().map(|installed| installed.auto))
            .unwrap_or(false)
    }
}
