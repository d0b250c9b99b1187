//! Abort-controller factories

use shim_domain::{AbortController, AbortControllerFactory};
use tokio_util::sync::CancellationToken;

use crate::constants::{LINKED_ABORT_FACTORY, NATIVE_ABORT_FACTORY};

/// Independent controllers on fresh cancellation tokens
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeAbortControllerFactory;

impl AbortControllerFactory for NativeAbortControllerFactory {
    fn create(&self) -> AbortController {
        AbortController::new()
    }

    fn name(&self) -> &str {
        NATIVE_ABORT_FACTORY
    }
}

/// Controllers that also abort when a parent token is cancelled
///
/// Lets an embedding application cancel every in-flight request on
/// shutdown by cancelling one token.
#[derive(Debug, Clone)]
pub struct LinkedAbortControllerFactory {
    parent: CancellationToken,
}

impl LinkedAbortControllerFactory {
    /// Link every created controller to `parent`
    pub fn new(parent: CancellationToken) -> Self {
        Self { parent }
    }
}

impl AbortControllerFactory for LinkedAbortControllerFactory {
    fn create(&self) -> AbortController {
        AbortController::from_token(self.parent.child_token())
    }

    fn name(&self) -> &str {
        LINKED_ABORT_FACTORY
    }
}
