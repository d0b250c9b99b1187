//! Abort primitives
//!
//! An [`AbortController`] owns the right to cancel; the [`AbortSignal`]s it
//! hands out only observe. Both sit on a tokio-util cancellation token so
//! they compose with the rest of the async stack.

use tokio_util::sync::CancellationToken;

/// Cancels the requests that carry its signal
#[derive(Debug, Clone, Default)]
pub struct AbortController {
    token: CancellationToken,
}

impl AbortController {
    /// Create a controller with a fresh token
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a controller around an existing token
    ///
    /// Useful to tie request cancellation to an application-wide shutdown
    /// token via [`CancellationToken::child_token`].
    pub fn from_token(token: CancellationToken) -> Self {
        Self { token }
    }

    /// Signal observing this controller
    pub fn signal(&self) -> AbortSignal {
        AbortSignal {
            token: self.token.clone(),
        }
    }

    /// Abort; calling it again has no effect
    pub fn abort(&self) {
        self.token.cancel();
    }

    /// Whether [`AbortController::abort`] has been called
    pub fn is_aborted(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Read-only view of an [`AbortController`]
#[derive(Debug, Clone)]
pub struct AbortSignal {
    token: CancellationToken,
}

impl AbortSignal {
    /// Whether the owning controller aborted
    pub fn is_aborted(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Resolve once the owning controller aborts
    pub async fn aborted(&self) {
        self.token.cancelled().await;
    }

    /// Underlying cancellation token
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }
}
