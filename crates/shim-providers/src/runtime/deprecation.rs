//! One-time deprecation notices

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use tracing::warn;

/// Emits a deprecation warning at most once, however many callers race
#[derive(Debug, Default)]
pub struct DeprecationNotice {
    warned: AtomicBool,
    emitted: AtomicUsize,
}

impl DeprecationNotice {
    /// Create a notice that has not fired yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Log the message built by `message` unless a previous call already did
    ///
    /// Returns whether this call emitted the warning.
    pub fn warn_once<F>(&self, feature: &str, message: F) -> bool
    where
        F: FnOnce() -> String,
    {
        if self
            .warned
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return false;
        }
        warn!(feature, "{}", message());
        self.emitted.fetch_add(1, Ordering::Relaxed);
        true
    }

    /// Whether the warning has fired
    pub fn has_warned(&self) -> bool {
        self.warned.load(Ordering::Acquire)
    }

    /// How many times the warning was actually logged
    pub fn times_emitted(&self) -> usize {
        self.emitted.load(Ordering::Relaxed)
    }
}
