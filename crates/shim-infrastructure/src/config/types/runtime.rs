//! Runtime capability switches

use serde::{Deserialize, Serialize};

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Install the native abort-controller factory into the host
    /// environment when none is present
    pub polyfill_abort_controller: bool,

    /// Resolve a file loader for the deprecated `file_from_path`
    ///
    /// Has no effect when the `file-from-path` feature is compiled out.
    pub file_from_path: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            polyfill_abort_controller: true,
            file_from_path: true,
        }
    }
}
