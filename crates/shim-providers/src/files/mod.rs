//! File loaders
//!
//! Implements the `FileLoader` port behind the deprecated
//! `file_from_path` capability. Compiled in with the `file-from-path`
//! feature; without it runtimes report the capability as unsupported.

#[cfg(feature = "file-from-path")]
pub mod disk;

use std::sync::Arc;

use shim_domain::FileLoader;

#[cfg(feature = "file-from-path")]
pub use disk::DiskFileLoader;

/// Loader compiled into this build, if any
pub fn default_file_loader() -> Option<Arc<dyn FileLoader>> {
    #[cfg(feature = "file-from-path")]
    {
        Some(Arc::new(DiskFileLoader::new()))
    }
    #[cfg(not(feature = "file-from-path"))]
    {
        None
    }
}
