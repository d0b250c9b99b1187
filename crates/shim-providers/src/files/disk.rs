//! Disk file loader
//!
//! Creates lazily read, disk-backed files. Only metadata is read up front;
//! contents are streamed when the file is encoded.

use std::path::Path;

use async_trait::async_trait;
use shim_domain::error::{Error, Result};
use shim_domain::{File, FileFromPathOptions, FileLoader, UNKNOWN_FILE_NAME, system_time_to_millis};
use tracing::debug;

/// Loads files from the local file system
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskFileLoader;

impl DiskFileLoader {
    /// Create a new disk file loader
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FileLoader for DiskFileLoader {
    async fn load(&self, path: &Path, options: &FileFromPathOptions) -> Result<File> {
        let metadata = tokio::fs::metadata(path).await?;
        if !metadata.is_file() {
            return Err(Error::invalid_argument(format!(
                "Not a regular file: {}",
                path.display()
            )));
        }

        let name = options.filename.clone().unwrap_or_else(|| {
            path.file_name()
                .map_or_else(|| UNKNOWN_FILE_NAME.to_string(), |n| n.to_string_lossy().into_owned())
        });
        let last_modified = system_time_to_millis(metadata.modified()?);

        debug!(path = %path.display(), size = metadata.len(), "Loaded file from path");
        Ok(File::from_disk(
            path,
            name,
            options.content_type.clone().unwrap_or_default(),
            metadata.len(),
            last_modified,
        ))
    }
}
