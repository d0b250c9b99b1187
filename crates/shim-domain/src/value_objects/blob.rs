//! Blob and File value objects
//!
//! A [`Blob`] is an immutable chunk of bytes with a MIME type. A [`File`]
//! adds a name and a modification time, and may be backed either by memory
//! or lazily by a path on disk.

use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use futures::stream::{self, TryStreamExt};
use serde::{Deserialize, Serialize};
use tokio::io::AsyncReadExt;
use tokio_util::io::ReaderStream;

use super::stream::ReadableStream;
use crate::error::{Error, Result};

/// Milliseconds since the Unix epoch for `time`
pub fn system_time_to_millis(time: SystemTime) -> i64 {
    DateTime::<Utc>::from(time).timestamp_millis()
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Immutable bytes with a MIME type
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blob {
    data: Bytes,
    content_type: String,
}

impl Blob {
    /// Create a blob; the type may be empty
    pub fn new<B: Into<Bytes>, T: Into<String>>(data: B, content_type: T) -> Self {
        Self {
            data: data.into(),
            content_type: content_type.into().to_ascii_lowercase(),
        }
    }

    /// Concatenate `parts` into one blob
    pub fn from_parts<I, T>(parts: I, content_type: T) -> Self
    where
        I: IntoIterator<Item = Bytes>,
        T: Into<String>,
    {
        let data: Vec<u8> = parts.into_iter().flat_map(|part| part.to_vec()).collect();
        Self::new(data, content_type)
    }

    /// Size in bytes
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    /// MIME type, empty when unknown
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Borrow the contents without copying
    pub fn as_bytes(&self) -> &Bytes {
        &self.data
    }

    /// Contents as bytes
    pub async fn bytes(&self) -> Result<Bytes> {
        Ok(self.data.clone())
    }

    /// Contents decoded as UTF-8, invalid sequences replaced
    pub async fn text(&self) -> Result<String> {
        Ok(String::from_utf8_lossy(&self.data).into_owned())
    }

    /// Sub-range `[start, end)` clamped to the blob size, with an empty type
    pub fn slice(&self, start: usize, end: usize) -> Blob {
        let end = end.min(self.data.len());
        let start = start.min(end);
        Blob::new(self.data.slice(start..end), "")
    }

    /// Stream the contents
    pub fn stream(&self) -> ReadableStream {
        ReadableStream::from_bytes(self.data.clone())
    }
}

/// Options accepted when creating a [`File`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileOptions {
    /// MIME type of the file
    pub content_type: Option<String>,
    /// Modification time in milliseconds since the epoch (defaults to now)
    pub last_modified: Option<i64>,
}

impl FileOptions {
    /// Set the MIME type
    pub fn with_content_type<S: Into<String>>(mut self, content_type: S) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Set the modification time
    pub fn with_last_modified(mut self, millis: i64) -> Self {
        self.last_modified = Some(millis);
        self
    }
}

/// Options for loading a file from a path
///
/// The modification time always comes from the file system.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFromPathOptions {
    /// Name to give the file instead of the path's basename
    pub filename: Option<String>,
    /// MIME type of the file
    pub content_type: Option<String>,
}

impl FileFromPathOptions {
    /// Override the file name
    pub fn with_filename<S: Into<String>>(mut self, filename: S) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Set the MIME type
    pub fn with_content_type<S: Into<String>>(mut self, content_type: S) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// Where the bytes of a [`File`] live
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSource {
    /// Held in memory
    Memory(Bytes),
    /// Read lazily from disk
    Disk {
        /// Path of the file
        path: PathBuf,
        /// Size captured when the file was created
        size: u64,
    },
}

/// Named blob with a modification time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    name: String,
    content_type: String,
    last_modified: i64,
    source: FileSource,
}

impl File {
    /// Create an in-memory file
    pub fn new<B: Into<Bytes>, N: Into<String>>(data: B, name: N, options: FileOptions) -> Self {
        Self {
            name: name.into(),
            content_type: options.content_type.unwrap_or_default().to_ascii_lowercase(),
            last_modified: options.last_modified.unwrap_or_else(now_millis),
            source: FileSource::Memory(data.into()),
        }
    }

    /// Create a file whose contents are read from `path` on demand
    ///
    /// `size` and `last_modified` must describe the file as it is now; any
    /// later change on disk makes the file unreadable.
    pub fn from_disk<P, N, T>(path: P, name: N, content_type: T, size: u64, last_modified: i64) -> Self
    where
        P: Into<PathBuf>,
        N: Into<String>,
        T: Into<String>,
    {
        Self {
            name: name.into(),
            content_type: content_type.into().to_ascii_lowercase(),
            last_modified,
            source: FileSource::Disk {
                path: path.into(),
                size,
            },
        }
    }

    /// Same contents under another name
    pub fn renamed<N: Into<String>>(mut self, name: N) -> Self {
        self.name = name.into();
        self
    }

    /// File name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// MIME type, empty when unknown
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Modification time in milliseconds since the epoch
    pub fn last_modified(&self) -> i64 {
        self.last_modified
    }

    /// Size in bytes
    pub fn size(&self) -> u64 {
        match &self.source {
            FileSource::Memory(data) => data.len() as u64,
            FileSource::Disk { size, .. } => *size,
        }
    }

    /// Backing path for disk files
    pub fn path(&self) -> Option<&Path> {
        match &self.source {
            FileSource::Memory(_) => None,
            FileSource::Disk { path, .. } => Some(path),
        }
    }

    /// Where the contents live
    pub fn source(&self) -> &FileSource {
        &self.source
    }

    /// Contents as bytes
    pub async fn bytes(&self) -> Result<Bytes> {
        match &self.source {
            FileSource::Memory(data) => Ok(data.clone()),
            FileSource::Disk { path, .. } => {
                ensure_unchanged(path, self.last_modified).await?;
                Ok(Bytes::from(tokio::fs::read(path).await?))
            }
        }
    }

    /// Contents decoded as UTF-8, invalid sequences replaced
    pub async fn text(&self) -> Result<String> {
        let data = self.bytes().await?;
        Ok(String::from_utf8_lossy(&data).into_owned())
    }

    /// Stream the contents
    ///
    /// Disk files are opened on first poll and read in chunks; exactly
    /// [`File::size`] bytes are produced.
    pub fn stream(&self) -> ReadableStream {
        match &self.source {
            FileSource::Memory(data) => ReadableStream::from_bytes(data.clone()),
            FileSource::Disk { path, size } => {
                let path = path.clone();
                let size = *size;
                let last_modified = self.last_modified;
                let open = async move {
                    ensure_unchanged(&path, last_modified)
                        .await
                        .map_err(io::Error::other)?;
                    let file = tokio::fs::File::open(&path).await?;
                    Ok::<_, io::Error>(ReaderStream::new(file.take(size)))
                };
                ReadableStream::from_stream(stream::once(open).try_flatten())
            }
        }
    }
}

async fn ensure_unchanged(path: &Path, last_modified: i64) -> Result<()> {
    let metadata = tokio::fs::metadata(path).await?;
    let modified = system_time_to_millis(metadata.modified()?);
    if modified != last_modified {
        return Err(Error::NotReadable {
            path: path.display().to_string(),
        });
    }
    Ok(())
}
