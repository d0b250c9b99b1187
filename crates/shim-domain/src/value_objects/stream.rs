//! Byte streams and uploadable values
//!
//! [`ReadableStream`] is the generic body stream every runtime hands around.
//! [`FsReadStream`] is the file-system flavour, and [`Uploadable`] tags the
//! values a caller may pass as an upload so that runtimes can classify them
//! without guessing at concrete types.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::{Bytes, BytesMut};
use futures::stream::{self, BoxStream, Stream, StreamExt, TryStreamExt};
use tokio::sync::Mutex;
use tokio_util::io::ReaderStream;

use super::blob::{Blob, File, FileOptions};
use crate::error::Result;

/// Boxed stream of byte chunks
pub type ByteStream = BoxStream<'static, io::Result<Bytes>>;

/// Name used when an upload carries no name and none can be inferred
pub const UNKNOWN_FILE_NAME: &str = "unknown_file";

/// Generic readable byte stream
///
/// The boxed stream sits behind a mutex so the wrapper is `Sync`; request
/// options carrying a body can then be borrowed across `.await` points in
/// `Send` futures. Polling goes through `get_mut` and never locks.
pub struct ReadableStream {
    inner: Mutex<ByteStream>,
}

impl ReadableStream {
    /// Wrap any sendable stream of byte chunks
    pub fn from_stream<S>(stream: S) -> Self
    where
        S: Stream<Item = io::Result<Bytes>> + Send + 'static,
    {
        Self {
            inner: Mutex::new(stream.boxed()),
        }
    }

    /// Stream that yields `bytes` as a single chunk
    pub fn from_bytes<B: Into<Bytes>>(bytes: B) -> Self {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Self::empty();
        }
        Self::from_stream(stream::once(async move { Ok(bytes) }))
    }

    /// Stream that yields nothing
    pub fn empty() -> Self {
        Self::from_stream(stream::empty())
    }

    /// Drain the stream into one contiguous buffer
    pub async fn collect(self) -> Result<Bytes> {
        let buffer = self
            .into_inner()
            .try_fold(BytesMut::new(), |mut buffer, chunk| async move {
                buffer.extend_from_slice(&chunk);
                Ok(buffer)
            })
            .await?;
        Ok(buffer.freeze())
    }

    /// Unwrap the boxed stream
    pub fn into_inner(self) -> ByteStream {
        self.inner.into_inner()
    }
}

impl Stream for ReadableStream {
    type Item = io::Result<Bytes>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().inner.get_mut().poll_next_unpin(cx)
    }
}

impl fmt::Debug for ReadableStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadableStream").finish_non_exhaustive()
    }
}

/// Read stream over a file on disk
pub struct FsReadStream {
    path: PathBuf,
    inner: ReaderStream<tokio::fs::File>,
}

impl FsReadStream {
    /// Open `path` for streaming reads
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = tokio::fs::File::open(&path).await?;
        Ok(Self {
            path,
            inner: ReaderStream::new(file),
        })
    }

    /// Path the stream reads from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Erase the file-system flavour
    pub fn into_readable(self) -> ReadableStream {
        ReadableStream::from_stream(self.inner)
    }
}

impl Stream for FsReadStream {
    type Item = io::Result<Bytes>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().inner.poll_next_unpin(cx)
    }
}

impl fmt::Debug for FsReadStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FsReadStream")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

/// A value that can be uploaded as a file
#[derive(Debug)]
pub enum Uploadable {
    /// Raw bytes
    Bytes(Bytes),
    /// UTF-8 text
    Text(String),
    /// Unnamed blob
    Blob(Blob),
    /// Named file
    File(File),
    /// File-system read stream
    FsReadStream(FsReadStream),
    /// Any other readable stream
    Readable(ReadableStream),
}

impl Uploadable {
    /// True only for file-system read streams
    pub fn is_fs_read_stream(&self) -> bool {
        matches!(self, Self::FsReadStream(_))
    }

    /// True for every readable stream, file-system streams included
    pub fn is_readable(&self) -> bool {
        matches!(self, Self::FsReadStream(_) | Self::Readable(_))
    }

    /// Name that can be inferred from the value itself
    pub fn inferred_name(&self) -> Option<String> {
        match self {
            Self::File(file) => Some(file.name().to_string()),
            Self::FsReadStream(stream) => stream
                .path()
                .file_name()
                .map(|name| name.to_string_lossy().into_owned()),
            _ => None,
        }
    }

    /// Convert into a [`File`], reading streams to completion
    ///
    /// `name` wins over any inferred name; without either the file is named
    /// [`UNKNOWN_FILE_NAME`].
    pub async fn into_file(self, name: Option<String>, options: FileOptions) -> Result<File> {
        let name = name
            .or_else(|| self.inferred_name())
            .unwrap_or_else(|| UNKNOWN_FILE_NAME.to_string());

        let (data, blob_type) = match self {
            Self::File(file) => {
                if options.content_type.is_none() && options.last_modified.is_none() {
                    return Ok(file.renamed(name));
                }
                let content_type = file.content_type().to_string();
                (file.bytes().await?, content_type)
            }
            Self::Bytes(bytes) => (bytes, String::new()),
            Self::Text(text) => (Bytes::from(text), String::new()),
            Self::Blob(blob) => {
                let content_type = blob.content_type().to_string();
                (blob.bytes().await?, content_type)
            }
            Self::FsReadStream(stream) => (stream.into_readable().collect().await?, String::new()),
            Self::Readable(stream) => (stream.collect().await?, String::new()),
        };

        let options = FileOptions {
            content_type: options.content_type.or(Some(blob_type)),
            ..options
        };
        Ok(File::new(data, name, options))
    }
}

impl From<Bytes> for Uploadable {
    fn from(bytes: Bytes) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<String> for Uploadable {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Blob> for Uploadable {
    fn from(blob: Blob) -> Self {
        Self::Blob(blob)
    }
}

impl From<File> for Uploadable {
    fn from(file: File) -> Self {
        Self::File(file)
    }
}

impl From<FsReadStream> for Uploadable {
    fn from(stream: FsReadStream) -> Self {
        Self::FsReadStream(stream)
    }
}

impl From<ReadableStream> for Uploadable {
    fn from(stream: ReadableStream) -> Self {
        Self::Readable(stream)
    }
}
