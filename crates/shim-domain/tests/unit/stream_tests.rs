//! Stream and Uploadable Tests

use std::io::Write;

use bytes::Bytes;
use futures::stream;
use shim_domain::{
    Blob, FileOptions, FsReadStream, ReadableStream, UNKNOWN_FILE_NAME, Uploadable,
};

#[tokio::test]
async fn test_readable_stream_collects_chunks() {
    let chunks = vec![Ok(Bytes::from_static(b"ab")), Ok(Bytes::from_static(b"cd"))];
    let readable = ReadableStream::from_stream(stream::iter(chunks));
    assert_eq!(readable.collect().await.unwrap(), Bytes::from_static(b"abcd"));
}

#[tokio::test]
async fn test_stream_predicates() {
    let mut temp = tempfile::NamedTempFile::new().unwrap();
    temp.write_all(b"x").unwrap();

    let fs_stream = Uploadable::from(FsReadStream::open(temp.path()).await.unwrap());
    let readable = Uploadable::from(ReadableStream::from_bytes("x"));
    let blob = Uploadable::from(Blob::new("x", ""));

    assert!(fs_stream.is_fs_read_stream());
    assert!(fs_stream.is_readable());
    assert!(!readable.is_fs_read_stream());
    assert!(readable.is_readable());
    assert!(!blob.is_fs_read_stream());
    assert!(!blob.is_readable());
}

#[tokio::test]
async fn test_into_file_infers_name_from_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.csv");
    std::fs::write(&path, "a,b\n").unwrap();

    let upload = Uploadable::from(FsReadStream::open(&path).await.unwrap());
    let file = upload.into_file(None, FileOptions::default()).await.unwrap();

    assert_eq!(file.name(), "report.csv");
    assert_eq!(file.text().await.unwrap(), "a,b\n");
}

#[tokio::test]
async fn test_into_file_falls_back_to_unknown_name() {
    let upload = Uploadable::from(Bytes::from_static(b"raw"));
    let file = upload
        .into_file(None, FileOptions::default().with_content_type("text/plain"))
        .await
        .unwrap();

    assert_eq!(file.name(), UNKNOWN_FILE_NAME);
    assert_eq!(file.content_type(), "text/plain");
}
