//! Blob and File Tests

use std::io::Write;

use bytes::Bytes;
use shim_domain::{Blob, Error, File, FileOptions, system_time_to_millis};

#[tokio::test]
async fn test_blob_slice_is_clamped() {
    let blob = Blob::new("hello world", "Text/Plain");
    assert_eq!(blob.content_type(), "text/plain");

    let slice = blob.slice(6, 100);
    assert_eq!(slice.text().await.unwrap(), "world");
    assert_eq!(slice.content_type(), "");
    assert_eq!(blob.slice(8, 3).size(), 0);
}

#[tokio::test]
async fn test_memory_file_round_trips_contents() {
    let file = File::new(
        Bytes::from_static(b"abc"),
        "a.txt",
        FileOptions::default().with_last_modified(42),
    );

    assert_eq!(file.size(), 3);
    assert_eq!(file.last_modified(), 42);
    assert!(file.path().is_none());
    assert_eq!(file.stream().collect().await.unwrap(), Bytes::from_static(b"abc"));
}

#[tokio::test]
async fn test_disk_file_streams_contents() {
    let mut temp = tempfile::NamedTempFile::new().unwrap();
    temp.write_all(b"from disk").unwrap();
    let metadata = std::fs::metadata(temp.path()).unwrap();
    let modified = system_time_to_millis(metadata.modified().unwrap());

    let file = File::from_disk(temp.path(), "disk.txt", "", metadata.len(), modified);

    assert_eq!(file.text().await.unwrap(), "from disk");
    assert_eq!(file.stream().collect().await.unwrap().len(), 9);
}

#[tokio::test]
async fn test_disk_file_changed_after_creation_is_not_readable() {
    let mut temp = tempfile::NamedTempFile::new().unwrap();
    temp.write_all(b"v1").unwrap();
    let metadata = std::fs::metadata(temp.path()).unwrap();
    let stale = system_time_to_millis(metadata.modified().unwrap()) - 10_000;

    let file = File::from_disk(temp.path(), "disk.txt", "", metadata.len(), stale);

    match file.bytes().await {
        Err(Error::NotReadable { path }) => assert!(path.contains(&*temp.path().to_string_lossy())),
        other => panic!("Expected NotReadable error, got {other:?}"),
    }
    assert!(file.stream().collect().await.is_err());
}
