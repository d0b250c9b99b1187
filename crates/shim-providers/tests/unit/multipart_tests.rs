//! Multipart Encoding Tests

use std::io::Write;

use shim_domain::{File, FileOptions, FormData, system_time_to_millis};
use shim_providers::FormDataEncoder;

/// Split an encoded body into `(headers, body)` pairs
fn split_parts(encoded: &str, boundary: &str) -> Vec<(String, String)> {
    let delimiter = format!("--{boundary}\r\n");
    let closing = format!("--{boundary}--\r\n\r\n");
    let body = encoded
        .strip_suffix(&closing)
        .expect("encoded body ends with the closing delimiter");

    body.split(&delimiter)
        .filter(|part| !part.is_empty())
        .map(|part| {
            let (headers, value) = part.split_once("\r\n\r\n").expect("header separator");
            let value = value.strip_suffix("\r\n").expect("part terminator");
            (headers.to_string(), value.to_string())
        })
        .collect()
}

#[tokio::test]
async fn test_parts_round_trip_with_disk_file() {
    let mut temp = tempfile::NamedTempFile::new().unwrap();
    temp.write_all(b"line one\nline two\n").unwrap();
    let metadata = std::fs::metadata(temp.path()).unwrap();
    let disk_file = File::from_disk(
        temp.path(),
        "notes \"v2\".txt",
        "text/plain",
        metadata.len(),
        system_time_to_millis(metadata.modified().unwrap()),
    );

    let mut form = FormData::new();
    form.append("model", "whisper-1");
    form.append("prompt", "first\nsecond");
    form.append("file", disk_file);
    form.append("extra", File::new("{}", "meta.json", FileOptions::default().with_content_type("application/json")));

    let encoder = FormDataEncoder::new(&form);
    let boundary = encoder.boundary().to_string();
    let length = encoder.content_length();
    let encoded = encoder.into_stream().collect().await.unwrap();
    assert_eq!(encoded.len() as u64, length);

    let text = String::from_utf8(encoded.to_vec()).unwrap();
    let parts = split_parts(&text, &boundary);
    assert_eq!(parts.len(), 4);

    assert_eq!(parts[0].0, "Content-Disposition: form-data; name=\"model\"");
    assert_eq!(parts[0].1, "whisper-1");
    assert_eq!(parts[1].1, "first\r\nsecond");
    assert_eq!(
        parts[2].0,
        "Content-Disposition: form-data; name=\"file\"; filename=\"notes %22v2%22.txt\"\r\nContent-Type: text/plain"
    );
    assert_eq!(parts[2].1, "line one\nline two\n");
    assert!(parts[3].0.ends_with("Content-Type: application/json"));
    assert_eq!(parts[3].1, "{}");
}

#[tokio::test]
async fn test_truncated_disk_file_fails_the_stream() {
    let mut temp = tempfile::NamedTempFile::new().unwrap();
    temp.write_all(b"short").unwrap();
    let metadata = std::fs::metadata(temp.path()).unwrap();
    let oversized = File::from_disk(
        temp.path(),
        "short.txt",
        "",
        metadata.len() + 10,
        system_time_to_millis(metadata.modified().unwrap()),
    );

    let mut form = FormData::new();
    form.append("file", oversized);

    let result = FormDataEncoder::new(&form).into_stream().collect().await;
    assert!(result.is_err());
}
