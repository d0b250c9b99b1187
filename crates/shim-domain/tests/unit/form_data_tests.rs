//! Form Data Tests

use shim_domain::{Blob, FormData, FormValue};

#[test]
fn test_append_keeps_order_and_duplicates() {
    let mut form = FormData::new();
    form.append("a", "1");
    form.append("b", "2");
    form.append("a", "3");

    let names: Vec<&str> = form.entries().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["a", "b", "a"]);
    assert_eq!(form.get_all("a").len(), 2);
    assert_eq!(form.get("a").and_then(FormValue::as_text), Some("1"));
}

#[test]
fn test_set_replaces_in_place() {
    let mut form = FormData::new();
    form.append("a", "1");
    form.append("b", "2");
    form.append("a", "3");
    form.set("a", "x");

    let pairs: Vec<(&str, Option<&str>)> = form
        .entries()
        .map(|(name, value)| (name, value.as_text()))
        .collect();
    assert_eq!(pairs, vec![("a", Some("x")), ("b", Some("2"))]);
}

#[test]
fn test_delete_and_has() {
    let mut form = FormData::new();
    form.append("a", "1");
    assert!(form.has("a"));

    form.delete("a");
    assert!(!form.has("a"));
    assert!(form.is_empty());
}

#[test]
fn test_append_blob_defaults_name() {
    let mut form = FormData::new();
    form.append_blob("upload", &Blob::new("data", "text/plain"), None);

    let file = form.get("upload").and_then(FormValue::as_file).unwrap();
    assert_eq!(file.name(), "blob");
    assert_eq!(file.content_type(), "text/plain");
    assert_eq!(file.size(), 4);
}
