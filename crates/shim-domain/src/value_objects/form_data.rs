//! Multipart form payload
//!
//! Ordered multi-map of field names to text values or files, mirroring the
//! form-data object the transport core builds before encoding.

use super::blob::{Blob, File, FileOptions};

/// A single form value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValue {
    /// Plain text field
    Text(String),
    /// File field
    File(File),
}

impl FormValue {
    /// Text content, if this is a text field
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::File(_) => None,
        }
    }

    /// File content, if this is a file field
    pub fn as_file(&self) -> Option<&File> {
        match self {
            Self::Text(_) => None,
            Self::File(file) => Some(file),
        }
    }
}

impl From<String> for FormValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for FormValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<File> for FormValue {
    fn from(file: File) -> Self {
        Self::File(file)
    }
}

/// Ordered set of named form fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    entries: Vec<(String, FormValue)>,
}

impl FormData {
    /// Create an empty form
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field, keeping existing fields with the same name
    pub fn append<N: Into<String>, V: Into<FormValue>>(&mut self, name: N, value: V) {
        self.entries.push((name.into(), value.into()));
    }

    /// Append a blob as a file field
    ///
    /// Without a filename the blob is named `blob`.
    pub fn append_blob<N: Into<String>>(&mut self, name: N, blob: &Blob, filename: Option<&str>) {
        let file = File::new(
            blob.as_bytes().clone(),
            filename.unwrap_or("blob"),
            FileOptions::default().with_content_type(blob.content_type()),
        );
        self.append(name, file);
    }

    /// Replace every field named `name` with one value
    ///
    /// The new value takes the position of the first replaced field.
    pub fn set<N: Into<String>, V: Into<FormValue>>(&mut self, name: N, value: V) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter().position(|(key, _)| *key == name) {
            Some(index) => {
                self.entries[index].1 = value;
                let mut seen = 0usize;
                self.entries.retain(|(key, _)| {
                    if *key == name {
                        seen += 1;
                        seen == 1
                    } else {
                        true
                    }
                });
            }
            None => self.entries.push((name, value)),
        }
    }

    /// First value for `name`
    pub fn get(&self, name: &str) -> Option<&FormValue> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Every value for `name`, in insertion order
    pub fn get_all(&self, name: &str) -> Vec<&FormValue> {
        self.entries
            .iter()
            .filter(|(key, _)| key == name)
            .map(|(_, value)| value)
            .collect()
    }

    /// Whether any field is named `name`
    pub fn has(&self, name: &str) -> bool {
        self.entries.iter().any(|(key, _)| key == name)
    }

    /// Remove every field named `name`
    pub fn delete(&mut self, name: &str) {
        self.entries.retain(|(key, _)| key != name);
    }

    /// Iterate over fields in insertion order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &FormValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the form has no fields
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
