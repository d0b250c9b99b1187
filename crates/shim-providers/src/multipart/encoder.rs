//! multipart/form-data encoder
//!
//! Framing is computed up front so the exact `Content-Length` is known
//! before a single byte is produced. File parts are streamed, so disk-backed
//! files are never loaded into memory whole.

use std::io;

use async_stream::try_stream;
use bytes::Bytes;
use futures::StreamExt;
use rand::Rng;
use shim_domain::constants::{
    DEFAULT_FILE_CONTENT_TYPE, MULTIPART_BOUNDARY_PREFIX, MULTIPART_BOUNDARY_RANDOM_LEN,
};
use shim_domain::error::{Error, Result};
use shim_domain::header::{CONTENT_LENGTH, CONTENT_TYPE};
use shim_domain::{File, FormData, FormValue, Headers, ReadableStream};

use crate::constants::{BOUNDARY_ALPHABET, CRLF};

/// Longest boundary allowed by RFC 2046
const MAX_BOUNDARY_LEN: usize = 70;

enum PartBody {
    Text(Bytes),
    File(File),
}

impl PartBody {
    fn len(&self) -> u64 {
        match self {
            Self::Text(text) => text.len() as u64,
            Self::File(file) => file.size(),
        }
    }
}

struct EncodedPart {
    header: Bytes,
    body: PartBody,
}

/// Encodes a [`FormData`] into a multipart byte stream
pub struct FormDataEncoder {
    boundary: String,
    parts: Vec<EncodedPart>,
    footer: Bytes,
    content_length: u64,
}

impl FormDataEncoder {
    /// Encoder with a freshly generated boundary
    pub fn new(form: &FormData) -> Self {
        Self::build(form, generate_boundary())
    }

    /// Encoder with a caller-chosen boundary
    pub fn with_boundary<B: Into<String>>(form: &FormData, boundary: B) -> Result<Self> {
        let boundary = boundary.into();
        validate_boundary(&boundary)?;
        Ok(Self::build(form, boundary))
    }

    fn build(form: &FormData, boundary: String) -> Self {
        let parts: Vec<EncodedPart> = form
            .entries()
            .map(|(name, value)| encode_part(&boundary, name, value))
            .collect();
        let footer = Bytes::from(format!("--{boundary}--{CRLF}{CRLF}"));

        let content_length = parts
            .iter()
            .map(|part| part.header.len() as u64 + part.body.len() + CRLF.len() as u64)
            .sum::<u64>()
            + footer.len() as u64;

        Self {
            boundary,
            parts,
            footer,
            content_length,
        }
    }

    /// Boundary separating the parts
    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// `multipart/form-data; boundary=...`
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Exact number of bytes the encoded stream yields
    pub fn content_length(&self) -> u64 {
        self.content_length
    }

    /// `Content-Type` and `Content-Length` for the encoded body
    pub fn headers(&self) -> Result<Headers> {
        let mut headers = Headers::new();
        headers.set(CONTENT_TYPE, self.content_type())?;
        headers.set(CONTENT_LENGTH, self.content_length)?;
        Ok(headers)
    }

    /// Produce the encoded byte stream
    ///
    /// A file that yields a different number of bytes than its advertised
    /// size ends the stream with an error, since the framing would be wrong.
    pub fn into_stream(self) -> ReadableStream {
        let Self { parts, footer, .. } = self;
        ReadableStream::from_stream(try_stream! {
            for part in parts {
                yield part.header;
                match part.body {
                    PartBody::Text(text) => yield text,
                    PartBody::File(file) => {
                        let expected = file.size();
                        let mut written = 0u64;
                        let mut chunks = file.stream();
                        while let Some(chunk) = chunks.next().await {
                            let chunk = chunk?;
                            written += chunk.len() as u64;
                            yield chunk;
                        }
                        if written != expected {
                            Err::<(), io::Error>(io::Error::new(
                                io::ErrorKind::UnexpectedEof,
                                format!(
                                    "file '{}' produced {written} bytes, expected {expected}",
                                    file.name()
                                ),
                            ))?;
                        }
                    }
                }
                yield Bytes::from_static(CRLF.as_bytes());
            }
            yield footer;
        })
    }
}

fn encode_part(boundary: &str, name: &str, value: &FormValue) -> EncodedPart {
    let mut header = format!(
        "--{boundary}{CRLF}Content-Disposition: form-data; name=\"{}\"",
        escape_name(name)
    );

    let body = match value {
        FormValue::Text(text) => PartBody::Text(Bytes::from(normalize_line_breaks(text))),
        FormValue::File(file) => {
            let content_type = if file.content_type().is_empty() {
                DEFAULT_FILE_CONTENT_TYPE
            } else {
                file.content_type()
            };
            header.push_str(&format!(
                "; filename=\"{}\"{CRLF}Content-Type: {content_type}",
                escape_name(file.name())
            ));
            PartBody::File(file.clone())
        }
    };
    header.push_str(CRLF);
    header.push_str(CRLF);

    EncodedPart {
        header: Bytes::from(header),
        body,
    }
}

/// Escape a field or file name for a quoted header parameter
pub fn escape_name(name: &str) -> String {
    name.replace('\r', "%0D")
        .replace('\n', "%0A")
        .replace('"', "%22")
}

/// Turn every lone `\r` or `\n` into `\r\n`
pub fn normalize_line_breaks(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                normalized.push_str(CRLF);
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
            }
            '\n' => normalized.push_str(CRLF),
            other => normalized.push(other),
        }
    }
    normalized
}

/// `form-data-boundary-` followed by random lowercase alphanumerics
pub fn generate_boundary() -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..MULTIPART_BOUNDARY_RANDOM_LEN)
        .map(|_| char::from(BOUNDARY_ALPHABET[rng.random_range(0..BOUNDARY_ALPHABET.len())]))
        .collect();
    format!("{MULTIPART_BOUNDARY_PREFIX}{suffix}")
}

fn validate_boundary(boundary: &str) -> Result<()> {
    if boundary.is_empty() || boundary.len() > MAX_BOUNDARY_LEN {
        return Err(Error::encoding(format!(
            "Boundary must be 1 to {MAX_BOUNDARY_LEN} characters long"
        )));
    }
    if !boundary
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b"'()+_,-./:=?".contains(&b))
    {
        return Err(Error::encoding(format!(
            "Boundary contains characters not allowed by RFC 2046: {boundary}"
        )));
    }
    Ok(())
}
