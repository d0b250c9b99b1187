//! Multipart request support
//!
//! Turns a [`FormData`] into a [`MultipartBody`] and merges the encoder's
//! framing headers into a copy of the caller's request options.

pub mod encoder;

use shim_domain::error::Result;
use shim_domain::{FormData, MultipartBody, RequestBody, RequestOptions};
use tracing::trace;

pub use encoder::FormDataEncoder;

/// New options carrying `form` as the body
///
/// Caller headers are kept unless the encoder sets the same name
/// (compared case-insensitively), in which case the encoder wins. `form`
/// and `options` are left untouched.
pub fn multipart_request_options(form: &FormData, options: &RequestOptions) -> Result<RequestOptions> {
    let encoder = FormDataEncoder::new(form);
    let headers = options.headers.merged(&encoder.headers()?);
    let content_type = encoder.content_type();
    let content_length = encoder.content_length();

    trace!(
        fields = form.len(),
        content_length,
        boundary = encoder.boundary(),
        "Encoding multipart body"
    );

    let body = MultipartBody::new(encoder.into_stream(), content_type, content_length);
    let mut multipart_options = options.clone_without_body();
    multipart_options.headers = headers;
    multipart_options.body = Some(RequestBody::Multipart(body));
    Ok(multipart_options)
}
