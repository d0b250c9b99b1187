//! Value objects shared by every runtime

pub mod abort;
pub mod blob;
pub mod form_data;
pub mod headers;
pub mod request;
pub mod stream;

pub use abort::{AbortController, AbortSignal};
pub use blob::{Blob, File, FileFromPathOptions, FileOptions, FileSource, system_time_to_millis};
pub use form_data::{FormData, FormValue};
pub use headers::Headers;
pub use request::{HttpRequest, HttpResponse, MultipartBody, RequestBody, RequestOptions};
pub use stream::{ByteStream, FsReadStream, ReadableStream, UNKNOWN_FILE_NAME, Uploadable};
