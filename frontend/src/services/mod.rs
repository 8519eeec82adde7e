//! Browser transports for the upload controller.
//!
//! # Services
//!
//! - [`xhr`] - `XMLHttpRequest` transport with upload progress (default)
//! - [`fetch`] - `fetch` transport through gloo-net, no progress events
//!
//! Both send the same multipart body built by [`form_data`].

pub mod fetch;
pub mod xhr;

pub use fetch::FetchTransport;
pub use xhr::XhrTransport;

use async_trait::async_trait;
use serde_json::Value;
use web_sys::{File, FormData};

use crate::engine::{FormPart, ProgressFn, Transport, UploadRequest};
use crate::types::{UploadError, UploadResult};

/// Which browser API performs the request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TransportKind {
    /// `XMLHttpRequest`; reports upload progress.
    #[default]
    Xhr,
    /// `fetch`; the record jumps straight from ready to its final state.
    Fetch,
}

#[async_trait(?Send)]
impl Transport<File> for TransportKind {
    async fn submit(&self, request: UploadRequest<File>, on_progress: ProgressFn) -> UploadResult<Value> {
        match self {
            TransportKind::Xhr => XhrTransport.submit(request, on_progress).await,
            TransportKind::Fetch => FetchTransport.submit(request, on_progress).await,
        }
    }
}

/// Multipart body for `request`: the file part, then the extra data fields.
pub fn form_data(request: &UploadRequest<File>) -> UploadResult<FormData> {
    let form = FormData::new()
        .map_err(|e| UploadError::Request(format!("Failed to create FormData: {:?}", e)))?;

    for part in request.parts() {
        match part {
            FormPart::File {
                field,
                file,
                file_name,
            } => form
                .append_with_blob_and_filename(field, file, &file_name)
                .map_err(|e| UploadError::Request(format!("Failed to append file: {:?}", e)))?,
            FormPart::Text { field, value } => form
                .append_with_str(field, value)
                .map_err(|e| {
                    UploadError::Request(format!("Failed to append field '{}': {:?}", field, e))
                })?,
        }
    }

    Ok(form)
}

/// Response body as JSON, or as a JSON string when the server sent plain text.
pub fn parse_response_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}
