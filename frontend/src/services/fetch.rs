//! `fetch` transport through gloo-net.

use async_trait::async_trait;
use gloo_net::http::Request;
use serde_json::Value;
use web_sys::{File, RequestCredentials};

use super::{form_data, parse_response_body};
use crate::engine::{ProgressFn, Transport, UploadRequest};
use crate::types::{UploadError, UploadResult};

/// Sends the multipart body with `fetch`. Never reports progress.
#[derive(Clone, Copy, Debug, Default)]
pub struct FetchTransport;

#[async_trait(?Send)]
impl Transport<File> for FetchTransport {
    async fn submit(&self, request: UploadRequest<File>, _on_progress: ProgressFn) -> UploadResult<Value> {
        let body = form_data(&request)?;

        let mut builder = Request::post(&request.url);
        for (key, value) in &request.headers {
            builder = builder.header(key, value);
        }
        if request.with_credentials {
            builder = builder.credentials(RequestCredentials::Include);
        }

        let response = builder
            .body(body)
            .map_err(|e| UploadError::Request(format!("Failed to build request: {}", e)))?
            .send()
            .await
            .map_err(|e| UploadError::Network(format!("HTTP request failed: {}", e)))?;

        let text = response.text().await;

        if !response.ok() {
            return Err(UploadError::Status {
                status: response.status(),
                body: text.unwrap_or_else(|_| "Unknown error".to_string()),
            });
        }

        let text = text
            .map_err(|e| UploadError::Network(format!("Failed to read response: {}", e)))?;
        Ok(parse_response_body(&text))
    }
}
