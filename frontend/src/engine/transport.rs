//! The seam between the controller and whatever performs the HTTP request.

use std::rc::Rc;

use async_trait::async_trait;
use serde_json::Value;

use crate::engine::request::UploadRequest;
use crate::types::{ProgressTick, UploadFile, UploadResult};

/// Called by a transport for every upload progress event it observes.
pub type ProgressFn = Rc<dyn Fn(ProgressTick)>;

/// Performs one multipart submission.
///
/// Resolves with the parsed response body on a 2xx answer and with an
/// [`UploadError`](crate::UploadError) otherwise. Progress ticks may arrive
/// any number of times before the future resolves, including zero.
#[async_trait(?Send)]
pub trait Transport<F: UploadFile> {
    async fn submit(&self, request: UploadRequest<F>, on_progress: ProgressFn) -> UploadResult<Value>;
}
