//! `before_upload` hook: per-file gate or transform run before intake.

use std::rc::Rc;

use futures::future::LocalBoxFuture;

use crate::types::{UploadFile, UploadResult};

/// What the hook decided for one file.
pub enum Decision<F> {
    /// Upload this file. It may be the original or a replacement.
    Proceed(F),
    /// Skip the file silently.
    Reject,
    /// Decide later; `Ok` carries the file to upload.
    Pending(LocalBoxFuture<'static, UploadResult<F>>),
}

impl<F> Decision<F> {
    /// The boolean form: keep the original file or drop it.
    pub fn from_bool(keep: bool, file: F) -> Self {
        if keep {
            Decision::Proceed(file)
        } else {
            Decision::Reject
        }
    }
}

/// The user-supplied hook.
pub type BeforeUpload<F> = Rc<dyn Fn(F) -> Decision<F>>;

/// Run the hook (if any) and wait for its verdict.
///
/// `None` means the file must not enter the pipeline. A failed pending
/// computation counts as a rejection.
pub async fn intercept<F: UploadFile>(hook: Option<&BeforeUpload<F>>, file: F) -> Option<F> {
    let Some(hook) = hook else {
        return Some(file);
    };

    let name = file.name();
    match hook(file) {
        Decision::Proceed(file) => Some(file),
        Decision::Reject => {
            log::info!("before_upload rejected {}", name);
            None
        }
        Decision::Pending(pending) => match pending.await {
            Ok(file) => Some(file),
            Err(e) => {
                log::warn!("before_upload failed for {}: {}", name, e);
                None
            }
        },
    }
}
