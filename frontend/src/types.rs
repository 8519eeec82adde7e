//! Common types used across the upload widgets.
//!
//! # Categories
//!
//! - **File Types** - What the controller needs to know about a file
//! - **Record Types** - Tracked upload attempts and their partial updates
//! - **Progress Types** - Raw transport progress ticks
//! - **Error Types** - Per-file upload failures

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

// =============================================================================
// File Types
// =============================================================================

/// A file the controller can upload.
///
/// Implemented for [`web_sys::File`] in the browser; tests use plain structs.
pub trait UploadFile: Clone + 'static {
    /// File name as shown to the user and sent in the multipart part.
    fn name(&self) -> String;
    /// Size in bytes.
    fn size(&self) -> u64;
}

impl UploadFile for web_sys::File {
    fn name(&self) -> String {
        web_sys::File::name(self)
    }

    fn size(&self) -> u64 {
        web_sys::Blob::size(self) as u64
    }
}

// =============================================================================
// Record Types
// =============================================================================

/// Opaque identifier of one upload attempt.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UploadId(String);

impl UploadId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UploadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle status of an upload attempt.
///
/// Transitions only move forward: `Ready -> Loading -> Success | Fail`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    /// Record created, nothing sent yet.
    Ready,
    /// Bytes are flowing.
    Loading,
    /// Server accepted the file.
    Success,
    /// Transport or server failure.
    Fail,
}

impl UploadStatus {
    /// Ordering used to reject backwards transitions.
    pub fn rank(self) -> u8 {
        match self {
            UploadStatus::Ready => 0,
            UploadStatus::Loading => 1,
            UploadStatus::Success | UploadStatus::Fail => 2,
        }
    }

    pub fn is_terminal(self) -> bool {
        self.rank() == 2
    }

    /// CSS class for the list display.
    pub fn css_class(self) -> &'static str {
        match self {
            UploadStatus::Ready => "upload-ready",
            UploadStatus::Loading => "upload-loading",
            UploadStatus::Success => "upload-success",
            UploadStatus::Fail => "upload-fail",
        }
    }
}

/// One tracked upload attempt.
#[derive(Clone, Debug, PartialEq)]
pub struct UploadRecord<F> {
    pub id: UploadId,
    pub name: String,
    pub size: u64,
    pub status: UploadStatus,
    /// 0..=100, last value observed while loading
    pub percent: u8,
    /// File being uploaded. `None` for records seeded from a default list.
    pub source: Option<F>,
    pub response: Option<Value>,
    pub error: Option<UploadError>,
}

impl<F: UploadFile> UploadRecord<F> {
    /// Fresh `Ready` record for a file accepted at intake.
    pub fn from_file(id: UploadId, file: &F) -> Self {
        Self {
            id,
            name: file.name(),
            size: file.size(),
            status: UploadStatus::Ready,
            percent: 0,
            source: Some(file.clone()),
            response: None,
            error: None,
        }
    }
}

impl<F> UploadRecord<F> {
    /// Record describing an upload that happened before the widget mounted.
    pub fn seeded(id: UploadId, name: impl Into<String>, size: u64, status: UploadStatus) -> Self {
        Self {
            id,
            name: name.into(),
            size,
            status,
            percent: if status == UploadStatus::Success { 100 } else { 0 },
            source: None,
            response: None,
            error: None,
        }
    }
}

/// Partial update merged onto an existing record.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UploadPatch {
    pub status: Option<UploadStatus>,
    pub percent: Option<u8>,
    pub response: Option<Value>,
    pub error: Option<UploadError>,
}

impl UploadPatch {
    pub fn progress(percent: u8) -> Self {
        Self {
            status: Some(UploadStatus::Loading),
            percent: Some(percent),
            ..Self::default()
        }
    }

    pub fn success(response: Value) -> Self {
        Self {
            status: Some(UploadStatus::Success),
            response: Some(response),
            ..Self::default()
        }
    }

    pub fn fail(error: UploadError) -> Self {
        Self {
            status: Some(UploadStatus::Fail),
            error: Some(error),
            ..Self::default()
        }
    }
}

// =============================================================================
// Progress Types
// =============================================================================

/// Byte counters reported by a transport while the body is being sent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProgressTick {
    pub loaded: u64,
    /// `None` when the transport cannot compute the body length.
    pub total: Option<u64>,
}

// =============================================================================
// Error Types
// =============================================================================

/// Why a single upload attempt failed.
///
/// Always contained to the file it belongs to.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum UploadError {
    /// The request never got a response.
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status.
    #[error("Server error ({status}): {body}")]
    Status { status: u16, body: String },

    /// The browser request could not be built.
    #[error("Request error: {0}")]
    Request(String),

    /// A pending `before_upload` computation failed.
    #[error("Interceptor rejected file: {0}")]
    Intercept(String),
}

/// Result type alias for upload operations.
pub type UploadResult<T> = Result<T, UploadError>;
