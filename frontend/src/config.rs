//! Widget defaults.
//!
//! Everything else is configured per widget through [`crate::UploadOptions`]
//! or the component props.

/// Multipart field name of the file part when none is configured.
pub const DEFAULT_FIELD_NAME: &str = "file";

/// Upload target used by the demo app.
///
/// The development sink (`upload-sink serve`) listens here.
pub const DEMO_UPLOAD_URL: &str = "http://localhost:3000/api/upload";
