//! Sink configuration.

/// Default multipart field holding the file, matching the widget default.
pub const DEFAULT_FIELD: &str = "file";

/// Default upper bound for a single file (50 MB).
pub const DEFAULT_MAX_BYTES: u64 = 50 * 1024 * 1024;

/// Room for multipart boundaries and text fields on top of the file itself.
pub const MULTIPART_OVERHEAD: u64 = 64 * 1024;

/// Runtime settings shared by every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkConfig {
    /// Files larger than this are answered with `413`.
    pub max_bytes: u64,
    /// Multipart field name carrying the file.
    pub field: String,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_BYTES,
            field: DEFAULT_FIELD.to_string(),
        }
    }
}

impl SinkConfig {
    /// Request body limit handed to axum.
    pub fn body_limit(&self) -> usize {
        self.max_bytes.saturating_add(MULTIPART_OVERHEAD) as usize
    }
}
