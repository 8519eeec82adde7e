//! # upload-sink - development upload target
//!
//! Receives the multipart POSTs sent by the uploadkit widgets and answers
//! with a JSON receipt, so uploads can be exercised end to end without a
//! real storage backend.
//!
//! ```text
//! ┌─────────────┐  multipart   ┌─────────────┐  JSON receipt  ┌─────────────┐
//! │   <Upload>  │─────────────▶│ /api/upload │───────────────▶│ UploadRecord│
//! │  (browser)  │              │  (axum)     │  or 4xx error  │  response   │
//! └─────────────┘              └─────────────┘                └─────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`config`] - Limits and field name
//! - [`error`] - Error type and its HTTP mapping
//! - [`api`] - HTTP server and response types

pub mod config;
pub mod error;
pub mod api;

pub use config::SinkConfig;
pub use error::{SinkError, SinkResult};
pub use api::types::{error_response, UploadReceipt};

// Server
pub mod server {
    pub use crate::api::server::{router, serve, start_server};
}
