//! Framework-free upload orchestration.
//!
//! Nothing in here touches the DOM, so the whole state machine runs under
//! a plain local executor in tests.
//!
//! - [`controller`] - intake, per-file lifecycle, removal and preview
//! - [`registry`] - the newest-first record list and its merge rules
//! - [`interceptor`] - the `before_upload` hook
//! - [`request`] - options and the per-file multipart request
//! - [`transport`] - the async HTTP seam
//! - [`progress`] - byte counters to percent
//! - [`ids`] - record identifiers

pub mod controller;
pub mod ids;
pub mod interceptor;
pub mod progress;
pub mod registry;
pub mod request;
pub mod transport;

pub use controller::{UploadCallbacks, UploadController, UploadTask};
pub use ids::IdGenerator;
pub use interceptor::{intercept, BeforeUpload, Decision};
pub use progress::{accepted_percent, percent_of};
pub use registry::{ApplyOutcome, RegistryStore, UploadRegistry};
pub use request::{FormPart, UploadOptions, UploadRequest};
pub use transport::{ProgressFn, Transport};
