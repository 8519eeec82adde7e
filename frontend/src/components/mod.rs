//! Leptos components.
//!
//! # Upload
//! - [`Upload`] - file picker wired to an [`UploadController`](crate::UploadController)
//! - [`UploadList`] - newest-first list of upload records
//! - [`ProgressBar`] - per-file progress indicator
//!
//! # Menu
//! - [`Menu`] - provides the selection context
//! - [`MenuItem`] - selectable entry reading that context

mod menu;
mod progress;
mod upload;
mod upload_list;

pub use menu::*;
pub use progress::*;
pub use upload::*;
pub use upload_list::*;
