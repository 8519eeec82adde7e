//! uploadkit - Leptos upload and menu widgets
//!
//! A file-upload control that tracks every attempt (status, percent,
//! response or error) in a newest-first registry, plus a menu whose items
//! share a selection context.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  <Upload>  (components::upload)                               │
//! │  ├── <input type=file> ── change ──▶ UploadController::select │
//! │  └── <UploadList> ◀── RwSignal<UploadRegistry> (read-only)     │
//! ├──────────────────────────────────────────────────────────────┤
//! │  UploadController  (engine)                                   │
//! │  ├── before_upload (Decision)                                 │
//! │  ├── per-file task: Ready ▶ Loading ▶ Success | Fail          │
//! │  └── Transport ─────────────▶ XhrTransport / FetchTransport   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`types`] - Records, statuses, errors
//! - [`engine`] - Framework-free orchestration (controller, registry, interceptor)
//! - [`services`] - Browser transports
//! - [`components`] - Leptos components (Upload, UploadList, Menu, MenuItem)

use leptos::*;
use web_sys::File;

// =============================================================================
// Module declarations
// =============================================================================

pub mod config;
pub mod types;
pub mod engine;
pub mod services;
pub mod components;

// =============================================================================
// Re-exports
// =============================================================================

// Configuration
pub use config::*;

// Types
pub use types::{
    // Files
    UploadFile,
    // Records
    UploadId, UploadPatch, UploadRecord, UploadStatus,
    // Progress
    ProgressTick,
    // Errors
    UploadError, UploadResult,
};

// Engine
pub use crate::engine::{
    BeforeUpload, Decision, RegistryStore, Transport, UploadCallbacks, UploadController,
    UploadOptions, UploadRegistry, UploadRequest, UploadTask,
};

// Components
pub use components::*;

// Services
pub use services::{FetchTransport, TransportKind, XhrTransport};

// =============================================================================
// Demo application
// =============================================================================

/// Two upload widgets behind a menu, pointed at the development sink.
#[component]
pub fn DemoApp() -> impl IntoView {
    let (section, set_section) = create_signal(0usize);
    let (last_event, set_last_event) = create_signal(None::<String>);

    // empty files never reach the server
    let skip_empty: BeforeUpload<File> = std::rc::Rc::new(|file: File| {
        let keep = UploadFile::size(&file) > 0;
        if !keep {
            log::info!("skipping empty file {}", UploadFile::name(&file));
        }
        Decision::from_bool(keep, file)
    });

    view! {
        <div class="container">
            <Menu default_index=0 on_select=move |index: usize| set_section.set(index)>
                <MenuItem index=0>"Single file"</MenuItem>
                <MenuItem index=1>"Multiple files"</MenuItem>
                <MenuItem index=2 disabled=true>"Drag and drop"</MenuItem>
            </Menu>

            <Show
                when=move || section.get() == 0
                fallback=move || view! {
                    <Upload
                        action=DEMO_UPLOAD_URL
                        multiple=true
                        data=vec![("source".to_string(), "demo".to_string())]
                        on_change=move |file: File| {
                            set_last_event.set(Some(format!("{} finished", file.name())))
                        }
                    />
                }
            >
                <Upload
                    action=DEMO_UPLOAD_URL
                    before_upload=skip_empty.clone()
                    on_progress=move |(percent, file): (u8, File)| {
                        log::debug!("{}: {}%", file.name(), percent)
                    }
                    on_success=move |(_, file): (serde_json::Value, File)| {
                        set_last_event.set(Some(format!("✅ {} uploaded", file.name())))
                    }
                    on_error=move |(error, file): (UploadError, File)| {
                        set_last_event.set(Some(format!("❌ {}: {}", file.name(), error)))
                    }
                />
            </Show>

            <div class="upload-status">{move || last_event.get().unwrap_or_default()}</div>
        </div>
    }
}
