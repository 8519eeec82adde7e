//! File upload control.
//!
//! Owns the registry signal, builds an [`UploadController`] from its props
//! and hands the registry to [`UploadList`] for display.

use leptos::*;
use serde_json::Value;
use web_sys::{Event, File, HtmlInputElement};

use super::UploadList;
use crate::config::DEFAULT_FIELD_NAME;
use crate::engine::{BeforeUpload, UploadCallbacks, UploadController, UploadOptions, UploadRegistry};
use crate::services::TransportKind;
use crate::types::{UploadError, UploadId, UploadRecord};

#[component]
pub fn Upload(
    /// Submission URL.
    #[prop(into)]
    action: String,
    /// Extra request headers.
    #[prop(optional)]
    headers: Vec<(String, String)>,
    /// Extra multipart text fields.
    #[prop(optional)]
    data: Vec<(String, String)>,
    /// Multipart field name of the file part.
    #[prop(into, default = DEFAULT_FIELD_NAME.to_string())]
    name: String,
    #[prop(optional)] with_credentials: bool,
    /// File picker filter, e.g. `".png,.jpg"`. Not enforced.
    #[prop(optional, into)]
    accept: Option<String>,
    #[prop(optional)] multiple: bool,
    /// Records shown before anything is uploaded.
    #[prop(optional)]
    default_upload_file_list: Vec<UploadRecord<File>>,
    #[prop(optional)] transport: TransportKind,
    #[prop(optional)] before_upload: Option<BeforeUpload<File>>,
    #[prop(optional, into)] on_change: Option<Callback<File>>,
    #[prop(optional, into)] on_remove: Option<Callback<UploadRecord<File>>>,
    #[prop(optional, into)] on_progress: Option<Callback<(u8, File)>>,
    #[prop(optional, into)] on_success: Option<Callback<(Value, File)>>,
    #[prop(optional, into)] on_error: Option<Callback<(UploadError, File)>>,
    #[prop(optional, into)] on_preview: Option<Callback<UploadRecord<File>>>,
    /// Custom trigger; a plain button otherwise.
    #[prop(optional)]
    children: Option<Children>,
) -> impl IntoView {
    let registry = create_rw_signal(UploadRegistry::seeded(default_upload_file_list));

    let options = UploadOptions {
        action,
        name,
        headers,
        data,
        with_credentials,
    };

    let mut callbacks = UploadCallbacks::default();
    if let Some(cb) = on_change {
        callbacks = callbacks.on_change(move |file: &File| cb.call(file.clone()));
    }
    if let Some(cb) = on_progress {
        callbacks = callbacks.on_progress(move |percent, file: &File| cb.call((percent, file.clone())));
    }
    if let Some(cb) = on_success {
        callbacks = callbacks.on_success(move |response: &Value, file: &File| {
            cb.call((response.clone(), file.clone()))
        });
    }
    if let Some(cb) = on_error {
        callbacks = callbacks.on_error(move |error: &UploadError, file: &File| {
            cb.call((error.clone(), file.clone()))
        });
    }
    if let Some(cb) = on_remove {
        callbacks = callbacks.on_remove(move |record: &UploadRecord<File>| cb.call(record.clone()));
    }
    if let Some(cb) = on_preview {
        callbacks = callbacks.on_preview(move |record: &UploadRecord<File>| cb.call(record.clone()));
    }

    let mut controller = UploadController::new(options, transport, registry).callbacks(callbacks);
    if let Some(hook) = before_upload {
        controller = controller.before_upload(hook);
    }

    let input_ref = create_node_ref::<html::Input>();

    let on_file_change = {
        let controller = controller.clone();
        move |ev: Event| {
            let input: HtmlInputElement = event_target(&ev);
            for task in controller.select(selected_files(&input)) {
                spawn_local(task);
            }
            // same file must trigger `change` again next time
            input.set_value("");
        }
    };

    let trigger_file_input = move |_| {
        if let Some(input) = input_ref.get() {
            input.click();
        }
    };

    let remove = {
        let controller = controller.clone();
        Callback::new(move |id: UploadId| {
            controller.remove(&id);
        })
    };
    let preview = Callback::new(move |record: UploadRecord<File>| controller.preview(&record));

    let trigger = match children {
        Some(children) => children().into_view(),
        None => view! { <button type="button" class="upload-button">"Upload File"</button> }.into_view(),
    };

    view! {
        <div class="upload-component">
            <div class="upload-input" on:click=trigger_file_input>
                {trigger}
                <input
                    type="file"
                    class="upload-file-input"
                    style="display:none"
                    node_ref=input_ref
                    accept=accept
                    multiple=multiple
                    on:change=on_file_change
                />
            </div>
            <UploadList file_list=registry.read_only() on_remove=remove on_preview=preview/>
        </div>
    }
}

/// Every file currently held by the picker, in selection order.
fn selected_files(input: &HtmlInputElement) -> Vec<File> {
    let Some(list) = input.files() else {
        return Vec::new();
    };
    (0..list.length()).filter_map(|i| list.get(i)).collect()
}
