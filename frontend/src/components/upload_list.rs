//! Read-only list of upload records.
//!
//! Never touches the registry; removal and preview go back through callbacks.

use leptos::*;
use web_sys::File;

use super::ProgressBar;
use crate::engine::UploadRegistry;
use crate::types::{UploadId, UploadRecord, UploadStatus};

#[component]
pub fn UploadList(
    file_list: ReadSignal<UploadRegistry<File>>,
    on_remove: Callback<UploadId>,
    on_preview: Callback<UploadRecord<File>>,
) -> impl IntoView {
    view! {
        <ul class="upload-list">
            <For
                each=move || file_list.with(|registry| registry.records().to_vec())
                key=row_key
                children=move |record| {
                    let id = record.id.clone();
                    let name = record.name.clone();
                    let size = format_size(record.size);

                    // rows stay mounted across ticks; only these two follow the registry
                    let state = {
                        let id = id.clone();
                        let fallback = (record.status, record.percent);
                        create_memo(move |_| {
                            file_list.with(|registry| row_state(registry, &id).unwrap_or(fallback))
                        })
                    };
                    let status = move || state.get().0;
                    let percent = Signal::derive(move || state.get().1);

                    let preview_id = id.clone();
                    let on_name_click = move |_| {
                        let current = file_list
                            .with_untracked(|registry| registry.get(&preview_id).cloned());
                        if let Some(current) = current {
                            on_preview.call(current);
                        }
                    };

                    view! {
                        <li class=move || format!("upload-list-item {}", status().css_class())>
                            <span class="file-name" on:click=on_name_click>
                                {name}
                                <span class="file-size">{size}</span>
                            </span>
                            <span class="file-status">{move || status_icon(status())}</span>
                            <span class="file-actions">
                                <button
                                    type="button"
                                    class="file-remove"
                                    on:click=move |_| on_remove.call(id.clone())
                                >
                                    "✕"
                                </button>
                            </span>
                            <Show when=move || status() == UploadStatus::Loading fallback=|| view! {}>
                                <ProgressBar percent=percent/>
                            </Show>
                        </li>
                    }
                }
            />
        </ul>
    }
}

fn row_key<F>(record: &UploadRecord<F>) -> UploadId {
    record.id.clone()
}

fn row_state<F>(registry: &UploadRegistry<F>, id: &UploadId) -> Option<(UploadStatus, u8)> {
    registry.get(id).map(|record| (record.status, record.percent))
}

pub fn status_icon(status: UploadStatus) -> &'static str {
    match status {
        UploadStatus::Ready => "⏳",
        UploadStatus::Loading => "📤",
        UploadStatus::Success => "✅",
        UploadStatus::Fail => "❌",
    }
}

/// `1536` -> `"1.5 KB"`.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    if bytes < 1024 {
        return format!("{} B", bytes);
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UploadPatch;

    #[test]
    fn test_row_key_is_stable_while_state_moves() {
        let id = UploadId::new("upload-1");
        let mut registry = UploadRegistry::<()>::seeded(vec![UploadRecord::seeded(
            id.clone(),
            "a.txt",
            10,
            UploadStatus::Ready,
        )]);
        let key_before = row_key(&registry.records()[0]);
        assert_eq!(row_state(&registry, &id), Some((UploadStatus::Ready, 0)));

        registry.apply(&id, UploadPatch::progress(45));
        assert_eq!(row_key(&registry.records()[0]), key_before);
        assert_eq!(row_state(&registry, &id), Some((UploadStatus::Loading, 45)));

        registry.remove(&id);
        assert_eq!(row_state(&registry, &id), None);
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1023), "1023 B");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(50 * 1024 * 1024), "50.0 MB");
        assert_eq!(format_size(3 * 1024 * 1024 * 1024 * 1024), "3072.0 GB");
    }

    #[test]
    fn test_every_status_has_an_icon() {
        for status in [
            UploadStatus::Ready,
            UploadStatus::Loading,
            UploadStatus::Success,
            UploadStatus::Fail,
        ] {
            assert!(!status_icon(status).is_empty());
        }
    }
}
