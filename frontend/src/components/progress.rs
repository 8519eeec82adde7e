use leptos::*;

/// Horizontal bar filled to `percent`.
#[component]
pub fn ProgressBar(
    #[prop(into)] percent: MaybeSignal<u8>,
    #[prop(default = true)] show_text: bool,
) -> impl IntoView {
    let percent = move || percent.get().min(100);
    view! {
        <div class="progress-bar">
            <div class="progress-fill" style=move || format!("width: {}%;", percent())>
                <Show when=move || show_text fallback=|| view! {}>
                    <span class="progress-text">{move || format!("{}%", percent())}</span>
                </Show>
            </div>
        </div>
    }
}
