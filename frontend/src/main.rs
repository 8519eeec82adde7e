//! Entry point for the demo WASM application

use leptos::*;
use uploadkit::DemoApp;

pub fn main() {
    console_error_panic_hook::set_once();
    _ = console_log::init_with_level(log::Level::Debug);

    log::info!("🦀 uploadkit demo starting");

    mount_to_body(|| view! { <DemoApp/> })
}
