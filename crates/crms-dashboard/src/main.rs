//! CRCRMS dashboard

mod api;
mod app;
mod components;
mod files;
mod pages;
mod session;
mod types;

use leptos::*;

fn main() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();

    mount_to_body(|| {
        view! {
            <app::App/>
        }
    });
}
