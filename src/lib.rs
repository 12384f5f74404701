//! Waitlist landing page
//!
//! A server-rendered, hydrated landing page that collects waitlist signups,
//! keeps a persisted signup counter and reports engagement analytics,
//! built with Leptos and WebAssembly.

#![recursion_limit = "1024"]

pub mod app;
pub mod core;
pub mod ui;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::*;
    use leptos::prelude::*;

    console_error_panic_hook::set_once();

    let config = crate::ui::browser::read_embedded_config();
    leptos::mount::hydrate_body(move || {
        provide_context(config.clone());
        view! { <App/> }
    });
}
