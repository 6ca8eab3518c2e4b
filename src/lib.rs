#[cfg(any(feature = "ssr", feature = "hydrate"))]
pub mod app;
pub mod blog;
pub mod config;
pub mod content;
pub mod manifest;
#[cfg(any(feature = "ssr", feature = "rss"))]
mod markdown;
pub mod metric;
pub mod projects;
pub mod reading;
#[cfg(feature = "rss")]
pub mod rss;
pub mod security;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::*;
    console_error_panic_hook::set_once();
    // a second init (e.g. hot reload) is harmless
    let _ = console_log::init_with_level(log::Level::Info);
    log::debug!("hydrating {}", env!("CARGO_PKG_NAME"));
    leptos::mount::hydrate_body(App);
}
