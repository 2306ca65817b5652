//! # client
//!
//! Leptos + WASM frontend for linking unsorted "lake" files into a library
//! hierarchy with per-file metadata.
//!
//! This crate contains pages, components, application state, REST types,
//! and the auth handoff used by the media player login proxy.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point. Hydrates the server-rendered body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
