//! LeakHunterX - launch countdown site
//!
//! "Coming soon" page with a live countdown to the launch instant, animated
//! particle backgrounds and a waitlist signup, built with Leptos and
//! WebAssembly.

#![recursion_limit = "512"]

pub mod app;
pub mod core;
pub mod ui;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::*;
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}
