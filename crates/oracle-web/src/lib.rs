//! crystal-ball Web Frontend
//!
//! Leptos-based WASM frontend: the crystal ball page talking to the
//! oracle server's REST API.

mod api;
mod app;
mod components;
mod countdown;
mod pages;
mod sound;

pub use app::App;

use wasm_bindgen::prelude::*;

/// WASM entry point
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(App);
}
