//! CryptoPulse Web Frontend
//!
//! Leptos-based WASM frontend. Mounts once `/pulse-config.json` has loaded;
//! without it the page explains what is missing instead.

mod api;
mod app;
mod components;
mod pages;

pub use app::App;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use crate::components::ConfigError;

/// WASM entry point
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();

    wasm_bindgen_futures::spawn_local(async {
        match api::boot().await {
            Ok((config, clients)) => {
                leptos::mount::mount_to_body(move || view! { <App config=config clients=clients /> });
            }
            Err(e) => {
                let message = e.to_string();
                leptos::mount::mount_to_body(move || view! { <ConfigError message=message /> });
            }
        }
    });
}
