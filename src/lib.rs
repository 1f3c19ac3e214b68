//! Portfolio Admin - session and route authorization for the admin pages
//!
//! The `core` module holds the session store, the authentication predicate,
//! route guards, the cross-tab change bus and the login/logout/register
//! flows. The `ui` module wires them into Leptos components.

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
