//! # sis-client
//!
//! Leptos + WASM front-end for a school Student Information System:
//! authentication (login, signup, password reset), role-gated views, a
//! student roster, and a student-creation form. Data and authentication
//! live in a hosted backend (auth endpoints plus row-level-security-
//! protected tables); this crate owns only the client-side session/role
//! state machine and the UI around it.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;

/// Browser entry point: wired up by the WASM loader after the bundle
/// downloads.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(crate::app::App);
}
