//! Backend client layer for the hosted auth + database service.
//!
//! `session` speaks to the auth endpoints (token grants, sign-up, sign-out,
//! password recovery) and owns session persistence plus change
//! notifications. `rest` covers the row-level-security-protected tables
//! (`user_roles`, `students`). `controller` is the bridge that turns
//! session changes into `AuthState` updates for the UI.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): inert stubs, since these endpoints are only
//! meaningful in the browser.

pub mod config;
pub mod controller;
pub mod rest;
pub mod session;
pub mod types;
