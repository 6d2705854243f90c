//! Reusable UI components.

pub mod footer;
pub mod navigation;
pub mod route_guard;
pub mod student_form;
pub mod toast;
