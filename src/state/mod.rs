//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by domain (`auth`, `toasts`) so individual components can
//! depend on small focused models. Structs are plain data; reactivity comes
//! from wrapping them in `RwSignal` at the context layer.

pub mod auth;
pub mod toasts;
