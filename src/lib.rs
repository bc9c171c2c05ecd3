//! Host boundary for the Tecla keyboard engine.
//!
//! Frontends (Swift, Kotlin) load a layout document through `TeclaKeyboard`,
//! forward pointer events, and apply the returned `TeclaEvent`s to their
//! text widget and variant popup.

uniffi::setup_scaffolding!();

mod api;
mod trace_init;

pub use api::*;
pub use tecla_core::settings;
