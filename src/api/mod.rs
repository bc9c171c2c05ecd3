//! UniFFI export layer: Swift/Kotlin bindings for the Tecla engine.
//!
//! Each public type here maps to a generated class, struct, or enum.

mod keyboard;
mod types;

pub use keyboard::TeclaKeyboard;
pub use types::{
    TeclaEdit, TeclaError, TeclaEvent, TeclaKey, TeclaKeyPos, TeclaMode, TeclaPointerEvent,
    TeclaResponse,
};

use std::path::Path;

// ---------------------------------------------------------------------------
// Top-level functions
// ---------------------------------------------------------------------------

#[uniffi::export]
fn engine_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Decode an encoded payload (hex code points, or literal text).
#[uniffi::export]
fn decode_payload(payload: String) -> String {
    tecla_core::codepoint::decode(&payload)
}

#[uniffi::export]
fn settings_load_config(path: String) -> Result<(), TeclaError> {
    let content = std::fs::read_to_string(&path).map_err(|e| TeclaError::Io {
        msg: format!("{path}: {e}"),
    })?;
    crate::settings::init_custom(content)
        .map_err(|e| TeclaError::InvalidData { msg: e.to_string() })?;
    Ok(())
}

#[uniffi::export]
fn settings_default_config() -> String {
    crate::settings::DEFAULT_SETTINGS_TOML.to_string()
}

#[uniffi::export]
fn trace_init(log_dir: String) {
    crate::trace_init::init_tracing(Path::new(&log_dir));
}
