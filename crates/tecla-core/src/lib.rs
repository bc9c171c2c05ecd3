//! Layout resolution engine for the Tecla on-screen keyboard.
//!
//! Turns a declarative layout document into a grid of keys and resolves, for
//! an active mode and gesture, which text or edit action a key produces.

pub mod codepoint;
pub mod edit;
pub mod grid;
pub mod layout;
pub mod modes;
pub mod resolve;
pub mod settings;
pub mod variants;

pub use edit::{apply, plan_edit, EditOp, TextBuffer};
pub use grid::{build_grid, KeyGrid, KeyPos};
pub use layout::{Design, Direction, FunctionalEntry, Key, LayoutDocument, LayoutError};
pub use modes::{resolve_modes, ModeDescriptor, ModeError, ModeSet, ModeSource, ModeState};
pub use resolve::{output_of, resolve_key, resolve_primary, KeyResolution};
pub use variants::{collect_variants, Variant};
