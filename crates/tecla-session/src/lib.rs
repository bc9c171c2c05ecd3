//! Stateful keyboard session: active mode, gesture disambiguation and the
//! variant surface.
//!
//! `KeyboardSession` owns one loaded design and processes pointer events,
//! returning responses that the host UI turns into buffer edits, timers and
//! surface updates. Everything runs synchronously on the caller's thread.

mod event_handlers;
mod gesture;
mod surface;
mod types;

#[cfg(test)]
mod tests;

use std::collections::HashMap;

use tecla_core::{
    build_grid, collect_variants, plan_edit, resolve_key, resolve_modes, Design, EditOp, Key,
    KeyGrid, KeyPos, LayoutDocument, LayoutError, ModeSet, ModeState, Variant,
};

pub use surface::{SurfaceOption, VariantSurface};
pub use types::{
    PointerEvent, SessionConfig, SessionError, SessionResponse, SurfaceAction, TimerAction,
};

use gesture::GestureState;

pub struct KeyboardSession {
    design: Design,
    grid: KeyGrid,
    modes: ModeState,
    config: SessionConfig,

    /// Keys not present here are idle.
    gestures: HashMap<KeyPos, GestureState>,
    surface: Option<VariantSurface>,
    next_token: u64,
}

impl KeyboardSession {
    pub fn new(design: Design, config: SessionConfig) -> Self {
        let grid = build_grid(&design.keys);
        let modes = ModeState::new(resolve_modes(&design));
        Self {
            design,
            grid,
            modes,
            config,
            gestures: HashMap::new(),
            surface: None,
            next_token: 0,
        }
    }

    /// Load the design selected by `config.design`.
    pub fn from_document(doc: LayoutDocument, config: SessionConfig) -> Result<Self, LayoutError> {
        let design = doc.into_design(config.design)?;
        Ok(Self::new(design, config))
    }

    pub fn from_json(json: &str, config: SessionConfig) -> Result<Self, LayoutError> {
        Self::from_document(LayoutDocument::from_json_str(json)?, config)
    }

    pub fn design(&self) -> &Design {
        &self.design
    }

    pub fn grid(&self) -> &KeyGrid {
        &self.grid
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn modes(&self) -> &ModeSet {
        self.modes.set()
    }

    pub fn active_mode(&self) -> i64 {
        self.modes.active()
    }

    /// The open variant surface, if any.
    pub fn surface(&self) -> Option<&VariantSurface> {
        self.surface.as_ref()
    }

    pub fn key(&self, pos: KeyPos) -> Result<&Key, SessionError> {
        self.grid
            .key_index(pos)
            .and_then(|i| self.design.keys.get(i))
            .ok_or(SessionError::NoSuchKey(pos))
    }

    /// Current label of one key.
    pub fn label(&self, pos: KeyPos) -> Result<String, SessionError> {
        let key = self.key(pos)?;
        Ok(resolve_key(key, self.active_mode(), &self.config.placeholder).label)
    }

    /// Labels of every key, row by row. Always a full re-resolution.
    pub fn labels(&self) -> Vec<Vec<String>> {
        let mode = self.active_mode();
        self.grid
            .resolve(&self.design.keys)
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|key| resolve_key(key, mode, &self.config.placeholder).label)
                    .collect()
            })
            .collect()
    }

    /// The edit a tap on `pos` produces, without gesture bookkeeping.
    ///
    /// A key with no primary entry still types its visible label.
    pub fn tap(&self, pos: KeyPos) -> Result<Option<EditOp>, SessionError> {
        let key = self.key(pos)?;
        let resolved = resolve_key(key, self.active_mode(), &self.config.placeholder);
        Ok(match resolved.entry {
            Some(entry) => plan_edit(Some(entry), &resolved.label),
            None if resolved.label.is_empty() => None,
            None => Some(EditOp::Insert(resolved.label)),
        })
    }

    /// Long-press candidates for `pos`, without opening a surface.
    pub fn variants(&self, pos: KeyPos) -> Result<Vec<Variant<'_>>, SessionError> {
        Ok(collect_variants(self.key(pos)?))
    }

    /// Switch the active mode and request a full relabel.
    pub fn switch_mode(&mut self, mode: i64) -> Result<SessionResponse, SessionError> {
        self.modes.switch_to(mode)?;
        let mut resp = SessionResponse::consumed();
        resp.relabel = true;
        Ok(resp)
    }
}
