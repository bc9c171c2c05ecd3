use tecla_core::modes::ModeError;
use tecla_core::settings::Settings;
use tecla_core::{EditOp, KeyPos};

/// Per-session tunables. `Default` reads the global settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Press duration after which a press becomes a long-press.
    pub long_press_ms: u64,
    /// Label for keys with no text at all.
    pub placeholder: String,
    /// Design index to load from a multi-design document.
    pub design: usize,
}

impl SessionConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            long_press_ms: settings.gesture.long_press_ms,
            placeholder: settings.labels.placeholder.clone(),
            design: settings.layout.design,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::from_settings(tecla_core::settings::settings())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("unknown mode: {0}")]
    UnknownMode(i64),
    #[error("no key at {0}")]
    NoSuchKey(KeyPos),
}

impl From<ModeError> for SessionError {
    fn from(e: ModeError) -> Self {
        match e {
            ModeError::Unknown(id) => SessionError::UnknownMode(id),
        }
    }
}

/// Input events from the host UI. Times are host milliseconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerEvent {
    /// Pointer-down or touch-start on a key.
    PressStart { key: KeyPos, at_ms: u64 },
    /// Pointer-up or touch-end on a key.
    PressEnd { key: KeyPos, at_ms: u64 },
    /// Pointer left the key (or the touch was cancelled).
    Leave { key: KeyPos, at_ms: u64 },
    /// A long-press timer scheduled by a previous response elapsed.
    TimerFired { key: KeyPos, token: u64, at_ms: u64 },
    /// Press-down somewhere that is neither a key nor the variant surface.
    PressOutside { at_ms: u64 },
    /// An option on the open variant surface was chosen.
    SelectVariant { index: usize },
    /// The host closed the variant surface itself.
    DismissVariants,
}

/// Variant surface instruction; exactly one of three states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceAction {
    /// Leave the surface as it is.
    Keep,
    /// Open (or replace) the surface anchored at `anchor`.
    Show {
        anchor: KeyPos,
        options: Vec<String>,
    },
    /// Close the surface.
    Hide,
}

/// Long-press timer bookkeeping the host must mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    /// Call back with `PointerEvent::TimerFired` at `deadline_ms`.
    Schedule {
        key: KeyPos,
        token: u64,
        deadline_ms: u64,
    },
    /// Drop the pending timer with this token.
    Cancel { token: u64 },
}

/// Response from `handle_event`, `tick` and `switch_mode`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionResponse {
    pub consumed: bool,
    pub edits: Vec<EditOp>,
    pub surface: SurfaceAction,
    pub timers: Vec<TimerAction>,
    /// Every key label must be re-read (mode changed).
    pub relabel: bool,
}

impl SessionResponse {
    pub(crate) fn not_consumed() -> Self {
        Self {
            consumed: false,
            edits: Vec::new(),
            surface: SurfaceAction::Keep,
            timers: Vec::new(),
            relabel: false,
        }
    }

    pub(crate) fn consumed() -> Self {
        Self {
            consumed: true,
            ..Self::not_consumed()
        }
    }

    /// Whether the host has nothing to do.
    pub fn is_noop(&self) -> bool {
        self.edits.is_empty()
            && self.surface == SurfaceAction::Keep
            && self.timers.is_empty()
            && !self.relabel
    }
}
