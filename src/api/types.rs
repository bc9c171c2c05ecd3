use tecla_core::layout::FailureKind;
use tecla_core::{EditOp, KeyPos, LayoutError};
use tecla_session::{PointerEvent, SessionError, SessionResponse, SurfaceAction, TimerAction};

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum TeclaError {
    #[error("layout document unavailable: {msg}")]
    DocumentUnavailable { msg: String },
    #[error("invalid data: {msg}")]
    InvalidData { msg: String },
    #[error("IO error: {msg}")]
    Io { msg: String },
}

impl From<LayoutError> for TeclaError {
    fn from(e: LayoutError) -> Self {
        match e.kind() {
            FailureKind::DocumentUnavailable => TeclaError::DocumentUnavailable {
                msg: e.to_string(),
            },
        }
    }
}

impl From<SessionError> for TeclaError {
    fn from(e: SessionError) -> Self {
        TeclaError::InvalidData { msg: e.to_string() }
    }
}

// ---------------------------------------------------------------------------
// Records (value types, copied across FFI boundary)
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, uniffi::Record)]
pub struct TeclaKeyPos {
    pub row: u32,
    pub slot: u32,
}

impl From<KeyPos> for TeclaKeyPos {
    fn from(pos: KeyPos) -> Self {
        Self {
            row: pos.row as u32,
            slot: pos.slot as u32,
        }
    }
}

impl From<TeclaKeyPos> for KeyPos {
    fn from(pos: TeclaKeyPos) -> Self {
        KeyPos::new(pos.row as usize, pos.slot as usize)
    }
}

/// One rendered key.
#[derive(Clone, Debug, uniffi::Record)]
pub struct TeclaKey {
    pub pos: TeclaKeyPos,
    pub label: String,
}

#[derive(Clone, Debug, uniffi::Record)]
pub struct TeclaMode {
    pub id: i64,
    pub name: String,
}

/// Event-driven response from handle_event / tick / switch_mode.
#[derive(Debug, uniffi::Record)]
pub struct TeclaResponse {
    pub consumed: bool,
    pub events: Vec<TeclaEvent>,
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq, uniffi::Enum)]
pub enum TeclaEdit {
    Insert { text: String },
    DeleteBackward { count: u32 },
}

impl From<EditOp> for TeclaEdit {
    fn from(op: EditOp) -> Self {
        match op {
            EditOp::Insert(text) => TeclaEdit::Insert { text },
            EditOp::Delete(count) => TeclaEdit::DeleteBackward {
                count: u32::try_from(count).unwrap_or(u32::MAX),
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, uniffi::Enum)]
pub enum TeclaEvent {
    Edit {
        edit: TeclaEdit,
    },
    ShowVariants {
        anchor: TeclaKeyPos,
        options: Vec<String>,
    },
    HideVariants,
    ScheduleTimer {
        key: TeclaKeyPos,
        token: u64,
        deadline_ms: u64,
    },
    CancelTimer {
        token: u64,
    },
    /// Every label changed; call `rows()` again.
    Relabel,
}

#[derive(Clone, Debug, uniffi::Enum)]
pub enum TeclaPointerEvent {
    PressStart { key: TeclaKeyPos, at_ms: u64 },
    PressEnd { key: TeclaKeyPos, at_ms: u64 },
    Leave { key: TeclaKeyPos, at_ms: u64 },
    TimerFired { key: TeclaKeyPos, token: u64, at_ms: u64 },
    PressOutside { at_ms: u64 },
    SelectVariant { index: u32 },
    DismissVariants,
}

impl From<TeclaPointerEvent> for PointerEvent {
    fn from(event: TeclaPointerEvent) -> Self {
        match event {
            TeclaPointerEvent::PressStart { key, at_ms } => PointerEvent::PressStart {
                key: key.into(),
                at_ms,
            },
            TeclaPointerEvent::PressEnd { key, at_ms } => PointerEvent::PressEnd {
                key: key.into(),
                at_ms,
            },
            TeclaPointerEvent::Leave { key, at_ms } => PointerEvent::Leave {
                key: key.into(),
                at_ms,
            },
            TeclaPointerEvent::TimerFired { key, token, at_ms } => PointerEvent::TimerFired {
                key: key.into(),
                token,
                at_ms,
            },
            TeclaPointerEvent::PressOutside { at_ms } => PointerEvent::PressOutside { at_ms },
            TeclaPointerEvent::SelectVariant { index } => PointerEvent::SelectVariant {
                index: index as usize,
            },
            TeclaPointerEvent::DismissVariants => PointerEvent::DismissVariants,
        }
    }
}

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

/// Flatten a session response into the ordered event list hosts replay.
pub(super) fn convert_to_events(resp: SessionResponse) -> TeclaResponse {
    let mut events = Vec::new();

    // 1. Timers, in session order (a cancel always precedes its replacement)
    for timer in resp.timers {
        events.push(match timer {
            TimerAction::Cancel { token } => TeclaEvent::CancelTimer { token },
            TimerAction::Schedule {
                key,
                token,
                deadline_ms,
            } => TeclaEvent::ScheduleTimer {
                key: key.into(),
                token,
                deadline_ms,
            },
        });
    }

    // 2. Buffer edits
    events.extend(resp.edits.into_iter().map(|op| TeclaEvent::Edit { edit: op.into() }));

    // 3. Variant surface
    match resp.surface {
        SurfaceAction::Show { anchor, options } => events.push(TeclaEvent::ShowVariants {
            anchor: anchor.into(),
            options,
        }),
        SurfaceAction::Hide => events.push(TeclaEvent::HideVariants),
        SurfaceAction::Keep => {}
    }

    // 4. Relabel
    if resp.relabel {
        events.push(TeclaEvent::Relabel);
    }

    TeclaResponse {
        consumed: resp.consumed,
        events,
    }
}
