use std::path::Path;
use std::sync::{Arc, Mutex};

use tecla_core::{KeyPos, LayoutDocument};
use tecla_session::{KeyboardSession, SessionConfig};
use tracing::{debug, debug_span};

use super::types::{
    convert_to_events, TeclaEdit, TeclaError, TeclaKey, TeclaKeyPos, TeclaMode,
    TeclaPointerEvent, TeclaResponse,
};

#[derive(uniffi::Object)]
pub struct TeclaKeyboard {
    session: Mutex<KeyboardSession>,
}

impl TeclaKeyboard {
    fn build(doc: LayoutDocument, design: Option<u32>) -> Result<Arc<Self>, TeclaError> {
        let mut config = SessionConfig::default();
        if let Some(design) = design {
            config.design = design as usize;
        }
        let _span = debug_span!("keyboard_load", design = config.design).entered();
        let session = KeyboardSession::from_document(doc, config)?;
        debug!(
            keys = session.grid().key_count(),
            modes = session.modes().modes().len(),
            "keyboard ready"
        );
        Ok(Arc::new(Self {
            session: Mutex::new(session),
        }))
    }
}

#[uniffi::export]
impl TeclaKeyboard {
    /// Load a layout from JSON text. `design` overrides the settings default.
    #[uniffi::constructor]
    pub fn from_json(json: String, design: Option<u32>) -> Result<Arc<Self>, TeclaError> {
        Self::build(LayoutDocument::from_json_str(&json)?, design)
    }

    #[uniffi::constructor]
    pub fn open(path: String, design: Option<u32>) -> Result<Arc<Self>, TeclaError> {
        Self::build(LayoutDocument::open(Path::new(&path))?, design)
    }

    /// Every key with its current label, row by row.
    pub fn rows(&self) -> Vec<Vec<TeclaKey>> {
        let session = self.session.lock().unwrap();
        session
            .labels()
            .into_iter()
            .enumerate()
            .map(|(row, labels)| {
                labels
                    .into_iter()
                    .enumerate()
                    .map(|(slot, label)| TeclaKey {
                        pos: KeyPos::new(row, slot).into(),
                        label,
                    })
                    .collect()
            })
            .collect()
    }

    /// Switchable modes; empty for a modeless layout.
    pub fn modes(&self) -> Vec<TeclaMode> {
        let session = self.session.lock().unwrap();
        session
            .modes()
            .modes()
            .iter()
            .map(|m| TeclaMode {
                id: m.id,
                name: m.name.clone(),
            })
            .collect()
    }

    pub fn active_mode(&self) -> i64 {
        self.session.lock().unwrap().active_mode()
    }

    pub fn switch_mode(&self, mode: i64) -> Result<TeclaResponse, TeclaError> {
        let resp = self.session.lock().unwrap().switch_mode(mode)?;
        Ok(convert_to_events(resp))
    }

    pub fn handle_event(&self, event: TeclaPointerEvent) -> TeclaResponse {
        let resp = self.session.lock().unwrap().handle_event(event.into());
        convert_to_events(resp)
    }

    /// Fire due long-presses; for hosts without their own timers.
    pub fn tick(&self, now_ms: u64) -> TeclaResponse {
        let resp = self.session.lock().unwrap().tick(now_ms);
        convert_to_events(resp)
    }

    /// The edit a tap on `key` would produce, without touching gesture state.
    pub fn tap(&self, key: TeclaKeyPos) -> Result<Option<TeclaEdit>, TeclaError> {
        let op = self.session.lock().unwrap().tap(key.into())?;
        Ok(op.map(TeclaEdit::from))
    }

    /// Display texts of the long-press variants of `key`.
    pub fn variants(&self, key: TeclaKeyPos) -> Result<Vec<String>, TeclaError> {
        let session = self.session.lock().unwrap();
        let variants = session.variants(key.into())?;
        Ok(variants.into_iter().map(|v| v.display_text).collect())
    }
}
