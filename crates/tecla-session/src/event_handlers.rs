use tracing::{debug, debug_span};

use super::types::{PointerEvent, SessionResponse};
use super::KeyboardSession;

impl KeyboardSession {
    /// Process one host event. Returns what the host should do.
    pub fn handle_event(&mut self, event: PointerEvent) -> SessionResponse {
        let _span = debug_span!("handle_event", ?event).entered();
        let mut resp = SessionResponse::consumed();

        match event {
            PointerEvent::PressStart { key, at_ms } => {
                if self.grid.key_index(key).is_none() {
                    debug!(%key, "press on unknown key");
                    return SessionResponse::not_consumed();
                }
                self.press_down_elsewhere(Some(key), &mut resp);
                self.begin_press(key, at_ms, &mut resp);
            }

            PointerEvent::PressEnd { key, at_ms } | PointerEvent::Leave { key, at_ms } => {
                self.end_press(key, at_ms, &mut resp);
            }

            PointerEvent::TimerFired { key, token, .. } => {
                self.timer_fired(key, token, &mut resp);
            }

            PointerEvent::PressOutside { .. } => {
                if self.surface.is_none() {
                    return SessionResponse::not_consumed();
                }
                self.press_down_elsewhere(None, &mut resp);
            }

            PointerEvent::SelectVariant { index } => self.select_variant(index, &mut resp),

            PointerEvent::DismissVariants => {
                if self.surface.is_none() {
                    return SessionResponse::not_consumed();
                }
                self.dismiss_surface(&mut resp);
            }
        }

        resp
    }
}
