//! Per-key press state machine: `Idle → Pressing → (LongPressFired | Idle)`.
//!
//! A press cycle ends in exactly one of tap or long-press. Timers are
//! identified by a token so a late fire from an earlier cycle is ignored,
//! and every early exit emits an explicit cancel.

use tracing::debug;

use tecla_core::KeyPos;

use super::types::{SessionResponse, TimerAction};
use super::KeyboardSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum GestureState {
    Pressing { token: u64, deadline_ms: u64 },
    /// Terminal for the cycle; the release only returns the key to idle.
    LongPressFired,
}

impl KeyboardSession {
    /// Whether `pos` is in the middle of a press cycle.
    pub fn is_pressing(&self, pos: KeyPos) -> bool {
        matches!(self.gestures.get(&pos), Some(GestureState::Pressing { .. }))
    }

    pub(crate) fn begin_press(&mut self, key: KeyPos, at_ms: u64, resp: &mut SessionResponse) {
        if let Some(GestureState::Pressing { token, .. }) = self.gestures.get(&key) {
            resp.timers.push(TimerAction::Cancel { token: *token });
        }
        self.next_token += 1;
        let token = self.next_token;
        let deadline_ms = at_ms.saturating_add(self.config.long_press_ms);
        self.gestures.insert(key, GestureState::Pressing { token, deadline_ms });
        resp.timers.push(TimerAction::Schedule {
            key,
            token,
            deadline_ms,
        });
    }

    /// Release or leave. Before the deadline this is a tap; at or after it
    /// (timer not yet delivered) it is the long-press instead.
    pub(crate) fn end_press(&mut self, key: KeyPos, at_ms: u64, resp: &mut SessionResponse) {
        match self.gestures.remove(&key) {
            Some(GestureState::Pressing { token, deadline_ms }) => {
                resp.timers.push(TimerAction::Cancel { token });
                if at_ms >= deadline_ms {
                    debug!(%key, "release after deadline, firing long-press");
                    self.fire_long_press(key, resp);
                } else {
                    self.apply_tap(key, resp);
                }
            }
            Some(GestureState::LongPressFired) => {}
            None => resp.consumed = false,
        }
    }

    pub(crate) fn timer_fired(&mut self, key: KeyPos, token: u64, resp: &mut SessionResponse) {
        match self.gestures.get(&key) {
            Some(GestureState::Pressing { token: current, .. }) if *current == token => {
                self.gestures.insert(key, GestureState::LongPressFired);
                self.fire_long_press(key, resp);
            }
            _ => {
                debug!(%key, token, "ignoring stale long-press timer");
                resp.consumed = false;
            }
        }
    }

    /// Fire every long-press whose deadline has passed, for hosts that poll
    /// instead of scheduling timers.
    pub fn tick(&mut self, now_ms: u64) -> SessionResponse {
        let mut due: Vec<(u64, KeyPos)> = self
            .gestures
            .iter()
            .filter_map(|(key, state)| match state {
                GestureState::Pressing { deadline_ms, .. } if *deadline_ms <= now_ms => {
                    Some((*deadline_ms, *key))
                }
                _ => None,
            })
            .collect();
        if due.is_empty() {
            return SessionResponse::not_consumed();
        }
        due.sort();

        let mut resp = SessionResponse::consumed();
        for (_, key) in due {
            if let Some(GestureState::Pressing { token, .. }) = self.gestures.get(&key) {
                resp.timers.push(TimerAction::Cancel { token: *token });
            }
            self.gestures.insert(key, GestureState::LongPressFired);
            self.fire_long_press(key, &mut resp);
        }
        resp
    }

    fn apply_tap(&mut self, key: KeyPos, resp: &mut SessionResponse) {
        match self.tap(key) {
            Ok(Some(op)) => {
                debug!(%key, ?op, "tap");
                resp.edits.push(op);
            }
            Ok(None) => debug!(%key, "tap with no candidate"),
            Err(e) => debug!("tap on missing key: {e}"),
        }
    }
}
