//! Typing scripts for `teclatool type`.
//!
//! A script is a whitespace-separated list of steps:
//!
//! - `R:S`       tap the key at row `R`, slot `S`
//! - `R:S@N`     long-press the key and pick variant `N`
//! - `mode=M`    switch to mode `M`
//!
//! Steps are replayed through the full gesture engine on a virtual clock.

use tecla_core::{EditOp, KeyPos};
use tecla_session::{KeyboardSession, PointerEvent, SessionError, SessionResponse, TimerAction};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptStep {
    Tap(KeyPos),
    Pick { key: KeyPos, index: usize },
    Mode(i64),
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("bad step {0:?}: expected R:S, R:S@N or mode=M")]
    BadStep(String),
    #[error("step {step}: {source}")]
    Session {
        step: usize,
        #[source]
        source: SessionError,
    },
    #[error("step {step}: key {key} has no variant {index}")]
    NoVariant {
        step: usize,
        key: KeyPos,
        index: usize,
    },
}

pub fn parse_script(script: &str) -> Result<Vec<ScriptStep>, ScriptError> {
    script.split_whitespace().map(parse_step).collect()
}

fn parse_step(token: &str) -> Result<ScriptStep, ScriptError> {
    let bad = || ScriptError::BadStep(token.to_string());

    if let Some(mode) = token.strip_prefix("mode=") {
        return mode.parse().map(ScriptStep::Mode).map_err(|_| bad());
    }

    let (pos, pick) = match token.split_once('@') {
        Some((pos, index)) => (pos, Some(index.parse::<usize>().map_err(|_| bad())?)),
        None => (token, None),
    };
    let (row, slot) = pos.split_once(':').ok_or_else(bad)?;
    let key = KeyPos::new(
        row.parse().map_err(|_| bad())?,
        slot.parse().map_err(|_| bad())?,
    );
    Ok(match pick {
        Some(index) => ScriptStep::Pick { key, index },
        None => ScriptStep::Tap(key),
    })
}

/// Replays steps against a session and collects the typed text.
pub struct ScriptRunner<'a> {
    session: &'a mut KeyboardSession,
    now_ms: u64,
    buffer: String,
}

impl<'a> ScriptRunner<'a> {
    pub fn new(session: &'a mut KeyboardSession) -> Self {
        Self {
            session,
            now_ms: 0,
            buffer: String::new(),
        }
    }

    pub fn run(mut self, steps: &[ScriptStep]) -> Result<String, ScriptError> {
        for (i, step) in steps.iter().enumerate() {
            let step_no = i + 1;
            match *step {
                ScriptStep::Tap(key) => {
                    self.check_key(step_no, key)?;
                    self.press(key, 50);
                }
                ScriptStep::Pick { key, index } => {
                    self.check_key(step_no, key)?;
                    let hold = self.session.config().long_press_ms + 50;
                    self.press(key, hold);
                    let resp = self.session.handle_event(PointerEvent::SelectVariant { index });
                    if !resp.consumed {
                        return Err(ScriptError::NoVariant {
                            step: step_no,
                            key,
                            index,
                        });
                    }
                    self.apply(&resp);
                }
                ScriptStep::Mode(mode) => {
                    self.session
                        .switch_mode(mode)
                        .map_err(|source| ScriptError::Session {
                            step: step_no,
                            source,
                        })?;
                }
            }
        }
        Ok(self.buffer)
    }

    fn check_key(&self, step: usize, key: KeyPos) -> Result<(), ScriptError> {
        self.session
            .key(key)
            .map(|_| ())
            .map_err(|source| ScriptError::Session { step, source })
    }

    /// Press, let any scheduled timer fire if the hold outlasts it, release.
    fn press(&mut self, key: KeyPos, hold_ms: u64) {
        self.now_ms += 100;
        let down = self.session.handle_event(PointerEvent::PressStart {
            key,
            at_ms: self.now_ms,
        });
        self.apply(&down);
        let release_at = self.now_ms + hold_ms;

        for timer in &down.timers {
            if let TimerAction::Schedule {
                key,
                token,
                deadline_ms,
            } = *timer
            {
                if deadline_ms <= release_at {
                    let fired = self.session.handle_event(PointerEvent::TimerFired {
                        key,
                        token,
                        at_ms: deadline_ms,
                    });
                    self.apply(&fired);
                }
            }
        }

        self.now_ms = release_at;
        let up = self.session.handle_event(PointerEvent::PressEnd {
            key,
            at_ms: self.now_ms,
        });
        self.apply(&up);
    }

    fn apply(&mut self, resp: &SessionResponse) {
        for op in &resp.edits {
            op.apply_to(&mut self.buffer);
        }
    }
}

/// Describe an edit for diagnostics output.
pub fn describe_edit(op: &EditOp) -> String {
    match op {
        EditOp::Insert(text) => format!("insert {text:?}"),
        EditOp::Delete(n) => format!("delete {n}"),
    }
}
