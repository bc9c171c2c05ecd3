//! Property-based tests for the gesture and surface state machine.
//!
//! Random pointer sequences are replayed against a session while a model of
//! the host's timer table is kept in step; structural invariants are checked
//! after every event.

use std::collections::HashMap;

use proptest::prelude::*;

use tecla_core::KeyPos;

use super::*;
use crate::{SurfaceAction, TimerAction};

const KEYS: [KeyPos; 4] = [KEY_A, KEY_B, KEY_BACKSPACE, KEY_BLANK];

// ---------------------------------------------------------------------------
// Step enum: one host-side occurrence
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
enum Step {
    Wait(u64),
    Press(usize),
    Release(usize),
    Leave(usize),
    /// Deliver the live timer of this key, if any.
    Fire(usize),
    /// Deliver a token that was never issued.
    FireBogus(usize),
    Tick,
    Outside,
    Select(usize),
    Dismiss,
}

fn arb_key() -> impl Strategy<Value = usize> {
    0..KEYS.len()
}

fn arb_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        10 => (0u64..500).prop_map(Step::Wait),
        12 => arb_key().prop_map(Step::Press),
        10 => arb_key().prop_map(Step::Release),
        3 => arb_key().prop_map(Step::Leave),
        6 => arb_key().prop_map(Step::Fire),
        1 => arb_key().prop_map(Step::FireBogus),
        3 => Just(Step::Tick),
        2 => Just(Step::Outside),
        3 => (0usize..6).prop_map(Step::Select),
        1 => Just(Step::Dismiss),
    ]
}

// ---------------------------------------------------------------------------
// Host model
// ---------------------------------------------------------------------------

#[derive(Default)]
struct Host {
    now_ms: u64,
    /// Pending timers by token.
    timers: HashMap<u64, KeyPos>,
    /// Tap or long-press outcomes seen in each key's current cycle.
    outcomes: HashMap<KeyPos, u32>,
}

impl Host {
    fn event_for(&mut self, step: &Step) -> Option<PointerEvent> {
        let at_ms = self.now_ms;
        let event = match *step {
            Step::Wait(ms) => {
                self.now_ms += ms;
                return None;
            }
            Step::Press(k) => {
                self.outcomes.insert(KEYS[k], 0);
                PointerEvent::PressStart { key: KEYS[k], at_ms }
            }
            Step::Release(k) => PointerEvent::PressEnd { key: KEYS[k], at_ms },
            Step::Leave(k) => PointerEvent::Leave { key: KEYS[k], at_ms },
            Step::Fire(k) => {
                let token = self
                    .timers
                    .iter()
                    .find(|(_, key)| **key == KEYS[k])
                    .map(|(token, _)| *token)?;
                self.timers.remove(&token);
                PointerEvent::TimerFired {
                    key: KEYS[k],
                    token,
                    at_ms,
                }
            }
            Step::FireBogus(k) => PointerEvent::TimerFired {
                key: KEYS[k],
                token: u64::MAX,
                at_ms,
            },
            Step::Tick => return None,
            Step::Outside => PointerEvent::PressOutside { at_ms },
            Step::Select(index) => PointerEvent::SelectVariant { index },
            Step::Dismiss => PointerEvent::DismissVariants,
        };
        Some(event)
    }

    fn absorb(&mut self, step: &Step, resp: &SessionResponse) {
        for timer in &resp.timers {
            match *timer {
                TimerAction::Schedule { key, token, .. } => {
                    assert!(
                        self.timers.insert(token, key).is_none(),
                        "token {token} scheduled twice after {step:?}"
                    );
                }
                TimerAction::Cancel { token } => {
                    assert!(
                        self.timers.remove(&token).is_some(),
                        "cancel of unknown token {token} after {step:?}"
                    );
                }
            }
        }

        if let Step::Release(k) | Step::Leave(k) = *step {
            if !resp.edits.is_empty() {
                *self.outcomes.entry(KEYS[k]).or_default() += 1;
            }
        }
        if let SurfaceAction::Show { anchor, .. } = &resp.surface {
            *self.outcomes.entry(*anchor).or_default() += 1;
        }
    }
}

// ---------------------------------------------------------------------------
// Invariant checks, run after every event
// ---------------------------------------------------------------------------

fn assert_invariants(session: &KeyboardSession, host: &Host, resp: &SessionResponse, step: &Step) {
    // 1. A press cycle ends in a tap or a long-press, never both.
    for (key, count) in &host.outcomes {
        assert!(
            *count <= 1,
            "key {key} produced {count} outcomes in one cycle after {step:?}"
        );
    }

    // 2. Exactly the pressing keys have a live timer.
    let pressing = KEYS.iter().filter(|k| session.is_pressing(**k)).count();
    assert_eq!(
        host.timers.len(),
        pressing,
        "live timers {:?} out of step after {step:?}",
        host.timers
    );

    // 3. A shown surface always has options and matches session state.
    if let SurfaceAction::Show { anchor, options } = &resp.surface {
        assert!(!options.is_empty(), "empty surface shown after {step:?}");
        assert_eq!(session.surface().map(|s| s.anchor), Some(*anchor));
    }
    if resp.surface == SurfaceAction::Hide {
        assert!(session.surface().is_none(), "Hide with open surface after {step:?}");
    }

    // 4. Only releases, leaves and selections edit the buffer.
    if !resp.edits.is_empty() {
        assert!(
            matches!(step, Step::Release(_) | Step::Leave(_) | Step::Select(_)),
            "unexpected edit after {step:?}"
        );
        assert_eq!(resp.edits.len(), 1);
    }

    // 5. Stale or bogus timers change nothing.
    if matches!(step, Step::FireBogus(_)) {
        assert!(!resp.consumed && resp.is_noop());
    }
}

// ---------------------------------------------------------------------------
// proptest entry point
// ---------------------------------------------------------------------------

fn run(mut session: KeyboardSession, steps: &[Step]) {
    let mut host = Host::default();
    for step in steps {
        let resp = match step {
            Step::Tick => session.tick(host.now_ms),
            _ => match host.event_for(step) {
                Some(event) => session.handle_event(event),
                None => continue,
            },
        };
        host.absorb(step, &resp);
        assert_invariants(&session, &host, &resp, step);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn gesture_invariants_hold(steps in prop::collection::vec(arb_step(), 1..120)) {
        run(demo_session(), &steps);
    }

    #[test]
    fn gesture_invariants_hold_in_every_mode(
        mode in 0i64..3,
        steps in prop::collection::vec(arb_step(), 1..60),
    ) {
        let mut session = demo_session();
        session.switch_mode(mode).unwrap();
        run(session, &steps);
    }
}
