mod proptest_fsm;

use tecla_core::KeyPos;

use super::{KeyboardSession, PointerEvent, SessionConfig, SessionResponse};

pub(super) const DEMO_LAYOUT: &str = r#"{
  "Designs": [{
    "Name": "Demo",
    "Modes": [{ "Name": "abc" }, { "Name": "ABC" }, { "Name": "123" }],
    "Keys": [
      { "RowN": 0, "ColN": 1,
        "FuPr": [{ "Outp": "0062" }, { "JMID": 1, "Outp": "0042" }, { "JMID": 2, "Outp": "0032" }] },
      { "RowN": 0, "ColN": 0,
        "FuPr": [{ "JMID": 0, "Outp": "0061" }, { "JMID": 1, "Outp": "0041" }, { "JMID": 2, "Outp": "0031" }],
        "FuHo": [{ "Outp": "00E1" }, { "Outp": "00E0" }] },
      { "RowN": 1, "ColN": 0, "Label": "Space", "FuPr": [{ "Outp": "0020" }] },
      { "RowN": 1, "ColN": 1, "Label": "⌫", "FuPr": [{ "ODel": 1 }], "FuHo": [{ "ODel": 5 }] },
      { "RowN": 1, "ColN": 2, "Label": "Enter", "FuPr": [{ "Outp": "000A" }] },
      { "RowN": 2, "ColN": 0, "Name": "blank" }
    ]
  }]
}"#;

/// One key: tap types "A", hold deletes one character.
pub(super) const SINGLE_KEY_LAYOUT: &str = r#"{
  "Keys": [{
    "RowN": 0, "ColN": 0,
    "FuPr": [{ "JMID": 0, "Outp": "0041" }],
    "FuHo": [{ "ODel": 1 }]
  }]
}"#;

pub(super) const KEY_A: KeyPos = KeyPos { row: 0, slot: 0 };
pub(super) const KEY_B: KeyPos = KeyPos { row: 0, slot: 1 };
pub(super) const KEY_SPACE: KeyPos = KeyPos { row: 1, slot: 0 };
pub(super) const KEY_BACKSPACE: KeyPos = KeyPos { row: 1, slot: 1 };
pub(super) const KEY_ENTER: KeyPos = KeyPos { row: 1, slot: 2 };
pub(super) const KEY_BLANK: KeyPos = KeyPos { row: 2, slot: 0 };

pub(super) fn test_config() -> SessionConfig {
    SessionConfig {
        long_press_ms: 350,
        placeholder: "·".to_string(),
        design: 0,
    }
}

pub(super) fn demo_session() -> KeyboardSession {
    KeyboardSession::from_json(DEMO_LAYOUT, test_config()).unwrap()
}

pub(super) fn single_key_session() -> KeyboardSession {
    KeyboardSession::from_json(SINGLE_KEY_LAYOUT, test_config()).unwrap()
}

/// Apply every edit in `resp` to `buffer`.
pub(super) fn apply_edits(resp: &SessionResponse, buffer: &mut String) {
    for op in &resp.edits {
        op.apply_to(buffer);
    }
}

/// Press and release `key`, `held_ms` apart, starting at `at_ms`.
pub(super) fn press_for(
    session: &mut KeyboardSession,
    key: KeyPos,
    at_ms: u64,
    held_ms: u64,
) -> (SessionResponse, SessionResponse) {
    let down = session.handle_event(PointerEvent::PressStart { key, at_ms });
    let up = session.handle_event(PointerEvent::PressEnd {
        key,
        at_ms: at_ms + held_ms,
    });
    (down, up)
}
