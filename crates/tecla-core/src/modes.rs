//! Input mode discovery and the active-mode state.
//!
//! Modes come from a design's explicit `Modes` list when present; otherwise
//! they are inferred from the `JMID` values on primary entries. Fewer than
//! two inferred modes means the keyboard is modeless.

use std::collections::BTreeSet;

use tracing::{debug, debug_span};

use crate::layout::Design;

/// Where a design's mode list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeSource {
    /// Listed in the document; identity is list position.
    Explicit,
    /// Collected from entry `JMID` values; identity is the value itself.
    Inferred,
    /// No switchable modes; the active mode stays 0.
    Modeless,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeDescriptor {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeSet {
    source: ModeSource,
    modes: Vec<ModeDescriptor>,
}

impl ModeSet {
    pub fn modeless() -> Self {
        Self {
            source: ModeSource::Modeless,
            modes: Vec::new(),
        }
    }

    pub fn source(&self) -> ModeSource {
        self.source
    }

    pub fn modes(&self) -> &[ModeDescriptor] {
        &self.modes
    }

    pub fn is_modeless(&self) -> bool {
        self.source == ModeSource::Modeless
    }

    pub fn contains(&self, id: i64) -> bool {
        self.modes.iter().any(|m| m.id == id)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ModeError {
    #[error("unknown mode: {0}")]
    Unknown(i64),
}

/// Determine the selectable modes of a design.
pub fn resolve_modes(design: &Design) -> ModeSet {
    let _span = debug_span!("resolve_modes").entered();

    if !design.modes.is_empty() {
        let modes = design
            .modes
            .iter()
            .enumerate()
            .map(|(idx, mode)| ModeDescriptor {
                id: idx as i64,
                name: mode.name.clone().unwrap_or_else(|| format!("Mode {idx}")),
            })
            .collect();
        return ModeSet {
            source: ModeSource::Explicit,
            modes,
        };
    }

    let inferred: BTreeSet<i64> = design
        .keys
        .iter()
        .flat_map(|key| key.primary())
        .filter(|entry| !entry.is_default_mode())
        .filter_map(|entry| entry.mode)
        .collect();
    debug!(inferred = inferred.len());

    if inferred.len() < 2 {
        return ModeSet::modeless();
    }
    ModeSet {
        source: ModeSource::Inferred,
        modes: inferred
            .into_iter()
            .map(|id| ModeDescriptor {
                id,
                name: format!("Mode {id}"),
            })
            .collect(),
    }
}

/// The active mode of a session, validated against its `ModeSet`.
#[derive(Debug, Clone)]
pub struct ModeState {
    set: ModeSet,
    active: i64,
}

impl ModeState {
    /// Starts in mode 0, which selects default entries.
    pub fn new(set: ModeSet) -> Self {
        Self { set, active: 0 }
    }

    pub fn active(&self) -> i64 {
        self.active
    }

    pub fn set(&self) -> &ModeSet {
        &self.set
    }

    /// Switch to a listed mode. Mode 0 (default entries) is always
    /// accepted, so a modeless keyboard accepts nothing else.
    pub fn switch_to(&mut self, id: i64) -> Result<(), ModeError> {
        if id != 0 && !self.set.contains(id) {
            return Err(ModeError::Unknown(id));
        }
        debug!(from = self.active, to = id, "mode switch");
        self.active = id;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Direction, FunctionalEntry, Key, Mode};

    fn key_with_modes(modes: &[Option<i64>]) -> Key {
        let entries = modes
            .iter()
            .map(|m| FunctionalEntry {
                mode: *m,
                ..FunctionalEntry::with_output("0041")
            })
            .collect();
        Key::at(0, 0).with_entries(Direction::Primary, entries)
    }

    #[test]
    fn explicit_modes_use_position_as_identity() {
        let design = Design {
            modes: vec![
                Mode {
                    name: Some("abc".into()),
                },
                Mode { name: None },
            ],
            keys: vec![key_with_modes(&[Some(7), Some(9)])],
            ..Design::default()
        };
        let set = resolve_modes(&design);
        assert_eq!(set.source(), ModeSource::Explicit);
        assert_eq!(
            set.modes(),
            &[
                ModeDescriptor {
                    id: 0,
                    name: "abc".into()
                },
                ModeDescriptor {
                    id: 1,
                    name: "Mode 1".into()
                },
            ]
        );
    }

    #[test]
    fn inferred_modes_are_sorted_and_ignore_default() {
        let design = Design {
            keys: vec![
                key_with_modes(&[Some(3), None, Some(0)]),
                key_with_modes(&[Some(1), Some(3)]),
            ],
            ..Design::default()
        };
        let set = resolve_modes(&design);
        assert_eq!(set.source(), ModeSource::Inferred);
        let ids: Vec<_> = set.modes().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(set.modes()[1].name, "Mode 3");
    }

    #[test]
    fn inference_only_scans_primary_groups() {
        let key = key_with_modes(&[Some(1)]).with_entries(
            Direction::Hold,
            vec![FunctionalEntry::with_output("0042").in_mode(2)],
        );
        let design = Design {
            keys: vec![key],
            ..Design::default()
        };
        assert!(resolve_modes(&design).is_modeless());
    }

    #[test]
    fn single_or_no_mode_is_modeless() {
        for modes in [&[][..], &[None, Some(0)][..], &[Some(4), Some(4)][..]] {
            let design = Design {
                keys: vec![key_with_modes(modes)],
                ..Design::default()
            };
            let set = resolve_modes(&design);
            assert!(set.is_modeless(), "{modes:?}");
            assert!(set.modes().is_empty());
        }
    }

    #[test]
    fn switching_validates_against_set() {
        let design = Design {
            keys: vec![key_with_modes(&[Some(1), Some(2)])],
            ..Design::default()
        };
        let mut state = ModeState::new(resolve_modes(&design));
        assert_eq!(state.active(), 0);
        state.switch_to(2).unwrap();
        assert_eq!(state.active(), 2);
        assert_eq!(state.switch_to(5), Err(ModeError::Unknown(5)));
        assert_eq!(state.active(), 2);
        // Back to default entries even though 0 is not an inferred mode.
        state.switch_to(0).unwrap();
        assert_eq!(state.active(), 0);
    }

    #[test]
    fn modeless_state_is_fixed_at_zero() {
        let mut state = ModeState::new(ModeSet::modeless());
        assert!(state.switch_to(0).is_ok());
        assert_eq!(state.switch_to(1), Err(ModeError::Unknown(1)));
        assert_eq!(state.active(), 0);
    }
}
