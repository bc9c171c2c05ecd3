//! Primary (tap) entry selection and label resolution.
//!
//! The label drawn on a key and the action a tap performs come from the same
//! [`resolve_key`] call, so the glyph always matches what a tap produces.

use crate::codepoint::decode;
use crate::layout::{FunctionalEntry, Key};

/// Pick the entry a tap applies in `active_mode`.
///
/// Exact mode match, then a default entry (mode absent or 0), then the first
/// entry. `None` only for an empty group.
pub fn resolve_primary(entries: &[FunctionalEntry], active_mode: i64) -> Option<&FunctionalEntry> {
    entries
        .iter()
        .find(|e| e.mode == Some(active_mode))
        .or_else(|| entries.iter().find(|e| e.is_default_mode()))
        .or_else(|| entries.first())
}

/// Decoded output text of an entry: the first non-empty of `output`,
/// `secondary_output`, `symbol`.
pub fn output_of(entry: &FunctionalEntry) -> String {
    [&entry.output, &entry.secondary_output, &entry.symbol]
        .into_iter()
        .flatten()
        .map(|payload| decode(payload))
        .find(|text| !text.is_empty())
        .unwrap_or_default()
}

/// Decoded `secondary_output` or `symbol`, ignoring `output`.
pub(crate) fn alternate_output_of(entry: &FunctionalEntry) -> Option<String> {
    [&entry.secondary_output, &entry.symbol]
        .into_iter()
        .flatten()
        .map(|payload| decode(payload))
        .find(|text| !text.is_empty())
}

/// The resolved tap behaviour of a key in a given mode.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyResolution<'a> {
    pub entry: Option<&'a FunctionalEntry>,
    pub label: String,
}

/// Resolve a key's primary entry and visible label.
///
/// Label fallback: resolved entry output, then any primary entry's
/// `secondary_output`/`symbol`, then `Label`/`TDes`/`Name`, then
/// `placeholder`.
pub fn resolve_key<'a>(key: &'a Key, active_mode: i64, placeholder: &str) -> KeyResolution<'a> {
    let entry = resolve_primary(key.primary(), active_mode);
    let label = entry
        .map(output_of)
        .filter(|text| !text.is_empty())
        .or_else(|| key.primary().iter().find_map(alternate_output_of))
        .or_else(|| key.plain_label().map(str::to_string))
        .unwrap_or_else(|| placeholder.to_string());
    KeyResolution { entry, label }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::layout::Direction;

    fn entry(mode: Option<i64>, output: &str) -> FunctionalEntry {
        FunctionalEntry {
            mode,
            ..FunctionalEntry::with_output(output)
        }
    }

    #[test]
    fn exact_mode_wins() {
        let entries = vec![entry(Some(2), "0042"), entry(Some(0), "0041")];
        assert_eq!(resolve_primary(&entries, 2), Some(&entries[0]));
    }

    #[test]
    fn default_entry_when_mode_missing() {
        let entries = vec![entry(Some(2), "0042"), entry(Some(0), "0041")];
        assert_eq!(resolve_primary(&entries, 5), Some(&entries[1]));

        let entries = vec![entry(Some(2), "0042"), entry(None, "0041")];
        assert_eq!(resolve_primary(&entries, 5), Some(&entries[1]));
    }

    #[test]
    fn first_entry_as_last_resort() {
        let entries = vec![entry(Some(3), "0043"), entry(Some(2), "0042")];
        assert_eq!(resolve_primary(&entries, 5), Some(&entries[0]));
    }

    #[test]
    fn empty_group_resolves_to_none() {
        assert_eq!(resolve_primary(&[], 0), None);
    }

    #[test]
    fn active_zero_prefers_explicit_zero() {
        let entries = vec![entry(None, "0041"), entry(Some(0), "0042")];
        assert_eq!(resolve_primary(&entries, 0), Some(&entries[1]));
    }

    #[test]
    fn output_field_priority() {
        let e = FunctionalEntry {
            output: Some("0041".into()),
            secondary_output: Some("0042".into()),
            symbol: Some("0043".into()),
            ..FunctionalEntry::default()
        };
        assert_eq!(output_of(&e), "A");

        let e = FunctionalEntry {
            secondary_output: Some("0042".into()),
            symbol: Some("0043".into()),
            ..FunctionalEntry::default()
        };
        assert_eq!(output_of(&e), "B");

        let e = FunctionalEntry {
            output: Some(String::new()),
            symbol: Some("∅".into()),
            ..FunctionalEntry::default()
        };
        assert_eq!(output_of(&e), "∅");

        assert_eq!(output_of(&FunctionalEntry::default()), "");
    }

    #[test]
    fn undecodable_output_falls_through() {
        let e = FunctionalEntry {
            output: Some("D800".into()),
            symbol: Some("0043".into()),
            ..FunctionalEntry::default()
        };
        assert_eq!(output_of(&e), "C");
    }

    #[test]
    fn label_matches_tap_entry() {
        let key = Key::at(0, 0).with_entries(
            Direction::Primary,
            vec![entry(None, "0061"), entry(Some(1), "0041")],
        );
        let lower = resolve_key(&key, 0, "·");
        assert_eq!(lower.label, "a");
        assert_eq!(lower.entry, Some(&key.primary()[0]));

        let upper = resolve_key(&key, 1, "·");
        assert_eq!(upper.label, "A");
        assert_eq!(upper.entry, Some(&key.primary()[1]));
    }

    #[test]
    fn label_falls_back_to_alternate_outputs_of_group() {
        let key = Key::at(0, 0).with_entries(
            Direction::Primary,
            vec![
                FunctionalEntry::deletion(1),
                FunctionalEntry {
                    symbol: Some("232B".into()),
                    ..FunctionalEntry::default()
                }
                .in_mode(4),
            ],
        );
        let resolved = resolve_key(&key, 0, "·");
        assert_eq!(resolved.label, "⌫");
        assert!(resolved.entry.unwrap().is_deletion());
    }

    #[test]
    fn label_falls_back_to_plain_labels_then_placeholder() {
        let key = Key::at(0, 0)
            .with_entries(Direction::Primary, vec![FunctionalEntry::deletion(1)])
            .with_label("Del");
        assert_eq!(resolve_key(&key, 0, "·").label, "Del");

        let bare = Key::at(0, 0);
        let resolved = resolve_key(&bare, 0, "·");
        assert_eq!(resolved.label, "·");
        assert_eq!(resolved.entry, None);
    }

    proptest! {
        #[test]
        fn resolution_is_total(
            modes in prop::collection::vec(prop::option::of(0i64..6), 1..8),
            active in 0i64..8,
        ) {
            let entries: Vec<_> = modes.iter().map(|m| entry(*m, "0041")).collect();
            prop_assert!(resolve_primary(&entries, active).is_some());
        }
    }
}
