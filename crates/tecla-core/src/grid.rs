//! Row/column ordering of key records.

use std::collections::BTreeMap;

use tracing::{debug, debug_span};

use crate::layout::Key;

/// Position of a key in a built grid: row index, then slot within the row.
///
/// These are dense indices into the grid, not the (possibly sparse)
/// `RowN`/`ColN` values from the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyPos {
    pub row: usize,
    pub slot: usize,
}

impl KeyPos {
    pub fn new(row: usize, slot: usize) -> Self {
        Self { row, slot }
    }
}

impl std::fmt::Display for KeyPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.row, self.slot)
    }
}

/// Keys grouped by row and ordered by column, stored as indices into the
/// design's key list. Rows may differ in length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyGrid {
    rows: Vec<Vec<usize>>,
}

impl KeyGrid {
    pub fn rows(&self) -> &[Vec<usize>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn key_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index into the design's key list for a grid position.
    pub fn key_index(&self, pos: KeyPos) -> Option<usize> {
        self.rows.get(pos.row)?.get(pos.slot).copied()
    }

    /// Every position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = KeyPos> + '_ {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(row, slots)| (0..slots.len()).map(move |slot| KeyPos::new(row, slot)))
    }

    /// Resolve the grid against the key list it was built from.
    pub fn resolve<'a>(&self, keys: &'a [Key]) -> Vec<Vec<&'a Key>> {
        self.rows
            .iter()
            .map(|row| row.iter().filter_map(|&i| keys.get(i)).collect())
            .collect()
    }
}

/// Group keys by row (ascending), ordering each row by column ascending.
/// Keys sharing a column keep their document order.
pub fn build_grid(keys: &[Key]) -> KeyGrid {
    let _span = debug_span!("build_grid", key_count = keys.len()).entered();

    let mut by_row: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
    for (index, key) in keys.iter().enumerate() {
        by_row.entry(key.row).or_default().push(index);
    }

    let rows: Vec<Vec<usize>> = by_row
        .into_values()
        .map(|mut row| {
            // sort_by_key is stable
            row.sort_by_key(|&i| keys[i].column);
            row
        })
        .collect();

    debug!(row_count = rows.len());
    KeyGrid { rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Direction, FunctionalEntry};

    fn labelled(row: u32, column: u32, label: &str) -> Key {
        Key::at(row, column).with_label(label)
    }

    fn labels(grid: &KeyGrid, keys: &[Key]) -> Vec<Vec<String>> {
        grid.resolve(keys)
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|k| k.label.clone().unwrap_or_default())
                    .collect()
            })
            .collect()
    }

    #[test]
    fn groups_by_row_and_sorts_by_column() {
        let keys = vec![
            labelled(1, 2, "f"),
            labelled(0, 1, "b"),
            labelled(1, 0, "d"),
            labelled(0, 0, "a"),
            labelled(1, 1, "e"),
        ];
        let grid = build_grid(&keys);
        assert_eq!(
            labels(&grid, &keys),
            vec![vec!["a", "b"], vec!["d", "e", "f"]]
        );
        assert_eq!(grid.key_count(), 5);
    }

    #[test]
    fn sparse_rows_are_compacted_in_order() {
        let keys = vec![labelled(7, 0, "z"), labelled(3, 0, "y"), labelled(0, 9, "x")];
        let grid = build_grid(&keys);
        assert_eq!(labels(&grid, &keys), vec![vec!["x"], vec!["y"], vec!["z"]]);
    }

    #[test]
    fn column_ties_keep_document_order() {
        let keys = vec![labelled(0, 1, "p"), labelled(0, 0, "q"), labelled(0, 1, "r")];
        let grid = build_grid(&keys);
        assert_eq!(labels(&grid, &keys), vec![vec!["q", "p", "r"]]);
    }

    #[test]
    fn rows_may_differ_in_length() {
        let keys = vec![labelled(0, 0, "a"), labelled(1, 0, "b"), labelled(1, 1, "c")];
        let grid = build_grid(&keys);
        assert_eq!(grid.rows()[0].len(), 1);
        assert_eq!(grid.rows()[1].len(), 2);
    }

    #[test]
    fn empty_input() {
        let grid = build_grid(&[]);
        assert!(grid.is_empty());
        assert_eq!(grid.positions().count(), 0);
    }

    #[test]
    fn positions_and_lookup() {
        let keys = vec![
            Key::at(0, 0).with_entries(Direction::Primary, vec![FunctionalEntry::with_output("61")]),
            Key::at(1, 5),
            Key::at(1, 2),
        ];
        let grid = build_grid(&keys);
        let positions: Vec<_> = grid.positions().collect();
        assert_eq!(
            positions,
            vec![KeyPos::new(0, 0), KeyPos::new(1, 0), KeyPos::new(1, 1)]
        );
        assert_eq!(grid.key_index(KeyPos::new(1, 0)), Some(2));
        assert_eq!(grid.key_index(KeyPos::new(1, 1)), Some(1));
        assert_eq!(grid.key_index(KeyPos::new(2, 0)), None);
        assert_eq!(KeyPos::new(1, 1).to_string(), "1:1");
    }
}
