use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use super::entry::FunctionalEntry;
use super::lenient;

/// Canonical gesture directions a key can carry entries for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Primary,
    Hold,
    SwipeUp,
    SwipeDown,
    SwipeLeft,
    SwipeRight,
}

const DIRECTION_COUNT: usize = 6;

impl Direction {
    pub const ALL: [Direction; DIRECTION_COUNT] = [
        Direction::Primary,
        Direction::Hold,
        Direction::SwipeUp,
        Direction::SwipeDown,
        Direction::SwipeLeft,
        Direction::SwipeRight,
    ];

    /// Map a raw direction-group field name (including legacy diagonal
    /// names) onto its canonical direction.
    pub fn from_group_name(name: &str) -> Option<Self> {
        GROUP_FIELDS
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, dir)| *dir)
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Raw group field names in merge order. Several legacy names fold into one
/// canonical direction; their entries are appended in this order.
const GROUP_FIELDS: &[(&str, Direction)] = &[
    ("FuPr", Direction::Primary),
    ("FuHo", Direction::Hold),
    ("FuUp", Direction::SwipeUp),
    ("FuUR", Direction::SwipeUp),
    ("FuDo", Direction::SwipeDown),
    ("FuDR", Direction::SwipeDown),
    ("FuDL", Direction::SwipeDown),
    ("FuLe", Direction::SwipeLeft),
    ("FuRi", Direction::SwipeRight),
];

/// A key record: grid position, per-direction entries and plain-text labels.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "RawKey")]
pub struct Key {
    pub row: u32,
    pub column: u32,
    pub label: Option<String>,
    pub description: Option<String>,
    pub name: Option<String>,
    groups: [Vec<FunctionalEntry>; DIRECTION_COUNT],
}

impl Key {
    pub fn at(row: u32, column: u32) -> Self {
        Self {
            row,
            column,
            ..Self::default()
        }
    }

    pub fn with_entries(mut self, direction: Direction, entries: Vec<FunctionalEntry>) -> Self {
        self.groups[direction.index()].extend(entries);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn group(&self, direction: Direction) -> &[FunctionalEntry] {
        &self.groups[direction.index()]
    }

    /// Entries for the tap gesture.
    pub fn primary(&self) -> &[FunctionalEntry] {
        self.group(Direction::Primary)
    }

    /// All groups in canonical direction order.
    pub fn groups(&self) -> impl Iterator<Item = (Direction, &[FunctionalEntry])> {
        Direction::ALL
            .iter()
            .map(move |dir| (*dir, self.group(*dir)))
    }

    /// First available plain-text label: `Label`, then `TDes`, then `Name`.
    pub fn plain_label(&self) -> Option<&str> {
        self.label
            .as_deref()
            .or(self.description.as_deref())
            .or(self.name.as_deref())
    }
}

#[derive(Deserialize)]
struct RawKey {
    #[serde(rename = "RowN", default)]
    row: Option<Value>,
    #[serde(rename = "ColN", default)]
    column: Option<Value>,
    #[serde(rename = "Label", default, deserialize_with = "lenient::text")]
    label: Option<String>,
    #[serde(rename = "TDes", default, deserialize_with = "lenient::text")]
    description: Option<String>,
    #[serde(rename = "Name", default, deserialize_with = "lenient::text")]
    name: Option<String>,
    #[serde(flatten)]
    rest: Map<String, Value>,
}

impl From<RawKey> for Key {
    fn from(mut raw: RawKey) -> Self {
        let mut key = Key {
            row: lenient::grid_index(raw.row.as_ref()),
            column: lenient::grid_index(raw.column.as_ref()),
            label: raw.label,
            description: raw.description,
            name: raw.name,
            groups: Default::default(),
        };
        for (field, direction) in GROUP_FIELDS {
            if let Some(value) = raw.rest.remove(*field) {
                key.groups[direction.index()].extend(parse_group(value));
            }
        }
        for field in raw.rest.keys().filter(|k| k.starts_with("Fu")) {
            debug!(field = field.as_str(), "ignoring unknown direction group");
        }
        key
    }
}

fn parse_group(value: Value) -> Vec<FunctionalEntry> {
    match value {
        Value::Array(items) => items.into_iter().filter_map(parse_entry).collect(),
        Value::Null => Vec::new(),
        single => parse_entry(single).into_iter().collect(),
    }
}

/// Objects are full entries; a bare string or number is shorthand for an
/// output payload.
fn parse_entry(value: Value) -> Option<FunctionalEntry> {
    match value {
        Value::Object(_) => serde_json::from_value(value)
            .map_err(|e| debug!("skipping malformed entry: {e}"))
            .ok(),
        Value::String(_) | Value::Number(_) => {
            lenient::value_text(&value).map(FunctionalEntry::with_output)
        }
        other => {
            debug!(value = ?other, "skipping non-entry value in direction group");
            None
        }
    }
}
