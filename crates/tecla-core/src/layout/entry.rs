use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::lenient;

/// One candidate output-or-action mapping within a direction group.
///
/// `output`, `secondary_output` and `symbol` are priority-ordered aliases for
/// the same thing. When `delete_count` is present the entry is a deletion and
/// the output fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionalEntry {
    #[serde(
        rename = "JMID",
        default,
        deserialize_with = "lenient::mode",
        skip_serializing_if = "Option::is_none"
    )]
    pub mode: Option<i64>,
    #[serde(
        rename = "Outp",
        default,
        deserialize_with = "lenient::payload",
        skip_serializing_if = "Option::is_none"
    )]
    pub output: Option<String>,
    #[serde(
        rename = "SyOu",
        default,
        deserialize_with = "lenient::payload",
        skip_serializing_if = "Option::is_none"
    )]
    pub secondary_output: Option<String>,
    #[serde(
        rename = "Symb",
        default,
        deserialize_with = "lenient::payload",
        skip_serializing_if = "Option::is_none"
    )]
    pub symbol: Option<String>,
    #[serde(
        rename = "ODel",
        default,
        deserialize_with = "lenient::present",
        skip_serializing_if = "Option::is_none"
    )]
    pub delete_count: Option<DeleteCount>,
    /// Fields this engine does not interpret; kept so that structurally
    /// different entries stay distinguishable.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FunctionalEntry {
    /// Entry with only a primary output payload.
    pub fn with_output(output: impl Into<String>) -> Self {
        Self {
            output: Some(output.into()),
            ..Self::default()
        }
    }

    /// Deletion entry removing `count` trailing characters.
    pub fn deletion(count: u64) -> Self {
        Self {
            delete_count: Some(DeleteCount::from(Value::from(count))),
            ..Self::default()
        }
    }

    pub fn in_mode(mut self, mode: i64) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Absent or `0` mode: applies to any mode.
    pub fn is_default_mode(&self) -> bool {
        matches!(self.mode, None | Some(0))
    }

    pub fn is_deletion(&self) -> bool {
        self.delete_count.is_some()
    }

    /// Canonical serialization used to tell apart entries with no output.
    pub fn structural_key(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| format!("{self:?}"))
    }
}

/// Raw `ODel` value. Presence is what matters; the value only sets the count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeleteCount(Value);

impl DeleteCount {
    /// Characters to delete. Anything but a non-negative integer counts as 1.
    pub fn count(&self) -> usize {
        let parsed = match &self.0 {
            Value::Number(n) => n.as_u64().or_else(|| {
                n.as_f64()
                    .filter(|f| *f >= 0.0 && f.fract() == 0.0)
                    .map(|f| f as u64)
            }),
            Value::String(s) => s.trim().parse::<u64>().ok(),
            _ => None,
        };
        parsed
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(1)
    }
}

impl From<Value> for DeleteCount {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
