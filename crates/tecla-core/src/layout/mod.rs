//! Layout document model.
//!
//! A `LayoutDocument` bundles one or more `Design`s; each design holds the
//! key records and optional mode descriptors. Field shapes vary between
//! documents, so every field is optional and deserialized leniently.

mod entry;
mod key;
mod lenient;

pub use entry::{DeleteCount, FunctionalEntry};
pub use key::{Direction, Key};

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, debug_span};

/// Failure to obtain a usable layout document.
///
/// Every variant is fatal to keyboard initialization and is reported to the
/// host as [`FailureKind::DocumentUnavailable`].
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("malformed layout document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("layout document is not a JSON object")]
    NotAnObject,

    #[error("layout document contains no design")]
    NoDesign,

    #[error("design {index} not found (document has {count})")]
    MissingDesign { index: usize, count: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    DocumentUnavailable,
}

impl LayoutError {
    pub fn kind(&self) -> FailureKind {
        FailureKind::DocumentUnavailable
    }
}

/// A named input state. Its identity is its position in `Design::modes`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mode {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Design {
    #[serde(rename = "Name", default, deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(rename = "Keys", default, deserialize_with = "lenient::keys")]
    pub keys: Vec<Key>,
    #[serde(rename = "Modes", default, deserialize_with = "lenient::modes")]
    pub modes: Vec<Mode>,
}

#[derive(Debug, Clone)]
pub struct LayoutDocument {
    designs: Vec<Design>,
}

impl LayoutDocument {
    pub fn open(path: &Path) -> Result<Self, LayoutError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LayoutError> {
        let value: Value = serde_json::from_reader(reader)?;
        Self::from_value(value)
    }

    pub fn from_json_str(json: &str) -> Result<Self, LayoutError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Build from parsed JSON. A document without a non-empty `Designs`
    /// array is itself a single design.
    pub fn from_value(value: Value) -> Result<Self, LayoutError> {
        let _span = debug_span!("load_document").entered();
        if !value.is_object() {
            return Err(LayoutError::NotAnObject);
        }

        let bundled = value
            .get("Designs")
            .and_then(Value::as_array)
            .filter(|designs| !designs.is_empty())
            .cloned();

        let designs = match bundled {
            Some(items) => items
                .into_iter()
                .filter(Value::is_object)
                .filter_map(|item| {
                    serde_json::from_value::<Design>(item)
                        .map_err(|e| debug!("skipping malformed design: {e}"))
                        .ok()
                })
                .collect(),
            None => vec![Design::deserialize(value)?],
        };

        if designs.is_empty() {
            return Err(LayoutError::NoDesign);
        }
        debug!(design_count = designs.len());
        Ok(Self { designs })
    }

    pub fn designs(&self) -> &[Design] {
        &self.designs
    }

    pub fn design(&self, index: usize) -> Result<&Design, LayoutError> {
        self.designs.get(index).ok_or(LayoutError::MissingDesign {
            index,
            count: self.designs.len(),
        })
    }

    /// Take ownership of one design, dropping the rest.
    pub fn into_design(mut self, index: usize) -> Result<Design, LayoutError> {
        if index >= self.designs.len() {
            return Err(LayoutError::MissingDesign {
                index,
                count: self.designs.len(),
            });
        }
        Ok(self.designs.swap_remove(index))
    }
}
