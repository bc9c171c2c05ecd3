//! Long-press variant collection.

use std::collections::HashSet;

use tracing::debug;

use crate::layout::{FunctionalEntry, Key};
use crate::resolve::{alternate_output_of, output_of};

/// One option on a key's variant surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Variant<'a> {
    pub entry: &'a FunctionalEntry,
    /// Decoded output; empty for deletions and entries without output.
    pub output: String,
    /// What the surface shows: the output, or the entry's structural form
    /// when there is no output.
    pub display_text: String,
}

#[derive(PartialEq, Eq, Hash)]
enum DedupKey {
    Text(String),
    Structure(String),
}

/// Gather every entry of a key across all direction groups, deduplicated by
/// display text, in first-seen order.
///
/// The primary group is scanned a second time at the end so that documents
/// which only populate it still yield variants. Entries without output are
/// deduplicated by structure, so distinct silent entries stay visible.
/// An empty result means there is nothing to present.
pub fn collect_variants(key: &Key) -> Vec<Variant<'_>> {
    let candidates = key
        .groups()
        .flat_map(|(_, entries)| entries)
        .chain(key.primary());

    let mut seen = HashSet::new();
    let mut variants = Vec::new();
    for entry in candidates {
        let output = variant_text(entry);
        let (dedup, display_text) = if output.is_empty() {
            let structure = entry.structural_key();
            (DedupKey::Structure(structure.clone()), structure)
        } else {
            (DedupKey::Text(output.clone()), output.clone())
        };
        if seen.insert(dedup) {
            variants.push(Variant {
                entry,
                output,
                display_text,
            });
        }
    }
    debug!(variant_count = variants.len());
    variants
}

fn variant_text(entry: &FunctionalEntry) -> String {
    let text = output_of(entry);
    if text.is_empty() {
        alternate_output_of(entry).unwrap_or_default()
    } else {
        text
    }
}
