//! Turning a resolved entry into a text-buffer mutation.

use crate::layout::FunctionalEntry;
use crate::resolve::output_of;

/// Host-owned editable text the keyboard types into.
pub trait TextBuffer {
    fn append(&mut self, text: &str);

    /// Remove up to `count` trailing characters. Removing more than the
    /// buffer holds empties it.
    fn delete_last(&mut self, count: usize);
}

impl TextBuffer for String {
    fn append(&mut self, text: &str) {
        self.push_str(text);
    }

    fn delete_last(&mut self, count: usize) {
        for _ in 0..count {
            if self.pop().is_none() {
                break;
            }
        }
    }
}

/// A concrete buffer mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOp {
    Insert(String),
    /// Delete this many trailing characters (Unicode scalar values).
    Delete(usize),
}

impl EditOp {
    pub fn apply_to<B: TextBuffer + ?Sized>(&self, buffer: &mut B) {
        match self {
            EditOp::Insert(text) => buffer.append(text),
            EditOp::Delete(count) => buffer.delete_last(*count),
        }
    }
}

/// Decide the mutation for an entry without touching any buffer.
///
/// A deletion entry always deletes, whatever output it carries. Otherwise the
/// decoded output is inserted verbatim (a lone space, literal or `0020`,
/// included). With no output the `fallback_text` (the key's visible label)
/// is inserted instead.
pub fn plan_edit(entry: Option<&FunctionalEntry>, fallback_text: &str) -> Option<EditOp> {
    let entry = entry?;
    if let Some(delete) = &entry.delete_count {
        return Some(EditOp::Delete(delete.count()));
    }
    let text = output_of(entry);
    if !text.is_empty() {
        return Some(EditOp::Insert(text));
    }
    if fallback_text.is_empty() {
        None
    } else {
        Some(EditOp::Insert(fallback_text.to_string()))
    }
}

/// Apply an entry to `buffer`, returning the mutation performed.
pub fn apply<B: TextBuffer + ?Sized>(
    entry: Option<&FunctionalEntry>,
    buffer: &mut B,
    fallback_text: &str,
) -> Option<EditOp> {
    let op = plan_edit(entry, fallback_text)?;
    op.apply_to(buffer);
    Some(op)
}
