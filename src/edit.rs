//! Deferred document mutations.
//!
//! A rule never touches the document while the host is still delivering the
//! change notification that triggered it: the host's line and selection state
//! is not settled yet at that point. Instead a rule describes its mutation as
//! a [`Transformation`] (an ordered batch of [`Edit`]s with precomputed
//! offsets) and the detector posts it through a [`Scheduler`].
//!
//! ```text
//! text-change ──▶ detector ──▶ Scheduler::post(Transformation)
//!                                   │
//!   host update cycle ends ─────────┴──▶ EditQueue::flush(&mut doc)
//!                                          └─ Edit::apply, in order
//! ```
//!
//! ## Invariants
//!
//! - Offsets inside a transformation are computed from the caret captured at
//!   detection time and are never re-queried when applied.
//! - The host flushes the queue before it processes the next keystroke, so a
//!   batch always sees the document it was computed against.
//! - Posted batches always run; there is no cancellation.

use crate::document::{BlockFormat, Document, Embed, InlineFormat, TextAttributes};
use std::collections::VecDeque;

/// A single primitive mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    FormatLine { index: usize, len: usize, format: BlockFormat },
    Delete { index: usize, len: usize },
    Insert { index: usize, text: String, attrs: TextAttributes },
    InsertEmbed { index: usize, embed: Embed },
    /// Stop `formats` from carrying over to text typed at the caret.
    ClearFormat(InlineFormat),
    SetSelection(usize),
}

impl Edit {
    pub fn apply<D: Document + ?Sized>(&self, doc: &mut D) {
        match self {
            Edit::FormatLine { index, len, format } => doc.format_line(*index, *len, format),
            Edit::Delete { index, len } => {
                if *len > 0 {
                    doc.delete_text(*index, *len)
                }
            }
            Edit::Insert { index, text, attrs } => doc.insert_text(*index, text, attrs),
            Edit::InsertEmbed { index, embed } => doc.insert_embed(*index, embed),
            Edit::ClearFormat(formats) => doc.format(*formats, false),
            Edit::SetSelection(index) => doc.set_selection(*index),
        }
    }
}

/// The atomic edit batch produced by one rule for one trigger event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transformation {
    /// Name of the rule that produced the batch.
    pub rule: &'static str,
    pub edits: Vec<Edit>,
}

impl Transformation {
    pub fn apply<D: Document + ?Sized>(&self, doc: &mut D) {
        for edit in &self.edits {
            edit.apply(doc);
        }
    }
}

/// "Run after the current document-update cycle" seam.
///
/// The host integration decides when posted work runs; it must run before the
/// next keystroke is processed.
pub trait Scheduler {
    fn post(&mut self, transformation: Transformation);
}

/// FIFO scheduler the host drains at the end of each update cycle.
#[derive(Debug, Default)]
pub struct EditQueue {
    pending: VecDeque<Transformation>,
}

impl EditQueue {
    pub fn new() -> Self {
        EditQueue::default()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Pending batches, oldest first.
    pub fn pending(&self) -> impl Iterator<Item = &Transformation> {
        self.pending.iter()
    }

    /// Apply every pending batch to `doc`. Returns the number of batches run.
    pub fn flush<D: Document + ?Sized>(&mut self, doc: &mut D) -> usize {
        let mut flushed = 0;
        while let Some(transformation) = self.pending.pop_front() {
            tracing::debug!(rule = transformation.rule, edits = transformation.edits.len(), "applying transformation");
            transformation.apply(doc);
            flushed += 1;
        }
        flushed
    }
}

impl Scheduler for EditQueue {
    fn post(&mut self, transformation: Transformation) {
        self.pending.push_back(transformation);
    }
}
