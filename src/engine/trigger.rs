//! Trigger events.
//!
//! A trigger event is the snapshot one detection pass works from: which key
//! fired it, where the caret was, and the text window being inspected.
//!
//! ## Space vs. enter
//!
//! Most line-start patterns are anchored on "marker + space". Pressing enter
//! completes a line without typing that space, so the enter pass inspects the
//! completed line with a synthetic space appended:
//!
//! ```text
//! space:  "### |"          caret = after the typed space
//!          text = "### "    line_len = 4
//!
//! enter:  "+\n|"           caret (doc) = start of the new line
//!          text = "+ "      line_len = 1, working caret = line end + 1
//! ```
//!
//! The synthetic character only exists for matching. Every rule clamps its
//! deletions to the real line via [`TriggerEvent::clamp_len`].
//!
//! ## Offsets
//!
//! All offsets come from the caret captured here. Nothing is re-queried when
//! the resulting edits are applied later.

use super::outcome::PassOutcome;
use super::rule_set::MarkerMask;
use crate::document::Document;

/// Character insertions that start a detection pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerKind {
    Space,
    Enter,
}

impl TriggerKind {
    /// Trigger for an inserted string. Only a lone space or newline counts.
    pub fn from_insert(insert: &str) -> Option<Self> {
        match insert {
            " " => Some(TriggerKind::Space),
            "\n" => Some(TriggerKind::Enter),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TriggerKind::Space => "space",
            TriggerKind::Enter => "enter",
        }
    }
}

/// Snapshot of the line one detection pass inspects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerEvent {
    pub kind: TriggerKind,
    /// Working caret: the caret after the typed space, or one past the end of
    /// the completed line for enter.
    pub caret: usize,
    /// Document offset of the inspected line.
    pub line_start: usize,
    /// Length of the line's real text, in document units.
    pub line_len: usize,
    /// Inspected text (line text, plus the synthetic space for enter).
    pub text: String,
    /// Element tag of the line.
    pub tag: String,
    pub(crate) markers: MarkerMask,
}

impl TriggerEvent {
    /// Capture the event from the host document, or the outcome explaining
    /// why there is nothing to inspect.
    pub(crate) fn capture<D: Document + ?Sized>(
        doc: &D,
        kind: TriggerKind,
        ignore_tags: &[String],
    ) -> Result<Self, PassOutcome> {
        let selection = doc.selection().ok_or(PassOutcome::NoCaret)?;

        // The newline just typed belongs to the completed line.
        let anchor = match kind {
            TriggerKind::Space => selection.index,
            TriggerKind::Enter => selection.index.saturating_sub(1),
        };
        let line = doc.line_at(anchor).ok_or(PassOutcome::EmptyLine)?;
        let line_len = line.text.chars().count();

        let (text, caret) = match kind {
            TriggerKind::Space => (line.text, selection.index),
            TriggerKind::Enter => (format!("{} ", line.text), line.start + line_len + 1),
        };

        if text.is_empty() {
            return Err(PassOutcome::EmptyLine);
        }
        if ignore_tags.iter().any(|tag| tag.eq_ignore_ascii_case(&line.tag)) {
            return Err(PassOutcome::IgnoredTag(line.tag));
        }

        let markers = MarkerMask::scan(&text);
        Ok(TriggerEvent { kind, caret, line_start: line.start, line_len, text, tag: line.tag, markers })
    }

    /// Document offset one past the line's real text.
    pub fn line_end(&self) -> usize {
        self.line_start + self.line_len
    }

    /// `len` clamped so that `index..index + len` stays inside the real line
    /// text. Keeps deletions off the synthetic enter space.
    pub fn clamp_len(&self, index: usize, len: usize) -> usize {
        (index + len).min(self.line_end()).saturating_sub(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{BlockFormat, Document};
    use crate::memory::MemoryDocument;

    fn tags() -> Vec<String> {
        vec!["PRE".to_string()]
    }

    #[test]
    fn only_lone_space_and_newline_trigger() {
        assert_eq!(TriggerKind::from_insert(" "), Some(TriggerKind::Space));
        assert_eq!(TriggerKind::from_insert("\n"), Some(TriggerKind::Enter));
        assert_eq!(TriggerKind::from_insert("  "), None);
        assert_eq!(TriggerKind::from_insert("a"), None);
    }

    #[test]
    fn space_event_uses_caret_line() {
        let doc = MemoryDocument::from_text("first\n## ");
        let event = TriggerEvent::capture(&doc, TriggerKind::Space, &tags()).unwrap();

        assert_eq!(event.text, "## ");
        assert_eq!(event.line_start, 6);
        assert_eq!(event.line_len, 3);
        assert_eq!(event.caret, 9);
        assert!(event.markers.contains(MarkerMask::HASH));
    }

    #[test]
    fn enter_event_inspects_completed_line_with_synthetic_space() {
        let doc = MemoryDocument::from_text("ab\n+\n");
        let event = TriggerEvent::capture(&doc, TriggerKind::Enter, &tags()).unwrap();

        assert_eq!(event.text, "+ ");
        assert_eq!(event.line_start, 3);
        assert_eq!(event.line_len, 1);
        assert_eq!(event.caret, 5);
        assert_eq!(event.clamp_len(3, 2), 1);
    }

    #[test]
    fn missing_caret_empty_line_and_ignored_tag_are_skips() {
        let mut doc = MemoryDocument::from_text("x");
        doc.blur();
        assert_eq!(TriggerEvent::capture(&doc, TriggerKind::Space, &tags()), Err(PassOutcome::NoCaret));

        let doc = MemoryDocument::new();
        assert_eq!(TriggerEvent::capture(&doc, TriggerKind::Space, &tags()), Err(PassOutcome::EmptyLine));

        let mut doc = MemoryDocument::from_text("**x** ");
        doc.format_line(0, 0, &BlockFormat::CodeBlock);
        assert_eq!(
            TriggerEvent::capture(&doc, TriggerKind::Space, &tags()),
            Err(PassOutcome::IgnoredTag("PRE".to_string()))
        );
    }
}
