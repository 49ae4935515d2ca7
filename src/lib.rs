//! Markdown shortcuts for rich-text editors.
//!
//! As the user types, every inserted space or newline triggers one detection
//! pass over the line holding the caret. If the line matches one of the
//! markdown trigger rules (headers, emphasis, blockquote, code, lists, links,
//! images, horizontal rules), the raw markdown is replaced by the matching
//! rich-text formatting in one deferred, atomic edit batch.
//!
//! ```text
//! text-change ─▶ Shortcuts::on_text_change ─▶ TriggerEvent ─▶ RuleSet (first match)
//!                                                                │
//!                                  Scheduler::post ◀─ Transformation
//!                                        │
//!                   host update cycle ─▶ EditQueue::flush(&mut doc)
//! ```
//!
//! # Example
//! ```
//! use markdown_shortcuts::{InlineFormat, MemoryDocument, Shortcuts, Typist};
//!
//! let mut typist = Typist::new(Shortcuts::default(), MemoryDocument::new());
//! typist.type_str("**hello** ");
//!
//! let doc = typist.document();
//! assert_eq!(doc.text(), "hello \n");
//! assert!(doc.attributes_at(0).unwrap().formats.contains(InlineFormat::BOLD));
//! ```

extern crate self as markdown_shortcuts;

use regex::{Captures, Regex};

#[macro_use]
mod macros;
mod api;
pub mod document;
pub mod edit;
mod engine;
mod error;
pub mod memory;
mod rules;
mod typist;

pub use api::{FormatGate, Options, Shortcuts};
pub use document::{BlockFormat, DeltaOp, Document, Embed, InlineFormat, Line, Selection, TextAttributes, TextChange};
pub use edit::{Edit, EditQueue, Scheduler, Transformation};
pub use engine::{Detection, PassOutcome, TriggerEvent, TriggerKind};
pub use error::ConfigError;
pub use memory::MemoryDocument;
pub use rules::ALL_FORMATS;
pub use typist::{Keystroke, Typist};

use crate::engine::MarkerMask;

/// Transformation procedure of a rule.
///
/// Returns the edits to schedule, or `None` to decline.
pub(crate) type Action = fn(&RuleMatch<'_>, &TriggerEvent) -> Option<Vec<Edit>>;

/// A trigger rule: a recognition pattern paired with a transformation.
///
/// Rules are immutable values built once per process (see `rules/`). The
/// pattern is a plain [`Regex`], which carries no match cursor between
/// searches, so every pass starts a fresh search.
#[derive(Clone)]
pub struct Rule {
    pub(crate) name: &'static str,
    pub(crate) pattern: Regex,
    /// Marker characters the line must contain for the pattern to have any
    /// chance of matching. Empty means "always try".
    pub(crate) markers: MarkerMask,
    pub(crate) action: Action,
}

impl Rule {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    /// Same rule with a replacement pattern. Marker gating is dropped since
    /// nothing is known about what the new pattern needs.
    pub(crate) fn with_pattern(&self, pattern: Regex) -> Rule {
        Rule { pattern, markers: MarkerMask::empty(), ..self.clone() }
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("pattern", &self.pattern.as_str())
            .field("markers", &self.markers)
            .field("action", &"<function>")
            .finish()
    }
}

/// A rule's pattern matched against the inspected line text.
///
/// `start` and `len` are in document units: `start` is the absolute document
/// offset of the match (line start + in-line offset).
#[derive(Debug)]
pub struct RuleMatch<'t> {
    pub rule: &'static str,
    captures: Captures<'t>,
    pub start: usize,
    pub len: usize,
}

impl<'t> RuleMatch<'t> {
    pub(crate) fn new(rule: &'static str, captures: Captures<'t>, text: &str, line_start: usize) -> Option<Self> {
        let whole = captures.get(0)?;
        let start = line_start + text[..whole.start()].chars().count();
        let len = whole.as_str().chars().count();
        Some(RuleMatch { rule, captures, start, len })
    }

    /// The whole matched text.
    pub fn as_str(&self) -> &'t str {
        self.captures.get(0).map(|m| m.as_str()).unwrap_or_default()
    }

    /// Capture group `i` (1-based; 0 is the whole match).
    pub fn group(&self, i: usize) -> Option<&'t str> {
        self.captures.get(i).map(|m| m.as_str())
    }
}
