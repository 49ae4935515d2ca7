//! Detection pass outcomes.
//!
//! Every pass ends in exactly one [`PassOutcome`]. None of them is an error:
//! when nothing fires, typing behaves exactly like an unmodified editor.
//!
//! [`Detection`] bundles the outcome with the scheduled transformation (if any)
//! and a few counters that are handy when debugging rule precedence.

use super::trigger::TriggerKind;
use crate::edit::Transformation;
use std::time::Duration;

/// How a detection pass ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassOutcome {
    /// The editor has no selection.
    NoCaret,
    /// The inspected line has no text.
    EmptyLine,
    /// The line's element tag is on the ignore list.
    IgnoredTag(String),
    /// No active rule matched.
    NoMatch,
    /// The first matching rule was rejected by the `should_format` gate.
    Suppressed(&'static str),
    /// The first matching rule declined (e.g. only marker characters).
    Declined(&'static str),
    /// The first matching rule produced a transformation.
    Scheduled(&'static str),
}

impl PassOutcome {
    /// Name of the rule the pass stopped at, if it reached one.
    pub fn rule(&self) -> Option<&'static str> {
        match self {
            PassOutcome::Suppressed(name) | PassOutcome::Declined(name) | PassOutcome::Scheduled(name) => Some(name),
            _ => None,
        }
    }

    pub fn is_scheduled(&self) -> bool {
        matches!(self, PassOutcome::Scheduled(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            PassOutcome::NoCaret => "no caret",
            PassOutcome::EmptyLine => "empty line",
            PassOutcome::IgnoredTag(_) => "ignored tag",
            PassOutcome::NoMatch => "no match",
            PassOutcome::Suppressed(_) => "suppressed",
            PassOutcome::Declined(_) => "declined",
            PassOutcome::Scheduled(_) => "scheduled",
        }
    }
}

/// Result of one detection pass.
#[derive(Debug, Clone)]
pub struct Detection {
    pub kind: TriggerKind,
    pub outcome: PassOutcome,
    /// Edits to run after the current update cycle; only set when the
    /// outcome is [`PassOutcome::Scheduled`].
    pub transformation: Option<Transformation>,
    /// Rules whose pattern was executed.
    pub rules_tried: usize,
    /// Rules skipped because none of their markers were on the line.
    pub rules_skipped: usize,
    pub elapsed: Duration,
}

impl Detection {
    pub(crate) fn finished(kind: TriggerKind, outcome: PassOutcome, elapsed: Duration) -> Self {
        Detection { kind, outcome, transformation: None, rules_tried: 0, rules_skipped: 0, elapsed }
    }
}
