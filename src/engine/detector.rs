//! Detection pass.
//!
//! The detector owns the active [`RuleSet`] and runs one pass per trigger
//! character:
//!
//! ```text
//! capture TriggerEvent ──▶ for rule in RuleSet (catalog order)
//!   (NoCaret / EmptyLine      ├─ markers absent?     skip
//!    / IgnoredTag)            ├─ pattern no match?   next rule
//!                             └─ first match ──▶ gate false?  Suppressed, stop
//!                                              └─ action ──▶ None: Declined, stop
//!                                                         └─ edits: Scheduled, stop
//! ```
//!
//! ## Design notes
//!
//! - The first syntactic match ends the pass even when that rule declines or
//!   is gated off. Lower-priority rules are never consulted for that event.
//! - The pattern is executed once per rule; the captures are handed to the
//!   action, so the action cannot see a different match than the detector.
//! - The detector only reads the document. Mutations leave through the
//!   `Scheduler` and run after the host's update cycle.

use super::outcome::{Detection, PassOutcome};
use super::rule_set::RuleSet;
use super::trigger::{TriggerEvent, TriggerKind};
use crate::api::FormatGate;
use crate::document::{Document, TextChange};
use crate::edit::{Scheduler, Transformation};
use crate::RuleMatch;
use std::time::Instant;

pub struct Detector {
    rules: RuleSet,
    gate: Option<FormatGate>,
    ignore_tags: Vec<String>,
}

impl std::fmt::Debug for Detector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Detector")
            .field("rules", &self.rules.names())
            .field("gate", &self.gate.as_ref().map(|_| "<function>"))
            .field("ignore_tags", &self.ignore_tags)
            .finish()
    }
}

impl Detector {
    pub(crate) fn new(rules: RuleSet, gate: Option<FormatGate>, ignore_tags: Vec<String>) -> Self {
        Detector { rules, gate, ignore_tags }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Run one detection pass for a `kind` trigger against the current state
    /// of `doc`. Never mutates the document.
    pub fn detect<D: Document + ?Sized>(&self, doc: &D, kind: TriggerKind) -> Detection {
        let started = Instant::now();

        let event = match TriggerEvent::capture(doc, kind, &self.ignore_tags) {
            Ok(event) => event,
            Err(outcome) => {
                tracing::debug!(trigger = kind.as_str(), outcome = outcome.label(), "detection skipped");
                return Detection::finished(kind, outcome, started.elapsed());
            }
        };

        let mut rules_tried = 0;
        let mut rules_skipped = 0;
        let mut outcome = PassOutcome::NoMatch;
        let mut transformation = None;

        for rule in self.rules.iter() {
            if !rule.markers.is_empty() && !rule.markers.intersects(event.markers) {
                rules_skipped += 1;
                continue;
            }

            rules_tried += 1;
            let Some(captures) = rule.pattern.captures(&event.text) else {
                tracing::trace!(rule = rule.name, "no match");
                continue;
            };
            let Some(matched) = RuleMatch::new(rule.name, captures, &event.text, event.line_start) else {
                continue;
            };
            tracing::trace!(rule = rule.name, start = matched.start, len = matched.len, "matched");

            if let Some(gate) = &self.gate {
                if !gate(rule) {
                    outcome = PassOutcome::Suppressed(rule.name);
                    break;
                }
            }

            match (rule.action)(&matched, &event) {
                Some(edits) => {
                    transformation = Some(Transformation { rule: rule.name, edits });
                    outcome = PassOutcome::Scheduled(rule.name);
                }
                None => outcome = PassOutcome::Declined(rule.name),
            }
            break;
        }

        tracing::debug!(
            trigger = kind.as_str(),
            caret = event.caret,
            outcome = outcome.label(),
            rule = outcome.rule().unwrap_or("-"),
            rules_tried,
            rules_skipped,
            "detection pass"
        );

        Detection { kind, outcome, transformation, rules_tried, rules_skipped, elapsed: started.elapsed() }
    }

    /// Handle a host change notification: one pass per inserted trigger
    /// character, posting the resulting transformation to `scheduler`.
    ///
    /// Stops after the first scheduled transformation; offsets of any later
    /// inserts in the same change would be stale once it runs.
    pub fn on_text_change<D, S>(&self, doc: &D, change: &TextChange, scheduler: &mut S) -> Vec<Detection>
    where
        D: Document + ?Sized,
        S: Scheduler + ?Sized,
    {
        let mut detections = Vec::new();

        for kind in change.inserts().filter_map(TriggerKind::from_insert) {
            let detection = self.detect(doc, kind);
            let scheduled = detection.transformation.clone();
            detections.push(detection);

            if let Some(transformation) = scheduled {
                scheduler.post(transformation);
                break;
            }
        }

        detections
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit::EditQueue;
    use crate::memory::MemoryDocument;
    use crate::{Rule, rules};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn detector() -> Detector {
        Detector::new(RuleSet::full(&rules::catalog()), None, vec!["PRE".to_string()])
    }

    #[test]
    fn first_match_wins_and_stops() {
        let doc = MemoryDocument::from_text("***x*** ");
        let detection = detector().detect(&doc, TriggerKind::Space);

        assert_eq!(detection.outcome, PassOutcome::Scheduled("bolditalic"));
        assert_eq!(detection.transformation.map(|t| t.rule), Some("bolditalic"));
    }

    #[test]
    fn decline_does_not_fall_through() {
        // italic matches "* *" and declines; hr would match the line but is never tried.
        let doc = MemoryDocument::from_text("* * * ");
        let detection = detector().detect(&doc, TriggerKind::Space);

        assert_eq!(detection.outcome, PassOutcome::Declined("italic"));
        assert!(detection.transformation.is_none());
    }

    #[test]
    fn rules_without_markers_on_the_line_are_skipped() {
        let doc = MemoryDocument::from_text("just words ");
        let detection = detector().detect(&doc, TriggerKind::Space);

        assert_eq!(detection.outcome, PassOutcome::NoMatch);
        assert_eq!(detection.rules_tried, 0);
        assert_eq!(detection.rules_skipped, rules::ALL_FORMATS.len());
    }

    #[test]
    fn gate_false_aborts_the_pass() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let gate: FormatGate = Arc::new(move |_rule: &Rule| {
            seen.fetch_add(1, Ordering::SeqCst);
            false
        });
        let detector = Detector::new(RuleSet::full(&rules::catalog()), Some(gate), Vec::new());

        let doc = MemoryDocument::from_text("**x** ");
        let detection = detector.detect(&doc, TriggerKind::Space);

        assert_eq!(detection.outcome, PassOutcome::Suppressed("bold"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn change_without_trigger_characters_runs_no_pass() {
        let doc = MemoryDocument::from_text("**x**");
        let mut queue = EditQueue::new();
        let detections = detector().on_text_change(&doc, &TextChange::insert_at(4, "*"), &mut queue);

        assert!(detections.is_empty());
        assert!(queue.is_empty());
    }

    #[test]
    fn scheduled_edits_wait_in_the_queue() {
        let mut doc = MemoryDocument::from_text("`x` ");
        let mut queue = EditQueue::new();
        let detections = detector().on_text_change(&doc, &TextChange::insert_at(3, " "), &mut queue);

        assert_eq!(detections.len(), 1);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.pending().map(|t| t.rule).collect::<Vec<_>>(), vec!["code"]);
        assert_eq!(doc.text(), "`x` \n");

        queue.flush(&mut doc);
        assert_eq!(doc.text(), "x  \n");
    }
}
