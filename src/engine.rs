//! Trigger detection engine.
//!
//! This module is the runtime side of the crate: it turns a host change
//! notification into at most one scheduled [`Transformation`](crate::Transformation).
//!
//! ## How the parts work together
//!
//! ```text
//! rules::catalog() ──┐
//!                    │  RuleSet::build              (rule_set.rs)
//!                    └──────────┬─────────── include list, header override
//!                               │
//! text-change ── TriggerKind ───┼─ TriggerEvent::capture  (trigger.rs)
//!   (' ' / '\n')                │    caret, line, tag, marker scan
//!                               v
//!                     Detector::detect               (detector.rs)
//!                       - skip rules whose markers are absent
//!                       - first syntactic match wins
//!                       - gate, then action (edits or decline)
//!                               │
//!                               v
//!                     Detection { PassOutcome, Transformation }  (outcome.rs)
//! ```
//!
//! ## Responsibilities by module
//!
//! - `rule_set.rs`: the ordered active rule set and the `MarkerMask` each rule
//!   declares.
//! - `trigger.rs`: trigger characters, the inspected text window and the
//!   offset arithmetic shared by every rule.
//! - `detector.rs`: the detection pass and change-notification handling.
//! - `outcome.rs`: per-pass outcome and timing, for callers and the CLI.
//!
//! ## Debugging
//!
//! Every pass emits a `tracing` event at `debug`; rule-by-rule scanning is
//! logged at `trace`.

#[path = "engine/detector.rs"]
mod detector;
#[path = "engine/outcome.rs"]
mod outcome;
#[path = "engine/rule_set.rs"]
mod rule_set;
#[path = "engine/trigger.rs"]
mod trigger;

pub use detector::Detector;
pub use outcome::{Detection, PassOutcome};
pub use rule_set::{MarkerMask, RuleSet};
pub use trigger::{TriggerEvent, TriggerKind};
