use crate::document::{Document, TextChange};
use crate::edit::Scheduler;
use crate::engine::{Detection, Detector, RuleSet, TriggerKind};
use crate::error::ConfigError;
use crate::Rule;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

static DEFAULT_RULES: Lazy<Vec<Rule>> = Lazy::new(crate::rules::catalog);

/// Per-rule gate consulted before every transformation.
pub type FormatGate = Arc<dyn Fn(&Rule) -> bool + Send + Sync>;

/// Configuration surface handed over by the hosting application.
#[derive(Clone)]
pub struct Options {
    /// Rule names to activate; `None` activates the whole catalog. The active
    /// rules always keep catalog order.
    pub include_formats: Option<Vec<String>>,
    /// Replacement pattern for the `header` rule. The heading level is the
    /// number of `#` in the match.
    pub header_pattern: Option<Regex>,
    /// Gate invoked before a matched rule runs; `false` ends the pass.
    pub should_format: Option<FormatGate>,
    /// Line tags inside which nothing is ever rewritten (ASCII
    /// case-insensitive).
    pub ignore_tags: Vec<String>,
}

impl Default for Options {
    fn default() -> Self {
        Options { include_formats: None, header_pattern: None, should_format: None, ignore_tags: vec!["PRE".to_string()] }
    }
}

impl std::fmt::Debug for Options {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Options")
            .field("include_formats", &self.include_formats)
            .field("header_pattern", &self.header_pattern.as_ref().map(Regex::as_str))
            .field("should_format", &self.should_format.as_ref().map(|_| "<function>"))
            .field("ignore_tags", &self.ignore_tags)
            .finish()
    }
}

impl Options {
    /// Activate only `names`.
    pub fn include<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include_formats = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn header_pattern(mut self, pattern: Regex) -> Self {
        self.header_pattern = Some(pattern);
        self
    }

    pub fn should_format<F>(mut self, gate: F) -> Self
    where
        F: Fn(&Rule) -> bool + Send + Sync + 'static,
    {
        self.should_format = Some(Arc::new(gate));
        self
    }
}

/// Markdown shortcut detector bound to one configuration.
///
/// Construct it once per editor, then feed it every change notification.
///
/// # Example
/// ```
/// use markdown_shortcuts::{Document, EditQueue, MemoryDocument, Options, Shortcuts};
///
/// let shortcuts = Shortcuts::new(Options::default().include(["header"])).unwrap();
/// let mut doc = MemoryDocument::new();
/// let mut queue = EditQueue::new();
///
/// for ch in ["#", "#", " "] {
///     let change = doc.type_text(ch).unwrap();
///     shortcuts.on_text_change(&doc, &change, &mut queue);
///     queue.flush(&mut doc);
/// }
///
/// assert_eq!(doc.line_at(0).unwrap().tag, "H2");
/// ```
#[derive(Debug)]
pub struct Shortcuts {
    detector: Detector,
}

impl Default for Shortcuts {
    /// Every catalog rule, no gate, `PRE` ignored.
    fn default() -> Self {
        let options = Options::default();
        Shortcuts { detector: Detector::new(RuleSet::full(&DEFAULT_RULES), None, options.ignore_tags) }
    }
}

impl Shortcuts {
    pub fn new(options: Options) -> Result<Self, ConfigError> {
        let rules =
            RuleSet::build(&DEFAULT_RULES, options.include_formats.as_deref(), options.header_pattern.as_ref())?;
        tracing::debug!(rules = ?rules.names(), "markdown shortcuts configured");

        Ok(Shortcuts { detector: Detector::new(rules, options.should_format, options.ignore_tags) })
    }

    /// Names of the active rules, in precedence order.
    pub fn active_rules(&self) -> Vec<&'static str> {
        self.detector.rules().names()
    }

    /// Active rule called `name`.
    pub fn rule(&self, name: &str) -> Option<&Rule> {
        self.detector.rules().get(name)
    }

    /// Run one detection pass without scheduling anything.
    pub fn detect<D: Document + ?Sized>(&self, doc: &D, kind: TriggerKind) -> Detection {
        self.detector.detect(doc, kind)
    }

    /// Handle a change notification from the host. Any resulting
    /// transformation is posted to `scheduler`, to be applied after the
    /// host's current update cycle.
    pub fn on_text_change<D, S>(&self, doc: &D, change: &TextChange, scheduler: &mut S) -> Vec<Detection>
    where
        D: Document + ?Sized,
        S: Scheduler + ?Sized,
    {
        self.detector.on_text_change(doc, change, scheduler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::ALL_FORMATS;

    #[test]
    fn default_activates_whole_catalog() {
        let shortcuts = Shortcuts::default();
        assert_eq!(shortcuts.active_rules(), ALL_FORMATS.to_vec());
    }

    #[test]
    fn new_with_default_options_matches_default() {
        let shortcuts = Shortcuts::new(Options::default()).unwrap();
        assert_eq!(shortcuts.active_rules(), Shortcuts::default().active_rules());
    }

    #[test]
    fn unknown_format_fails_construction() {
        let err = Shortcuts::new(Options::default().include(["bold", "blink"])).unwrap_err();
        assert_eq!(err, ConfigError::UnknownFormat("blink".to_string()));
        assert_eq!(err.to_string(), "unknown format `blink`");
    }

    #[test]
    fn options_debug_hides_gate() {
        let options = Options::default().should_format(|_| true);
        let rendered = format!("{options:?}");
        assert!(rendered.contains("<function>"));
        assert!(rendered.contains("PRE"));
    }
}
