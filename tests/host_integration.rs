use markdown_shortcuts::{
    ConfigError, Document, EditQueue, InlineFormat, MemoryDocument, Options, PassOutcome, Scheduler, Shortcuts,
    TextChange, Transformation, TriggerKind, Typist,
};

/// Host scheduler that only records what it was handed.
#[derive(Default)]
struct Recorder {
    posted: Vec<Transformation>,
}

impl Scheduler for Recorder {
    fn post(&mut self, transformation: Transformation) {
        self.posted.push(transformation);
    }
}

#[test]
fn transformation_is_deferred_to_the_scheduler() {
    let shortcuts = Shortcuts::default();
    let mut doc = MemoryDocument::from_text("**x** ");
    let mut recorder = Recorder::default();

    let detections = shortcuts.on_text_change(&doc, &TextChange::insert_at(5, " "), &mut recorder);

    assert_eq!(detections.len(), 1);
    assert_eq!(detections[0].outcome, PassOutcome::Scheduled("bold"));
    // Nothing has touched the document yet.
    assert_eq!(doc.text(), "**x** \n");

    assert_eq!(recorder.posted.len(), 1);
    recorder.posted[0].apply(&mut doc);
    assert_eq!(doc.text(), "x \n");
    assert_eq!(doc.attributes_at(0).map(|a| a.formats), Some(InlineFormat::BOLD));
}

#[test]
fn only_space_and_enter_trigger() {
    let shortcuts = Shortcuts::default();
    let doc = MemoryDocument::from_text("**x**\t");
    let mut queue = EditQueue::new();

    for insert in ["\t", "x", "  ", "a b"] {
        let detections = shortcuts.on_text_change(&doc, &TextChange::insert_at(5, insert), &mut queue);
        assert!(detections.is_empty(), "{insert:?}");
    }
    assert!(queue.is_empty());
}

#[test]
fn no_caret_means_no_pass() {
    let shortcuts = Shortcuts::default();
    let mut doc = MemoryDocument::from_text("**x** ");
    doc.blur();

    let detection = shortcuts.detect(&doc, TriggerKind::Space);
    assert_eq!(detection.outcome, PassOutcome::NoCaret);
    assert!(detection.transformation.is_none());
}

#[test]
fn empty_line_enter_is_a_no_op() {
    let shortcuts = Shortcuts::default();
    let mut typist = Typist::new(shortcuts, MemoryDocument::new());
    typist.type_str("\n");

    let outcome = &typist.keystrokes()[0].detections[0].outcome;
    // The synthetic space keeps the line non-empty, but nothing matches it.
    assert_eq!(*outcome, PassOutcome::NoMatch);
    assert_eq!(typist.document().text(), "\n\n");
}

#[test]
fn configuration_errors() {
    let cases = [
        (Options::default().include(["bold", "underline"]), ConfigError::UnknownFormat("underline".to_string())),
        (Options::default().include(["bold", "bold"]), ConfigError::DuplicateFormat("bold".to_string())),
        (Options::default().include(Vec::<String>::new()), ConfigError::EmptyFormatList),
    ];

    for (options, expected) in cases {
        assert_eq!(Shortcuts::new(options).unwrap_err(), expected);
    }
}

#[test]
fn ignore_tags_are_case_insensitive_and_replaceable() {
    let mut options = Options::default();
    options.ignore_tags = vec!["pre".to_string()];
    let mut typist = Typist::new(Shortcuts::new(options).unwrap(), MemoryDocument::new());
    typist.type_str("``` **x** ");
    assert_eq!(typist.document().lines()[0].text, "**x** ");

    // With nothing ignored, emphasis works inside a code block too.
    let mut options = Options::default();
    options.ignore_tags.clear();
    let mut typist = Typist::new(Shortcuts::new(options).unwrap(), MemoryDocument::new());
    typist.type_str("``` **x** ");
    assert_eq!(typist.document().lines()[0].text, "x ");
    assert_eq!(typist.fired(), vec!["code-block", "bold"]);
}

#[test]
fn gate_sees_the_matched_rule() {
    let options = Options::default().should_format(|rule| rule.name() != "header");
    let shortcuts = Shortcuts::new(options).unwrap();

    let mut typist = Typist::new(shortcuts, MemoryDocument::new());
    typist.type_str("# *title* ");

    let outcomes: Vec<_> =
        typist.keystrokes().iter().flat_map(|k| k.detections.iter()).map(|d| d.outcome.clone()).collect();
    assert_eq!(outcomes, vec![PassOutcome::Suppressed("header"), PassOutcome::Suppressed("header")]);
    assert_eq!(typist.document().lines()[0].tag, "P");
}

#[test]
fn active_rules_expose_their_patterns() {
    let shortcuts = Shortcuts::new(Options::default().include(["link", "header"])).unwrap();
    assert_eq!(shortcuts.active_rules(), vec!["header", "link"]);
    assert_eq!(shortcuts.rule("header").map(|r| r.pattern().as_str()), Some(r"^#{1,6}\s"));
    assert!(shortcuts.rule("bold").is_none());
}
