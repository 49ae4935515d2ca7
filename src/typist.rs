//! Keystroke simulator.
//!
//! `Typist` plays the part of the host editor for a [`MemoryDocument`]: for
//! every character it types, it emits the change notification, lets the
//! detector run, and flushes the deferred queue before the next keystroke,
//! exactly the cycle a real host integration has to provide.
//!
//! ```text
//! type 'c' ─▶ doc.type_text ─▶ on_text_change ─▶ queue.post
//!                                                    │
//!            next keystroke ◀── queue.flush(&mut doc)┘
//! ```

use crate::api::Shortcuts;
use crate::edit::EditQueue;
use crate::engine::Detection;
use crate::memory::MemoryDocument;

/// One typed character and the detection passes it caused.
#[derive(Debug, Clone)]
pub struct Keystroke {
    pub ch: char,
    pub detections: Vec<Detection>,
}

/// Drives a [`MemoryDocument`] one keystroke at a time.
///
/// Every keystroke and its passes are kept for inspection, so the log grows
/// with the input. Meant for tests and the debug CLI; a long-running host
/// should call [`Shortcuts::on_text_change`] and its own scheduler directly.
#[derive(Debug)]
pub struct Typist {
    doc: MemoryDocument,
    shortcuts: Shortcuts,
    queue: EditQueue,
    keystrokes: Vec<Keystroke>,
}

impl Typist {
    pub fn new(shortcuts: Shortcuts, doc: MemoryDocument) -> Self {
        Typist { doc, shortcuts, queue: EditQueue::new(), keystrokes: Vec::new() }
    }

    /// Type `text` one character at a time. `'\n'` presses enter.
    ///
    /// Characters typed while the document has no caret are dropped.
    pub fn type_str(&mut self, text: &str) -> &mut Self {
        for ch in text.chars() {
            let Some(change) = self.doc.type_text(&ch.to_string()) else {
                continue;
            };
            let detections = self.shortcuts.on_text_change(&self.doc, &change, &mut self.queue);
            self.queue.flush(&mut self.doc);
            self.keystrokes.push(Keystroke { ch, detections });
        }
        self
    }

    pub fn document(&self) -> &MemoryDocument {
        &self.doc
    }

    pub fn keystrokes(&self) -> &[Keystroke] {
        &self.keystrokes
    }

    /// Names of the rules that fired, in typing order.
    pub fn fired(&self) -> Vec<&'static str> {
        self.keystrokes
            .iter()
            .flat_map(|k| k.detections.iter())
            .filter(|d| d.outcome.is_scheduled())
            .filter_map(|d| d.outcome.rule())
            .collect()
    }
}
