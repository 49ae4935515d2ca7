//! In-memory rich-text document.
//!
//! `MemoryDocument` is a small reference implementation of [`Document`] used
//! by the tests and the debug CLI. It models a document the way delta-based
//! editors do:
//!
//! - a flat sequence of units (characters and embeds), always terminated by a
//!   newline;
//! - inline attributes stored per character;
//! - block formats stored on the newline that terminates a line.
//!
//! ```text
//! units:  h  e  y  \n[H2]  a  b  \n[-]
//! lines:  "hey" tag H2     "ab" tag P
//! ```
//!
//! Typing is modelled by [`MemoryDocument::type_text`], which inserts at the
//! caret, carries the caret's typing formats and returns the change
//! notification a host would emit.

use crate::document::{BlockFormat, Document, Embed, InlineFormat, Line, Selection, TextAttributes, TextChange};

/// Character used for embeds in line text.
pub const EMBED_CHAR: char = '\u{FFFC}';

const DEFAULT_TAG: &str = "P";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Content {
    Char(char),
    Embed(Embed),
}

#[derive(Debug, Clone)]
struct Unit {
    content: Content,
    attrs: TextAttributes,
    /// Only set on newline units.
    block: Option<BlockFormat>,
}

impl Unit {
    fn char(c: char, attrs: TextAttributes) -> Self {
        Unit { content: Content::Char(c), attrs, block: None }
    }

    fn newline(block: Option<BlockFormat>) -> Self {
        Unit { content: Content::Char('\n'), attrs: TextAttributes::plain(), block }
    }

    fn is_newline(&self) -> bool {
        self.content == Content::Char('\n')
    }

    fn render(&self) -> char {
        match self.content {
            Content::Char(c) => c,
            Content::Embed(_) => EMBED_CHAR,
        }
    }
}

/// A maximal run of identically formatted content inside one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Run {
    Text { start: usize, text: String, attrs: TextAttributes },
    Embed { start: usize, embed: Embed },
}

#[derive(Debug, Clone)]
pub struct MemoryDocument {
    units: Vec<Unit>,
    selection: Option<Selection>,
    /// Typing formats set explicitly at the caret; consumed by the next
    /// typed character.
    cursor_formats: Option<InlineFormat>,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        MemoryDocument::new()
    }
}

impl MemoryDocument {
    /// Empty document with the caret at offset 0.
    pub fn new() -> Self {
        MemoryDocument { units: vec![Unit::newline(None)], selection: Some(Selection::caret(0)), cursor_formats: None }
    }

    /// Document holding plain `text`, caret at the end of the text.
    pub fn from_text(text: &str) -> Self {
        let mut doc = MemoryDocument::new();
        doc.insert_text(0, text, &TextAttributes::plain());
        let end = doc.len() - 1;
        doc.set_selection(end);
        doc
    }

    /// Number of units, including the final newline.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.len() <= 1
    }

    /// Whole document as text; embeds render as [`EMBED_CHAR`].
    pub fn text(&self) -> String {
        self.units.iter().map(Unit::render).collect()
    }

    pub fn lines(&self) -> Vec<Line> {
        self.line_spans().into_iter().map(|(start, end)| self.line(start, end)).collect()
    }

    /// Drop the selection, as if the editor lost focus.
    pub fn blur(&mut self) {
        self.selection = None;
    }

    /// Offset (in units) of the first occurrence of `needle`.
    pub fn find(&self, needle: &str) -> Option<usize> {
        let text = self.text();
        let byte = text.find(needle)?;
        Some(text[..byte].chars().count())
    }

    /// Inline attributes of the character at `index`, `None` for embeds,
    /// newlines and out-of-range offsets.
    pub fn attributes_at(&self, index: usize) -> Option<&TextAttributes> {
        let unit = self.units.get(index)?;
        match unit.content {
            Content::Char(c) if c != '\n' => Some(&unit.attrs),
            _ => None,
        }
    }

    pub fn embed_at(&self, index: usize) -> Option<&Embed> {
        match &self.units.get(index)?.content {
            Content::Embed(embed) => Some(embed),
            Content::Char(_) => None,
        }
    }

    /// All embeds with their offsets.
    pub fn embeds(&self) -> Vec<(usize, Embed)> {
        self.units
            .iter()
            .enumerate()
            .filter_map(|(idx, unit)| match &unit.content {
                Content::Embed(embed) => Some((idx, embed.clone())),
                Content::Char(_) => None,
            })
            .collect()
    }

    /// Formats the next typed character will carry.
    pub fn typing_formats(&self) -> InlineFormat {
        match (self.cursor_formats, self.selection) {
            (Some(formats), _) => formats,
            (None, Some(sel)) => self.inherited_attrs(sel.index).formats,
            (None, None) => InlineFormat::empty(),
        }
    }

    /// Formatted runs of `line`, in order.
    pub fn runs(&self, line: &Line) -> Vec<Run> {
        let mut runs: Vec<Run> = Vec::new();
        let end = line.start + line.text.chars().count();

        for (idx, unit) in self.units.iter().enumerate().take(end).skip(line.start) {
            match &unit.content {
                Content::Embed(embed) => runs.push(Run::Embed { start: idx, embed: embed.clone() }),
                Content::Char(c) => match runs.last_mut() {
                    Some(Run::Text { text, attrs, .. }) if *attrs == unit.attrs => text.push(*c),
                    _ => runs.push(Run::Text { start: idx, text: c.to_string(), attrs: unit.attrs.clone() }),
                },
            }
        }
        runs
    }

    /// Type `text` at the caret the way a user would. Returns the change
    /// notification for the insertion, or `None` without a caret.
    pub fn type_text(&mut self, text: &str) -> Option<TextChange> {
        let sel = self.selection?;
        if sel.len > 0 {
            self.delete_text(sel.index, sel.len);
        }
        let index = sel.index.min(self.len() - 1);

        for (offset, c) in text.chars().enumerate() {
            let at = index + offset;
            let attrs = if c == '\n' {
                TextAttributes::plain()
            } else {
                match self.cursor_formats.take() {
                    Some(formats) => TextAttributes::inline(formats),
                    None => self.inherited_attrs(at),
                }
            };
            self.insert_text(at, &c.to_string(), &attrs);
        }
        self.cursor_formats = None;

        Some(TextChange::insert_at(index, text))
    }

    // --- internals ----------------------------------------------------------

    /// `(start, newline)` offsets of every line.
    fn line_spans(&self) -> Vec<(usize, usize)> {
        let mut spans = Vec::new();
        let mut start = 0;
        for (idx, unit) in self.units.iter().enumerate() {
            if unit.is_newline() {
                spans.push((start, idx));
                start = idx + 1;
            }
        }
        spans
    }

    fn line(&self, start: usize, newline: usize) -> Line {
        let text = self.units[start..newline].iter().map(Unit::render).collect();
        let tag = self.units[newline].block.as_ref().map(BlockFormat::tag).unwrap_or_else(|| DEFAULT_TAG.to_string());
        Line { text, tag, start }
    }

    /// Block format of the line containing `index`.
    fn block_at(&self, index: usize) -> Option<BlockFormat> {
        self.units.iter().skip(index).find(|u| u.is_newline()).and_then(|u| u.block.clone())
    }

    /// Formats a character typed at `index` picks up from its left neighbour.
    /// Links never extend.
    fn inherited_attrs(&self, index: usize) -> TextAttributes {
        match index.checked_sub(1).and_then(|prev| self.units.get(prev)) {
            Some(unit) if matches!(unit.content, Content::Char(c) if c != '\n') => {
                TextAttributes::inline(unit.attrs.formats)
            }
            _ => TextAttributes::plain(),
        }
    }

    fn shift_selection_for_insert(&mut self, index: usize, count: usize) {
        if let Some(sel) = self.selection.as_mut() {
            if sel.index >= index {
                sel.index += count;
            }
        }
    }
}

impl Document for MemoryDocument {
    fn selection(&self) -> Option<Selection> {
        self.selection
    }

    fn line_at(&self, index: usize) -> Option<Line> {
        self.line_spans().into_iter().find(|&(_, newline)| index <= newline).map(|(start, end)| self.line(start, end))
    }

    fn delete_text(&mut self, index: usize, len: usize) {
        // The final newline is never removed.
        let last = self.len() - 1;
        if index >= last || len == 0 {
            return;
        }
        let end = (index + len).min(last);
        self.units.drain(index..end);

        let removed = end - index;
        if let Some(sel) = self.selection.as_mut() {
            if sel.index >= end {
                sel.index -= removed;
            } else if sel.index > index {
                sel.index = index;
            }
        }
    }

    fn insert_text(&mut self, index: usize, text: &str, attrs: &TextAttributes) {
        let index = index.min(self.len() - 1);
        let block = self.block_at(index);

        let units: Vec<Unit> = text
            .chars()
            .map(|c| if c == '\n' { Unit::newline(block.clone()) } else { Unit::char(c, attrs.clone()) })
            .collect();
        let count = units.len();
        self.units.splice(index..index, units);
        self.shift_selection_for_insert(index, count);
    }

    fn insert_embed(&mut self, index: usize, embed: &Embed) {
        let index = index.min(self.len() - 1);
        self.units.insert(
            index,
            Unit { content: Content::Embed(embed.clone()), attrs: TextAttributes::plain(), block: None },
        );
        self.shift_selection_for_insert(index, 1);
    }

    fn format_line(&mut self, index: usize, len: usize, format: &BlockFormat) {
        let end = index + len;
        for (start, newline) in self.line_spans() {
            if newline >= index && start <= end {
                self.units[newline].block = Some(format.clone());
            }
        }
    }

    fn format(&mut self, formats: InlineFormat, enabled: bool) {
        let mut current = self.typing_formats();
        current.set(formats, enabled);
        self.cursor_formats = Some(current);
    }

    fn set_selection(&mut self, index: usize) {
        self.selection = Some(Selection::caret(index.min(self.len() - 1)));
        self.cursor_formats = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_report_start_offsets_and_tags() {
        let mut doc = MemoryDocument::from_text("one\ntwo");
        doc.format_line(5, 0, &BlockFormat::Header(2));

        let lines = doc.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], Line { text: "one".to_string(), tag: "P".to_string(), start: 0 });
        assert_eq!(lines[1], Line { text: "two".to_string(), tag: "H2".to_string(), start: 4 });

        // The newline offset belongs to its own line.
        assert_eq!(doc.line_at(3).map(|l| l.start), Some(0));
        assert_eq!(doc.line_at(4).map(|l| l.start), Some(4));
        assert_eq!(doc.line_at(100), None);
    }

    #[test]
    fn typing_moves_the_caret_and_reports_the_insert() {
        let mut doc = MemoryDocument::new();
        let change = doc.type_text("hi").unwrap();

        assert_eq!(doc.text(), "hi\n");
        assert_eq!(doc.selection(), Some(Selection::caret(2)));
        assert_eq!(change, TextChange::insert_at(0, "hi"));
    }

    #[test]
    fn delete_before_caret_shifts_it_left() {
        let mut doc = MemoryDocument::from_text("abcdef");
        doc.delete_text(1, 2);
        assert_eq!(doc.text(), "adef\n");
        assert_eq!(doc.selection(), Some(Selection::caret(4)));

        doc.set_selection(2);
        doc.delete_text(0, 3);
        assert_eq!(doc.selection(), Some(Selection::caret(0)));
    }

    #[test]
    fn final_newline_survives_deletes() {
        let mut doc = MemoryDocument::from_text("ab");
        doc.delete_text(0, 10);
        assert_eq!(doc.text(), "\n");
        assert!(doc.is_empty());
    }

    #[test]
    fn cleared_format_applies_to_next_typed_char_only() {
        let mut doc = MemoryDocument::new();
        doc.insert_text(0, "b", &TextAttributes::inline(InlineFormat::BOLD));
        doc.set_selection(1);
        assert_eq!(doc.typing_formats(), InlineFormat::BOLD);

        doc.format(InlineFormat::BOLD, false);
        doc.type_text("x");
        doc.type_text("y");

        let x = doc.find("x").unwrap();
        assert!(doc.attributes_at(x).unwrap().is_plain());
        assert!(doc.attributes_at(x + 1).unwrap().is_plain());
    }

    #[test]
    fn embeds_render_as_one_unit() {
        let mut doc = MemoryDocument::from_text("ab");
        doc.insert_embed(1, &Embed::Image("x.png".to_string()));

        assert_eq!(doc.len(), 4);
        assert_eq!(doc.lines()[0].text, format!("a{EMBED_CHAR}b"));
        assert_eq!(doc.embeds(), vec![(1, Embed::Image("x.png".to_string()))]);
        assert_eq!(doc.selection(), Some(Selection::caret(3)));
    }

    #[test]
    fn runs_group_equal_attributes() {
        let mut doc = MemoryDocument::from_text("ab");
        doc.insert_text(2, "cd", &TextAttributes::inline(InlineFormat::ITALIC));

        let line = doc.line_at(0).unwrap();
        let runs = doc.runs(&line);
        assert_eq!(runs.len(), 2);
        assert_eq!(
            runs[1],
            Run::Text { start: 2, text: "cd".to_string(), attrs: TextAttributes::inline(InlineFormat::ITALIC) }
        );
    }

    #[test]
    fn split_line_keeps_block_format_on_both_halves() {
        let mut doc = MemoryDocument::from_text("ab");
        doc.format_line(0, 0, &BlockFormat::Blockquote);
        doc.insert_text(1, "\n", &TextAttributes::plain());

        let tags: Vec<String> = doc.lines().into_iter().map(|l| l.tag).collect();
        assert_eq!(tags, vec!["BLOCKQUOTE", "BLOCKQUOTE"]);
    }
}
