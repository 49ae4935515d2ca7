//! Host document seam.
//!
//! The engine never owns the rich-text document. It reads caret and line state
//! through [`Document`] during a detection pass, and later writes through the
//! same trait when a deferred [`Transformation`](crate::Transformation) is
//! flushed.
//!
//! ## Offsets
//!
//! All offsets are in *document units*: one unit per character and one unit
//! per embed. A host exposing line text must render each embed as a single
//! character (the memory document uses U+FFFC) so that line-relative offsets
//! stay aligned with document offsets.
//!
//! ```text
//! document:  "ab" [img] "c" \n "### x" \n
//! offsets:    0 1   2    3  4   5..9   10
//! line 1:    start = 5, text = "### x", tag = "H3" / "P" / ...
//! ```

use bitflags::bitflags;

/// Current caret/selection. `len == 0` is a plain caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub index: usize,
    pub len: usize,
}

impl Selection {
    pub fn caret(index: usize) -> Self {
        Selection { index, len: 0 }
    }
}

/// A single document line as seen by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// Text content without the trailing newline.
    pub text: String,
    /// Element tag of the line (`"P"`, `"H2"`, `"PRE"`, ...).
    pub tag: String,
    /// Document offset of the first unit of the line.
    pub start: usize,
}

bitflags! {
    /// Inline (character-level) formats.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct InlineFormat: u8 {
        const BOLD   = 1 << 0;
        const ITALIC = 1 << 1;
        const STRIKE = 1 << 2;
        const CODE   = 1 << 3;
    }
}

/// Attributes carried by inserted text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextAttributes {
    pub formats: InlineFormat,
    pub link: Option<String>,
}

impl TextAttributes {
    pub fn plain() -> Self {
        TextAttributes::default()
    }

    pub fn inline(formats: InlineFormat) -> Self {
        TextAttributes { formats, link: None }
    }

    pub fn link(href: impl Into<String>) -> Self {
        TextAttributes { formats: InlineFormat::empty(), link: Some(href.into()) }
    }

    pub fn is_plain(&self) -> bool {
        self.formats.is_empty() && self.link.is_none()
    }
}

/// Block (line-level) formats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockFormat {
    /// Heading level, 1..=6.
    Header(u8),
    Blockquote,
    CodeBlock,
    BulletList,
}

impl BlockFormat {
    /// Element tag a line with this format renders as.
    pub fn tag(&self) -> String {
        match self {
            BlockFormat::Header(level) => format!("H{level}"),
            BlockFormat::Blockquote => "BLOCKQUOTE".to_string(),
            BlockFormat::CodeBlock => "PRE".to_string(),
            BlockFormat::BulletList => "LI".to_string(),
        }
    }
}

/// Non-text content occupying one document unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Embed {
    /// Horizontal rule.
    Divider,
    /// Image referencing a URL.
    Image(String),
}

/// One operation of a change notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeltaOp {
    Retain(usize),
    Insert(String),
    Delete(usize),
}

/// Change notification emitted by the host after the document changed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextChange {
    pub ops: Vec<DeltaOp>,
}

impl TextChange {
    /// Change describing `text` inserted at `index`.
    pub fn insert_at(index: usize, text: impl Into<String>) -> Self {
        let mut ops = Vec::with_capacity(2);
        if index > 0 {
            ops.push(DeltaOp::Retain(index));
        }
        ops.push(DeltaOp::Insert(text.into()));
        TextChange { ops }
    }

    /// Inserted strings, in op order.
    pub fn inserts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DeltaOp::Insert(text) => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Operations the engine needs from the host rich-text document.
///
/// Queries are used while detecting; mutations only while flushing a deferred
/// transformation.
pub trait Document {
    /// Current selection, or `None` when the editor has no focus.
    fn selection(&self) -> Option<Selection>;

    /// Line containing `index`. The offset of a line's newline belongs to
    /// that line.
    fn line_at(&self, index: usize) -> Option<Line>;

    fn delete_text(&mut self, index: usize, len: usize);

    fn insert_text(&mut self, index: usize, text: &str, attrs: &TextAttributes);

    fn insert_embed(&mut self, index: usize, embed: &Embed);

    /// Apply a block format to every line touched by `index..index + len`
    /// (`len == 0` formats the line containing `index`).
    fn format_line(&mut self, index: usize, len: usize, format: &BlockFormat);

    /// Turn inline formats on or off for text typed at the caret.
    fn format(&mut self, formats: InlineFormat, enabled: bool);

    fn set_selection(&mut self, index: usize);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_change_skips_zero_retain() {
        let change = TextChange::insert_at(0, " ");
        assert_eq!(change.ops, vec![DeltaOp::Insert(" ".to_string())]);

        let change = TextChange::insert_at(4, "\n");
        assert_eq!(change.ops, vec![DeltaOp::Retain(4), DeltaOp::Insert("\n".to_string())]);
        assert_eq!(change.inserts().collect::<Vec<_>>(), vec!["\n"]);
    }

    #[test]
    fn block_format_tags() {
        assert_eq!(BlockFormat::Header(3).tag(), "H3");
        assert_eq!(BlockFormat::CodeBlock.tag(), "PRE");
        assert_eq!(BlockFormat::BulletList.tag(), "LI");
    }
}
