use crate::document::{BlockFormat, InlineFormat, TextAttributes};
use crate::{Edit, RuleMatch, TriggerEvent, TriggerKind};

/// Length of `s` in document units.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// True when the line holds nothing but emphasis/code markers and
/// whitespace, e.g. `** **`. Inline rules decline on such lines.
pub fn is_marker_only(text: &str) -> bool {
    regex!(r"^[*_~`\s]+$").is_match(text)
}

/// Heading level for a matched header prefix: the number of `#`, capped at 6.
/// `None` when the match holds no `#` at all.
pub fn heading_level(matched: &str) -> Option<u8> {
    let hashes = matched.chars().filter(|&c| c == '#').count();
    if hashes == 0 { None } else { Some(hashes.min(6) as u8) }
}

/// Edits shared by the inline rules: replace the marked span with its inner
/// text carrying `formats`, then stop `formats` at the caret.
///
/// ```text
/// "a **b** |"  ──▶  delete "**b**"  ──▶  insert "b" [bold]  ──▶  bold off
/// ```
pub fn replace_inline(m: &RuleMatch<'_>, event: &TriggerEvent, formats: InlineFormat) -> Option<Vec<Edit>> {
    if is_marker_only(&event.text) {
        return None;
    }
    let inner = m.group(1)?;

    Some(vec![
        Edit::Delete { index: m.start, len: event.clamp_len(m.start, m.len) },
        Edit::Insert { index: m.start, text: inner.to_string(), attrs: TextAttributes::inline(formats) },
        Edit::ClearFormat(formats),
    ])
}

/// Edits for a block rule: format the inspected line, then remove the marker
/// prefix matched at the line start.
///
/// When enter completes a line holding nothing but the marker, the marker and
/// its newline go away and the format lands on the caret line instead, so
/// typing continues inside the new block:
///
/// ```text
/// "```\n|"  ──▶  format caret line as PRE  ──▶  delete "```\n"  ──▶  "|" [PRE]
/// ```
pub fn format_block(m: &RuleMatch<'_>, event: &TriggerEvent, format: BlockFormat) -> Vec<Edit> {
    let len = event.clamp_len(m.start, m.len);
    let marker_only = m.start == event.line_start && len == event.line_len;

    if event.kind == TriggerKind::Enter && marker_only {
        return vec![
            Edit::FormatLine { index: event.caret, len: 0, format },
            Edit::Delete { index: event.line_start, len: event.line_len + 1 },
        ];
    }

    vec![Edit::FormatLine { index: event.line_start, len: 0, format }, Edit::Delete { index: m.start, len }]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_only_lines() {
        assert!(is_marker_only("** ** "));
        assert!(is_marker_only("~~ ~~"));
        assert!(is_marker_only("` `"));
        assert!(!is_marker_only("**a** "));
        assert!(!is_marker_only(""));
    }

    #[test]
    fn heading_levels() {
        assert_eq!(heading_level("### "), Some(3));
        assert_eq!(heading_level("####### "), Some(6));
        assert_eq!(heading_level("= "), None);
    }
}
