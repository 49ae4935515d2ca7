use crate::document::{BlockFormat, Embed, InlineFormat, TextAttributes};
use crate::engine::MarkerMask;
use crate::{Edit, Rule, TriggerKind};

use crate::rules::markdown::helpers::{char_len, format_block, heading_level, replace_inline};

// Block rules

/// `#`..`######` + space at the line start.
fn rule_header() -> Rule {
    rule! {
        name: "header",
        pattern: regex!(r"^#{1,6}\s"),
        markers: MarkerMask::HASH,
        action: |m: &RuleMatch, event: &TriggerEvent| {
            let level = heading_level(m.as_str())?;
            Some(format_block(m, event, BlockFormat::Header(level)))
        },
    }
}

/// `>` + space at the line start.
fn rule_blockquote() -> Rule {
    rule! {
        name: "blockquote",
        pattern: regex!(r"^>\s"),
        markers: MarkerMask::GT,
        action: |m: &RuleMatch, event: &TriggerEvent| {
            Some(format_block(m, event, BlockFormat::Blockquote))
        },
    }
}

/// Three backticks + whitespace at the line start.
fn rule_code_block() -> Rule {
    rule! {
        name: "code-block",
        pattern: regex!(r"^```\s"),
        markers: MarkerMask::BACKTICK,
        action: |m: &RuleMatch, event: &TriggerEvent| {
            Some(format_block(m, event, BlockFormat::CodeBlock))
        },
    }
}

// Inline rules (longest marker first)

fn rule_bold_italic() -> Rule {
    rule! {
        name: "bolditalic",
        pattern: regex!(r"[*_]{3}(.+?)[*_]{3}"),
        markers: MarkerMask::STAR | MarkerMask::UNDERSCORE,
        action: |m: &RuleMatch, event: &TriggerEvent| {
            replace_inline(m, event, InlineFormat::BOLD | InlineFormat::ITALIC)
        },
    }
}

fn rule_bold() -> Rule {
    rule! {
        name: "bold",
        pattern: regex!(r"[*_]{2}(.+?)[*_]{2}"),
        markers: MarkerMask::STAR | MarkerMask::UNDERSCORE,
        action: |m: &RuleMatch, event: &TriggerEvent| {
            replace_inline(m, event, InlineFormat::BOLD)
        },
    }
}

fn rule_italic() -> Rule {
    rule! {
        name: "italic",
        pattern: regex!(r"[*_](.+?)[*_]"),
        markers: MarkerMask::STAR | MarkerMask::UNDERSCORE,
        action: |m: &RuleMatch, event: &TriggerEvent| {
            replace_inline(m, event, InlineFormat::ITALIC)
        },
    }
}

fn rule_strikethrough() -> Rule {
    rule! {
        name: "strikethrough",
        pattern: regex!(r"~~(.+?)~~"),
        markers: MarkerMask::TILDE,
        action: |m: &RuleMatch, event: &TriggerEvent| {
            replace_inline(m, event, InlineFormat::STRIKE)
        },
    }
}

/// Inline code also gets an unformatted space after the code text, so the
/// caret leaves the code run.
fn rule_code() -> Rule {
    rule! {
        name: "code",
        pattern: regex!(r"`(.+?)`"),
        markers: MarkerMask::BACKTICK,
        action: |m: &RuleMatch, event: &TriggerEvent| {
            let inner = m.group(1)?;
            let mut edits = replace_inline(m, event, InlineFormat::CODE)?;
            edits.push(Edit::Insert {
                index: m.start + char_len(inner),
                text: " ".to_string(),
                attrs: TextAttributes::plain(),
            });
            Some(edits)
        },
    }
}

// Whole-line rules

/// `---`, `***`, `- - -`, ... alone on a line. The line's text becomes a
/// divider and the caret lands on the line after it.
fn rule_horizontal_rule() -> Rule {
    rule! {
        name: "hr",
        pattern: regex!(r"^(?:[-*]\s?){3,}\s*$"),
        markers: MarkerMask::DASH | MarkerMask::STAR,
        action: |m: &RuleMatch, event: &TriggerEvent| {
            let start = m.start;
            let mut edits = vec![
                Edit::Delete { index: start, len: event.line_len },
                Edit::InsertEmbed { index: start, embed: Embed::Divider },
            ];
            // Enter already opened the following line.
            if event.kind == TriggerKind::Space {
                edits.push(Edit::Insert { index: start + 1, text: "\n".to_string(), attrs: TextAttributes::plain() });
            }
            edits.push(Edit::SetSelection(start + 2));
            Some(edits)
        },
    }
}

/// `+` + space as the whole line. `-`/`*` bullets are left to the host
/// editor's own list handling.
fn rule_plus_list() -> Rule {
    rule! {
        name: "plus-ul",
        pattern: regex!(r"^\+\s$"),
        markers: MarkerMask::PLUS,
        action: |m: &RuleMatch, event: &TriggerEvent| {
            Some(format_block(m, event, BlockFormat::BulletList))
        },
    }
}

// Embed rules

fn rule_image() -> Rule {
    rule! {
        name: "image",
        pattern: regex!(r"!\[(.+?)\]\((.+?)\)"),
        markers: MarkerMask::BANG,
        action: |m: &RuleMatch, event: &TriggerEvent| {
            let url = m.group(2)?;
            Some(vec![
                Edit::Delete { index: m.start, len: event.clamp_len(m.start, m.len) },
                Edit::InsertEmbed { index: m.start, embed: Embed::Image(url.to_string()) },
            ])
        },
    }
}

fn rule_link() -> Rule {
    rule! {
        name: "link",
        pattern: regex!(r"\[(.+?)\]\((.+?)\)"),
        markers: MarkerMask::BRACKET,
        action: |m: &RuleMatch, event: &TriggerEvent| {
            let label = m.group(1)?;
            let href = m.group(2)?;
            Some(vec![
                Edit::Delete { index: m.start, len: event.clamp_len(m.start, m.len) },
                Edit::Insert { index: m.start, text: label.to_string(), attrs: TextAttributes::link(href) },
            ])
        },
    }
}

/// The full catalog, in precedence order.
pub fn get() -> Vec<Rule> {
    vec![
        rule_header(),
        rule_blockquote(),
        rule_code_block(),
        rule_bold_italic(),
        rule_bold(),
        rule_italic(),
        rule_strikethrough(),
        rule_code(),
        rule_horizontal_rule(),
        rule_plus_list(),
        rule_image(),
        rule_link(),
    ]
}
