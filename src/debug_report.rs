use markdown_shortcuts::memory::Run;
use markdown_shortcuts::{Detection, Document, Edit, Embed, InlineFormat, Keystroke, MemoryDocument, PassOutcome};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const MAGENTA: &str = "\x1b[35m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

pub fn print_run(input: &str, rules: &[&str], keystrokes: &[Keystroke], doc: &MemoryDocument, color: bool) {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Typing: {:?}", input), ansi::CYAN)));
    println!("  {} {}", palette.dim("rules:"), palette.paint(rules.join(", "), ansi::BLUE));

    println!("\n{}", palette.paint("━━━ Passes ━━━", ansi::GRAY));
    print_passes(keystrokes, &palette);

    println!("\n{}", palette.paint("━━━ Document ━━━", ansi::GRAY));
    print_document(doc, &palette);

    let total: std::time::Duration =
        keystrokes.iter().flat_map(|k| k.detections.iter()).map(|d| d.elapsed).sum();
    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    println!(
        "  Keystrokes: {}  │  Passes: {}  │  Detection: {}",
        palette.paint(keystrokes.len().to_string(), ansi::BLUE),
        palette.paint(keystrokes.iter().map(|k| k.detections.len()).sum::<usize>().to_string(), ansi::BLUE),
        palette.paint(format!("{total:?}"), ansi::GREEN),
    );
    println!();
}

fn print_passes(keystrokes: &[Keystroke], palette: &ansi::Palette) {
    let mut any = false;
    for (idx, stroke) in keystrokes.iter().enumerate() {
        for detection in &stroke.detections {
            any = true;
            println!(
                "  {} {} {}",
                palette.paint(format!("[{idx}]"), ansi::GRAY),
                palette.paint(detection.kind.as_str(), ansi::BLUE),
                fmt_outcome(detection, palette),
            );
            if let Some(transformation) = &detection.transformation {
                for edit in &transformation.edits {
                    println!("      {}", palette.dim(fmt_edit(edit)));
                }
            }
        }
    }
    if !any {
        println!("{}", palette.dim("  No trigger characters typed"));
    }
}

fn fmt_outcome(detection: &Detection, palette: &ansi::Palette) -> String {
    let counts = palette.dim(format!("(tried {}, skipped {})", detection.rules_tried, detection.rules_skipped));
    match &detection.outcome {
        PassOutcome::Scheduled(rule) => {
            format!("{} {} {}", palette.paint("✓", ansi::GREEN), palette.bold(palette.paint(*rule, ansi::GREEN)), counts)
        }
        PassOutcome::Declined(rule) | PassOutcome::Suppressed(rule) => format!(
            "{} {} {} {}",
            palette.paint("✗", ansi::YELLOW),
            palette.paint(*rule, ansi::YELLOW),
            palette.dim(detection.outcome.label()),
            counts
        ),
        PassOutcome::IgnoredTag(tag) => palette.dim(format!("✗ ignored tag {tag}")),
        other => format!("{} {}", palette.dim(format!("✗ {}", other.label())), counts),
    }
}

fn fmt_edit(edit: &Edit) -> String {
    match edit {
        Edit::FormatLine { index, format, .. } => format!("format line @{index} as {}", format.tag()),
        Edit::Delete { index, len } => format!("delete {index}..{}", index + len),
        Edit::Insert { index, text, attrs } if attrs.is_plain() => format!("insert {text:?} @{index}"),
        Edit::Insert { index, text, attrs } => format!("insert {text:?} @{index} {}", fmt_attrs(attrs.formats, &attrs.link)),
        Edit::InsertEmbed { index, embed } => format!("embed {} @{index}", fmt_embed(embed)),
        Edit::ClearFormat(formats) => format!("clear {}", fmt_attrs(*formats, &None)),
        Edit::SetSelection(index) => format!("caret -> {index}"),
    }
}

fn print_document(doc: &MemoryDocument, palette: &ansi::Palette) {
    for (idx, line) in doc.lines().iter().enumerate() {
        println!(
            "  {} {} {}",
            palette.paint(format!("{idx:>2}"), ansi::GRAY),
            palette.paint(format!("<{}>", line.tag), ansi::MAGENTA),
            palette.dim(format!("@{}", line.start)),
        );
        for run in doc.runs(line) {
            match run {
                Run::Text { start, text, attrs } => {
                    let label = if attrs.is_plain() {
                        palette.dim("plain")
                    } else {
                        palette.paint(fmt_attrs(attrs.formats, &attrs.link), ansi::YELLOW)
                    };
                    println!("     {} {:?} {}", palette.dim(format!("{start:>3}")), text, label);
                }
                Run::Embed { start, embed } => {
                    println!(
                        "     {} {}",
                        palette.dim(format!("{start:>3}")),
                        palette.paint(fmt_embed(&embed), ansi::CYAN)
                    );
                }
            }
        }
    }

    let caret = doc.selection().map(|s| s.index.to_string()).unwrap_or_else(|| "none".to_string());
    println!("\n  {} {}", palette.dim("caret:"), palette.paint(caret, ansi::GREEN));
}

fn fmt_attrs(formats: InlineFormat, link: &Option<String>) -> String {
    let mut parts: Vec<String> = formats.iter_names().map(|(name, _)| name.to_lowercase()).collect();
    if let Some(href) = link {
        parts.push(format!("link={href}"));
    }
    parts.join("+")
}

fn fmt_embed(embed: &Embed) -> String {
    match embed {
        Embed::Divider => "[divider]".to_string(),
        Embed::Image(url) => format!("[image {url}]"),
    }
}
