mod debug_report;

use markdown_shortcuts::{ALL_FORMATS, MemoryDocument, Options, Shortcuts, Typist};
use std::io::{self, IsTerminal, Read};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "MARKDOWN_SHORTCUTS_LOG";

fn main() {
    init_logging();

    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let mut options = Options::default();
    if let Some(names) = config.include {
        options = options.include(names);
    }
    let shortcuts = match Shortcuts::new(options) {
        Ok(shortcuts) => shortcuts,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(2);
        }
    };

    let rules = shortcuts.active_rules();
    let mut typist = Typist::new(shortcuts, MemoryDocument::new());
    typist.type_str(&config.input);
    debug_report::print_run(&config.input, &rules, typist.keystrokes(), typist.document(), config.color);
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

struct CliConfig {
    input: String,
    include: Option<Vec<String>>,
    color: bool,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut input: Option<String> = None;
    let mut include: Option<Vec<String>> = None;
    let mut color = io::stdout().is_terminal();
    let mut args = std::env::args().skip(1).peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("markdown-shortcuts {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--include" => {
                let value = args.next().ok_or_else(|| "error: --include expects a value".to_string())?;
                include = Some(parse_include(&value)?);
            }
            "--" => {
                let rest = args.collect::<Vec<_>>().join(" ");
                if !rest.is_empty() {
                    input = Some(rest);
                }
                break;
            }
            _ if arg.starts_with("--include=") => {
                include = Some(parse_include(arg.trim_start_matches("--include="))?);
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => {
                input = Some(std::iter::once(arg).chain(args).collect::<Vec<_>>().join(" "));
                break;
            }
        }
    }

    let input = match input {
        Some(value) => value,
        None => read_stdin_input()?,
    };
    let input = unescape_newlines(&input);

    if input.is_empty() {
        return Err(format!("error: no keystrokes provided\n\n{}", help_text()));
    }

    Ok(CliConfig { input, include, color })
}

fn parse_include(value: &str) -> Result<Vec<String>, String> {
    let names: Vec<String> =
        value.split(',').map(str::trim).filter(|name| !name.is_empty()).map(str::to_string).collect();
    if names.is_empty() {
        return Err("error: --include expects at least one format name".to_string());
    }
    Ok(names)
}

/// A literal `\n` in the keystrokes presses enter.
fn unescape_newlines(input: &str) -> String {
    input.replace("\\n", "\n")
}

fn read_stdin_input() -> Result<String, String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|err| format!("error: failed to read stdin: {err}"))?;
    // The shell's final newline is not a keystroke.
    if buffer.ends_with('\n') {
        buffer.pop();
    }
    Ok(buffer)
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "markdown-shortcuts {version}

Types keystrokes into an in-memory rich-text document and reports every
markdown shortcut pass.

Usage:
  markdown-shortcuts [OPTIONS] [--] <keystrokes...>

Options:
  --include <a,b,c>          Activate only these formats. Known formats:
                             {formats}
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Keystrokes are typed one character at a time; a literal \\n presses enter.
Reads stdin when no keystrokes are given. Set {log_env} (e.g. debug) to
trace detection passes on stderr.

Exit codes:
  0  Success.
  2  Invalid arguments, missing input or unknown format.
",
        version = env!("CARGO_PKG_VERSION"),
        formats = ALL_FORMATS.join(", "),
        log_env = LOG_ENV,
    )
}
