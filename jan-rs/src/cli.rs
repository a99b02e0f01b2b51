//! Command-line argument parsing.
//!
//! Usage:
//!   jan [-Hbrdx] [-f[<file>]] [-l<lang>] [-e<name>] [<source>]

use std::path::PathBuf;

/// One-line usage summary printed on argument errors.
pub const USAGE: &str = "Usage: jan [-Hbrdx] [-f[<file>]] [-l<lang>] [-e<name>] [<source>]";

// ── Public types ──────────────────────────────────────────────────────────────

/// Parsed command-line arguments.
#[derive(Debug, Default)]
pub struct CliArgs {
    /// Print highlight markup instead of running (`-H`).
    pub highlight: bool,
    /// Wrap highlight output in an HTML code block (`-b`).
    pub block: bool,
    /// Never convert markup to terminal colors (`-r`).
    pub raw: bool,
    /// Trace each line's classification to stderr (`-d`).
    pub debug: bool,
    /// List built-in examples and exit (`-x`).
    pub list: bool,
    /// Config-file specification.
    pub config: ConfigFile,
    /// Language tag override (`-l<lang>`).
    pub language: Option<String>,
    /// Built-in example to use as the source (`-e<name>`).
    pub example: Option<String>,
    /// Source file; `None` reads stdin.
    pub source: Option<PathBuf>,
}

/// How to choose the user config file.
#[derive(Debug, Default)]
pub enum ConfigFile {
    /// Search `~/.janrc`, then `./.janrc` (default).
    #[default]
    Search,
    /// `-f` with no file argument: skip user config.
    Skip,
    /// `-f<file>`: load this specific file.
    Explicit(PathBuf),
}

// ── Parsing ───────────────────────────────────────────────────────────────────

/// Parse `std::env::args()` and return [`CliArgs`] or an error message.
pub fn parse_args() -> Result<CliArgs, String> {
    let raw: Vec<String> = std::env::args().collect();
    parse_argv(raw.get(1..).unwrap_or(&[]))
}

/// Parse a slice of argument strings (exposed for testing).
pub fn parse_argv(argv: &[String]) -> Result<CliArgs, String> {
    let mut args = CliArgs::default();
    let mut positional: Vec<String> = Vec::new();
    let mut i = 0;

    while i < argv.len() {
        let arg = argv[i].as_str();

        // `--` ends flag processing.
        if arg == "--" {
            i += 1;
            positional.extend(argv[i..].iter().cloned());
            break;
        }

        // Non-flag argument; a lone `-` means stdin.
        if !arg.starts_with('-') || arg == "-" {
            if arg != "-" {
                positional.push(arg.to_owned());
            }
            i += 1;
            continue;
        }

        // Flag argument: iterate over characters after the leading `-`.
        let chars: Vec<char> = arg[1..].chars().collect();
        let mut j = 0;
        while j < chars.len() {
            match chars[j] {
                'H' => args.highlight = true,
                'b' => args.block = true,
                'r' => args.raw = true,
                'd' => args.debug = true,
                'x' => args.list = true,

                // -f[<file>]
                'f' => {
                    if j + 1 < chars.len() {
                        let file: String = chars[j + 1..].iter().collect();
                        args.config = ConfigFile::Explicit(PathBuf::from(file));
                        j = chars.len();
                    } else if i + 1 < argv.len() && !argv[i + 1].starts_with('-') {
                        // Separate `-f <file>` only when a source file follows too;
                        // otherwise the lone word is the source.
                        if i + 2 < argv.len() {
                            i += 1;
                            args.config = ConfigFile::Explicit(PathBuf::from(&argv[i]));
                        } else {
                            args.config = ConfigFile::Skip;
                        }
                    } else {
                        args.config = ConfigFile::Skip;
                    }
                }

                // -l<lang> / -e<name>
                c @ ('l' | 'e') => {
                    let value = if j + 1 < chars.len() {
                        let s: String = chars[j + 1..].iter().collect();
                        j = chars.len();
                        s
                    } else if i + 1 < argv.len() {
                        i += 1;
                        argv[i].clone()
                    } else {
                        return Err(format!("-{c} requires an argument"));
                    };
                    if c == 'l' {
                        args.language = Some(value);
                    } else {
                        args.example = Some(value);
                    }
                }

                c => return Err(format!("unknown option: -{c}")),
            }
            j += 1;
        }
        i += 1;
    }

    match positional.len() {
        0 => {}
        1 => args.source = Some(PathBuf::from(positional.remove(0))),
        n => return Err(format!("too many arguments ({n})")),
    }

    if args.source.is_some() && args.example.is_some() {
        return Err("-e cannot be combined with a source file".to_owned());
    }

    Ok(args)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
