//! `.janrc` configuration file parser.
//!
//! The file is line oriented:
//!
//! | Directive | Action |
//! |-----------|--------|
//! | `/set <name>=<value>` or `/set <name> <value>` | set a setting |
//! | Lines starting with `;` | comment, ignored |
//! | Any other `/command` or bare text | silently skipped |
//!
//! Recognised settings:
//!
//! | Name | Meaning |
//! |------|---------|
//! | `language` | tag passed to the highlighter (default `jan`) |
//! | `class.<span>` | CSS class for a [`SpanClass`] (`keyword`, `assignment`, `number`, `string`, `operator`) |
//! | `example` | snippet used when no source file is given |
//! | `color` | terminal coloring: `on`, `off`, or `auto` |

use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::highlight::LANGUAGE;
use crate::snippets;
use crate::span::{SpanClass, Theme};

// ── Public API ────────────────────────────────────────────────────────────────

/// A non-fatal error encountered while loading a config file.
#[derive(Debug)]
pub struct ConfigError {
    pub line: usize,
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

impl std::error::Error for ConfigError {}

/// When to emit ANSI styling for highlighted output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Only when stdout is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl FromStr for ColorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, String> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(ColorMode::Auto),
            "on" | "always" | "1" => Ok(ColorMode::Always),
            "off" | "never" | "0" => Ok(ColorMode::Never),
            _ => Err(format!("invalid color mode {s:?} (expected on, off, or auto)")),
        }
    }
}

/// Parsed playground configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub language: String,
    pub theme: Theme,
    pub example: Option<String>,
    pub color: ColorMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: LANGUAGE.to_owned(),
            theme: Theme::default(),
            example: None,
            color: ColorMode::default(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config string.
    ///
    /// Lines that are not `/set` directives are skipped so a config can
    /// carry other commands.  Returns the config and a list of errors on
    /// `/set` lines; a bad line leaves the previous value in place.
    pub fn load_str(s: &str) -> (Self, Vec<ConfigError>) {
        let mut config = Config::new();
        let mut errors = Vec::new();

        for (i, raw) in s.lines().enumerate() {
            let lineno = i + 1;
            let line = raw.trim();

            if line.is_empty() || line.starts_with(';') {
                continue;
            }

            let Some(rest) = line.strip_prefix('/') else { continue };

            let (cmd, args_str) = rest
                .split_once(|c: char| c.is_ascii_whitespace())
                .unwrap_or((rest, ""));

            if cmd == "set" {
                let tokens = split_args(args_str.trim());
                if let Err(msg) = parse_set(&tokens).and_then(|(k, v)| config.apply(&k, &v)) {
                    errors.push(ConfigError { line: lineno, message: msg });
                }
            }
        }

        (config, errors)
    }

    /// Read and parse a config file from disk.
    pub fn load_file(path: &Path) -> std::io::Result<(Self, Vec<ConfigError>)> {
        let s = std::fs::read_to_string(path)?;
        Ok(Self::load_str(&s))
    }

    /// Apply one `name = value` setting.
    pub fn apply(&mut self, name: &str, value: &str) -> Result<(), String> {
        match name {
            "language" => self.language = value.to_owned(),
            "example" => {
                let snippet = snippets::find(value)
                    .ok_or_else(|| format!("unknown example {value:?}"))?;
                self.example = Some(snippet.name.to_owned());
            }
            "color" => self.color = value.parse()?,
            _ => {
                let Some(class) = name.strip_prefix("class.") else {
                    return Err(format!("unknown setting '{name}'"));
                };
                let class: SpanClass = class.parse()?;
                self.theme.set(class, value);
            }
        }
        Ok(())
    }
}

// ── Path helpers ──────────────────────────────────────────────────────────────

/// File name searched for in the home and current directories.
pub const FILE_NAME: &str = ".janrc";

/// Search for the user config file: `$HOME/.janrc`, then `./.janrc`.
/// Returns the first path that exists, or `None`.
pub fn find_user_config() -> Option<PathBuf> {
    let home = directories::BaseDirs::new().map(|d| d.home_dir().join(FILE_NAME));
    home.into_iter()
        .chain(std::iter::once(PathBuf::from(".").join(FILE_NAME)))
        .find(|p| p.exists())
}

// ── Argument tokenizer ────────────────────────────────────────────────────────

/// Split `s` into whitespace-delimited tokens, honouring double-quoted strings
/// and `\"` escapes within them.
fn split_args(s: &str) -> Vec<String> {
    let mut args: Vec<String> = Vec::new();
    let mut cur = String::new();
    let mut in_quotes = false;
    let mut chars = s.chars();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => in_quotes = !in_quotes,
            '\\' if in_quotes => {
                if let Some(escaped) = chars.next() {
                    cur.push(escaped);
                }
            }
            c if c.is_ascii_whitespace() && !in_quotes => {
                if !cur.is_empty() {
                    args.push(std::mem::take(&mut cur));
                }
            }
            c => cur.push(c),
        }
    }
    if !cur.is_empty() {
        args.push(cur);
    }
    args
}

// ── /set ─────────────────────────────────────────────────────────────────────

/// Parse `/set <name>=<value>` or `/set <name> <value>`.
fn parse_set(tokens: &[String]) -> Result<(String, String), String> {
    if tokens.is_empty() {
        return Err("/set: requires an argument".into());
    }

    let (name, value) = if let Some(eq) = tokens[0].find('=') {
        let mut value = tokens[0][eq + 1..].to_owned();
        // `/set class.keyword=kw bold` keeps the words after the first token.
        for t in &tokens[1..] {
            value.push(' ');
            value.push_str(t);
        }
        (tokens[0][..eq].to_owned(), value)
    } else if tokens.len() >= 2 {
        (tokens[0].clone(), tokens[1..].join(" "))
    } else {
        return Err(format!("/set: missing value for '{}'", tokens[0]));
    };

    if name.is_empty() {
        return Err("/set: setting name cannot be empty".into());
    }

    Ok((name, value))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
