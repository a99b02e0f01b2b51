//! Execution simulator.
//!
//! Nothing is evaluated.  Each non-blank line is classified on its own by the
//! first matching rule below and rendered to at most one status line:
//!
//! | # | Rule | Output |
//! |---|------|--------|
//! | a | trimmed line starts with `//` | none |
//! | b | line contains `var` and `is` | `✓ Declared <name> = <value>` if `var <id> is <rest>` matches |
//! | c | line contains `function` | `✓ Defined function <name>(<param>)` if `function <id> <id>` matches |
//! | d | line contains neither `if` nor `else` | `→ <trimmed line>` |
//! | e | anything else | none |
//!
//! "Contains" is a plain substring test, so an identifier like `diff`
//! suppresses its line under rule e.  Rule b/c lines whose shape does not
//! match are dropped silently.  There is no variable or function table: a
//! declaration on one line has no effect on any other.

use std::sync::OnceLock;

use crate::shape::{Captures, Keyword, KeywordSet, Shape};

/// Line prefix that marks a comment.
pub const COMMENT_MARKER: &str = "//";

/// Message shown for a run fault that carries no detail of its own.
pub const FALLBACK_MESSAGE: &str = "An error occurred";

/// Outcome of one run: every output line, or the fault that aborted it.
pub type RunResult = Result<Vec<String>, SimulationError>;

/// Simulate `text` with the shared [`Simulator`].
pub fn simulate(text: &str) -> RunResult {
    Simulator::shared().simulate(text)
}

/// Classify every non-blank line of `text` with the shared [`Simulator`].
pub fn classify(text: &str) -> Result<Vec<LineRecord<'_>>, SimulationError> {
    Simulator::shared().classify(text)
}

// ── Errors ────────────────────────────────────────────────────────────────────

/// A run-level fault.  Malformed lines never produce one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulationError {
    /// A shape matched but one of its capture groups was absent.
    MissingCapture { line: usize, group: usize },
    /// Any other fault, with its message if it had one.
    Internal(Option<String>),
}

impl std::fmt::Display for SimulationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimulationError::MissingCapture { line, group } => {
                write!(f, "line {line}: capture group {group} missing")
            }
            SimulationError::Internal(Some(msg)) if !msg.is_empty() => f.write_str(msg),
            SimulationError::Internal(_) => f.write_str(FALLBACK_MESSAGE),
        }
    }
}

impl std::error::Error for SimulationError {}

// ── Line records ──────────────────────────────────────────────────────────────

/// What an expression line looked like.  Purely informational: every hint
/// renders the same `→ <line>` output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExprHint {
    /// Contains a `"`.
    Text,
    /// Contains an ASCII digit (and no `"`).
    Numeric,
    /// Neither.
    Bare,
}

impl ExprHint {
    fn of(text: &str) -> Self {
        if text.contains('"') {
            ExprHint::Text
        } else if text.bytes().any(|b| b.is_ascii_digit()) {
            ExprHint::Numeric
        } else {
            ExprHint::Bare
        }
    }
}

/// Classification of one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass<'a> {
    Comment,
    Declaration { name: &'a str, value: &'a str },
    FunctionDef { name: &'a str, param: &'a str },
    Expression(ExprHint),
    /// Contains `if` or `else` somewhere.
    Suppressed,
    /// Looked like a declaration or function but did not fit the shape.
    Unmatched,
}

impl LineClass<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            LineClass::Comment => "comment",
            LineClass::Declaration { .. } => "declaration",
            LineClass::FunctionDef { .. } => "function",
            LineClass::Expression(_) => "expression",
            LineClass::Suppressed => "suppressed",
            LineClass::Unmatched => "unmatched",
        }
    }
}

/// One non-blank source line and its classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRecord<'a> {
    /// 1-based line number in the source text (blank lines counted).
    pub line: usize,
    /// The line with surrounding whitespace removed.
    pub text: &'a str,
    pub class: LineClass<'a>,
}

impl LineRecord<'_> {
    /// The status line this record contributes, if any.
    pub fn output(&self) -> Option<String> {
        match self.class {
            LineClass::Declaration { name, value } => Some(format!("✓ Declared {name} = {value}")),
            LineClass::FunctionDef { name, param } => {
                Some(format!("✓ Defined function {name}({param})"))
            }
            LineClass::Expression(_) => Some(format!("→ {}", self.text)),
            LineClass::Comment | LineClass::Suppressed | LineClass::Unmatched => None,
        }
    }
}

// ── Simulator ─────────────────────────────────────────────────────────────────

/// Shape-matching line classifier.  Holds only immutable compiled patterns.
#[derive(Debug, Clone)]
pub struct Simulator {
    keywords: KeywordSet,
    declaration: Shape,
    function: Shape,
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulator {
    pub fn new() -> Self {
        Self {
            keywords: KeywordSet::new(),
            declaration: Shape::new(r"var\s+([A-Za-z0-9_]+)\s+is\s+([^\n\r\x{2028}\x{2029}]+)")
                .expect("declaration shape is valid"),
            function: Shape::new(r"function\s+([A-Za-z0-9_]+)\s+([A-Za-z0-9_]+)")
                .expect("function shape is valid"),
        }
    }

    /// Process-wide instance.
    pub fn shared() -> &'static Simulator {
        static SHARED: OnceLock<Simulator> = OnceLock::new();
        SHARED.get_or_init(Simulator::new)
    }

    /// Classify a single raw line.  `line` is only used for error reporting
    /// and the returned record.
    pub fn classify_line<'a>(
        &self,
        line: usize,
        raw: &'a str,
    ) -> Result<LineRecord<'a>, SimulationError> {
        let text = trim_line(raw);
        let class = if text.starts_with(COMMENT_MARKER) {
            LineClass::Comment
        } else {
            // Probes and shapes look at the untrimmed line.
            let present = self.keywords.scan(raw);
            if present.contains(Keyword::Var) && present.contains(Keyword::Is) {
                match self.declaration.find(raw) {
                    Some(c) => LineClass::Declaration {
                        name: group(&c, 1, line)?,
                        value: trim_line(group(&c, 2, line)?),
                    },
                    None => LineClass::Unmatched,
                }
            } else if present.contains(Keyword::Function) {
                match self.function.find(raw) {
                    Some(c) => LineClass::FunctionDef {
                        name: group(&c, 1, line)?,
                        param: group(&c, 2, line)?,
                    },
                    None => LineClass::Unmatched,
                }
            } else if !text.is_empty()
                && !present.contains(Keyword::If)
                && !present.contains(Keyword::Else)
            {
                LineClass::Expression(ExprHint::of(text))
            } else {
                LineClass::Suppressed
            }
        };
        Ok(LineRecord { line, text, class })
    }

    /// Classify every non-blank line of `text`, in source order.
    ///
    /// Stops at the first fault; no partial result is returned.
    pub fn classify<'a>(&self, text: &'a str) -> Result<Vec<LineRecord<'a>>, SimulationError> {
        text.split('\n')
            .enumerate()
            .filter(|(_, raw)| !trim_line(raw).is_empty())
            .map(|(i, raw)| self.classify_line(i + 1, raw))
            .collect()
    }

    /// Produce the status lines for `text`.
    pub fn simulate(&self, text: &str) -> RunResult {
        Ok(self
            .classify(text)?
            .iter()
            .filter_map(LineRecord::output)
            .collect())
    }
}

/// Strip surrounding whitespace, counting a byte-order mark as whitespace and
/// U+0085 as text.
pub fn trim_line(s: &str) -> &str {
    s.trim_matches(|c: char| c == '\u{feff}' || (c.is_whitespace() && c != '\u{85}'))
}

fn group<'t>(c: &Captures<'t>, n: usize, line: usize) -> Result<&'t str, SimulationError> {
    c.group(n)
        .ok_or(SimulationError::MissingCapture { line, group: n })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn run(src: &str) -> Vec<String> {
        simulate(src).unwrap()
    }

    #[test]
    fn declarations_and_expressions() {
        let out = run("var x is 42\nvar message is \"Hello\"\nmessage\nx + 8");
        assert_eq!(
            out,
            vec![
                "✓ Declared x = 42",
                "✓ Declared message = \"Hello\"",
                "→ message",
                "→ x + 8",
            ]
        );
    }

    #[test]
    fn hello_world_program() {
        let out = run(
            "function greet name\n    return \"Hello, \" + name + \"!\"\n\nvar message is greet \"World\"\nmessage",
        );
        assert_eq!(
            out,
            vec![
                "✓ Defined function greet(name)",
                "→ return \"Hello, \" + name + \"!\"",
                "✓ Declared message = greet \"World\"",
                "→ message",
            ]
        );
    }

    #[test]
    fn conditional_headers_are_dropped_but_bodies_fall_through() {
        // Surprising but expected: `if`/`else` lines vanish, while branch
        // bodies without those substrings are reported as expressions.
        let out = run("if x > 10\n    \"big\"\nelse\n    \"small\"");
        assert_eq!(out, vec!["→ \"big\"", "→ \"small\""]);
    }

    #[test]
    fn substring_if_suppresses_unrelated_identifiers() {
        assert!(run("diff").is_empty());
        assert!(run("elsewhere + 1").is_empty());
        assert!(run("    \"x is 10 or less\" if").is_empty());
    }

    #[test]
    fn declaration_rule_wins_over_suppression() {
        assert_eq!(run("var diff is 3"), vec!["✓ Declared diff = 3"]);
    }

    #[test]
    fn declaration_rule_wins_over_function_rule() {
        assert_eq!(run("var f is function g h"), vec!["✓ Declared f = function g h"]);
    }

    #[test]
    fn function_with_is_in_name() {
        assert_eq!(run("function isEven n"), vec!["✓ Defined function isEven(n)"]);
    }

    #[test]
    fn only_first_parameter_is_captured() {
        assert_eq!(
            run("function calculate op a b"),
            vec!["✓ Defined function calculate(op)"]
        );
    }

    #[test]
    fn comments_and_blank_lines_produce_nothing() {
        assert!(run("// var x is 1\n   // function f x\n\n   \n").is_empty());
    }

    #[test]
    fn malformed_shapes_are_silent() {
        assert!(run("var is").is_empty());
        assert!(run("function").is_empty());
        assert!(run("function f").is_empty());
        assert!(run("var x is ").is_empty());
    }

    #[test]
    fn var_without_is_is_an_expression() {
        assert_eq!(run("var y"), vec!["→ var y"]);
    }

    #[test]
    fn declaration_value_is_trimmed() {
        assert_eq!(run("  var a is   10 + 5   "), vec!["✓ Declared a = 10 + 5"]);
    }

    #[test]
    fn crlf_line_endings() {
        assert_eq!(run("var a is 1\r\nsum\r\n"), vec!["✓ Declared a = 1", "→ sum"]);
    }

    #[test]
    fn byte_order_mark_is_whitespace() {
        assert_eq!(run("\u{feff}// Welcome\nx"), vec!["→ x"]);
        assert_eq!(run("\u{feff}\nx"), vec!["→ x"]);
        assert_eq!(run("\u{feff}var a is 1\u{feff}"), vec!["✓ Declared a = 1"]);
        let recs = classify("\u{feff}x").unwrap();
        assert_eq!(recs[0].text, "x");
    }

    #[test]
    fn trim_line_whitespace_set() {
        assert_eq!(trim_line("\u{feff} \t x \u{a0}\u{2028}"), "x");
        assert_eq!(trim_line("\u{3000}y\r"), "y");
        // NEL is kept.
        assert_eq!(trim_line("\u{85}z"), "\u{85}z");
        assert_eq!(trim_line("\u{feff}\u{feff}"), "");
    }

    #[test]
    fn declaration_value_stops_at_line_separators() {
        assert_eq!(run("var x is a\rb"), vec!["✓ Declared x = a"]);
        assert_eq!(run("var x is a\u{2028}b"), vec!["✓ Declared x = a"]);
        assert_eq!(run("var x is a\u{2029}b"), vec!["✓ Declared x = a"]);
    }

    #[test]
    fn unanchored_declaration_shape() {
        assert_eq!(run("navvar x is 3"), vec!["✓ Declared x = 3"]);
    }

    #[test]
    fn lines_keep_source_order_and_duplicates() {
        assert_eq!(run("a\nb\na"), vec!["→ a", "→ b", "→ a"]);
    }

    #[test]
    fn expression_hints() {
        let recs = classify("\"s\"\nx + 8\nmessage").unwrap();
        let hints: Vec<_> = recs.iter().map(|r| r.class).collect();
        assert_eq!(
            hints,
            vec![
                LineClass::Expression(ExprHint::Text),
                LineClass::Expression(ExprHint::Numeric),
                LineClass::Expression(ExprHint::Bare),
            ]
        );
        // Every hint renders the same way.
        let out: Vec<_> = recs.iter().filter_map(LineRecord::output).collect();
        assert_eq!(out, vec!["→ \"s\"", "→ x + 8", "→ message"]);
    }

    #[test]
    fn records_carry_source_line_numbers() {
        let recs = classify("// c\n\nvar x is 1\nif x\n").unwrap();
        let summary: Vec<_> = recs.iter().map(|r| (r.line, r.class.name())).collect();
        assert_eq!(
            summary,
            vec![(1, "comment"), (3, "declaration"), (4, "suppressed")]
        );
    }

    #[test]
    fn empty_input() {
        assert!(run("").is_empty());
        assert!(classify("").unwrap().is_empty());
    }

    #[test]
    fn error_messages() {
        let e = SimulationError::MissingCapture { line: 3, group: 2 };
        assert_eq!(e.to_string(), "line 3: capture group 2 missing");
        assert_eq!(SimulationError::Internal(None).to_string(), FALLBACK_MESSAGE);
        assert_eq!(
            SimulationError::Internal(Some(String::new())).to_string(),
            FALLBACK_MESSAGE
        );
        assert_eq!(
            SimulationError::Internal(Some("boom".into())).to_string(),
            "boom"
        );
    }
}
