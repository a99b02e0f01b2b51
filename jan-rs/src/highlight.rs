//! Syntax highlighter: ordered regex rewrite passes over the whole buffer.
//!
//! The highlighter does not tokenise.  It runs five global substitutions in a
//! fixed order, each over the *output* of the previous one:
//!
//! | # | Class | Pattern |
//! |---|-------|---------|
//! | 1 | keyword    | `\b(var\|function\|if\|else\|return\|while\|for)\b` |
//! | 2 | assignment | `\b(is)\b` |
//! | 3 | number     | `\b([0-9]+)\b` |
//! | 4 | string     | `"([^"]*)"` (quotes kept inside the span) |
//! | 5 | operator   | `\b(\+\|-\|\*\|/\|<=\|>=\|==\|!=)\b` |
//!
//! Later passes see the markup inserted by earlier ones, so a class attribute
//! such as `"text-green-400"` is itself wrapped as a string and its hyphens as
//! operators.  That output is what the playground renders and is reproduced
//! as-is.  Running [`highlight`] twice is therefore not idempotent.
//!
//! `\b` is an ASCII word boundary (`(?-u:\b)`): only `[A-Za-z0-9_]` count as
//! word characters, so `é42` still has a boundary before the `4`.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;

use crate::span::{SpanClass, Theme};

/// The only language tag the highlighter recognises.
pub const LANGUAGE: &str = "jan";

/// Highlight `text` with the default theme.
///
/// Any `lang` other than [`LANGUAGE`] returns `text` unchanged.
pub fn highlight(text: &str, lang: &str) -> String {
    Highlighter::shared().highlight(text, lang)
}

// ── RewritePass ───────────────────────────────────────────────────────────────

/// One substitution stage of the pipeline.
#[derive(Debug, Clone)]
pub struct RewritePass {
    class: SpanClass,
    re: Regex,
    /// Replacement template, `${1}` standing for the captured token.
    template: String,
}

impl RewritePass {
    /// Build the pass for `class`, emitting `css` as the span's class string.
    pub fn new(class: SpanClass, css: &str) -> Self {
        // `$` is the template metacharacter; a literal one in a class name
        // must be doubled.
        let css = css.replace('$', "$$");
        let inner = match class {
            SpanClass::Str => "\"${1}\"",
            _ => "${1}",
        };
        Self {
            class,
            re: pattern_for(class).clone(),
            template: format!("<span class=\"{css}\">{inner}</span>"),
        }
    }

    pub fn class(&self) -> SpanClass {
        self.class
    }

    /// Replace every non-overlapping match in `text`.
    pub fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        self.re.replace_all(text, self.template.as_str())
    }
}

fn pattern_for(class: SpanClass) -> &'static Regex {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    let all = PATTERNS.get_or_init(|| {
        SpanClass::ALL
            .iter()
            .map(|&c| {
                let src = match c {
                    SpanClass::Keyword => {
                        r"(?-u:\b)(var|function|if|else|return|while|for)(?-u:\b)"
                    }
                    SpanClass::Assignment => r"(?-u:\b)(is)(?-u:\b)",
                    SpanClass::Number => r"(?-u:\b)([0-9]+)(?-u:\b)",
                    SpanClass::Str => r#""([^"]*)""#,
                    SpanClass::Operator => r"(?-u:\b)(\+|-|\*|/|<=|>=|==|!=)(?-u:\b)",
                };
                Regex::new(src).expect("highlight pattern is valid")
            })
            .collect()
    });
    &all[class as usize]
}

// ── Highlighter ───────────────────────────────────────────────────────────────

/// The rewrite pipeline: one [`RewritePass`] per [`SpanClass`], in
/// [`SpanClass::ALL`] order.
#[derive(Debug, Clone)]
pub struct Highlighter {
    passes: Vec<RewritePass>,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::with_theme(&Theme::default())
    }
}

impl Highlighter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a pipeline whose spans use the class strings of `theme`.
    pub fn with_theme(theme: &Theme) -> Self {
        let passes = SpanClass::ALL
            .iter()
            .map(|&c| RewritePass::new(c, theme.css(c)))
            .collect();
        Self { passes }
    }

    /// Process-wide default-theme instance.
    pub fn shared() -> &'static Highlighter {
        static SHARED: OnceLock<Highlighter> = OnceLock::new();
        SHARED.get_or_init(Highlighter::default)
    }

    pub fn passes(&self) -> &[RewritePass] {
        &self.passes
    }

    /// Highlight `text` if `lang` is [`LANGUAGE`]; otherwise pass it through.
    pub fn highlight(&self, text: &str, lang: &str) -> String {
        if lang != LANGUAGE {
            return text.to_owned();
        }
        self.apply(text)
    }

    /// Run every pass unconditionally.
    pub fn apply(&self, text: &str) -> String {
        let mut out = text.to_owned();
        for pass in &self.passes {
            out = pass.apply(&out).into_owned();
        }
        out
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn span(css: &str, inner: &str) -> String {
        format!("<span class=\"{css}\">{inner}</span>")
    }

    fn red(op: &str) -> String {
        span("text-red-400", op)
    }

    #[test]
    fn unknown_language_passes_through() {
        let src = "var x is 42\nx + 8";
        assert_eq!(highlight(src, "python"), src);
        assert_eq!(highlight(src, "JAN"), src);
        assert_eq!(highlight(src, ""), src);
    }

    #[test]
    fn empty_input() {
        assert_eq!(highlight("", LANGUAGE), "");
    }

    #[test]
    fn plain_identifiers_untouched() {
        assert_eq!(highlight("message", LANGUAGE), "message");
    }

    #[test]
    fn operator_between_word_characters() {
        assert_eq!(highlight("a+b", LANGUAGE), format!("a{}b", red("+")));
        assert_eq!(highlight("a<=b", LANGUAGE), format!("a{}b", red("<=")));
    }

    #[test]
    fn operator_between_spaces_is_not_wrapped() {
        // `\b` needs a word character on each side of the operator.
        assert_eq!(highlight("a + b", LANGUAGE), "a + b");
    }

    #[test]
    fn string_class_hyphens_become_operators() {
        let expected = format!(
            "<span class=\"text{}yellow{}400\">\"hi\"</span>",
            red("-"),
            red("-")
        );
        assert_eq!(highlight("\"hi\"", LANGUAGE), expected);
    }

    #[test]
    fn number_class_attribute_is_rewrapped_as_string() {
        let expected = format!(
            "<span class=<span class=\"text{r}yellow{r}400\">\"text{r}green{r}400\"</span>>42</span>",
            r = red("-")
        );
        assert_eq!(highlight("42", LANGUAGE), expected);
    }

    #[test]
    fn keyword_and_assignment_are_wrapped_first() {
        let out = highlight("var x is 42", LANGUAGE);
        assert!(out.contains(">var</span> x "), "{out}");
        assert!(out.contains(">is</span> "), "{out}");
        assert!(out.contains(">42</span>"), "{out}");
    }

    #[test]
    fn keywords_need_word_boundaries() {
        // `format` contains `for` but is a single word.
        assert_eq!(highlight("format", LANGUAGE), "format");
        assert_eq!(highlight("this", LANGUAGE), "this");
    }

    #[test]
    fn non_ascii_letters_are_not_word_characters() {
        let out = highlight("é42", LANGUAGE);
        assert!(out.starts_with("é<span class="), "{out}");
        assert!(out.ends_with(">42</span>"), "{out}");

        let out = highlight("éif", LANGUAGE);
        assert!(out.starts_with("é<span class="), "{out}");
        assert!(out.ends_with(">if</span>"), "{out}");

        assert_eq!(highlight("ñ+ü", LANGUAGE), "ñ+ü");
        // An ASCII letter still joins the word.
        assert_eq!(highlight("x42", LANGUAGE), "x42");
    }

    #[test]
    fn every_keyword_is_recognised() {
        for kw in ["var", "function", "if", "else", "return", "while", "for"] {
            let out = highlight(kw, LANGUAGE);
            assert!(out.contains(&format!(">{kw}</span>")), "{kw}: {out}");
        }
    }

    #[test]
    fn double_application_is_not_assumed_idempotent() {
        let once = highlight("var x is 42", LANGUAGE);
        let twice = highlight(&once, LANGUAGE);
        assert_ne!(once, twice);
        // Pass-through is a true no-op however often it runs.
        assert_eq!(highlight(&once, "text"), once);
    }

    #[test]
    fn custom_theme_changes_class_strings() {
        let mut theme = Theme::default();
        theme.set(SpanClass::Operator, "op");
        let h = Highlighter::with_theme(&theme);
        assert_eq!(h.highlight("a*b", LANGUAGE), format!("a{}b", span("op", "*")));
    }

    #[test]
    fn dollar_in_class_is_literal() {
        let mut theme = Theme::default();
        theme.set(SpanClass::Operator, "$1");
        let h = Highlighter::with_theme(&theme);
        assert_eq!(h.highlight("a*b", LANGUAGE), format!("a{}b", span("$1", "*")));
    }

    #[test]
    fn passes_run_in_class_order() {
        let h = Highlighter::new();
        let order: Vec<_> = h.passes().iter().map(RewritePass::class).collect();
        assert_eq!(order, SpanClass::ALL);
    }
}
