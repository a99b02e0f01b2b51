//! Highlight span classes and the CSS class table.
//!
//! Each lexical category the highlighter recognises is a [`SpanClass`].  The
//! markup it emits is a `<span class="…">` whose class string comes from a
//! [`Theme`]; the default theme reproduces the playground's Tailwind classes.

use std::str::FromStr;

// ── SpanClass ─────────────────────────────────────────────────────────────────

/// A lexical category wrapped by the highlighter.
///
/// Variants are listed in pass order: keywords are wrapped first, operators
/// last.  The discriminant doubles as an index into [`Theme`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(usize)]
pub enum SpanClass {
    Keyword    = 0,
    Assignment = 1,
    Number     = 2,
    Str        = 3,
    Operator   = 4,
}

impl SpanClass {
    /// Every class, in highlighter pass order.
    pub const ALL: &'static [SpanClass] = &[
        SpanClass::Keyword,
        SpanClass::Assignment,
        SpanClass::Number,
        SpanClass::Str,
        SpanClass::Operator,
    ];

    pub const COUNT: usize = 5;

    /// Lowercase name used in config keys (`class.<name>`).
    pub fn name(self) -> &'static str {
        match self {
            SpanClass::Keyword    => "keyword",
            SpanClass::Assignment => "assignment",
            SpanClass::Number     => "number",
            SpanClass::Str        => "string",
            SpanClass::Operator   => "operator",
        }
    }

    /// The class string the playground uses for this category.
    pub fn default_css(self) -> &'static str {
        match self {
            SpanClass::Keyword    => "text-purple-400 font-semibold",
            SpanClass::Assignment => "text-blue-400 font-semibold",
            SpanClass::Number     => "text-green-400",
            SpanClass::Str        => "text-yellow-400",
            SpanClass::Operator   => "text-red-400",
        }
    }
}

impl FromStr for SpanClass {
    type Err = String;

    /// Case-insensitive parse of [`SpanClass::name`].
    fn from_str(s: &str) -> Result<Self, String> {
        let lower = s.to_ascii_lowercase();
        SpanClass::ALL
            .iter()
            .copied()
            .find(|c| c.name() == lower)
            .ok_or_else(|| format!("unknown span class {:?}", s))
    }
}

impl std::fmt::Display for SpanClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ── Theme ─────────────────────────────────────────────────────────────────────

/// CSS class string per [`SpanClass`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    classes: [String; SpanClass::COUNT],
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            classes: std::array::from_fn(|i| SpanClass::ALL[i].default_css().to_owned()),
        }
    }
}

impl Theme {
    pub fn new() -> Self {
        Self::default()
    }

    /// The class string for `class`.
    pub fn css(&self, class: SpanClass) -> &str {
        &self.classes[class as usize]
    }

    /// Override the class string for `class`.
    pub fn set(&mut self, class: SpanClass, css: impl Into<String>) {
        self.classes[class as usize] = css.into();
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
