//! Shape matching: small fixed regex patterns and keyword substring probes.
//!
//! The simulator classifies a line by two kinds of test:
//!
//! | Test | Type | Semantics |
//! |------|------|-----------|
//! | keyword probe | [`KeywordSet`] | case-sensitive *substring* presence, anywhere in the line |
//! | shape | [`Shape`] | unanchored regex with numbered capture groups |
//!
//! Substring probes deliberately do not respect word boundaries: `diff`
//! contains `if`, `this` contains `is`.  Callers rely on that.

use std::sync::Arc;

use aho_corasick::AhoCorasick;
use regex::Regex;

// ── Shape ─────────────────────────────────────────────────────────────────────

/// Error returned when a shape pattern cannot be compiled.
#[derive(Debug)]
pub struct ShapeError(regex::Error);

impl std::fmt::Display for ShapeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "shape error: {}", self.0)
    }
}

impl std::error::Error for ShapeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

/// A compiled line shape.
// Arc keeps Clone cheap; shapes are shared by every classifier instance.
#[derive(Clone)]
pub struct Shape {
    src: String,
    re: Arc<Regex>,
}

impl std::fmt::Debug for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shape").field("src", &self.src).finish()
    }
}

impl Shape {
    /// Compile `src`.  Matching is case-sensitive and unanchored.
    pub fn new(src: &str) -> Result<Self, ShapeError> {
        let re = Regex::new(src).map_err(ShapeError)?;
        Ok(Self {
            src: src.to_owned(),
            re: Arc::new(re),
        })
    }

    /// Leftmost match of the shape in `text`, with its capture groups.
    pub fn find<'t>(&self, text: &'t str) -> Option<Captures<'t>> {
        let caps = self.re.captures(text)?;
        let groups = (1..caps.len())
            .map(|i| caps.get(i).map(|m| (m.start(), m.end())))
            .collect();
        Some(Captures { text, groups })
    }
}

/// A successful shape match.
pub struct Captures<'t> {
    text: &'t str,
    /// (start, end) byte offsets per group; `None` = group didn't participate.
    groups: Vec<Option<(usize, usize)>>,
}

impl<'t> Captures<'t> {
    /// The nth capture group, 1-based.
    pub fn group(&self, n: usize) -> Option<&'t str> {
        self.groups
            .get(n.checked_sub(1)?)?
            .as_ref()
            .map(|&(s, e)| &self.text[s..e])
    }

    /// Number of capture groups (excluding the overall match).
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}

// ── Keyword probes ────────────────────────────────────────────────────────────

/// A word the simulator probes for by substring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Keyword {
    Var      = 0,
    Is       = 1,
    Function = 2,
    If       = 3,
    Else     = 4,
}

impl Keyword {
    /// Every probe word, in automaton pattern order.
    pub const ALL: &'static [Keyword] = &[
        Keyword::Var,
        Keyword::Is,
        Keyword::Function,
        Keyword::If,
        Keyword::Else,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Var      => "var",
            Keyword::Is       => "is",
            Keyword::Function => "function",
            Keyword::If       => "if",
            Keyword::Else     => "else",
        }
    }
}

/// The set of [`Keyword`]s present in one line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Presence(u8);

impl Presence {
    #[inline]
    pub fn contains(self, kw: Keyword) -> bool {
        self.0 & (1 << kw as u8) != 0
    }

    #[inline]
    fn insert(&mut self, kw: Keyword) {
        self.0 |= 1 << kw as u8;
    }
}

/// Multi-pattern substring detector for the [`Keyword`] list.
///
/// One overlapping Aho-Corasick scan answers every `contains` question for a
/// line at once.
#[derive(Debug, Clone)]
pub struct KeywordSet {
    ac: Arc<AhoCorasick>,
}

impl Default for KeywordSet {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordSet {
    pub fn new() -> Self {
        let ac = AhoCorasick::new(Keyword::ALL.iter().map(|k| k.as_str()));
        Self { ac: Arc::new(ac) }
    }

    /// Which keywords occur in `line` as substrings.
    pub fn scan(&self, line: &str) -> Presence {
        let mut p = Presence::default();
        for m in self.ac.find_overlapping_iter(line) {
            p.insert(Keyword::ALL[m.pattern()]);
        }
        p
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
