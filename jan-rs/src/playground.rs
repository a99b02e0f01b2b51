//! Playground controller.
//!
//! Owns the state the editor widget keeps between user actions: the buffer,
//! the last run's output or error, and the running flag.  The core
//! [`simulate`](crate::simulate::simulate) and highlighter functions stay
//! stateless; everything mutable lives here.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::highlight::{Highlighter, LANGUAGE};
use crate::simulate::{RunResult, SimulationError, Simulator};
use crate::snippets;

/// Text shown in the output panel before anything has run.
pub const PLACEHOLDER: &str = "Output will appear here when you run your code...";

/// What the output panel should display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputView<'a> {
    Error(&'a str),
    Lines(&'a [String]),
    Placeholder,
}

impl OutputView<'_> {
    /// The rows the output panel draws, top to bottom.
    pub fn rows(&self) -> Vec<&str> {
        match self {
            OutputView::Error(msg) => vec!["Error:", *msg],
            OutputView::Lines(lines) => lines.iter().map(String::as_str).collect(),
            OutputView::Placeholder => vec![PLACEHOLDER],
        }
    }
}

/// Editor and output state for one playground instance.
#[derive(Debug, Clone)]
pub struct Playground {
    code: String,
    output: Vec<String>,
    error: Option<String>,
    running: bool,
    language: String,
    simulator: Simulator,
    highlighter: Highlighter,
}

impl Default for Playground {
    fn default() -> Self {
        Self::new()
    }
}

impl Playground {
    /// A playground holding the welcome program.
    pub fn new() -> Self {
        Self::with_code(snippets::default_code())
    }

    pub fn with_code(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            output: Vec::new(),
            error: None,
            running: false,
            language: LANGUAGE.to_owned(),
            simulator: Simulator::shared().clone(),
            highlighter: Highlighter::shared().clone(),
        }
    }

    /// Replace the highlighter (e.g. one built from a configured theme).
    pub fn set_highlighter(&mut self, highlighter: Highlighter) {
        self.highlighter = highlighter;
    }

    /// Language tag the buffer is highlighted as.
    pub fn set_language(&mut self, lang: impl Into<String>) {
        self.language = lang.into();
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// Replace the buffer, as on every keystroke.  Output is kept.
    pub fn set_code(&mut self, code: impl Into<String>) {
        self.code = code.into();
    }

    /// Replace the buffer with an example and clear the output panel.
    pub fn load_example(&mut self, code: impl Into<String>) {
        self.code = code.into();
        self.clear_output();
    }

    pub fn clear_output(&mut self) {
        self.output.clear();
        self.error = None;
    }

    pub fn output(&self) -> &[String] {
        &self.output
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Number of `\n`-separated lines in the buffer (at least 1).
    pub fn line_count(&self) -> usize {
        self.code.split('\n').count()
    }

    /// Highlight markup for the buffer.
    pub fn highlighted(&self) -> String {
        self.highlighter.highlight(&self.code, &self.language)
    }

    /// Simulate the buffer, replacing the previous output or error.
    ///
    /// A fault, including a panic inside the simulator, leaves the output
    /// empty and records a single message.  Returns `false` without doing
    /// anything if a run is already in progress.
    pub fn run(&mut self) -> bool {
        let simulator = self.simulator.clone();
        self.run_with(|code| simulator.simulate(code))
    }

    pub(crate) fn run_with<F>(&mut self, simulate: F) -> bool
    where
        F: FnOnce(&str) -> RunResult,
    {
        if self.running {
            return false;
        }
        self.running = true;
        self.clear_output();

        let code = self.code.as_str();
        let result = panic::catch_unwind(AssertUnwindSafe(|| simulate(code)))
            .unwrap_or_else(|payload| Err(SimulationError::Internal(panic_message(payload))));

        match result {
            Ok(lines) => self.output = lines,
            Err(e) => self.error = Some(e.to_string()),
        }
        self.running = false;
        true
    }

    /// What the output panel shows: the error first, then any lines.
    pub fn view(&self) -> OutputView<'_> {
        if let Some(e) = &self.error {
            OutputView::Error(e)
        } else if !self.output.is_empty() {
            OutputView::Lines(&self.output)
        } else {
            OutputView::Placeholder
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> Option<String> {
    if let Some(s) = payload.downcast_ref::<&str>() {
        Some((*s).to_owned())
    } else {
        payload.downcast_ref::<String>().cloned()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
