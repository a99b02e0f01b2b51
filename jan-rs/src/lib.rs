//! Jan language playground core.
//!
//! Two stateless text processors over a buffer of Jan source:
//!
//! - [`highlight()`]: wraps keywords, the `is` assignment word, numbers,
//!   string literals, and operators in `<span>` markup via ordered regex
//!   rewrite passes.
//! - [`simulate()`]: classifies each line by shape and reports what an
//!   interpreter would appear to do, without evaluating anything.
//!
//! ```rust
//! let out = jan::simulate("var x is 42\nx + 8").unwrap();
//! assert_eq!(out, ["✓ Declared x = 42", "→ x + 8"]);
//! ```
//!
//! [`playground::Playground`] holds the mutable editor state around them.

pub mod cli;
pub mod config;
pub mod highlight;
pub mod playground;
pub mod render;
pub mod shape;
pub mod simulate;
pub mod snippets;
pub mod span;

pub use highlight::{highlight, Highlighter, LANGUAGE};
pub use simulate::{classify, simulate, RunResult, SimulationError};
