//! Built-in example programs.
//!
//! The playground's editor buttons, quick-example cards, and the
//! documentation page all show these.  They are lookup-by-name for the CLI
//! (`-e<name>`) and the `example` config key.

/// A named Jan program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snippet {
    pub name: &'static str,
    pub title: &'static str,
    pub code: &'static str,
}

/// Name of the snippet the editor starts with.
pub const DEFAULT: &str = "welcome";

pub const ALL: &[Snippet] = &[
    Snippet {
        name: "welcome",
        title: "Welcome",
        code: "// Welcome to Jan Language!
// Try writing some code below

var x is 42
var message is \"Hello from Jan!\"

message
x + 8",
    },
    Snippet {
        name: "hello",
        title: "Hello World",
        code: "function greet name
    return \"Hello, \" + name + \"!\"

var message is greet \"World\"
message",
    },
    Snippet {
        name: "calculator",
        title: "Calculator",
        code: "var a is 10
var b is 5
var sum is a + b
sum",
    },
    Snippet {
        name: "variables",
        title: "Variables",
        code: "var x is 42
var name is \"Jan\"
x + 10",
    },
    Snippet {
        name: "functions",
        title: "Functions",
        code: "function add a b
    return a + b

add 5 3",
    },
    Snippet {
        name: "conditionals",
        title: "Conditionals",
        code: "var x is 15
if x > 10
    \"x is large\"
else
    \"x is small\"",
    },
    Snippet {
        name: "loops",
        title: "While Loops",
        code: "var i is 0

while i < 5
    i is i + 1
    i",
    },
    Snippet {
        name: "operators",
        title: "Operators",
        code: "var a is 10
var b is 5

var sum is a + b
var product is a * b
var isEqual is a == b
var isGreater is a > b",
    },
    Snippet {
        name: "types",
        title: "Data Types",
        code: "var number is 42
var float is 3.14
var text is \"Hello, Jan!\"
var flag is true
var empty is nil",
    },
    Snippet {
        name: "fibonacci",
        title: "Fibonacci",
        code: "function fib n
    if n <= 1
        return n
    else
        return fib n - 1 + fib n - 2

var result is fib 10
result",
    },
];

/// Look up a snippet by name (case-insensitive).
pub fn find(name: &str) -> Option<&'static Snippet> {
    ALL.iter().find(|s| s.name.eq_ignore_ascii_case(name))
}

/// The editor's initial program.
pub fn default_code() -> &'static str {
    find(DEFAULT).map(|s| s.code).unwrap_or("")
}

// ── Tests ─────────────────────────────────────────────────────────────────────
