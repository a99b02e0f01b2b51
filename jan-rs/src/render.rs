//! Output renderers for highlight markup.
//!
//! [`code_block`] wraps markup in the HTML the documentation pages embed.
//! [`ansi`] turns markup into a colored terminal string; it reads tags the
//! way a browser would, so the attribute debris left by later highlight
//! passes (see [`crate::highlight`]) ends up where a browser puts it.

use crossterm::style::{self, Attribute, Color, Stylize};

// ── HTML ──────────────────────────────────────────────────────────────────────

/// Wrap highlight `markup` in a code block with a language label and an
/// optional title row.
///
/// The markup is embedded unescaped, as the playground does; the title and
/// language label are escaped.
pub fn code_block(markup: &str, lang: &str, title: Option<&str>) -> String {
    let mut out = String::from("<div class=\"code-block\">\n");
    if let Some(t) = title {
        out.push_str(&format!("<div class=\"code-title\">{}</div>\n", escape_html(t)));
    }
    out.push_str(&format!(
        "<div class=\"code-header\"><span class=\"code-lang\">{}</span></div>\n",
        escape_html(lang)
    ));
    out.push_str(&format!("<pre><code>{markup}</code></pre>\n"));
    out.push_str("</div>\n");
    out
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    out
}

// ── Terminal ──────────────────────────────────────────────────────────────────

/// Terminal style derived from a span's class string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Style {
    pub fg: Option<Color>,
    pub bold: bool,
}

impl Style {
    /// Map Tailwind-ish class names onto terminal colors.  Unknown classes
    /// leave the style unchanged.
    pub fn from_class(class: &str) -> Self {
        let mut st = Style::default();
        for word in class.split_ascii_whitespace() {
            if word.starts_with("font-") && word.ends_with("bold") {
                st.bold = true;
                continue;
            }
            let fg = if word.contains("purple") {
                Color::Magenta
            } else if word.contains("blue") {
                Color::Blue
            } else if word.contains("green") {
                Color::Green
            } else if word.contains("yellow") {
                Color::Yellow
            } else if word.contains("red") {
                Color::Red
            } else {
                continue;
            };
            st.fg.get_or_insert(fg);
        }
        st
    }

    // Inner spans override color; boldness is inherited.
    fn nest(self, inner: Style) -> Style {
        Style {
            fg: inner.fg.or(self.fg),
            bold: self.bold || inner.bold,
        }
    }
}

/// A run of visible text and the style it is drawn in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub style: Style,
}

/// Split markup into visible text segments.
///
/// `<span …>` opens a styled region using its first `class` attribute and
/// `</span>` closes the innermost one.  Any other `<` is text, as is an
/// opening tag that never reaches `>`.
pub fn segments(markup: &str) -> Vec<Segment> {
    let mut out: Vec<Segment> = Vec::new();
    let mut stack: Vec<Style> = Vec::new();
    let mut text = String::new();
    let mut rest = markup;

    let flush = |text: &mut String, stack: &[Style], out: &mut Vec<Segment>| {
        if text.is_empty() {
            return;
        }
        let style = stack.last().copied().unwrap_or_default();
        match out.last_mut() {
            Some(last) if last.style == style => last.text.push_str(text),
            _ => out.push(Segment { text: text.clone(), style }),
        }
        text.clear();
    };

    while let Some(ch) = rest.chars().next() {
        if ch == '<' {
            if let Some(after) = rest.strip_prefix("</span>") {
                if !stack.is_empty() {
                    flush(&mut text, &stack, &mut out);
                    stack.pop();
                }
                rest = after;
                continue;
            }
            if let Some((class, after)) = open_span(rest) {
                flush(&mut text, &stack, &mut out);
                let outer = stack.last().copied().unwrap_or_default();
                let inner = class.map(Style::from_class).unwrap_or_default();
                stack.push(outer.nest(inner));
                rest = after;
                continue;
            }
        }
        text.push(ch);
        rest = &rest[ch.len_utf8()..];
    }
    flush(&mut text, &stack, &mut out);
    out
}

/// Parse `<span attr…>` at the start of `s`.  Returns the first `class`
/// value (if any) and the text after `>`.
fn open_span(s: &str) -> Option<(Option<&str>, &str)> {
    let body = s.strip_prefix("<span")?;
    if !body.starts_with(|c: char| c == '>' || c.is_ascii_whitespace()) {
        return None;
    }
    let mut class = None;
    let mut rest = body;
    loop {
        rest = rest.trim_start();
        if let Some(after) = rest.strip_prefix('>') {
            return Some((class, after));
        }
        if rest.is_empty() {
            return None;
        }
        let name_len = rest
            .find(|c: char| c.is_ascii_whitespace() || c == '=' || c == '>')
            .unwrap_or(rest.len());
        // A lone `/` or similar junk: skip one character.
        let name_len = name_len.max(rest.chars().next().map_or(0, char::len_utf8));
        let name = &rest[..name_len];
        rest = &rest[name_len..];

        let value = if let Some(after_eq) = rest.trim_start().strip_prefix('=') {
            let v = after_eq.trim_start();
            if let Some(q) = v.strip_prefix('"') {
                let end = q.find('"')?;
                rest = &q[end + 1..];
                Some(&q[..end])
            } else {
                let end = v
                    .find(|c: char| c.is_ascii_whitespace() || c == '>')
                    .unwrap_or(v.len());
                rest = &v[end..];
                Some(&v[..end])
            }
        } else {
            None
        };
        if name.eq_ignore_ascii_case("class") && class.is_none() {
            class = Some(value.unwrap_or(""));
        }
    }
}

/// Render markup as a string with ANSI styling.
pub fn ansi(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    for seg in segments(markup) {
        let Style { fg, bold } = seg.style;
        let mut styled = style::style(seg.text.as_str());
        if let Some(c) = fg {
            styled = styled.with(c);
        }
        if bold {
            styled = styled.attribute(Attribute::Bold);
        }
        out.push_str(&styled.to_string());
    }
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────
