//! Small markup helpers shared by preview and export rendering.

use std::fmt;
use std::fmt::Write as _;

/// Escape text content. `$token$` placeholders are left as they are.
#[must_use]
pub fn escape_text(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape an attribute value for use inside double quotes.
#[must_use]
pub fn escape_attr(input: &str) -> String {
    escape_text(input).replace('"', "&quot;")
}

/// Render text for a leaf node.
///
/// Single-line text is escaped as is. Text with line breaks is split into
/// lines, each escaped, blank lines replaced by `&nbsp;` so they keep their
/// height, and the lines joined with `<br/>`. The owning node's style then
/// gets `white-space: pre-wrap`, once.
#[must_use]
pub fn text_body(content: &str, style: &mut InlineStyle) -> String {
    if !content.contains('\n') {
        return escape_text(content);
    }
    style.ensure("white-space", "pre-wrap");
    content
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .map(|line| {
            if line.trim().is_empty() {
                "&nbsp;".to_string()
            } else {
                escape_text(line)
            }
        })
        .collect::<Vec<_>>()
        .join("<br/>")
}

/// An inline `style` attribute built declaration by declaration.
///
/// Each property appears at most once; empty values are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineStyle {
    declarations: Vec<(&'static str, String)>,
}

impl InlineStyle {
    /// Create an empty style.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property, replacing any earlier value.
    #[must_use]
    pub fn with(mut self, property: &'static str, value: impl Into<String>) -> Self {
        self.set(property, value);
        self
    }

    /// Set a property, replacing any earlier value.
    pub fn set(&mut self, property: &'static str, value: impl Into<String>) {
        let value = value.into();
        if value.trim().is_empty() {
            return;
        }
        match self.declarations.iter_mut().find(|(p, _)| *p == property) {
            Some((_, current)) => *current = value,
            None => self.declarations.push((property, value)),
        }
    }

    /// Set a property only if it is not already declared.
    pub fn ensure(&mut self, property: &'static str, value: impl Into<String>) {
        if !self.contains(property) {
            self.set(property, value);
        }
    }

    /// Check whether a property is declared.
    #[must_use]
    pub fn contains(&self, property: &str) -> bool {
        self.declarations.iter().any(|(p, _)| *p == property)
    }

    /// Check if no property is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

impl fmt::Display for InlineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (property, value)) in self.declarations.iter().enumerate() {
            if i > 0 {
                f.write_char(' ')?;
            }
            write!(f, "{property}: {value};")?;
        }
        Ok(())
    }
}

/// Write an opening tag up to, not including, its closing `>`.
///
/// Empty `class` and `style` attributes are left out. `attrs` values are
/// escaped here; `classes` are trusted identifiers.
pub fn open_tag(
    out: &mut String,
    tag: &str,
    classes: &[&str],
    style: &InlineStyle,
    attrs: &[(&str, &str)],
) {
    out.push('<');
    out.push_str(tag);
    let classes: Vec<&str> = classes.iter().copied().filter(|c| !c.is_empty()).collect();
    if !classes.is_empty() {
        out.push_str(&format!(" class=\"{}\"", classes.join(" ")));
    }
    if !style.is_empty() {
        out.push_str(&format!(" style=\"{}\"", escape_attr(&style.to_string())));
    }
    for (name, value) in attrs {
        out.push_str(&format!(" {name}=\"{}\"", escape_attr(value)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_keeps_tokens() {
        assert_eq!(escape_text("a < b & $client_name$"), "a &lt; b &amp; $client_name$");
        assert_eq!(escape_attr("say \"hi\""), "say &quot;hi&quot;");
    }

    #[test]
    fn test_text_body_single_line() {
        let mut style = InlineStyle::new();
        assert_eq!(text_body("Hello <b>", &mut style), "Hello &lt;b&gt;");
        assert!(style.is_empty());
    }

    #[test]
    fn test_text_body_blank_lines() {
        let mut style = InlineStyle::new().with("color", "#000000");
        let body = text_body("Line1\n\nLine2", &mut style);
        assert_eq!(body, "Line1<br/>&nbsp;<br/>Line2");
        assert_eq!(style.to_string(), "color: #000000; white-space: pre-wrap;");
    }

    #[test]
    fn test_text_body_crlf_and_whitespace_lines() {
        let mut style = InlineStyle::new();
        let body = text_body("a\r\n   \r\n<b>", &mut style);
        assert_eq!(body, "a<br/>&nbsp;<br/>&lt;b&gt;");
    }

    #[test]
    fn test_pre_wrap_never_duplicated() {
        let mut style = InlineStyle::new().with("white-space", "pre-wrap");
        let _ = text_body("x\ny", &mut style);
        let _ = text_body("x\ny", &mut style);
        assert_eq!(style.to_string().matches("white-space").count(), 1);
    }

    #[test]
    fn test_style_set_replaces_and_skips_empty() {
        let mut style = InlineStyle::new();
        style.set("color", "red");
        style.set("color", "blue");
        style.set("line-height", "  ");
        assert_eq!(style.to_string(), "color: blue;");
    }

    #[test]
    fn test_open_tag_omits_empty_attributes() {
        let mut out = String::new();
        open_tag(&mut out, "div", &["", ""], &InlineStyle::new(), &[]);
        assert_eq!(out, "<div");

        let mut out = String::new();
        open_tag(
            &mut out,
            "a",
            &["button"],
            &InlineStyle::new().with("color", "#fff"),
            &[("href", "https://x.test/?a=1&b=$id$")],
        );
        assert_eq!(
            out,
            "<a class=\"button\" style=\"color: #fff;\" href=\"https://x.test/?a=1&amp;b=$id$\""
        );
    }
}
