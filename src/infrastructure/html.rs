//! HTML tag builder

use crate::infrastructure::traits::{Attributes, TagBuilder};

/// Elements that never have content or a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Builds `<tag attr="value">content</tag>` strings.
///
/// An empty tag name returns the content unwrapped. Attribute values are
/// escaped, content is inserted as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlTagBuilder;

impl TagBuilder for HtmlTagBuilder {
    fn tag(&self, name: &str, content: &str, attributes: &Attributes) -> String {
        if name.is_empty() {
            return content.to_string();
        }

        let mut out = String::with_capacity(content.len() + name.len() * 2 + 5);
        out.push('<');
        out.push_str(name);
        for (key, value) in attributes {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            out.push_str(&escape_html(value));
            out.push('"');
        }
        out.push('>');

        if VOID_ELEMENTS.contains(&name.to_ascii_lowercase().as_str()) {
            return out;
        }

        out.push_str(content);
        out.push_str("</");
        out.push_str(name);
        out.push('>');
        out
    }
}

/// Escape text for use in HTML content or a quoted attribute value.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            c => out.push(c),
        }
    }
    out
}
