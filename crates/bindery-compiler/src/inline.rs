//! Inline span formatting.
//!
//! Backtick-delimited spans become `<var>` elements with HTML-escaped
//! content; text outside spans passes through untouched. This runs inside
//! paragraph, list item, and heading content only; code blocks and raw HTML
//! handle escaping themselves.

/// Escape `&`, `<`, and `>` for safe embedding in HTML.
#[must_use]
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Apply inline span formatting to a line of text.
///
/// Each `` `span` `` becomes `<var>span</var>` with its content escaped.
/// An unpaired trailing backtick is left as literal text.
#[must_use]
pub fn format_inline(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find('`') {
        let Some(len) = rest[open + 1..].find('`') else {
            break;
        };
        out.push_str(&rest[..open]);
        out.push_str("<var>");
        out.push_str(&escape_html(&rest[open + 1..open + 1 + len]));
        out.push_str("</var>");
        rest = &rest[open + len + 2..];
    }
    out.push_str(rest);
    out
}
