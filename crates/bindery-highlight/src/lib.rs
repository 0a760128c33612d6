//! Syntax highlighting capability for bindery code blocks.
//!
//! The compiler consumes highlighting through the [`Highlighter`] trait so
//! that the actual engine stays swappable. The built-in
//! [`LineSpanHighlighter`] produces per-line span markup and reports a
//! [confidence](Highlighted::confidence) so callers can surface a diagnostic
//! when a language hint did not match anything the engine knows.

/// Result of highlighting a block of code.
#[derive(Clone, Debug, PartialEq)]
pub struct Highlighted {
    /// HTML markup for the highlighted code.
    pub markup: String,
    /// Engine confidence in the language match.
    ///
    /// `0.0` means the hint was unrecognized (or inference found nothing);
    /// callers should log a diagnostic but still use the markup.
    pub confidence: f32,
    /// Resolved language, if the engine recognized one.
    pub language: Option<String>,
}

/// Highlighting backend consumed by the code block directive.
///
/// Implementations must never fail: an unknown language is reported through
/// [`Highlighted::confidence`], not an error.
pub trait Highlighter: Send + Sync {
    /// Highlight `code`, optionally guided by a language `hint`.
    ///
    /// When `hint` is `None` the engine is free to infer the language.
    fn highlight(&self, code: &str, hint: Option<&str>) -> Highlighted;
}

/// Languages the built-in highlighter accepts, with common aliases.
const KNOWN_LANGUAGES: &[(&str, &str)] = &[
    ("bash", "bash"),
    ("c", "c"),
    ("cpp", "cpp"),
    ("css", "css"),
    ("go", "go"),
    ("html", "html"),
    ("java", "java"),
    ("javascript", "javascript"),
    ("js", "javascript"),
    ("json", "json"),
    ("python", "python"),
    ("py", "python"),
    ("rs", "rust"),
    ("rust", "rust"),
    ("sh", "bash"),
    ("toml", "toml"),
    ("ts", "typescript"),
    ("typescript", "typescript"),
    ("text", "text"),
    ("txt", "text"),
    ("xml", "xml"),
    ("yaml", "yaml"),
    ("yml", "yaml"),
];

/// Built-in highlighter emitting one `<span class="line">` per source line.
///
/// It performs no token-level colorization; it escapes each line and wraps it
/// so stylesheets can target individual lines. Language handling is limited
/// to validating the hint (or inferring one from a shebang / leading markup)
/// and reporting confidence accordingly.
#[derive(Debug, Default)]
pub struct LineSpanHighlighter;

impl LineSpanHighlighter {
    /// Create a new line-span highlighter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Highlighter for LineSpanHighlighter {
    fn highlight(&self, code: &str, hint: Option<&str>) -> Highlighted {
        let (language, confidence) = match hint {
            Some(hint) => match resolve_language(hint) {
                Some(lang) => (Some(lang.to_owned()), 1.0),
                None => (Some(hint.to_owned()), 0.0),
            },
            None => match infer_language(code) {
                Some(lang) => (Some(lang.to_owned()), 0.5),
                None => (None, 0.0),
            },
        };

        let mut markup = String::with_capacity(code.len() + code.len() / 2);
        for line in code.lines() {
            markup.push_str("<span class=\"line\">");
            markup.push_str(&escape(line));
            markup.push_str("\n</span>");
        }

        Highlighted {
            markup,
            confidence,
            language,
        }
    }
}

/// Map a language hint to a canonical name, if known.
fn resolve_language(hint: &str) -> Option<&'static str> {
    let hint = hint.trim().to_ascii_lowercase();
    KNOWN_LANGUAGES
        .iter()
        .find(|(alias, _)| *alias == hint)
        .map(|(_, canonical)| *canonical)
}

/// Guess a language from the content itself.
///
/// Only cheap, high-signal checks: shebang lines and leading markup tags.
fn infer_language(code: &str) -> Option<&'static str> {
    let first = code.lines().next()?.trim();
    if let Some(interpreter) = first.strip_prefix("#!") {
        if interpreter.contains("python") {
            return Some("python");
        }
        if interpreter.contains("node") {
            return Some("javascript");
        }
        if interpreter.contains("sh") {
            return Some("bash");
        }
        return None;
    }
    if first.starts_with("<?xml") {
        return Some("xml");
    }
    if first.starts_with("<!") || first.starts_with('<') {
        return Some("html");
    }
    None
}

/// Escape `&`, `<`, and `>` for embedding in markup.
fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_known_hint_full_confidence() {
        let result = LineSpanHighlighter::new().highlight("let x = 1;", Some("js"));
        assert_eq!(result.confidence, 1.0);
        assert_eq!(result.language.as_deref(), Some("javascript"));
    }

    #[test]
    fn test_unknown_hint_zero_confidence() {
        let result = LineSpanHighlighter::new().highlight("whatever", Some("klingon"));
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.language.as_deref(), Some("klingon"));
        // Markup is still produced
        assert!(result.markup.contains("whatever"));
    }

    #[test]
    fn test_line_span_markup() {
        let result = LineSpanHighlighter::new().highlight("a < b\nc & d", Some("text"));
        assert_eq!(
            result.markup,
            "<span class=\"line\">a &lt; b\n</span><span class=\"line\">c &amp; d\n</span>"
        );
    }

    #[test]
    fn test_infer_from_shebang() {
        let result = LineSpanHighlighter::new().highlight("#!/usr/bin/env python\nprint(1)", None);
        assert_eq!(result.language.as_deref(), Some("python"));
        assert!(result.confidence > 0.0);
    }

    #[test]
    fn test_infer_from_markup() {
        let result = LineSpanHighlighter::new().highlight("<div>hi</div>", None);
        assert_eq!(result.language.as_deref(), Some("html"));
    }

    #[test]
    fn test_no_hint_no_match() {
        let result = LineSpanHighlighter::new().highlight("plain words", None);
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.language, None);
    }

    #[test]
    fn test_empty_code() {
        let result = LineSpanHighlighter::new().highlight("", Some("rust"));
        assert_eq!(result.markup, "");
        assert_eq!(result.confidence, 1.0);
    }
}
