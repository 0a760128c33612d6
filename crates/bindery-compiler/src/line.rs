//! Line classification.
//!
//! Classifies a single (trimmed) source line into the block-level construct
//! it opens or continues. This is the grammar's single source of truth; the
//! state machine in [`crate::compiler`] only reacts to the tagged variants
//! produced here.

/// A directive opener parsed from a line: `@name(arg)... remainder`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DirectiveOpen<'a> {
    /// Directive name, normalized to lowercase.
    pub name: String,
    /// Parenthesized argument, if present.
    pub arg: Option<&'a str>,
    /// True when the opener carries a trailing dot run (any length).
    pub multiline: bool,
    /// Text after the marker on the same line.
    pub remainder: &'a str,
}

/// Classification of a single source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LineKind<'a> {
    /// Empty (or whitespace-only) line.
    Blank,
    /// List item: `*` or `-` followed by whitespace; payload is the item text.
    ListItem(&'a str),
    /// Directive opener: `@name(arg)... remainder`.
    Directive(DirectiveOpen<'a>),
    /// Anything else: a plain paragraph line.
    Text(&'a str),
}

/// Classify a trimmed line.
pub(crate) fn classify(line: &str) -> LineKind<'_> {
    if line.is_empty() {
        return LineKind::Blank;
    }
    if let Some(item) = parse_list_item(line) {
        return LineKind::ListItem(item);
    }
    if let Some(directive) = parse_directive(line) {
        return LineKind::Directive(directive);
    }
    LineKind::Text(line)
}

/// Check whether a trimmed line terminates the multiline block for `name`.
///
/// The terminator is exactly three dots followed by the opener's name; the
/// name comparison is case-insensitive, matching the opener grammar.
pub(crate) fn is_terminator(line: &str, name: &str) -> bool {
    line.strip_prefix("...")
        .is_some_and(|rest| rest.eq_ignore_ascii_case(name))
}

/// Parse a list item: `*` or `-` + at least one whitespace character.
fn parse_list_item(line: &str) -> Option<&str> {
    let rest = line.strip_prefix('*').or_else(|| line.strip_prefix('-'))?;
    if rest.starts_with(char::is_whitespace) {
        Some(rest.trim_start())
    } else {
        None
    }
}

/// Parse a directive opener: `@` + letters + optional `(arg)` + dots + text.
fn parse_directive(line: &str) -> Option<DirectiveOpen<'_>> {
    let rest = line.strip_prefix('@')?;

    let name_len = rest.chars().take_while(char::is_ascii_alphabetic).count();
    if name_len == 0 {
        return None;
    }
    let name = rest[..name_len].to_ascii_lowercase();
    let mut rest = &rest[name_len..];

    // Optional argument: a non-empty run of non-')' characters in parens.
    // An unclosed or empty pair is not an argument and stays in the remainder.
    let mut arg = None;
    if let Some(inner) = rest.strip_prefix('(') {
        if let Some(close) = inner.find(')') {
            if close > 0 {
                arg = Some(&inner[..close]);
                rest = &inner[close + 1..];
            }
        }
    }

    // Trailing dot run marks a multiline block; the exact count is irrelevant.
    // A bare opener with neither argument nor same-line text also opens a
    // block, so `@metadata` and `@metadata...` are equivalent.
    let dots = rest.chars().take_while(|&c| c == '.').count();
    let remainder = rest[dots..].trim_start();
    let multiline = dots > 0 || (arg.is_none() && remainder.is_empty());

    Some(DirectiveOpen {
        name,
        arg,
        multiline,
        remainder,
    })
}
