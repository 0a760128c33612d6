//! Page template filling.
//!
//! Templates are plain HTML with `{{key}}` placeholders. Keys match
//! case-insensitively against the page's variable map; a placeholder with no
//! matching variable is replaced with the empty string.

use std::collections::BTreeMap;

/// A loaded page template.
#[derive(Debug, Clone)]
pub struct Template {
    raw: String,
}

impl Template {
    /// Wrap raw template text.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// Fill every `{{key}}` placeholder from `vars`.
    ///
    /// `vars` keys must be lowercase; placeholder keys are lowercased before
    /// lookup. Unmatched placeholders disappear.
    #[must_use]
    pub fn render(&self, vars: &BTreeMap<String, String>) -> String {
        let mut out = String::with_capacity(self.raw.len());
        let mut rest = self.raw.as_str();

        while let Some(open) = rest.find("{{") {
            let Some(close) = rest[open + 2..].find("}}") else {
                break;
            };
            out.push_str(&rest[..open]);
            let key = rest[open + 2..open + 2 + close].trim().to_ascii_lowercase();
            if let Some(value) = vars.get(&key) {
                out.push_str(value);
            }
            rest = &rest[open + 2 + close + 2..];
        }
        out.push_str(rest);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn vars(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|&(k, v)| (k.to_owned(), v.to_owned()))
            .collect()
    }

    #[test]
    fn test_basic_replacement() {
        let template = Template::new("<title>{{title}}</title>");
        let out = template.render(&vars(&[("title", "Hello")]));
        assert_eq!(out, "<title>Hello</title>");
    }

    #[test]
    fn test_case_insensitive_keys() {
        let template = Template::new("{{Title}} / {{TITLE}}");
        let out = template.render(&vars(&[("title", "Hello")]));
        assert_eq!(out, "Hello / Hello");
    }

    #[test]
    fn test_missing_key_is_empty() {
        let template = Template::new("[{{missing}}]");
        assert_eq!(template.render(&vars(&[])), "[]");
    }

    #[test]
    fn test_multiple_placeholders() {
        let template = Template::new("<main>{{content}}</main><a href=\"{{next}}.html\">next</a>");
        let out = template.render(&vars(&[("content", "<p>hi</p>"), ("next", "ch2")]));
        assert_eq!(out, "<main><p>hi</p></main><a href=\"ch2.html\">next</a>");
    }

    #[test]
    fn test_unclosed_placeholder_left_alone() {
        let template = Template::new("before {{oops");
        assert_eq!(template.render(&vars(&[])), "before {{oops");
    }
}
