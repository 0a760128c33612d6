//! Per-document compile context.

use std::collections::BTreeMap;

/// A collected subheading: stable id plus heading text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subhead {
    /// Anchor id carried by the heading element.
    pub id: String,
    /// Heading text as written in the source.
    pub contents: String,
}

/// Mutable per-document state threaded through every directive handler.
///
/// Exactly one `Context` exists per document compile; handlers observe and
/// mutate the same instance (including handlers run from nested `sidebar`
/// blocks), and the caller consumes it in full after the compile returns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    slug: String,
    metadata: BTreeMap<String, String>,
    subheads: Vec<Subhead>,
}

impl Context {
    /// Create a context for the document identified by `slug`.
    #[must_use]
    pub fn new(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            ..Self::default()
        }
    }

    /// The document's stable identifier.
    #[must_use]
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Set a metadata value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.metadata.insert(key.into(), value.into());
    }

    /// Look up a metadata value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }

    /// All metadata set during the compile, in key order.
    #[must_use]
    pub fn metadata(&self) -> &BTreeMap<String, String> {
        &self.metadata
    }

    /// Record a collected subheading.
    pub fn push_subhead(&mut self, subhead: Subhead) {
        self.subheads.push(subhead);
    }

    /// Subheadings collected so far, in document order.
    #[must_use]
    pub fn subheads(&self) -> &[Subhead] {
        &self.subheads
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_roundtrip() {
        let mut ctx = Context::new("intro");
        ctx.set("title", "Hello");
        assert_eq!(ctx.slug(), "intro");
        assert_eq!(ctx.get("title"), Some("Hello"));
        assert_eq!(ctx.get("missing"), None);
    }

    #[test]
    fn test_subheads_keep_order() {
        let mut ctx = Context::new("intro");
        ctx.push_subhead(Subhead {
            id: "a".to_owned(),
            contents: "A".to_owned(),
        });
        ctx.push_subhead(Subhead {
            id: "b".to_owned(),
            contents: "B".to_owned(),
        });
        let ids: Vec<&str> = ctx.subheads().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
    }
}
