//! Table of contents configuration and navigation.
//!
//! The TOC file is a YAML sequence; each node is either a bare slug or a
//! `{section, chapters}` mapping. The flattened order (section before its
//! chapters) defines the book's reading order, which in turn determines each
//! document's previous/next neighbors.

use serde::Deserialize;

/// One node of the table of contents file.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum TocNode {
    /// A standalone document.
    Slug(String),
    /// A section landing page followed by its chapters.
    Section {
        /// Slug of the section's own document.
        section: String,
        /// Chapter slugs, in reading order.
        chapters: Vec<String>,
    },
}

/// Previous/next neighbors for one document.
///
/// Neighbors always resolve: a document at either edge of the reading order
/// (or absent from it entirely) points at the designated contents page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    /// Slug of the previous document in reading order.
    pub prev: String,
    /// Slug of the next document in reading order.
    pub next: String,
}

/// Flattened table of contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toc {
    order: Vec<String>,
    contents_slug: String,
}

impl Toc {
    /// Parse a TOC from YAML text.
    ///
    /// Empty (or whitespace-only) content yields an empty TOC.
    pub fn parse(
        yaml: &str,
        contents_slug: impl Into<String>,
    ) -> Result<Self, serde_yaml::Error> {
        let trimmed = yaml.trim();
        let nodes: Vec<TocNode> = if trimmed.is_empty() {
            Vec::new()
        } else {
            serde_yaml::from_str(trimmed)?
        };
        Ok(Self::from_nodes(&nodes, contents_slug))
    }

    /// Build a TOC from already-parsed nodes.
    #[must_use]
    pub fn from_nodes(nodes: &[TocNode], contents_slug: impl Into<String>) -> Self {
        let mut order = Vec::new();
        for node in nodes {
            match node {
                TocNode::Slug(slug) => order.push(slug.clone()),
                TocNode::Section { section, chapters } => {
                    order.push(section.clone());
                    order.extend(chapters.iter().cloned());
                }
            }
        }
        Self {
            order,
            contents_slug: contents_slug.into(),
        }
    }

    /// The flattened reading order.
    #[must_use]
    pub fn reading_order(&self) -> &[String] {
        &self.order
    }

    /// The slug out-of-bounds neighbors resolve to.
    #[must_use]
    pub fn contents_slug(&self) -> &str {
        &self.contents_slug
    }

    /// Resolve the previous/next neighbors for `slug`.
    #[must_use]
    pub fn navigation(&self, slug: &str) -> Navigation {
        let Some(index) = self.order.iter().position(|s| s == slug) else {
            return Navigation {
                prev: self.contents_slug.clone(),
                next: self.contents_slug.clone(),
            };
        };
        let prev = if index == 0 {
            &self.contents_slug
        } else {
            &self.order[index - 1]
        };
        let next = self.order.get(index + 1).unwrap_or(&self.contents_slug);
        Navigation {
            prev: prev.clone(),
            next: next.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_mixed_nodes() {
        let yaml = "\
- intro
- section: loops
  chapters:
    - for-loops
    - while-loops
- outro
";
        let toc = Toc::parse(yaml, "index").unwrap();
        assert_eq!(
            toc.reading_order(),
            ["intro", "loops", "for-loops", "while-loops", "outro"]
        );
    }

    #[test]
    fn test_parse_empty() {
        let toc = Toc::parse("", "index").unwrap();
        assert!(toc.reading_order().is_empty());
    }

    #[test]
    fn test_parse_invalid() {
        assert!(Toc::parse("just: a: mapping", "index").is_err());
    }

    #[test]
    fn test_navigation_interior() {
        let toc = Toc::parse("[a, b, c]", "index").unwrap();
        let nav = toc.navigation("b");
        assert_eq!(nav.prev, "a");
        assert_eq!(nav.next, "c");
    }

    #[test]
    fn test_navigation_edges_resolve_to_contents() {
        let toc = Toc::parse("[a, b]", "index").unwrap();
        assert_eq!(toc.navigation("a").prev, "index");
        assert_eq!(toc.navigation("b").next, "index");
    }

    #[test]
    fn test_navigation_unlisted_slug() {
        let toc = Toc::parse("[a, b]", "index").unwrap();
        let nav = toc.navigation("appendix");
        assert_eq!(nav.prev, "index");
        assert_eq!(nav.next, "index");
    }
}
