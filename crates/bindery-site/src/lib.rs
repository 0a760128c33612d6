//! Page assembly for bindery.
//!
//! Turns a directory of `<slug>.text` documents into a directory of
//! `<slug>.html` pages: each document is compiled to HTML fragments by
//! `bindery-compiler`, then poured into a `{{key}}` page template together
//! with its metadata and previous/next navigation derived from a YAML table
//! of contents.

mod builder;
mod error;
mod template;
mod toc;

pub use builder::{BuildSummary, SiteBuilder, SiteConfig};
pub use error::SiteError;
pub use template::Template;
pub use toc::{Navigation, Toc, TocNode};
