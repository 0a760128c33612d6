//! Site build error types.

use std::path::PathBuf;

use bindery_compiler::CompileError;

/// Error raised while building the site.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// The page template could not be read.
    #[error("failed to read template '{}'", .path.display())]
    Template {
        /// Template path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The table of contents file could not be read.
    #[error("failed to read table of contents '{}'", .path.display())]
    TocRead {
        /// TOC path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The table of contents file is not valid YAML.
    #[error("invalid table of contents: {0}")]
    TocParse(#[from] serde_yaml::Error),

    /// The TOC names a slug with no corresponding source document.
    #[error("table of contents names unknown document '{slug}'")]
    UnknownTocSlug {
        /// The slug with no `<slug>.text` source.
        slug: String,
    },

    /// A source document or the source directory could not be read.
    #[error("failed to read source '{}'", .path.display())]
    Source {
        /// Source path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A rendered page could not be written.
    #[error("failed to write '{}'", .path.display())]
    Write {
        /// Output path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A document failed to compile.
    #[error(transparent)]
    Compile(#[from] CompileError),
}
