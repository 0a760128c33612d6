//! Compile error types.

/// Error raised while compiling a single document.
///
/// All variants carry the slug of the document being compiled so the outer
/// build can report which source file failed.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    /// A directive name with no registered handler.
    #[error("no directive registered for @{name} in document '{slug}'")]
    UnknownDirective {
        /// The unrecognized directive name (lowercased).
        name: String,
        /// Document being compiled.
        slug: String,
    },

    /// End of input reached while capturing a multiline block.
    #[error("unterminated @{name} block in document '{slug}' (missing ...{name})")]
    UnterminatedBlock {
        /// The directive whose terminator never appeared.
        name: String,
        /// Document being compiled.
        slug: String,
    },

    /// An `@include` / `@includecode` target could not be read.
    #[error("failed to include '{path}' in document '{slug}'")]
    Include {
        /// The filename as written in the source.
        path: String,
        /// Document being compiled.
        slug: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A non-blank `@metadata` body line without a `key: value` colon.
    #[error("malformed metadata line '{line}' in document '{slug}' (expected 'key: value')")]
    MalformedMetadata {
        /// The offending line, trimmed.
        line: String,
        /// Document being compiled.
        slug: String,
    },
}
