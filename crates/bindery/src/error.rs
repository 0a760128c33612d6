//! CLI error types.

use bindery_site::SiteError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Site(#[from] SiteError),
}
