//! CLI commands.

use std::path::PathBuf;

use clap::Args;

use bindery_site::{SiteBuilder, SiteConfig};

use crate::error::CliError;

/// Arguments for the `build` command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Source directory containing <slug>.text documents.
    #[arg(long, default_value = "src")]
    source: PathBuf,

    /// Output directory for rendered pages.
    #[arg(long, default_value = "docs")]
    out: PathBuf,

    /// Page template with {{key}} placeholders.
    #[arg(long, default_value = "templates/page.html")]
    template: PathBuf,

    /// Table of contents file.
    #[arg(long, default_value = "toc.yaml")]
    toc: PathBuf,

    /// Slug that edge-of-book navigation falls back to.
    #[arg(long, default_value = "index")]
    contents: String,

    /// Enable verbose logging.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl BuildArgs {
    /// Run the build.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let config = SiteConfig {
            source_dir: self.source,
            out_dir: self.out,
            template_path: self.template,
            toc_path: self.toc,
            contents_slug: self.contents,
        };
        let summary = SiteBuilder::new(config).build()?;
        println!("Built {} page(s)", summary.pages);
        Ok(())
    }
}
