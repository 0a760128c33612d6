//! The site build pipeline.
//!
//! Two phases, in the order the page template needs them: first every
//! `<slug>.text` document is compiled (collecting its metadata), then every
//! page is rendered through the template so navigation can name neighbor
//! titles. Documents are processed strictly sequentially; the first failing
//! document aborts the build.

use std::collections::{BTreeMap, HashSet};
use std::ffi::OsStr;
use std::fs;
use std::path::PathBuf;

use bindery_compiler::{Compiler, CompilerConfig, Context};

use crate::error::SiteError;
use crate::template::Template;
use crate::toc::Toc;

/// Configuration for [`SiteBuilder`].
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Directory containing `<slug>.text` documents (also the include root).
    pub source_dir: PathBuf,
    /// Directory rendered pages are written to.
    pub out_dir: PathBuf,
    /// Page template with `{{key}}` placeholders.
    pub template_path: PathBuf,
    /// Table of contents YAML file.
    pub toc_path: PathBuf,
    /// Slug navigation falls back to at the edges of the reading order.
    pub contents_slug: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("src"),
            out_dir: PathBuf::from("docs"),
            template_path: PathBuf::from("templates/page.html"),
            toc_path: PathBuf::from("toc.yaml"),
            contents_slug: "index".to_owned(),
        }
    }
}

/// Result of a completed build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    /// Number of pages written.
    pub pages: usize,
}

/// A compiled document awaiting page rendering.
struct CompiledDocument {
    slug: String,
    content: String,
    ctx: Context,
}

/// Builds a site from a source directory of bindery documents.
pub struct SiteBuilder {
    config: SiteConfig,
}

impl SiteBuilder {
    /// Create a builder for the given configuration.
    #[must_use]
    pub fn new(config: SiteConfig) -> Self {
        Self { config }
    }

    /// Run the full build: compile every document, then render every page.
    pub fn build(&self) -> Result<BuildSummary, SiteError> {
        let template_text =
            fs::read_to_string(&self.config.template_path).map_err(|source| {
                SiteError::Template {
                    path: self.config.template_path.clone(),
                    source,
                }
            })?;
        let template = Template::new(template_text);

        let toc_text =
            fs::read_to_string(&self.config.toc_path).map_err(|source| SiteError::TocRead {
                path: self.config.toc_path.clone(),
                source,
            })?;
        let toc = Toc::parse(&toc_text, self.config.contents_slug.clone())?;

        let documents = self.compile_documents()?;

        let known: HashSet<&str> = documents.iter().map(|doc| doc.slug.as_str()).collect();
        for slug in toc.reading_order() {
            if !known.contains(slug.as_str()) {
                return Err(SiteError::UnknownTocSlug { slug: slug.clone() });
            }
        }

        fs::create_dir_all(&self.config.out_dir).map_err(|source| SiteError::Write {
            path: self.config.out_dir.clone(),
            source,
        })?;

        for doc in &documents {
            let vars = page_vars(doc, &documents, &toc);
            let page = template.render(&vars);
            let out_path = self.config.out_dir.join(format!("{}.html", doc.slug));
            fs::write(&out_path, page).map_err(|source| SiteError::Write {
                path: out_path.clone(),
                source,
            })?;
            tracing::info!(slug = doc.slug.as_str(), "wrote page");
        }

        Ok(BuildSummary {
            pages: documents.len(),
        })
    }

    /// Phase one: compile every source document, in slug order.
    fn compile_documents(&self) -> Result<Vec<CompiledDocument>, SiteError> {
        let compiler = Compiler::with_config(
            CompilerConfig::new().with_source_root(&self.config.source_dir),
        );

        let mut paths: Vec<PathBuf> = fs::read_dir(&self.config.source_dir)
            .map_err(|source| SiteError::Source {
                path: self.config.source_dir.clone(),
                source,
            })?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.extension() == Some(OsStr::new("text")))
            .collect();
        paths.sort();

        let mut documents = Vec::with_capacity(paths.len());
        for path in paths {
            let slug = path
                .file_stem()
                .and_then(OsStr::to_str)
                .unwrap_or_default()
                .to_owned();
            let text = fs::read_to_string(&path).map_err(|source| SiteError::Source {
                path: path.clone(),
                source,
            })?;

            let mut ctx = Context::new(&slug);
            let fragments = compiler.compile_str(&text, &mut ctx)?;
            tracing::debug!(
                slug = slug.as_str(),
                fragments = fragments.len(),
                "compiled document"
            );

            documents.push(CompiledDocument {
                slug,
                content: fragments.join("\n"),
                ctx,
            });
        }
        Ok(documents)
    }
}

/// Assemble the template variable map for one page.
///
/// Metadata keys are lowercased to match the template's case-insensitive
/// placeholders; built-ins (`content`, `slug`, navigation) win over metadata
/// of the same name.
fn page_vars(
    doc: &CompiledDocument,
    documents: &[CompiledDocument],
    toc: &Toc,
) -> BTreeMap<String, String> {
    let title_of = |slug: &str| {
        documents
            .iter()
            .find(|d| d.slug == slug)
            .and_then(|d| d.ctx.get("title"))
            .unwrap_or(slug)
            .to_owned()
    };

    let mut vars: BTreeMap<String, String> = doc
        .ctx
        .metadata()
        .iter()
        .map(|(key, value)| (key.to_ascii_lowercase(), value.clone()))
        .collect();

    let nav = toc.navigation(&doc.slug);
    vars.insert("prevtitle".to_owned(), title_of(&nav.prev));
    vars.insert("nexttitle".to_owned(), title_of(&nav.next));
    vars.insert("prev".to_owned(), nav.prev);
    vars.insert("next".to_owned(), nav.next);
    vars.insert("content".to_owned(), doc.content.clone());
    vars.insert("slug".to_owned(), doc.slug.clone());
    vars
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn write(dir: &std::path::Path, name: &str, contents: &str) {
        fs::write(dir.join(name), contents).unwrap();
    }

    fn setup(root: &std::path::Path) -> SiteConfig {
        let source_dir = root.join("src");
        fs::create_dir_all(&source_dir).unwrap();
        fs::create_dir_all(root.join("templates")).unwrap();

        write(
            root,
            "templates/page.html",
            "<title>{{title}}</title><main>{{content}}</main>\
             <nav><a href=\"{{prev}}.html\">{{prevtitle}}</a>\
             <a href=\"{{next}}.html\">{{nexttitle}}</a></nav>",
        );
        write(root, "toc.yaml", "- alpha\n- beta\n");
        write(
            &source_dir,
            "alpha.text",
            "@metadata\ntitle: Alpha\n...metadata\nFirst page.\n",
        );
        write(
            &source_dir,
            "beta.text",
            "@metadata\ntitle: Beta\n...metadata\nSecond page.\n",
        );
        write(
            &source_dir,
            "index.text",
            "@metadata\ntitle: Contents\n...metadata\nThe book.\n",
        );

        SiteConfig {
            source_dir,
            out_dir: root.join("docs"),
            template_path: root.join("templates/page.html"),
            toc_path: root.join("toc.yaml"),
            contents_slug: "index".to_owned(),
        }
    }

    #[test]
    fn test_end_to_end_build() {
        let tmp = tempfile::tempdir().unwrap();
        let config = setup(tmp.path());
        let out_dir = config.out_dir.clone();

        let summary = SiteBuilder::new(config).build().unwrap();
        assert_eq!(summary.pages, 3);

        let alpha = fs::read_to_string(out_dir.join("alpha.html")).unwrap();
        assert!(alpha.contains("<title>Alpha</title>"));
        assert!(alpha.contains("<main><p>First page.</p></main>"));
        // First in reading order: previous resolves to the contents page
        assert!(alpha.contains("<a href=\"index.html\">Contents</a>"));
        assert!(alpha.contains("<a href=\"beta.html\">Beta</a>"));

        let beta = fs::read_to_string(out_dir.join("beta.html")).unwrap();
        assert!(beta.contains("<a href=\"alpha.html\">Alpha</a>"));
        // Last in reading order: next resolves to the contents page
        assert!(beta.contains("<a href=\"index.html\">Contents</a>"));

        // Documents absent from the TOC still get pages
        let index = fs::read_to_string(out_dir.join("index.html")).unwrap();
        assert!(index.contains("<title>Contents</title>"));
    }

    #[test]
    fn test_unknown_toc_slug_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let mut config = setup(tmp.path());
        write(tmp.path(), "toc.yaml", "- alpha\n- ghost\n");
        config.toc_path = tmp.path().join("toc.yaml");

        let err = SiteBuilder::new(config).build().unwrap_err();
        let SiteError::UnknownTocSlug { slug } = err else {
            panic!("expected unknown toc slug, got {err}");
        };
        assert_eq!(slug, "ghost");
    }

    #[test]
    fn test_compile_error_carries_slug() {
        let tmp = tempfile::tempdir().unwrap();
        let config = setup(tmp.path());
        write(
            &config.source_dir,
            "alpha.text",
            "@codeblock(js)...\nnever terminated\n",
        );

        let err = SiteBuilder::new(config).build().unwrap_err();
        assert!(err.to_string().contains("alpha"));
    }

    #[test]
    fn test_missing_template_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let mut config = setup(tmp.path());
        config.template_path = tmp.path().join("templates/absent.html");

        let err = SiteBuilder::new(config).build().unwrap_err();
        assert!(matches!(err, SiteError::Template { .. }));
    }
}
