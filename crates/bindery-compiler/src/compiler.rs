//! The line-oriented state machine driver.
//!
//! [`Compiler::compile`] walks a document's lines in order, classifying each
//! with [`crate::line::classify`] and dispatching block boundaries through
//! the directive [`Registry`]. At any moment the driver is in exactly one of
//! three states: default, list accumulation, or multiline capture. List
//! termination and list entry both reprocess the current line rather than
//! consuming it, so a list never swallows the construct that follows it.

use std::io;
use std::path::{Path, PathBuf};

use bindery_highlight::{Highlighted, Highlighter, LineSpanHighlighter};

use crate::context::Context;
use crate::directive::{DirectiveHandler, Invocation, Registry};
use crate::error::CompileError;
use crate::line::{LineKind, classify, is_terminator};

/// Type alias for the file reading callback function.
pub type ReadFileFn = dyn Fn(&Path) -> io::Result<String> + Send + Sync;

/// Configuration for the [`Compiler`].
pub struct CompilerConfig {
    /// Root directory against which `@include` filenames resolve.
    pub source_root: PathBuf,
    /// Callback to read files from the file system.
    ///
    /// Default: `std::fs::read_to_string`
    pub read_file: Option<Box<ReadFileFn>>,
    /// Highlighter used by `@codeblock`.
    ///
    /// Default: [`LineSpanHighlighter`]
    pub highlighter: Option<Box<dyn Highlighter>>,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl CompilerConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            source_root: PathBuf::from("."),
            read_file: None,
            highlighter: None,
        }
    }

    /// Set the root directory for resolving include filenames.
    #[must_use]
    pub fn with_source_root(mut self, source_root: impl Into<PathBuf>) -> Self {
        self.source_root = source_root.into();
        self
    }

    /// Set the file reading callback.
    #[must_use]
    pub fn with_read_file<F>(mut self, read_file: F) -> Self
    where
        F: Fn(&Path) -> io::Result<String> + Send + Sync + 'static,
    {
        self.read_file = Some(Box::new(read_file));
        self
    }

    /// Set the highlighter used for code blocks.
    #[must_use]
    pub fn with_highlighter<H: Highlighter + 'static>(mut self, highlighter: H) -> Self {
        self.highlighter = Some(Box::new(highlighter));
        self
    }
}

/// Driver state. Exactly one is active at any point; all are transient and
/// scoped to the current block.
enum Mode {
    Default,
    List {
        items: Vec<String>,
    },
    Multiline {
        name: String,
        arg: Option<String>,
        buffer: Vec<String>,
    },
}

/// Markup-to-HTML compiler for one dialect configuration.
///
/// A single `Compiler` can compile any number of documents; per-document
/// state lives entirely in the [`Context`] passed to [`compile`](Self::compile).
///
/// # Example
///
/// ```
/// use bindery_compiler::{Compiler, Context};
///
/// let compiler = Compiler::new();
/// let mut ctx = Context::new("demo");
/// let fragments = compiler.compile_str("Some `text`.", &mut ctx).unwrap();
/// assert_eq!(fragments, ["<p>Some <var>text</var>.</p>"]);
/// ```
pub struct Compiler {
    registry: Registry,
    source_root: PathBuf,
    read_file: Option<Box<ReadFileFn>>,
    highlighter: Box<dyn Highlighter>,
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Compiler {
    /// Create a compiler with default configuration and built-in directives.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(CompilerConfig::new())
    }

    /// Create a compiler with custom configuration.
    #[must_use]
    pub fn with_config(config: CompilerConfig) -> Self {
        Self {
            registry: Registry::builtin(),
            source_root: config.source_root,
            read_file: config.read_file,
            highlighter: config
                .highlighter
                .unwrap_or_else(|| Box::new(LineSpanHighlighter::new())),
        }
    }

    /// Register an additional directive handler.
    #[must_use]
    pub fn with_handler<D: DirectiveHandler + 'static>(mut self, handler: D) -> Self {
        self.registry.register(Box::new(handler));
        self
    }

    /// Compile a whole document given as a single string.
    ///
    /// Convenience wrapper around [`compile`](Self::compile).
    pub fn compile_str(
        &self,
        text: &str,
        ctx: &mut Context,
    ) -> Result<Vec<String>, CompileError> {
        let lines: Vec<String> = text.lines().map(str::to_owned).collect();
        self.compile(&lines, ctx)
    }

    /// Compile a document's lines into an ordered sequence of HTML fragments.
    ///
    /// Metadata side effects land in `ctx`, which must be fresh per document
    /// but is shared by identity across every handler call of this compile
    /// (including recursive `@sidebar` compiles).
    pub fn compile(
        &self,
        lines: &[String],
        ctx: &mut Context,
    ) -> Result<Vec<String>, CompileError> {
        let mut fragments = Vec::new();
        let mut mode = Mode::Default;
        let mut i = 0;

        while i < lines.len() {
            let raw = &lines[i];
            let trimmed = raw.trim();

            match mode {
                Mode::Multiline {
                    ref name,
                    ref mut buffer,
                    ..
                } => {
                    if is_terminator(trimmed, name) {
                        let Mode::Multiline { name, arg, buffer } =
                            std::mem::replace(&mut mode, Mode::Default)
                        else {
                            unreachable!()
                        };
                        let invocation = Invocation {
                            name,
                            arg,
                            lines: buffer,
                        };
                        self.append(&invocation, ctx, &mut fragments)?;
                    } else {
                        // Captured verbatim, untrimmed
                        buffer.push(raw.clone());
                    }
                    i += 1;
                }

                Mode::List { ref mut items } => {
                    if let LineKind::ListItem(item) = classify(trimmed) {
                        items.push(item.to_owned());
                        i += 1;
                    } else {
                        let Mode::List { items } = std::mem::replace(&mut mode, Mode::Default)
                        else {
                            unreachable!()
                        };
                        let invocation = Invocation {
                            name: "ul".to_owned(),
                            arg: None,
                            lines: items,
                        };
                        self.append(&invocation, ctx, &mut fragments)?;
                        // The terminating line is reprocessed in the default
                        // state: no cursor advance.
                    }
                }

                Mode::Default => {
                    match classify(trimmed) {
                        LineKind::Blank => {}
                        LineKind::ListItem(_) => {
                            // Re-examine this same line as the first item
                            mode = Mode::List { items: Vec::new() };
                            continue;
                        }
                        LineKind::Directive(open) => {
                            if open.multiline {
                                // Fail on unknown names before capturing
                                if !self.registry.contains(&open.name) {
                                    return Err(CompileError::UnknownDirective {
                                        name: open.name,
                                        slug: ctx.slug().to_owned(),
                                    });
                                }
                                mode = Mode::Multiline {
                                    name: open.name,
                                    arg: open.arg.map(str::to_owned),
                                    buffer: Vec::new(),
                                };
                            } else {
                                let invocation = Invocation {
                                    name: open.name,
                                    arg: open.arg.map(str::to_owned),
                                    lines: vec![open.remainder.to_owned()],
                                };
                                self.append(&invocation, ctx, &mut fragments)?;
                            }
                        }
                        LineKind::Text(text) => {
                            let invocation = Invocation {
                                name: "paragraph".to_owned(),
                                arg: None,
                                lines: vec![text.to_owned()],
                            };
                            self.append(&invocation, ctx, &mut fragments)?;
                        }
                    }
                    i += 1;
                }
            }
        }

        // Flush whatever block is still open at end of input
        match mode {
            Mode::Default => {}
            Mode::List { items } => {
                let invocation = Invocation {
                    name: "ul".to_owned(),
                    arg: None,
                    lines: items,
                };
                self.append(&invocation, ctx, &mut fragments)?;
            }
            Mode::Multiline { name, .. } => {
                return Err(CompileError::UnterminatedBlock {
                    name,
                    slug: ctx.slug().to_owned(),
                });
            }
        }

        Ok(fragments)
    }

    /// Dispatch one invocation through the registry.
    pub(crate) fn dispatch(
        &self,
        invocation: &Invocation,
        ctx: &mut Context,
    ) -> Result<Option<String>, CompileError> {
        let handler =
            self.registry
                .get(&invocation.name)
                .ok_or_else(|| CompileError::UnknownDirective {
                    name: invocation.name.clone(),
                    slug: ctx.slug().to_owned(),
                })?;
        handler.handle(ctx, invocation, self)
    }

    fn append(
        &self,
        invocation: &Invocation,
        ctx: &mut Context,
        fragments: &mut Vec<String>,
    ) -> Result<(), CompileError> {
        if let Some(fragment) = self.dispatch(invocation, ctx)? {
            fragments.push(fragment);
        }
        Ok(())
    }

    /// Read an include target, resolved against the source root.
    pub fn include_text(&self, filename: &str) -> io::Result<String> {
        let path = self.source_root.join(filename);
        match &self.read_file {
            Some(read_file) => read_file(&path),
            None => std::fs::read_to_string(&path),
        }
    }

    /// Highlight a code block through the configured capability.
    #[must_use]
    pub fn highlight(&self, code: &str, hint: Option<&str>) -> Highlighted {
        self.highlighter.highlight(code, hint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn compile(text: &str) -> (Vec<String>, Context) {
        let compiler = Compiler::new();
        let mut ctx = Context::new("test-doc");
        let fragments = compiler.compile_str(text, &mut ctx).unwrap();
        (fragments, ctx)
    }

    #[test]
    fn test_blank_lines_produce_nothing() {
        let (fragments, _) = compile("\n\n   \n");
        assert!(fragments.is_empty());
    }

    #[test]
    fn test_paragraphs_in_order() {
        let (fragments, _) = compile("first\n\nsecond");
        assert_eq!(fragments, ["<p>first</p>", "<p>second</p>"]);
    }

    #[test]
    fn test_round_trip_document() {
        let doc = "@metadata\n\
                   title: Hello\n\
                   ...metadata\n\
                   Some text with `code`.\n\
                   * one\n\
                   * two\n\
                   @subhead(greeting) Greeting\n";
        let (fragments, ctx) = compile(doc);
        assert_eq!(
            fragments,
            [
                "<p>Some text with <var>code</var>.</p>",
                "<ul>\n<li>one</li>\n<li>two</li>\n</ul>",
                "<h2 id=\"greeting\">Greeting</h2>",
            ]
        );
        assert_eq!(ctx.get("title"), Some("Hello"));
        assert_eq!(ctx.subheads().len(), 1);
        assert_eq!(ctx.subheads()[0].id, "greeting");
        assert_eq!(ctx.subheads()[0].contents, "Greeting");
    }

    #[test]
    fn test_list_termination_keeps_following_construct() {
        let (fragments, _) = compile("- a\n- b\n@subhead Done");
        assert_eq!(
            fragments,
            [
                "<ul>\n<li>a</li>\n<li>b</li>\n</ul>",
                "<h2 id=\"done\">Done</h2>",
            ]
        );
    }

    #[test]
    fn test_list_flushed_at_end_of_input() {
        let (fragments, _) = compile("* only");
        assert_eq!(fragments, ["<ul>\n<li>only</li>\n</ul>"]);
    }

    #[test]
    fn test_mixed_list_markers() {
        let (fragments, _) = compile("* a\n- b");
        assert_eq!(fragments, ["<ul>\n<li>a</li>\n<li>b</li>\n</ul>"]);
    }

    #[test]
    fn test_multiline_html_verbatim() {
        let (fragments, _) = compile("@html...\n<div>\n  @subhead not parsed\n</div>\n...html");
        assert_eq!(fragments, ["<div>\n  @subhead not parsed\n</div>"]);
    }

    #[test]
    fn test_terminator_name_case_insensitive() {
        let (fragments, _) = compile("@HTML...\n<hr>\n...html");
        assert_eq!(fragments, ["<hr>"]);
    }

    #[test]
    fn test_unterminated_block_is_fatal() {
        let compiler = Compiler::new();
        let mut ctx = Context::new("broken");
        let err = compiler
            .compile_str("@codeblock(js)...\nvar x;\n", &mut ctx)
            .unwrap_err();
        let CompileError::UnterminatedBlock { name, slug } = err else {
            panic!("expected unterminated block, got {err}");
        };
        assert_eq!(name, "codeblock");
        assert_eq!(slug, "broken");
    }

    #[test]
    fn test_unknown_inline_directive() {
        let compiler = Compiler::new();
        let mut ctx = Context::new("broken");
        let err = compiler.compile_str("@bogus text", &mut ctx).unwrap_err();
        let CompileError::UnknownDirective { name, slug } = err else {
            panic!("expected unknown directive, got {err}");
        };
        assert_eq!(name, "bogus");
        assert_eq!(slug, "broken");
    }

    #[test]
    fn test_unknown_multiline_directive_fails_at_opener() {
        let compiler = Compiler::new();
        let mut ctx = Context::new("broken");
        let err = compiler
            .compile_str("@bogus...\ncontent\n...bogus", &mut ctx)
            .unwrap_err();
        assert!(matches!(err, CompileError::UnknownDirective { .. }));
    }

    #[test]
    fn test_codeblock_trims_edges_preserves_interior() {
        let doc = "@codeblock(text)...\n\n  \nfoo\n\nbar\n\n...codeblock";
        let (fragments, _) = compile(doc);
        assert_eq!(
            fragments,
            ["<code class=\"language-text\"><pre>\
              <span class=\"line\">foo\n</span>\
              <span class=\"line\">\n</span>\
              <span class=\"line\">bar\n</span>\
              </pre></code>"]
        );
    }

    #[test]
    fn test_sidebar_shares_context() {
        let doc = "@sidebar...\n\
                   @metadata\n\
                   style: wide\n\
                   ...metadata\n\
                   @subhead(inner) Inner\n\
                   ...sidebar\n\
                   outer paragraph";
        let (fragments, ctx) = compile(doc);
        assert_eq!(
            fragments,
            [
                "<aside class=\"sidebar\">\n<h2 id=\"inner\">Inner</h2>\n</aside>",
                "<p>outer paragraph</p>",
            ]
        );
        // Nested directives mutated the outer document's context
        assert_eq!(ctx.get("style"), Some("wide"));
        assert_eq!(ctx.subheads()[0].id, "inner");
    }

    #[test]
    fn test_include_through_stub_read_file() {
        let config = CompilerConfig::new()
            .with_source_root("/book/src")
            .with_read_file(|path: &Path| {
                assert_eq!(path, Path::new("/book/src/snippet.html"));
                Ok("<b>included</b>".to_owned())
            });
        let compiler = Compiler::with_config(config);
        let mut ctx = Context::new("doc");
        let fragments = compiler
            .compile_str("@include snippet.html", &mut ctx)
            .unwrap();
        assert_eq!(fragments, ["<b>included</b>"]);
    }

    #[test]
    fn test_includecode_composes_codeblock() {
        let config = CompilerConfig::new().with_read_file(|_: &Path| Ok("var x = 1;".to_owned()));
        let compiler = Compiler::with_config(config);
        let mut ctx = Context::new("doc");
        let fragments = compiler
            .compile_str("@includeCode demo.js", &mut ctx)
            .unwrap();
        assert_eq!(fragments.len(), 1);
        assert!(fragments[0].starts_with("<code class=\"language-javascript\"><pre>"));
        assert!(fragments[0].contains("var x = 1;"));
    }

    #[test]
    fn test_compile_is_deterministic() {
        let doc = "@metadata\ntitle: T\n...metadata\npara\n* a\n* b\n@subhead Heading";
        let (first_fragments, first_ctx) = compile(doc);
        let (second_fragments, second_ctx) = compile(doc);
        assert_eq!(first_fragments, second_fragments);
        assert_eq!(first_ctx, second_ctx);
    }
}
