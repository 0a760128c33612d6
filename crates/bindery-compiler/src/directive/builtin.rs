//! Built-in directive handlers.

use std::path::Path;

use super::{DirectiveHandler, Invocation};
use crate::compiler::Compiler;
use crate::context::Context;
use crate::error::CompileError;
use crate::inline::format_inline;
use crate::util::heading_id;

/// `@metadata`: each body line is `key: value`, written into the context.
/// Produces no fragment.
pub(crate) struct Metadata;

impl DirectiveHandler for Metadata {
    fn name(&self) -> &'static str {
        "metadata"
    }

    fn handle(
        &self,
        ctx: &mut Context,
        invocation: &Invocation,
        _compiler: &Compiler,
    ) -> Result<Option<String>, CompileError> {
        for line in &invocation.lines {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let Some((key, value)) = line.split_once(':') else {
                return Err(CompileError::MalformedMetadata {
                    line: line.to_owned(),
                    slug: ctx.slug().to_owned(),
                });
            };
            ctx.set(key.trim(), value.trim());
        }
        Ok(None)
    }
}

/// `paragraph`: implicit handler for plain text lines.
pub(crate) struct Paragraph;

impl DirectiveHandler for Paragraph {
    fn name(&self) -> &'static str {
        "paragraph"
    }

    fn handle(
        &self,
        _ctx: &mut Context,
        invocation: &Invocation,
        _compiler: &Compiler,
    ) -> Result<Option<String>, CompileError> {
        Ok(Some(format!(
            "<p>{}</p>",
            format_inline(invocation.content())
        )))
    }
}

/// `@html`: raw passthrough, no escaping or inline formatting.
pub(crate) struct Html;

impl DirectiveHandler for Html {
    fn name(&self) -> &'static str {
        "html"
    }

    fn handle(
        &self,
        _ctx: &mut Context,
        invocation: &Invocation,
        _compiler: &Compiler,
    ) -> Result<Option<String>, CompileError> {
        Ok(Some(invocation.lines.join("\n")))
    }
}

/// `ul`: wraps accumulated list items, applying inline formatting to each.
pub(crate) struct UnorderedList;

impl DirectiveHandler for UnorderedList {
    fn name(&self) -> &'static str {
        "ul"
    }

    fn handle(
        &self,
        _ctx: &mut Context,
        invocation: &Invocation,
        _compiler: &Compiler,
    ) -> Result<Option<String>, CompileError> {
        let items: Vec<String> = invocation
            .lines
            .iter()
            .map(|item| format!("<li>{}</li>", format_inline(item)))
            .collect();
        Ok(Some(format!("<ul>\n{}\n</ul>", items.join("\n"))))
    }
}

/// `@subhead`: level-2 heading with a stable id, recorded in the context.
///
/// The id is the explicit argument when given, otherwise derived from the
/// heading text via [`heading_id`].
pub(crate) struct Subhead;

impl DirectiveHandler for Subhead {
    fn name(&self) -> &'static str {
        "subhead"
    }

    fn handle(
        &self,
        ctx: &mut Context,
        invocation: &Invocation,
        _compiler: &Compiler,
    ) -> Result<Option<String>, CompileError> {
        let text = invocation.text();
        let id = invocation
            .arg
            .clone()
            .unwrap_or_else(|| heading_id(&text));
        ctx.push_subhead(crate::context::Subhead {
            id: id.clone(),
            contents: text.clone(),
        });
        Ok(Some(format!(
            "<h2 id=\"{id}\">{}</h2>",
            format_inline(&text)
        )))
    }
}

/// `@subsubhead`: level-3 heading, no id tracking.
pub(crate) struct Subsubhead;

impl DirectiveHandler for Subsubhead {
    fn name(&self) -> &'static str {
        "subsubhead"
    }

    fn handle(
        &self,
        _ctx: &mut Context,
        invocation: &Invocation,
        _compiler: &Compiler,
    ) -> Result<Option<String>, CompileError> {
        Ok(Some(format!("<h3>{}</h3>", format_inline(&invocation.text()))))
    }
}

/// `@codeblock(lang)`: highlighted code, wrapped and tagged with the language.
///
/// Leading and trailing fully-blank lines are dropped; interior blank lines
/// survive. Zero highlighter confidence logs a diagnostic and keeps going.
pub(crate) struct CodeBlock;

impl DirectiveHandler for CodeBlock {
    fn name(&self) -> &'static str {
        "codeblock"
    }

    fn handle(
        &self,
        ctx: &mut Context,
        invocation: &Invocation,
        compiler: &Compiler,
    ) -> Result<Option<String>, CompileError> {
        let code = trim_blank_edges(&invocation.lines).join("\n");
        let hint = invocation.arg.as_deref();
        let highlighted = compiler.highlight(&code, hint);

        if highlighted.confidence <= 0.0 {
            tracing::warn!(
                slug = ctx.slug(),
                hint = hint.unwrap_or("(none)"),
                "code block language was not recognized"
            );
        }

        let fragment = match &highlighted.language {
            Some(lang) => format!(
                "<code class=\"language-{lang}\"><pre>{}</pre></code>",
                highlighted.markup
            ),
            None => format!("<code><pre>{}</pre></code>", highlighted.markup),
        };
        Ok(Some(fragment))
    }
}

/// `@sidebar`: compiles the captured lines as nested markup, sharing the
/// outer context, and wraps the result in an aside.
pub(crate) struct Sidebar;

impl DirectiveHandler for Sidebar {
    fn name(&self) -> &'static str {
        "sidebar"
    }

    fn handle(
        &self,
        ctx: &mut Context,
        invocation: &Invocation,
        compiler: &Compiler,
    ) -> Result<Option<String>, CompileError> {
        let nested = compiler.compile(&invocation.lines, ctx)?;
        Ok(Some(format!(
            "<aside class=\"sidebar\">\n{}\n</aside>",
            nested.join("\n")
        )))
    }
}

/// `@include`: raw text of a file, resolved against the source root.
///
/// The filename is the argument when given, otherwise the first content line.
pub(crate) struct Include;

impl DirectiveHandler for Include {
    fn name(&self) -> &'static str {
        "include"
    }

    fn handle(
        &self,
        ctx: &mut Context,
        invocation: &Invocation,
        compiler: &Compiler,
    ) -> Result<Option<String>, CompileError> {
        let filename = match invocation.arg.as_deref() {
            Some(arg) => arg.trim(),
            None => invocation.content().trim(),
        };
        let text = read_include(compiler, ctx, filename)?;
        Ok(Some(text))
    }
}

/// `@includecode`: reads a file and feeds it through the `codeblock` handler.
///
/// The language is the argument when given, otherwise the file extension.
pub(crate) struct IncludeCode;

impl DirectiveHandler for IncludeCode {
    fn name(&self) -> &'static str {
        "includecode"
    }

    fn handle(
        &self,
        ctx: &mut Context,
        invocation: &Invocation,
        compiler: &Compiler,
    ) -> Result<Option<String>, CompileError> {
        let filename = invocation.content().trim();
        let lang = invocation.arg.clone().or_else(|| {
            Path::new(filename)
                .extension()
                .and_then(|ext| ext.to_str())
                .map(str::to_owned)
        });
        let text = read_include(compiler, ctx, filename)?;
        let nested = Invocation {
            name: "codeblock".to_owned(),
            arg: lang,
            lines: text.lines().map(str::to_owned).collect(),
        };
        compiler.dispatch(&nested, ctx)
    }
}

fn read_include(
    compiler: &Compiler,
    ctx: &Context,
    filename: &str,
) -> Result<String, CompileError> {
    compiler
        .include_text(filename)
        .map_err(|source| CompileError::Include {
            path: filename.to_owned(),
            slug: ctx.slug().to_owned(),
            source,
        })
}

/// Drop fully-blank lines from both ends of a capture buffer.
fn trim_blank_edges(lines: &[String]) -> &[String] {
    let Some(start) = lines.iter().position(|line| !line.trim().is_empty()) else {
        return &[];
    };
    let end = lines
        .iter()
        .rposition(|line| !line.trim().is_empty())
        .map_or(lines.len(), |last| last + 1);
    &lines[start..end]
}
