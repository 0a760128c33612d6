//! Directive registry and handler trait.
//!
//! Every block construct in the dialect dispatches through a [`Registry`]
//! mapping a lowercase directive name to a [`DirectiveHandler`]. Handlers
//! receive the shared document [`Context`], the structured [`Invocation`],
//! and the [`Compiler`] itself so they can re-enter the compile loop for
//! nested content (`@sidebar`) or compose other handlers (`@includecode`).
//!
//! A handler returns `Ok(Some(html))` to append a fragment, or `Ok(None)`
//! for a pure side effect on the context (`@metadata`).

mod builtin;

use std::collections::HashMap;

use crate::compiler::Compiler;
use crate::context::Context;
use crate::error::CompileError;

/// A single directive invocation, as captured by the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Directive name, normalized to lowercase.
    pub name: String,
    /// Parenthesized argument from the opener, if any.
    pub arg: Option<String>,
    /// Captured content: the opener's remainder for inline directives, or
    /// the verbatim lines between opener and terminator for multiline ones.
    pub lines: Vec<String>,
}

impl Invocation {
    /// The first content line, or the empty string.
    #[must_use]
    pub fn content(&self) -> &str {
        self.lines.first().map_or("", String::as_str)
    }

    /// All content lines joined with newlines and trimmed.
    #[must_use]
    pub fn text(&self) -> String {
        self.lines.join("\n").trim().to_owned()
    }
}

/// Handler for one directive name.
pub trait DirectiveHandler: Send + Sync {
    /// The lowercase name this handler is registered under.
    fn name(&self) -> &'static str;

    /// Process one invocation.
    ///
    /// Returns `Some(fragment)` to append HTML output, or `None` when the
    /// directive only mutates the context.
    fn handle(
        &self,
        ctx: &mut Context,
        invocation: &Invocation,
        compiler: &Compiler,
    ) -> Result<Option<String>, CompileError>;
}

/// Name-to-handler mapping consulted by the state machine.
pub struct Registry {
    handlers: HashMap<&'static str, Box<dyn DirectiveHandler>>,
}

impl Registry {
    /// Create an empty registry.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Create a registry with all built-in directives registered.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(builtin::Metadata));
        registry.register(Box::new(builtin::Paragraph));
        registry.register(Box::new(builtin::Html));
        registry.register(Box::new(builtin::UnorderedList));
        registry.register(Box::new(builtin::Subhead));
        registry.register(Box::new(builtin::Subsubhead));
        registry.register(Box::new(builtin::CodeBlock));
        registry.register(Box::new(builtin::Sidebar));
        registry.register(Box::new(builtin::Include));
        registry.register(Box::new(builtin::IncludeCode));
        registry
    }

    /// Register a handler under its own name, replacing any existing one.
    pub fn register(&mut self, handler: Box<dyn DirectiveHandler>) {
        self.handlers.insert(handler.name(), handler);
    }

    /// Look up a handler by lowercase name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn DirectiveHandler> {
        self.handlers.get(name).map(|handler| &**handler)
    }

    /// Check whether a handler is registered for `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}
