//! Line-oriented block-markup to HTML compiler.
//!
//! Compiles the bindery dialect (directive lines like `@name(arg)...`, lists,
//! multiline captures, and plain paragraphs) into an ordered sequence of
//! HTML fragments plus per-document metadata.
//!
//! # Architecture
//!
//! - [`Compiler`]: the state machine driver; walks lines, buffers list items
//!   and multiline captures, and dispatches block boundaries.
//! - [`Registry`] / [`DirectiveHandler`]: pluggable name-to-handler mapping
//!   for every directive, including the implicit `paragraph` handler.
//! - [`Context`]: mutable per-document record shared by identity across all
//!   handler calls of one compile, including recursive `@sidebar` compiles.
//!
//! # Example
//!
//! ```
//! use bindery_compiler::{Compiler, Context};
//!
//! let source = "\
//! @metadata
//! title: Hello
//! ...metadata
//! Some text with `code`.
//! @subhead(greeting) Greeting";
//!
//! let compiler = Compiler::new();
//! let mut ctx = Context::new("hello");
//! let fragments = compiler.compile_str(source, &mut ctx)?;
//!
//! assert_eq!(fragments.len(), 2);
//! assert_eq!(ctx.get("title"), Some("Hello"));
//! assert_eq!(ctx.subheads()[0].id, "greeting");
//! # Ok::<(), bindery_compiler::CompileError>(())
//! ```

mod compiler;
mod context;
pub mod directive;
mod error;
mod inline;
mod line;
mod util;

pub use compiler::{Compiler, CompilerConfig, ReadFileFn};
pub use context::{Context, Subhead};
pub use directive::{DirectiveHandler, Invocation, Registry};
pub use error::CompileError;
pub use inline::{escape_html, format_inline};
pub use util::heading_id;
