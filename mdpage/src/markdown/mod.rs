//! Markdown front end
//!
//! Parsing itself is delegated to `comrak`; this module only decides which of its
//! extensions are active and pulls page metadata (frontmatter, title) out of the tree.
//!
//! # Library Choice
//!
//! `comrak` gives us a mutable, arena-allocated CommonMark AST with a frontmatter
//! extension, which is what the link rewriter needs: it edits link nodes in place
//! before the tree is lowered.
//!
//! # Extensions
//!
//! Extensions are named plugins held in an [`ExtensionRegistry`]. A document transform
//! asks for a list of names; unknown names are an error rather than being ignored.

pub mod extension;
pub mod frontmatter;
pub mod parser;
pub mod registry;

pub use extension::{BuiltinExtension, Extension};
pub use frontmatter::{extract_page_meta, PageMeta};
pub use parser::MarkdownParser;
pub use registry::ExtensionRegistry;
