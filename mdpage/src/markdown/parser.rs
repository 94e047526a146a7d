//! Markdown parsing (source text → comrak syntax tree)

use super::extension::{BuiltinExtension, Extension};
use super::registry::ExtensionRegistry;
use crate::error::TransformError;
use comrak::nodes::AstNode;
use comrak::{parse_document, Arena, ComrakOptions};

/// Parser front end with a fixed set of extensions.
pub struct MarkdownParser {
    options: ComrakOptions<'static>,
}

impl MarkdownParser {
    /// Build a parser with the named extensions enabled.
    pub fn new<S: AsRef<str>>(
        extensions: &[S],
        registry: &ExtensionRegistry,
    ) -> Result<Self, TransformError> {
        Ok(Self {
            options: registry.options_for(extensions)?,
        })
    }

    /// Parse a document into the arena. The returned node is the document root.
    pub fn parse<'a>(&self, arena: &'a Arena<AstNode<'a>>, source: &str) -> &'a AstNode<'a> {
        parse_document(arena, source, &self.options)
    }

    pub fn options(&self) -> &ComrakOptions<'static> {
        &self.options
    }
}

impl Default for MarkdownParser {
    fn default() -> Self {
        let mut options = ComrakOptions::default();
        for extension in BuiltinExtension::DEFAULTS {
            extension.apply(&mut options);
        }
        Self { options }
    }
}
