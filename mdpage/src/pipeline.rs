//! Document transformation pipeline
//!
//! Runs every build-time pass over one Markdown document and packs the result into a
//! [`Payload`]:
//!
//!     parse → page metadata → links → lower → raw → annotate → (resolve assets) → prune
//!
//! A [`Pipeline`] is built once per build from [`TransformOptions`] and reused for every
//! document. Each call owns its syntax and element trees; nothing is shared between
//! documents except the read-only configuration.

use crate::common::{normalize_lexically, to_forward_slashes};
use crate::error::TransformError;
use crate::markdown::{
    extract_page_meta, BuiltinExtension, Extension, ExtensionRegistry, MarkdownParser,
};
use crate::page::{PageData, PageLocation, PageTree};
use crate::payload::Payload;
use crate::transforms::{
    annotate, expand_raw, lower_document, prune, AssetResolver, LinkPolicy, LinkRewriter,
    PublicPathResolver,
};
use comrak::Arena;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Settings shared by all documents of a build.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformOptions {
    /// Directory all pages live under. Links resolving outside it are left alone.
    pub content_root: PathBuf,
    /// Leading segment added to every page path.
    pub path_prefix: Option<String>,
    /// Preferred sibling order in the page hierarchy, by page key.
    pub order: Vec<String>,
    pub link_policy: LinkPolicy,
    /// Names of the Markdown extensions to enable.
    pub extensions: Vec<String>,
    /// Template used when a page's frontmatter does not name one.
    pub default_template: Option<String>,
    /// When set, local assets resolve to `public_prefix` + their path under the content root.
    pub public_prefix: Option<String>,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            content_root: PathBuf::from("."),
            path_prefix: None,
            order: Vec::new(),
            link_policy: LinkPolicy::default(),
            extensions: BuiltinExtension::DEFAULTS
                .iter()
                .map(|extension| extension.name().to_string())
                .collect(),
            default_template: None,
            public_prefix: None,
        }
    }
}

/// Outcome of one document in a batch.
#[derive(Debug)]
pub struct DocumentResult {
    pub path: PathBuf,
    pub result: Result<Payload, TransformError>,
}

pub struct Pipeline {
    options: TransformOptions,
    parser: MarkdownParser,
    resolver: Option<Box<dyn AssetResolver>>,
}

impl Pipeline {
    /// Pipeline using the built-in extensions.
    pub fn new(options: TransformOptions) -> Result<Self, TransformError> {
        Self::with_registry(options, &ExtensionRegistry::with_defaults())
    }

    /// Pipeline resolving extension names against `registry`.
    pub fn with_registry(
        options: TransformOptions,
        registry: &ExtensionRegistry,
    ) -> Result<Self, TransformError> {
        let parser = MarkdownParser::new(options.extensions.as_slice(), registry)?;
        let resolver = options.public_prefix.as_ref().map(|prefix| {
            Box::new(PublicPathResolver::new(&options.content_root, prefix.clone()))
                as Box<dyn AssetResolver>
        });
        Ok(Self {
            options,
            parser,
            resolver,
        })
    }

    /// Replace the asset resolver.
    pub fn with_resolver(mut self, resolver: impl AssetResolver + 'static) -> Self {
        self.resolver = Some(Box::new(resolver));
        self
    }

    pub fn options(&self) -> &TransformOptions {
        &self.options
    }

    /// Transform one document. `document` is its path, used for link resolution and
    /// its page location; the file itself is never read.
    pub fn transform(&self, source: &str, document: &Path) -> Result<Payload, TransformError> {
        let document_dir = document.parent().unwrap_or_else(|| Path::new(""));

        let arena = Arena::new();
        let root = self.parser.parse(&arena, source);

        let meta = extract_page_meta(root)?;
        let location = PageLocation::compute(
            &self.options.content_root,
            self.options.path_prefix.as_deref(),
            document,
        )?;
        let template = self.resolve_template(meta.frontmatter.get("template"), document_dir);
        let page = PageData::new(meta, location);
        debug!(document = %document.display(), path = %page.path, "parsed page");

        let rewriter = LinkRewriter::new(
            &self.options.content_root,
            document_dir,
            self.options.link_policy,
        );
        let rewritten = rewriter.rewrite_tree(root);
        debug!(document = %document.display(), rewritten, "rewrote links");

        let mut tree = lower_document(root);
        expand_raw(&mut tree)?;

        let mut assets = annotate(&mut tree);
        if let Some(resolver) = &self.resolver {
            assets.resolve_with(resolver.as_ref(), document_dir);
        }
        debug!(document = %document.display(), assets = assets.len(), "collected assets");

        prune(&mut tree);

        Ok(Payload {
            tree,
            assets,
            page,
            template,
        })
    }

    /// Transform documents independently. A failing document is logged and reported in
    /// its own result; the others are unaffected.
    pub fn transform_batch<'a, I>(&self, documents: I) -> Vec<DocumentResult>
    where
        I: IntoIterator<Item = (&'a Path, &'a str)>,
    {
        documents
            .into_iter()
            .map(|(path, source)| {
                let result = self.transform(source, path);
                if let Err(err) = &result {
                    warn!(document = %path.display(), error = %err, "document failed to transform");
                }
                DocumentResult {
                    path: path.to_path_buf(),
                    result,
                }
            })
            .collect()
    }

    /// Page hierarchy of a set of transformed pages, ordered by the configured order.
    pub fn page_tree<'a>(&self, pages: impl IntoIterator<Item = &'a PageData>) -> PageTree {
        PageTree::build(pages.into_iter().cloned(), &self.options.order)
    }

    fn resolve_template(
        &self,
        requested: Option<&serde_json::Value>,
        document_dir: &Path,
    ) -> Option<String> {
        match requested.and_then(serde_json::Value::as_str) {
            Some(template) => Some(to_forward_slashes(&normalize_lexically(
                &document_dir.join(template),
            ))),
            None => self.options.default_template.clone(),
        }
    }
}
