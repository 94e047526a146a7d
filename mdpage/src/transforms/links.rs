//! Intra-site link rewriting on the Markdown syntax tree.
//!
//! Links that point at Markdown files inside the content root are rewritten into routes:
//!
//! | Link                  | Flatten          | StripExtension   |
//! |-----------------------|------------------|------------------|
//! | `guide/install.md`    | `guide/install/` | `guide/install`  |
//! | `docs/readme.md#intro`| `docs/#intro`    | `docs/#intro`    |
//! | `index.md`            | `./`             | `./`             |
//! | `../outside/page.md`  | unchanged when it resolves outside the content root |
//! | `https://x.org/a.md`  | unchanged        | unchanged        |
//!
//! Rewriting is best-effort: any URL that cannot be classified or resolved is left
//! exactly as written.

use crate::common::{absolutize, normalize_lexically};
use comrak::nodes::{AstNode, NodeValue};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::trace;
use url::{ParseError, Url};

static MARKDOWN_ROUTE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?P<index>(?:^|[/\\])(?:readme|index))?\.md$").unwrap());

/// How a Markdown file link becomes a route.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinkPolicy {
    /// `a/readme.md` → `a/`, `b.md` → `b/`
    #[default]
    Flatten,
    /// `a/readme.md` → `a/`, `b.md` → `b`
    StripExtension,
}

/// Rewrites the links of one document.
#[derive(Debug, Clone)]
pub struct LinkRewriter {
    content_root: PathBuf,
    base_dir: PathBuf,
    policy: LinkPolicy,
}

impl LinkRewriter {
    /// `base_dir` is the directory containing the document; relative links resolve against it.
    pub fn new(content_root: &Path, base_dir: &Path, policy: LinkPolicy) -> Self {
        Self {
            content_root: absolutize(content_root),
            base_dir: absolutize(base_dir),
            policy,
        }
    }

    /// Rewrite every link node in place. Returns how many links changed.
    pub fn rewrite_tree<'a>(&self, root: &'a AstNode<'a>) -> usize {
        let mut rewritten = 0;
        for node in root.descendants() {
            let mut data = node.data.borrow_mut();
            if let NodeValue::Link(link) = &mut data.value {
                if let Some(url) = self.rewrite_url(&link.url) {
                    trace!(from = %link.url, to = %url, "rewrote link");
                    link.url = url;
                    rewritten += 1;
                }
            }
        }
        rewritten
    }

    /// The rewritten form of `url`, or `None` when it must be left untouched.
    pub fn rewrite_url(&self, url: &str) -> Option<String> {
        // Only the first fragment survives: `a.md#x#y` keeps `#x`.
        let mut parts = url.split('#');
        let route = parts.next().unwrap_or(url);
        let fragment = parts.next();

        let captures = MARKDOWN_ROUTE_RE.captures(route)?;

        match Url::parse(route) {
            // Anything with a scheme is not a site-relative file.
            Ok(_) => return None,
            Err(ParseError::RelativeUrlWithoutBase) => {}
            Err(_) => return None,
        }

        if !self.is_within_root(route) {
            return None;
        }

        let matched = captures.get(0)?;
        let stem = &route[..matched.start()];
        let mut rewritten = match captures.name("index") {
            Some(index) => {
                let rooted = index.as_str().starts_with(['/', '\\']);
                if stem.is_empty() && !rooted {
                    "./".to_string()
                } else {
                    format!("{stem}/")
                }
            }
            None if stem.is_empty() => return None,
            None => match self.policy {
                LinkPolicy::Flatten => format!("{stem}/"),
                LinkPolicy::StripExtension => stem.to_string(),
            },
        };

        if let Some(fragment) = fragment {
            rewritten.push('#');
            rewritten.push_str(fragment);
        }
        Some(rewritten)
    }

    fn is_within_root(&self, route: &str) -> bool {
        let resolved = normalize_lexically(&self.base_dir.join(route));
        resolved.starts_with(&self.content_root)
    }
}
