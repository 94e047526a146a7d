//! Local image references and their build-time resolution.
//!
//! Collection records every `img` whose `src` starts with `.` under its literal source.
//! Each entry initially maps to itself, which leaves the reference untouched at render
//! time. An [`AssetResolver`] then replaces the entries it can resolve; the rest keep
//! their literal path and surface as broken references in the rendered page.

use crate::common::{absolutize, normalize_lexically, to_forward_slashes};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Literal relative source → resolved path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetMap(BTreeMap<String, String>);

impl AssetMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `src` if it is a relative path. Returns whether it was recorded.
    pub fn collect(&mut self, src: &str) -> bool {
        if !is_relative_asset(src) {
            return false;
        }
        self.0
            .entry(src.to_string())
            .or_insert_with(|| src.to_string());
        true
    }

    /// Resolve every entry with `resolver`. Entries it cannot resolve are left as they are.
    pub fn resolve_with(&mut self, resolver: &dyn AssetResolver, document_dir: &Path) {
        for (literal, resolved) in self.0.iter_mut() {
            match resolver.resolve(literal, document_dir) {
                Some(path) => *resolved = path,
                None => warn!(asset = %literal, "could not resolve asset, keeping literal path"),
            }
        }
    }

    pub fn get(&self, literal: &str) -> Option<&str> {
        self.0.get(literal).map(String::as_str)
    }

    pub fn insert(&mut self, literal: impl Into<String>, resolved: impl Into<String>) {
        self.0.insert(literal.into(), resolved.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

fn is_relative_asset(src: &str) -> bool {
    src.starts_with('.')
}

/// Maps a literal relative asset path to the path it is served from.
pub trait AssetResolver {
    /// `document_dir` is the directory of the document that references the asset.
    fn resolve(&self, literal: &str, document_dir: &Path) -> Option<String>;
}

/// Serves assets from their location under the content root behind a public prefix.
///
/// `./img/a.png` in `docs/guide/page.md` with root `docs` and prefix `/static/`
/// resolves to `/static/guide/img/a.png`.
#[derive(Debug, Clone)]
pub struct PublicPathResolver {
    content_root: PathBuf,
    public_prefix: String,
}

impl PublicPathResolver {
    pub fn new(content_root: &Path, public_prefix: impl Into<String>) -> Self {
        Self {
            content_root: absolutize(content_root),
            public_prefix: public_prefix.into(),
        }
    }
}

impl AssetResolver for PublicPathResolver {
    fn resolve(&self, literal: &str, document_dir: &Path) -> Option<String> {
        let path = literal.split(['?', '#']).next().unwrap_or(literal);
        let resolved = normalize_lexically(&absolutize(document_dir).join(path));
        if !resolved.starts_with(&self.content_root) {
            return None;
        }
        let relative = pathdiff::diff_paths(&resolved, &self.content_root)?;
        if relative.as_os_str().is_empty() {
            return None;
        }

        let mut public = self.public_prefix.clone();
        if !public.is_empty() && !public.ends_with('/') {
            public.push('/');
        }
        public.push_str(&to_forward_slashes(&relative));
        Some(public)
    }
}
