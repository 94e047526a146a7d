//! Site hierarchy built from the pages of one build.

use super::data::PageData;
use super::routes::Route;
use crate::error::TransformError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

/// Nested page records under a synthetic site root (`key` and `path` empty).
///
/// Serialized, this is the page index artifact read back at render time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageTree {
    root: PageData,
}

impl PageTree {
    /// Nest `pages` by the segments of their `path`.
    ///
    /// Missing intermediate directories become group records. Siblings are ordered by
    /// their position in `order` (matched on `key`), unlisted keys last, ties by key.
    pub fn build(pages: impl IntoIterator<Item = PageData>, order: &[String]) -> Self {
        let mut root = PageData::group("", "");

        for page in pages {
            let segments: Vec<&str> = page
                .path
                .split('/')
                .filter(|segment| !segment.is_empty())
                .collect();

            let mut node = &mut root;
            let mut path = String::new();
            for segment in &segments {
                if !path.is_empty() {
                    path.push('/');
                }
                path.push_str(segment);
                let position = match node.children.iter().position(|c| c.key == *segment) {
                    Some(position) => position,
                    None => {
                        node.children.push(PageData::group(*segment, path.clone()));
                        node.children.len() - 1
                    }
                };
                node = &mut node.children[position];
            }

            if !node.is_group() {
                warn!(path = %page.path, "two documents map to the same page, keeping the last");
            }
            let children = std::mem::take(&mut node.children);
            *node = PageData { children, ..page };
        }

        sort_children(&mut root, order);
        Self { root }
    }

    pub fn root(&self) -> &PageData {
        &self.root
    }

    pub fn into_root(self) -> PageData {
        self.root
    }

    /// The record at `path` (`""` is the site root).
    pub fn find(&self, path: &str) -> Option<&PageData> {
        let mut node = &self.root;
        for segment in path.split('/').filter(|segment| !segment.is_empty()) {
            node = node.children.iter().find(|child| child.key == segment)?;
        }
        Some(node)
    }

    /// Route tree for the build integration. Page sources are located under `content_root`.
    pub fn routes(&self, content_root: &Path) -> Route {
        Route::from_page(&self.root, content_root)
    }

    pub fn to_json(&self) -> Result<String, TransformError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, TransformError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl From<PageData> for PageTree {
    fn from(root: PageData) -> Self {
        Self { root }
    }
}

fn sort_children(page: &mut PageData, order: &[String]) {
    let rank = |key: &str| {
        order
            .iter()
            .position(|listed| listed == key)
            .unwrap_or(usize::MAX)
    };
    page.children
        .sort_by(|a, b| rank(&a.key).cmp(&rank(&b.key)).then_with(|| a.key.cmp(&b.key)));
    for child in &mut page.children {
        sort_children(child, order);
    }
}
