//! Per-document page record.

use super::location::PageLocation;
use crate::markdown::PageMeta;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Metadata of one page, as embedded in payloads and in the page index.
///
/// `children` is only filled in by [`super::PageTree`]; a freshly transformed page has
/// none. Group nodes of the hierarchy (directories without a page of their own) have no
/// `originalPath`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageData {
    #[serde(default)]
    pub frontmatter: Map<String, Value>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_path: Option<String>,
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub children: Vec<PageData>,
}

impl PageData {
    pub fn new(meta: PageMeta, location: PageLocation) -> Self {
        Self {
            frontmatter: meta.frontmatter,
            title: meta.title,
            original_path: Some(location.original_path),
            key: location.key,
            path: location.path,
            children: Vec::new(),
        }
    }

    /// Placeholder for a directory that has no page of its own.
    pub fn group(key: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn is_group(&self) -> bool {
        self.original_path.is_none()
    }

    /// A string frontmatter field.
    pub fn frontmatter_str(&self, field: &str) -> Option<&str> {
        self.frontmatter.get(field).and_then(Value::as_str)
    }
}
