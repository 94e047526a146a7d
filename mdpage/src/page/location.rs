//! Where a document lives in the site.

use crate::common::absolutize;
use crate::error::TransformError;
use serde::{Deserialize, Serialize};
use std::path::{Component, Path};

/// File stems that stand for their directory.
const INDEX_STEMS: &[&str] = &["readme", "index"];

/// Route identity of one document.
///
/// For `docs/guide/readme.md` under root `docs` with prefix `v2`:
///
/// | field          | value          |
/// |----------------|----------------|
/// | `originalPath` | `guide/readme` |
/// | `key`          | `guide`        |
/// | `path`         | `v2/guide`     |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageLocation {
    pub original_path: String,
    pub key: String,
    pub path: String,
}

impl PageLocation {
    pub fn compute(
        content_root: &Path,
        path_prefix: Option<&str>,
        document: &Path,
    ) -> Result<Self, TransformError> {
        if document.file_name().is_none() {
            return Err(TransformError::Parse(format!(
                "{} does not name a document",
                document.display()
            )));
        }

        let document = absolutize(document);
        let relative =
            pathdiff::diff_paths(&document, absolutize(content_root)).unwrap_or(document);

        let mut segments: Vec<String> = relative
            .components()
            .filter_map(|component| match component {
                Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
                Component::ParentDir => Some("..".to_string()),
                _ => None,
            })
            .collect();
        if let Some(last) = segments.last_mut() {
            if let Some(stem) = last.strip_suffix(".md") {
                *last = stem.to_string();
            }
        }
        let original_path = segments.join("/");

        let key_path: Vec<&str> = path_prefix
            .filter(|prefix| !prefix.is_empty())
            .into_iter()
            .chain(segments.iter().map(String::as_str))
            .filter(|segment| !is_index_stem(segment))
            .collect();

        Ok(Self {
            original_path,
            key: key_path.last().map(|key| key.to_string()).unwrap_or_default(),
            path: key_path.join("/"),
        })
    }
}

pub(crate) fn is_index_stem(segment: &str) -> bool {
    INDEX_STEMS
        .iter()
        .any(|stem| segment.eq_ignore_ascii_case(stem))
}
