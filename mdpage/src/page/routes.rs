//! Route tree handed to the site build.

use super::data::PageData;
use crate::common::to_forward_slashes;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One route: its path segment, the Markdown source that renders it and its sub-routes.
///
/// Group records produce routes without a `template`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Route>>,
}

impl Route {
    pub fn from_page(page: &PageData, content_root: &Path) -> Self {
        let children: Vec<Route> = page
            .children
            .iter()
            .map(|child| Route::from_page(child, content_root))
            .collect();

        Self {
            path: page.key.clone(),
            template: page.original_path.as_ref().map(|original| {
                to_forward_slashes(&content_root.join(format!("{original}.md")))
            }),
            children: (!children.is_empty()).then_some(children),
        }
    }
}
