//! The build-boundary artifact.
//!
//! A payload carries everything render time needs for one page, and nothing that
//! requires the Markdown source:
//!
//! ```json
//! {
//!   "tree":     { "type": "root", "children": [...] },
//!   "assets":   { "./diagram.png": "/static/guide/diagram.png" },
//!   "page":     { "frontmatter": {}, "title": "...", "originalPath": "...", "key": "...", "path": "...", "children": [] },
//!   "template": "docs/templates/page.js"
//! }
//! ```

use crate::error::TransformError;
use crate::page::PageData;
use crate::transforms::AssetMap;
use crate::tree::Node;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    pub tree: Node,
    #[serde(default)]
    pub assets: AssetMap,
    pub page: PageData,
    /// Component template rendering this page, if any.
    #[serde(default)]
    pub template: Option<String>,
}

impl Payload {
    pub fn to_json(&self) -> Result<String, TransformError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, TransformError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, TransformError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Element;

    #[test]
    fn test_missing_tree_is_rejected() {
        let result = Payload::from_json(r#"{"assets": {}, "page": {}}"#);
        assert!(matches!(result, Err(TransformError::Serialization(_))));
    }

    #[test]
    fn test_optional_fields_default() {
        let payload =
            Payload::from_json(r#"{"tree": {"type": "root"}, "page": {"key": "a"}}"#).unwrap();
        assert!(payload.assets.is_empty());
        assert_eq!(payload.template, None);
        assert_eq!(payload.page.key, "a");
        assert_eq!(payload.tree, Node::root(vec![]));
    }

    #[test]
    fn test_round_trip_preserves_everything() {
        let mut assets = AssetMap::new();
        assets.insert("./a.png", "/static/a.png");
        let payload = Payload {
            tree: Node::root(vec![Element::new("p")
                .with_attr("className", "lead")
                .with_children(vec![Node::text("Hi")])
                .into()]),
            assets,
            page: PageData::group("a", "a"),
            template: Some("t.js".into()),
        };
        let restored = Payload::from_json(&payload.to_json().unwrap()).unwrap();
        assert_eq!(restored, payload);
    }
}
