//! Heading anchors and asset collection, fused into one traversal.

use super::assets::AssetMap;
use super::slug::Slugger;
use crate::tree::{text_content, Node};

/// Give every heading a unique `id` and collect the relative image sources.
///
/// Traversal is depth-first in document order, so duplicate headings are numbered in
/// reading order. Existing `id`s are overwritten.
pub fn annotate(root: &mut Node) -> AssetMap {
    let mut slugger = Slugger::new();
    let mut assets = AssetMap::new();
    visit(root, &mut slugger, &mut assets);
    assets
}

fn visit(node: &mut Node, slugger: &mut Slugger, assets: &mut AssetMap) {
    if let Node::Element(element) = node {
        if element.heading_level().is_some() {
            let text: String = element.children.iter().map(text_content).collect();
            element.set_attr("id", slugger.slug(&text));
        } else if element.tag_name == "img" {
            if let Some(src) = element.attr("src") {
                assets.collect(src);
            }
        }
    }
    if let Some(children) = node.children_mut() {
        for child in children {
            visit(child, slugger, assets);
        }
    }
}
