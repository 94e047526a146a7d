//! Shared helpers for the integration tests.

use mdpage::tree::{Element, Node};
use mdpage::{LinkPolicy, Payload, Pipeline, TransformOptions};
use std::path::{Path, PathBuf};

pub fn options(policy: LinkPolicy) -> TransformOptions {
    TransformOptions {
        content_root: PathBuf::from("docs"),
        link_policy: policy,
        ..TransformOptions::default()
    }
}

/// Transform `source` as if it were the file at `path`, content root `docs`.
pub fn transform(source: &str, path: &str) -> Payload {
    Pipeline::new(options(LinkPolicy::Flatten))
        .unwrap()
        .transform(source, Path::new(path))
        .unwrap()
}

/// Every element with `tag`, in document order.
pub fn find_all<'a>(node: &'a Node, tag: &str) -> Vec<&'a Element> {
    let mut found = Vec::new();
    collect(node, tag, &mut found);
    found
}

fn collect<'a>(node: &'a Node, tag: &str, found: &mut Vec<&'a Element>) {
    if let Node::Element(element) = node {
        if element.tag_name == tag {
            found.push(element);
        }
    }
    for child in node.children() {
        collect(child, tag, found);
    }
}
