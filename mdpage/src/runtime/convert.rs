//! Element tree → component tree.

use super::component::{Component, ComponentFactory, ComponentTree};
use crate::transforms::AssetMap;
use crate::tree::{Element, Node, PropertyValue, CLASS_NAME};

/// Convert a tree into [`Component`] values.
///
/// Returns `None` for node types that have no rendering (`raw`, unknown types).
pub fn convert(node: &Node, assets: &AssetMap) -> Option<Component> {
    convert_with(&ComponentTree, node, assets)
}

/// Convert a tree with a custom factory.
///
/// - text → its string
/// - root → a fragment of its converted children
/// - element → an element built from a copy of its properties, with a positional `key`
///   when it has siblings; `img` sources found in `assets` are replaced by their
///   resolved path
///
/// Children that do not convert are dropped.
pub fn convert_with<F: ComponentFactory>(
    factory: &F,
    node: &Node,
    assets: &AssetMap,
) -> Option<F::Output> {
    convert_node(factory, node, assets, None)
}

fn convert_node<F: ComponentFactory>(
    factory: &F,
    node: &Node,
    assets: &AssetMap,
    key: Option<usize>,
) -> Option<F::Output> {
    match node {
        Node::Text(text) => Some(factory.text(&text.value)),
        Node::Root(root) => Some(factory.fragment(convert_children(
            factory,
            &root.children,
            assets,
        ))),
        Node::Element(element) => Some(factory.element(
            &element.tag_name,
            props_for(element, assets),
            key,
            convert_children(factory, &element.children, assets),
        )),
        Node::Raw(_) | Node::Unknown => None,
    }
}

fn convert_children<F: ComponentFactory>(
    factory: &F,
    children: &[Node],
    assets: &AssetMap,
) -> Vec<F::Output> {
    let keyed = children.len() > 1;
    children
        .iter()
        .enumerate()
        .filter_map(|(index, child)| {
            convert_node(factory, child, assets, keyed.then_some(index))
        })
        .collect()
}

fn props_for(element: &Element, assets: &AssetMap) -> crate::tree::Properties {
    let mut props = element.properties.clone();

    if let Some(PropertyValue::List(classes)) = props.get(CLASS_NAME) {
        let joined = classes.join(" ");
        props.insert(CLASS_NAME.to_string(), PropertyValue::Text(joined));
    }

    if element.tag_name == "img" {
        let resolved = element
            .attr("src")
            .and_then(|src| assets.get(src))
            .map(str::to_string);
        if let Some(resolved) = resolved {
            props.insert("src".to_string(), PropertyValue::Text(resolved));
        }
    }

    props
}
