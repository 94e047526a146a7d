//! Payload → JSON → payload → components must preserve what the pipeline produced.

use crate::common::transform;
use mdpage::runtime::{convert, Component, ComponentMemo, LoadedPage};
use mdpage::tree::{Node, PropertyValue};
use mdpage::{AssetMap, Payload};
use std::rc::Rc;

const KITCHEN_SINK: &str = r#"---
title: Kitchen sink
---

# Kitchen *sink*

Intro with a [link](other.md), `code` and <kbd>Ctrl</kbd>.

![Diagram](./diagram.png)

- one
- two

| Left | Right |
|:-----|------:|
| a    | b     |

```sh
echo hi
```

<div class="note wide">Raw <b>block</b></div>
"#;

/// Compare a tree node with its component, ignoring positional keys.
fn assert_matches(node: &Node, component: &Component, assets: &AssetMap) {
    match (node, component) {
        (Node::Text(text), Component::Text { value }) => assert_eq!(&text.value, value),
        (Node::Root(root), Component::Fragment { children }) => {
            assert_eq!(root.children.len(), children.len());
            for (node, component) in root.children.iter().zip(children) {
                assert_matches(node, component, assets);
            }
        }
        (Node::Element(element), Component::Element(rendered)) => {
            assert_eq!(element.tag_name, rendered.tag);
            let mut expected = element.properties.clone();
            if element.tag_name == "img" {
                if let Some(resolved) = element.attr("src").and_then(|src| assets.get(src)) {
                    expected.insert("src".into(), PropertyValue::from(resolved));
                }
            }
            assert_eq!(expected, rendered.props);
            assert_eq!(element.children.len(), rendered.children.len());
            for (node, component) in element.children.iter().zip(&rendered.children) {
                assert_matches(node, component, assets);
            }
        }
        (node, component) => panic!("{node:?} does not match {component:?}"),
    }
}

#[test]
fn test_components_match_the_pruned_tree() {
    let payload = transform(KITCHEN_SINK, "docs/sink.md");
    let restored = Payload::from_json(&payload.to_json().unwrap()).unwrap();
    assert_eq!(restored, payload);

    let component = convert(&restored.tree, &restored.assets).unwrap();
    assert_matches(&payload.tree, &component, &payload.assets);
}

#[test]
fn test_resolved_assets_are_substituted() {
    let mut payload = transform(KITCHEN_SINK, "docs/sink.md");
    payload
        .assets
        .insert("./diagram.png", "/static/diagram.8c1f.png");

    let component = convert(&payload.tree, &payload.assets).unwrap();
    assert_matches(&payload.tree, &component, &payload.assets);

    fn sources(component: &Component, found: &mut Vec<String>) {
        match component {
            Component::Element(element) => {
                if element.tag == "img" {
                    found.extend(element.prop("src").map(str::to_string));
                }
                element.children.iter().for_each(|c| sources(c, found));
            }
            Component::Fragment { children } => children.iter().for_each(|c| sources(c, found)),
            Component::Text { .. } => {}
        }
    }
    let mut found = Vec::new();
    sources(&component, &mut found);
    assert_eq!(found, vec!["/static/diagram.8c1f.png"]);
}

#[test]
fn test_text_content_survives() {
    let payload = transform(KITCHEN_SINK, "docs/sink.md");
    let component = convert(&payload.tree, &payload.assets).unwrap();
    assert_eq!(
        component.text_content(),
        mdpage::tree::text_content(&payload.tree)
    );
    assert!(component.text_content().contains("Raw block"));
}

#[test]
fn test_memoized_render_of_a_loaded_payload() {
    let loaded = LoadedPage::from(transform(KITCHEN_SINK, "docs/sink.md"));
    let mut memo = ComponentMemo::new();
    let first = memo.get_or_convert(&loaded.tree, &loaded.assets);
    let again = memo.get_or_convert(&loaded.tree, &loaded.assets);
    assert!(Rc::ptr_eq(&first, &again));
    assert_eq!(loaded.page.title.as_deref(), Some("Kitchen sink"));
}
