//! Properties every transformed document must satisfy.

use crate::common::{find_all, transform};
use mdpage::transforms::{annotate, prune, slugify};
use mdpage::tree::{Element, Node};
use proptest::prelude::*;
use std::collections::HashSet;

/// Trees mixing blank text, empty and nested paragraphs.
fn node_strategy() -> impl Strategy<Value = Node> {
    let leaf = prop_oneof![
        "[a-z \n\r]{0,4}".prop_map(|value: String| Node::text(value)),
        Just(Node::text("\n")),
        Just(Node::from(Element::new("p"))),
        Just(Node::from(Element::new("hr"))),
    ];
    leaf.prop_recursive(4, 48, 4, |inner| {
        (
            prop_oneof![Just("p"), Just("div"), Just("li")],
            prop::collection::vec(inner, 0..4),
        )
            .prop_map(|(tag, children)| Node::from(Element::new(tag).with_children(children)))
    })
}

/// Heading texts drawn from a small alphabet so duplicates are common.
fn heading_texts() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-c]{1,2}( [a-c])?", 1..12)
}

proptest! {
    #[test]
    fn prune_is_idempotent(children in prop::collection::vec(node_strategy(), 0..6)) {
        let mut once = Node::root(children);
        prune(&mut once);
        let mut twice = once.clone();
        prune(&mut twice);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn heading_ids_are_unique(texts in heading_texts()) {
        let headings: Vec<Node> = texts
            .iter()
            .map(|text| Node::from(Element::new("h2").with_children(vec![Node::text(text.as_str())])))
            .collect();
        let mut root = Node::root(headings);
        annotate(&mut root);

        let ids: Vec<String> = find_all(&root, "h2")
            .iter()
            .map(|h| h.attr("id").unwrap_or_default().to_string())
            .collect();
        let distinct: HashSet<&String> = ids.iter().collect();
        prop_assert_eq!(distinct.len(), texts.len());

        // The first heading with a given text gets the bare slug.
        let mut seen = HashSet::new();
        for (text, id) in texts.iter().zip(&ids) {
            if seen.insert(text.clone()) {
                prop_assert_eq!(id, &slugify(text));
            }
        }
    }
}

#[test]
fn test_newline_paragraph_prunes_to_empty_root() {
    let mut root = Node::root(vec![Element::new("p")
        .with_children(vec![Node::text("\n")])
        .into()]);
    prune(&mut root);
    assert!(root.children().is_empty());
}

#[test]
fn test_duplicate_headings_in_markdown_get_suffixes_in_order() {
    let payload = transform("## Notes\n\n## Notes\n\n## Notes\n", "docs/notes.md");
    let ids: Vec<_> = find_all(&payload.tree, "h2")
        .iter()
        .filter_map(|h| h.attr("id"))
        .collect();
    assert_eq!(ids, vec!["notes", "notes-1", "notes-2"]);
}

#[test]
fn test_every_relative_image_has_an_asset_entry() {
    let payload = transform(
        "![a](./a.png) ![b](../b.png) ![c](/root.png)\n\n> ![d](./nested/d.svg)\n",
        "docs/guide/images.md",
    );
    for img in find_all(&payload.tree, "img") {
        let src = img.attr("src").unwrap();
        assert_eq!(payload.assets.get(src).is_some(), src.starts_with('.'), "{src}");
    }
    assert_eq!(payload.assets.len(), 3);
}
