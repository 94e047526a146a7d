//! End-to-end transforms of small documents.

use crate::common::{find_all, options, transform};
use insta::assert_snapshot;
use mdpage::tree::{text_content, Node, PropertyValue, CLASS_NAME};
use mdpage::{LinkPolicy, Pipeline, TransformError};
use std::path::Path;

#[test]
fn test_minimal_payload_shape() {
    let payload = transform("# Hello\n", "docs/hello.md");
    assert_snapshot!(
        payload.to_json().unwrap(),
        @r#"{"tree":{"type":"root","children":[{"type":"element","tagName":"h1","properties":{"id":"hello"},"children":[{"type":"text","value":"Hello"}]}]},"assets":{},"page":{"frontmatter":{},"title":"Hello","originalPath":"hello","key":"hello","path":"hello","children":[]},"template":null}"#
    );
}

const LINKS: &str =
    "See [setup](guide/readme.md#setup), [install](guide/install.md) and [elsewhere](../outside/page.md).\n";

fn hrefs(payload: &mdpage::Payload) -> Vec<String> {
    find_all(&payload.tree, "a")
        .iter()
        .filter_map(|a| a.attr("href").map(str::to_string))
        .collect()
}

#[test]
fn test_links_flatten_policy() {
    let payload = transform(LINKS, "docs/index.md");
    assert_eq!(
        hrefs(&payload),
        vec!["guide/#setup", "guide/install/", "../outside/page.md"]
    );
}

#[test]
fn test_links_strip_extension_policy() {
    let pipeline = Pipeline::new(options(LinkPolicy::StripExtension)).unwrap();
    let payload = pipeline.transform(LINKS, Path::new("docs/index.md")).unwrap();
    assert_eq!(
        hrefs(&payload),
        vec!["guide/#setup", "guide/install", "../outside/page.md"]
    );
}

#[test]
fn test_raw_block_wraps_markdown_content() {
    let payload = transform(
        "<details>\n<summary>More</summary>\n\nHidden *text*.\n\n</details>\n",
        "docs/faq.md",
    );
    let root = payload.tree.children();
    assert_eq!(root.len(), 1);

    let details = root[0].as_element().unwrap();
    assert_eq!(details.tag_name, "details");
    let tags: Vec<&str> = details
        .children
        .iter()
        .filter_map(Node::as_element)
        .map(|e| e.tag_name.as_str())
        .collect();
    assert_eq!(tags, vec!["summary", "p"]);
    assert_eq!(text_content(&root[0]), "MoreHidden text.");
}

#[test]
fn test_inline_raw_markup() {
    let payload = transform("Press <kbd>Ctrl</kbd> now.\n", "docs/keys.md");
    let paragraph = payload.tree.children()[0].as_element().unwrap();
    assert_eq!(paragraph.children.len(), 3);
    let kbd = paragraph.children[1].as_element().unwrap();
    assert_eq!(kbd.tag_name, "kbd");
    assert_eq!(kbd.children, vec![Node::text("Ctrl")]);
}

#[test]
fn test_malformed_raw_markup_fails_the_document() {
    let result = Pipeline::new(options(LinkPolicy::Flatten))
        .unwrap()
        .transform("Intro.\n\n<div class=\"oops\n", Path::new("docs/bad.md"));
    assert!(matches!(result, Err(TransformError::RawMarkup { .. })));
}

#[test]
fn test_relative_images_are_collected() {
    let payload = transform(
        "![Diagram](./diagram.png)\n\n![Remote](https://example.com/x.png)\n",
        "docs/pics.md",
    );
    assert_eq!(payload.assets.len(), 1);
    assert_eq!(payload.assets.get("./diagram.png"), Some("./diagram.png"));

    let sources: Vec<_> = find_all(&payload.tree, "img")
        .iter()
        .filter_map(|img| img.attr("src"))
        .collect();
    assert_eq!(sources, vec!["./diagram.png", "https://example.com/x.png"]);
}

#[test]
fn test_frontmatter_title_and_template() {
    let payload = transform(
        "---\ntitle: Custom\ntemplate: ./layout.js\ntags:\n  - a\n---\n\n# Heading\n",
        "docs/guide/page.md",
    );
    assert_eq!(payload.page.title.as_deref(), Some("Custom"));
    assert_eq!(payload.template.as_deref(), Some("docs/guide/layout.js"));
    assert_eq!(payload.page.frontmatter["tags"], serde_json::json!(["a"]));
    assert_eq!(find_all(&payload.tree, "h1")[0].attr("id"), Some("heading"));
}

#[test]
fn test_duplicate_headings() {
    let payload = transform("# Setup\n\n## Setup\n\n### Other\n\n## Setup\n", "docs/a.md");
    let ids: Vec<_> = ["h1", "h2", "h3"]
        .iter()
        .flat_map(|tag| find_all(&payload.tree, tag))
        .filter_map(|h| h.attr("id"))
        .collect();
    assert_eq!(ids, vec!["setup", "setup-1", "setup-2", "other"]);
}

#[test]
fn test_code_block_language() {
    let payload = transform("```rust\nfn main() {}\n```\n", "docs/code.md");
    let code = find_all(&payload.tree, "code")[0];
    assert_eq!(code.attr(CLASS_NAME), Some("language-rust"));
    assert_eq!(code.children, vec![Node::text("fn main() {}\n")]);
}

#[test]
fn test_task_list() {
    let payload = transform("- [x] done\n- [ ] todo\n", "docs/tasks.md");
    let list = find_all(&payload.tree, "ul")[0];
    assert_eq!(list.attr(CLASS_NAME), Some("contains-task-list"));

    let checked: Vec<_> = find_all(&payload.tree, "input")
        .iter()
        .map(|input| input.properties.get("checked").cloned())
        .collect();
    assert_eq!(
        checked,
        vec![
            Some(PropertyValue::Bool(true)),
            Some(PropertyValue::Bool(false))
        ]
    );
    let items = find_all(&payload.tree, "li");
    assert_eq!(items[0].children[1], Node::text(" done"));
}

#[test]
fn test_no_blank_text_survives() {
    let payload = transform(
        "# Title\n\n> quoted\n\n- a\n- b\n\n| A |\n|---|\n| 1 |\n",
        "docs/blocks.md",
    );
    fn check(node: &Node) {
        if let Node::Text(text) = node {
            assert!(!text.value.chars().all(|c| c == '\n' || c == '\r') || text.value.is_empty());
        }
        node.children().iter().for_each(check);
    }
    check(&payload.tree);
}

#[test]
fn test_batch_and_route_tree() {
    let pipeline = Pipeline::new(options(LinkPolicy::Flatten)).unwrap();
    let documents = [
        (Path::new("docs/guide/install.md"), "# Install\n"),
        (Path::new("docs/readme.md"), "# Home\n"),
        (Path::new("docs/guide/readme.md"), "# Guide\n"),
    ];
    let results = pipeline.transform_batch(documents);
    let pages: Vec<_> = results
        .iter()
        .map(|r| &r.result.as_ref().unwrap().page)
        .collect();

    let tree = pipeline.page_tree(pages);
    assert_eq!(tree.root().title.as_deref(), Some("Home"));
    assert_eq!(tree.find("guide").unwrap().title.as_deref(), Some("Guide"));

    let routes = tree.routes(Path::new("docs"));
    assert_snapshot!(
        serde_json::to_string(&routes).unwrap(),
        @r#"{"path":"","template":"docs/readme.md","children":[{"path":"guide","template":"docs/guide/readme.md","children":[{"path":"install","template":"docs/guide/install.md"}]}]}"#
    );
}
