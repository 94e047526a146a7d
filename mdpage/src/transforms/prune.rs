//! Removal of line-break-only text nodes and empty paragraphs.

use crate::tree::Node;

/// Prune the tree in place. Running it again on its own output changes nothing.
pub fn prune(node: &mut Node) {
    remove_blank_lines(node);
    remove_empty_paragraphs(node);
}

fn is_blank_line(node: &Node) -> bool {
    matches!(node, Node::Text(text)
        if !text.value.is_empty() && text.value.chars().all(|c| c == '\n' || c == '\r'))
}

fn is_empty_paragraph(node: &Node) -> bool {
    matches!(node, Node::Element(element) if element.tag_name == "p" && element.children.is_empty())
}

fn remove_blank_lines(node: &mut Node) {
    if let Some(children) = node.children_mut() {
        children.retain(|child| !is_blank_line(child));
        children.iter_mut().for_each(remove_blank_lines);
    }
}

/// Post-order, so a paragraph emptied by removing its own empty paragraphs goes too.
fn remove_empty_paragraphs(node: &mut Node) {
    if let Some(children) = node.children_mut() {
        children.iter_mut().for_each(remove_empty_paragraphs);
        children.retain(|child| !is_empty_paragraph(child));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Element;

    fn paragraph(children: Vec<Node>) -> Node {
        Element::new("p").with_children(children).into()
    }

    #[test]
    fn test_newline_only_paragraph_disappears() {
        let mut root = Node::root(vec![paragraph(vec![Node::text("\n")])]);
        prune(&mut root);
        assert!(root.children().is_empty());
    }

    #[test]
    fn test_blank_lines_are_removed_everywhere() {
        let mut root = Node::root(vec![
            Node::text("\r\n"),
            Element::new("ul")
                .with_children(vec![
                    Node::text("\n"),
                    Element::new("li")
                        .with_children(vec![Node::text("a")])
                        .into(),
                    Node::text("\n"),
                ])
                .into(),
        ]);
        prune(&mut root);
        let list = root.children()[0].as_element().unwrap();
        assert_eq!(list.children.len(), 1);
    }

    #[test]
    fn test_text_with_content_is_kept() {
        let mut root = Node::root(vec![
            Node::text(" \n"),
            Node::text("a\n"),
            Node::text(""),
        ]);
        prune(&mut root);
        assert_eq!(root.children().len(), 3);
    }

    #[test]
    fn test_nested_empty_paragraphs_collapse() {
        let mut root = Node::root(vec![
            paragraph(vec![paragraph(vec![Node::text("\n")])]),
            paragraph(vec![Node::text("kept")]),
        ]);
        prune(&mut root);
        assert_eq!(root.children(), &[paragraph(vec![Node::text("kept")])]);
    }

    #[test]
    fn test_other_empty_elements_are_kept() {
        let mut root = Node::root(vec![Element::new("hr").into(), Element::new("div").into()]);
        prune(&mut root);
        assert_eq!(root.children().len(), 2);
    }
}
