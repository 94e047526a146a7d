use super::nodes::Node;

/// Concatenate every descendant text value, depth-first and in document order.
pub fn text_content(node: &Node) -> String {
    let mut output = String::new();
    collect_text(node, &mut output);
    output
}

fn collect_text(node: &Node, output: &mut String) {
    match node {
        Node::Text(text) => output.push_str(&text.value),
        _ => {
            for child in node.children() {
                collect_text(child, output);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Element;

    #[test]
    fn flattens_nested_text_in_order() {
        let heading: Node = Element::new("h2")
            .with_children(vec![
                Node::text("Hello "),
                Element::new("em")
                    .with_children(vec![Node::text("big")])
                    .into(),
                Node::text(" world"),
            ])
            .into();
        assert_eq!(text_content(&heading), "Hello big world");
    }

    #[test]
    fn raw_values_are_not_text() {
        let node = Node::root(vec![Node::raw("<b>x</b>"), Node::text("y")]);
        assert_eq!(text_content(&node), "y");
    }
}
