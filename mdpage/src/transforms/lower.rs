//! Lowering of the comrak syntax tree into the element tree.
//!
//! The mapping follows the usual Markdown → HTML element correspondence:
//!
//! | Markdown            | Element                                   |
//! |---------------------|-------------------------------------------|
//! | Paragraph           | `p` (unwrapped inside tight list items)   |
//! | Heading             | `h1`..`h6`                                |
//! | Block quote         | `blockquote`                              |
//! | List / item         | `ul`/`ol` (`start`) / `li`                |
//! | Task item           | `li.task-list-item` + disabled checkbox   |
//! | Code block          | `pre > code.language-*`                   |
//! | Table               | `table > thead/tbody > tr > th/td[align]` |
//! | Emphasis etc.       | `em`, `strong`, `del`, `sup`, `code`      |
//! | Link / image        | `a[href,title]` / `img[src,alt,title]`    |
//! | Hard break          | `br` followed by a newline text           |
//! | Raw HTML            | `raw` node, expanded by [`super::raw`]    |
//!
//! Block containers separate their children with newline text nodes, and adjacent text
//! (including soft breaks) is merged into a single text node.

use crate::tree::{text_content, Element, Node, PropertyValue, CLASS_NAME};
use comrak::nodes::{AstNode, ListType, NodeList, NodeValue, TableAlignment};

/// Lower a parsed document. Footnote definitions are gathered into a trailing section.
pub fn lower_document<'a>(root: &'a AstNode<'a>) -> Node {
    let mut body = Vec::new();
    let mut footnotes = Vec::new();

    for child in root.children() {
        let is_footnote = matches!(
            child.data.borrow().value,
            NodeValue::FootnoteDefinition(_)
        );
        if is_footnote {
            footnotes.extend(lower_block(child, false));
        } else {
            body.extend(lower_block(child, false));
        }
    }

    if !footnotes.is_empty() {
        let list = Element::new("ol").with_children(wrap(footnotes, true));
        let section = Element::new("section")
            .with_attr(CLASS_NAME, "footnotes")
            .with_children(wrap(vec![list.into()], true));
        body.push(section.into());
    }

    Node::root(wrap(body, false))
}

fn lower_blocks<'a>(node: &'a AstNode<'a>, tight: bool) -> Vec<Node> {
    node.children()
        .flat_map(|child| lower_block(child, tight))
        .collect()
}

fn lower_block<'a>(node: &'a AstNode<'a>, tight: bool) -> Vec<Node> {
    let data = node.data.borrow();
    match &data.value {
        NodeValue::FrontMatter(_) => vec![],
        NodeValue::Paragraph if tight => lower_inlines(node),
        NodeValue::Paragraph => vec![element("p", lower_inlines(node))],
        NodeValue::Heading(heading) => {
            vec![element(&format!("h{}", heading.level), lower_inlines(node))]
        }
        NodeValue::BlockQuote => {
            vec![element("blockquote", wrap(lower_blocks(node, false), true))]
        }
        NodeValue::List(list) => vec![lower_list(node, list)],
        NodeValue::Item(_) => vec![lower_item(node, tight, None)],
        NodeValue::TaskItem(symbol) => vec![lower_item(node, tight, Some(symbol.is_some()))],
        NodeValue::CodeBlock(code) => {
            let mut code_element = Element::new("code");
            if let Some(language) = code.info.split_whitespace().next() {
                code_element.set_attr(CLASS_NAME, format!("language-{language}"));
            }
            let code_element = code_element.with_children(vec![Node::text(code.literal.clone())]);
            vec![element("pre", vec![code_element.into()])]
        }
        NodeValue::HtmlBlock(html) => vec![Node::raw(html.literal.clone())],
        NodeValue::ThematicBreak => vec![Element::new("hr").into()],
        NodeValue::Table(table) => vec![lower_table(node, &table.alignments)],
        NodeValue::DescriptionList => vec![element("dl", wrap(lower_blocks(node, false), true))],
        NodeValue::DescriptionItem(_) => lower_blocks(node, false),
        NodeValue::DescriptionTerm => vec![element("dt", lower_blocks(node, true))],
        NodeValue::DescriptionDetails => {
            vec![element("dd", wrap(lower_blocks(node, false), true))]
        }
        NodeValue::FootnoteDefinition(definition) => {
            let item = Element::new("li")
                .with_attr("id", format!("fn-{}", definition.name))
                .with_children(wrap(lower_blocks(node, false), true));
            vec![item.into()]
        }
        _ => lower_inlines(node),
    }
}

fn lower_list<'a>(node: &'a AstNode<'a>, list: &NodeList) -> Node {
    let mut list_element = match list.list_type {
        ListType::Bullet => Element::new("ul"),
        ListType::Ordered => {
            let mut ordered = Element::new("ol");
            if list.start != 1 {
                ordered.set_attr("start", PropertyValue::Number(list.start as f64));
            }
            ordered
        }
    };

    let has_tasks = node
        .children()
        .any(|item| matches!(item.data.borrow().value, NodeValue::TaskItem(_)));
    if has_tasks {
        list_element.set_attr(CLASS_NAME, "contains-task-list");
    }

    list_element.children = wrap(lower_blocks(node, list.tight), true);
    list_element.into()
}

fn lower_item<'a>(node: &'a AstNode<'a>, tight: bool, task: Option<bool>) -> Node {
    let mut blocks = lower_blocks(node, false);
    let mut item = Element::new("li");

    if let Some(checked) = task {
        item.set_attr(CLASS_NAME, "task-list-item");
        let checkbox: Node = Element::new("input")
            .with_attr("type", "checkbox")
            .with_attr("checked", checked)
            .with_attr("disabled", true)
            .into();

        match blocks.first_mut() {
            Some(Node::Element(paragraph)) if paragraph.tag_name == "p" => {
                let rest = std::mem::take(&mut paragraph.children);
                paragraph.children = prepend_checkbox(checkbox, rest);
            }
            _ => blocks = prepend_checkbox(checkbox, blocks),
        }
    }

    // Tight items drop their paragraph wrappers; separators stay between blocks.
    let ends_with_paragraph = blocks.last().is_some_and(is_paragraph);
    let mut children = Vec::with_capacity(blocks.len() * 2 + 1);
    for (index, block) in blocks.into_iter().enumerate() {
        if !tight || index != 0 || !is_paragraph(&block) {
            children.push(Node::text("\n"));
        }
        match block {
            Node::Element(paragraph) if tight && paragraph.tag_name == "p" => {
                children.extend(paragraph.children)
            }
            other => children.push(other),
        }
    }
    if !children.is_empty() && (!tight || !ends_with_paragraph) {
        children.push(Node::text("\n"));
    }

    item.children = children;
    item.into()
}

fn is_paragraph(node: &Node) -> bool {
    matches!(node, Node::Element(element) if element.tag_name == "p")
}

fn prepend_checkbox(checkbox: Node, rest: Vec<Node>) -> Vec<Node> {
    let spaced = matches!(rest.first(), Some(Node::Text(text)) if text.value.starts_with(' '));
    let mut nodes = vec![checkbox];
    if !spaced {
        push_inline(&mut nodes, Node::text(" "));
    }
    for node in rest {
        push_inline(&mut nodes, node);
    }
    nodes
}

fn lower_table<'a>(node: &'a AstNode<'a>, alignments: &[TableAlignment]) -> Node {
    let mut head = Vec::new();
    let mut body = Vec::new();

    for row in node.children() {
        let header = matches!(row.data.borrow().value, NodeValue::TableRow(true));
        let cells: Vec<Node> = row
            .children()
            .enumerate()
            .map(|(column, cell)| {
                let mut cell_element = Element::new(if header { "th" } else { "td" });
                if let Some(align) = alignments.get(column).and_then(alignment_name) {
                    cell_element.set_attr("align", align);
                }
                cell_element.with_children(lower_inlines(cell)).into()
            })
            .collect();

        let row_element = element("tr", wrap(cells, true));
        if header {
            head.push(row_element);
        } else {
            body.push(row_element);
        }
    }

    let mut sections = vec![element("thead", wrap(head, true))];
    if !body.is_empty() {
        sections.push(element("tbody", wrap(body, true)));
    }
    element("table", wrap(sections, true))
}

fn alignment_name(alignment: &TableAlignment) -> Option<&'static str> {
    match alignment {
        TableAlignment::Left => Some("left"),
        TableAlignment::Center => Some("center"),
        TableAlignment::Right => Some("right"),
        TableAlignment::None => None,
    }
}

fn lower_inlines<'a>(node: &'a AstNode<'a>) -> Vec<Node> {
    let mut nodes = Vec::new();
    for child in node.children() {
        for lowered in lower_inline(child) {
            push_inline(&mut nodes, lowered);
        }
    }
    nodes
}

fn lower_inline<'a>(node: &'a AstNode<'a>) -> Vec<Node> {
    let data = node.data.borrow();
    match &data.value {
        NodeValue::Text(text) => vec![Node::text(text.clone())],
        NodeValue::SoftBreak => vec![Node::text("\n")],
        NodeValue::LineBreak => vec![Element::new("br").into(), Node::text("\n")],
        NodeValue::Code(code) => vec![element("code", vec![Node::text(code.literal.clone())])],
        NodeValue::HtmlInline(html) => vec![Node::raw(html.clone())],
        NodeValue::Emph => vec![element("em", lower_inlines(node))],
        NodeValue::Strong => vec![element("strong", lower_inlines(node))],
        NodeValue::Strikethrough => vec![element("del", lower_inlines(node))],
        NodeValue::Superscript => vec![element("sup", lower_inlines(node))],
        NodeValue::Link(link) => {
            let mut anchor = Element::new("a").with_attr("href", link.url.clone());
            if !link.title.is_empty() {
                anchor.set_attr("title", link.title.clone());
            }
            vec![anchor.with_children(lower_inlines(node)).into()]
        }
        NodeValue::Image(link) => {
            let alt = text_content(&Node::root(lower_inlines(node)));
            let mut image = Element::new("img")
                .with_attr("src", link.url.clone())
                .with_attr("alt", alt);
            if !link.title.is_empty() {
                image.set_attr("title", link.title.clone());
            }
            vec![image.into()]
        }
        NodeValue::FootnoteReference(reference) => {
            let anchor = Element::new("a")
                .with_attr("href", format!("#fn-{}", reference.name))
                .with_attr("id", format!("fnref-{}", reference.name))
                .with_children(vec![Node::text(reference.name.clone())]);
            vec![element("sup", vec![anchor.into()])]
        }
        _ => lower_inlines(node),
    }
}

fn element(tag_name: &str, children: Vec<Node>) -> Node {
    Element::new(tag_name).with_children(children).into()
}

/// Append an inline node, merging it into a preceding text node.
fn push_inline(nodes: &mut Vec<Node>, node: Node) {
    if let (Some(Node::Text(previous)), Node::Text(text)) = (nodes.last_mut(), &node) {
        previous.value.push_str(&text.value);
        return;
    }
    nodes.push(node);
}

/// Interleave block nodes with newline text nodes; loose containers also get them at the edges.
fn wrap(nodes: Vec<Node>, loose: bool) -> Vec<Node> {
    let has_nodes = !nodes.is_empty();
    let mut wrapped = Vec::with_capacity(nodes.len() * 2 + 1);
    if loose {
        wrapped.push(Node::text("\n"));
    }
    for (index, node) in nodes.into_iter().enumerate() {
        if index > 0 {
            wrapped.push(Node::text("\n"));
        }
        wrapped.push(node);
    }
    if loose && has_nodes {
        wrapped.push(Node::text("\n"));
    }
    wrapped
}
