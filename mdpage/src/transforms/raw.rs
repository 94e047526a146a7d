//! Expansion of raw markup fragments into elements.
//!
//! Every `raw` node left by lowering is tokenized and replaced in place:
//!
//! - a fragment holding a lone opening tag (`<kbd>`, `<details open>`) opens an element
//!   that adopts the following siblings until a matching lone closing tag (`</kbd>`)
//!   or the end of the parent;
//! - a lone closing tag with nothing open is dropped;
//! - anything else is parsed as an HTML fragment and its nodes are spliced in. Elements
//!   the fragment leaves unclosed (`<details><summary>More</summary>`) stay open and
//!   adopt the following siblings like a lone opening tag.
//!
//! Comments, doctypes and processing instructions produce no nodes. A fragment the
//! tokenizer rejects is a hard error for the document.
//!
//! # Library Choice
//!
//! `html5ever` does the tokenizing and tree building, with `markup5ever_rcdom` as the
//! DOM. The tokenizer runs on its own first because only its diagnostics say whether
//! the markup is syntactically broken; tree-construction complaints (unbalanced tags)
//! are expected when Markdown splits HTML across fragments.

use crate::error::TransformError;
use crate::tree::{Element, Node, CLASS_NAME};
use html5ever::tendril::{StrTendril, TendrilSink};
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, Tag, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};
use html5ever::{parse_document, Attribute, ParseOpts};
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use std::cell::RefCell;

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Replace every raw node in the tree with the elements it describes.
pub fn expand_raw(node: &mut Node) -> Result<(), TransformError> {
    if let Some(children) = node.children_mut() {
        let expanded = expand_children(std::mem::take(children))?;
        *children = expanded;
    }
    Ok(())
}

fn expand_children(children: Vec<Node>) -> Result<Vec<Node>, TransformError> {
    let mut open: Vec<Element> = Vec::new();
    let mut expanded = Vec::with_capacity(children.len());

    for child in children {
        match child {
            Node::Raw(raw) => match classify(&raw.value)? {
                Fragment::Open(element) => open.push(element),
                Fragment::Close(name) => {
                    if let Some(position) = open.iter().rposition(|e| e.tag_name == name) {
                        close_from(&mut open, &mut expanded, position);
                    }
                }
                Fragment::Nodes { nodes, unclosed } => {
                    for node in nodes {
                        append(&mut open, &mut expanded, node);
                    }
                    open.extend(unclosed);
                }
            },
            mut other => {
                expand_raw(&mut other)?;
                append(&mut open, &mut expanded, other);
            }
        }
    }

    close_from(&mut open, &mut expanded, 0);
    Ok(expanded)
}

fn append(open: &mut [Element], expanded: &mut Vec<Node>, node: Node) {
    match open.last_mut() {
        Some(parent) => parent.children.push(node),
        None => expanded.push(node),
    }
}

/// Close `open[position..]`, innermost first.
fn close_from(open: &mut Vec<Element>, expanded: &mut Vec<Node>, position: usize) {
    let mut closing = open.split_off(position);
    while let Some(element) = closing.pop() {
        match closing.last_mut() {
            Some(parent) => parent.children.push(element.into()),
            None => append(open, expanded, element.into()),
        }
    }
}

enum Fragment {
    Open(Element),
    Close(String),
    /// Complete nodes, then the chain of elements left open (outermost first).
    Nodes {
        nodes: Vec<Node>,
        unclosed: Vec<Element>,
    },
}

impl Fragment {
    fn nodes(nodes: Vec<Node>) -> Self {
        Fragment::Nodes {
            nodes,
            unclosed: Vec::new(),
        }
    }
}

fn classify(fragment: &str) -> Result<Fragment, TransformError> {
    let scan = scan_fragment(fragment);
    if let Some(reason) = scan.errors.into_iter().next() {
        return Err(TransformError::RawMarkup {
            fragment: fragment.to_string(),
            reason,
        });
    }

    let fragment_kind = match scan.significant.as_slice() {
        [] => Fragment::nodes(vec![]),
        [Significant::Tag(tag)] if tag.kind == TagKind::EndTag => {
            Fragment::Close(tag.name.to_string())
        }
        [Significant::Tag(tag)] => {
            let element = element_from_tag(tag);
            if tag.self_closing || VOID_ELEMENTS.contains(&element.tag_name.as_str()) {
                Fragment::nodes(vec![element.into()])
            } else {
                Fragment::Open(element)
            }
        }
        _ => {
            let mut nodes = parse_fragment(fragment);
            let unclosed = split_unclosed(&mut nodes, scan.unclosed.len());
            Fragment::Nodes { nodes, unclosed }
        }
    };
    Ok(fragment_kind)
}

/// Detach the `depth` innermost open elements from the end of `nodes`, following the
/// last element child downwards.
fn split_unclosed(nodes: &mut Vec<Node>, depth: usize) -> Vec<Element> {
    let mut chain = Vec::new();
    if depth == 0 || !matches!(nodes.last(), Some(Node::Element(_))) {
        return chain;
    }
    let Some(Node::Element(mut current)) = nodes.pop() else {
        return chain;
    };
    while chain.len() + 1 < depth && matches!(current.children.last(), Some(Node::Element(_))) {
        let Some(Node::Element(inner)) = current.children.pop() else {
            break;
        };
        chain.push(std::mem::replace(&mut current, inner));
    }
    chain.push(current);
    chain
}

fn element_from_tag(tag: &Tag) -> Element {
    let mut element = Element::new(tag.name.to_string());
    set_attributes(&mut element, &tag.attrs);
    element
}

fn set_attributes(element: &mut Element, attributes: &[Attribute]) {
    for attribute in attributes {
        element.set_attr(
            &property_name(&attribute.name.local),
            attribute.value.to_string(),
        );
    }
}

/// Property names follow the component convention for the two reserved words.
fn property_name(attribute: &str) -> String {
    match attribute {
        "class" => CLASS_NAME.to_string(),
        "for" => "htmlFor".to_string(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tokenizer scan
// ---------------------------------------------------------------------------

enum Significant {
    Tag(Tag),
    Other,
}

#[derive(Default)]
struct FragmentScan {
    errors: Vec<String>,
    significant: Vec<Significant>,
    /// Names of the start tags not closed within the fragment.
    unclosed: Vec<String>,
}

impl FragmentScan {
    fn track(&mut self, tag: &Tag) {
        let name = tag.name.to_string();
        match tag.kind {
            TagKind::StartTag if !tag.self_closing && !VOID_ELEMENTS.contains(&name.as_str()) => {
                self.unclosed.push(name)
            }
            TagKind::StartTag => {}
            TagKind::EndTag => {
                if let Some(position) = self.unclosed.iter().rposition(|open| *open == name) {
                    self.unclosed.truncate(position);
                }
            }
        }
    }
}

#[derive(Default)]
struct ScanSink {
    scan: RefCell<FragmentScan>,
}

impl TokenSink for ScanSink {
    type Handle = ();

    fn process_token(&self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        let mut scan = self.scan.borrow_mut();
        match token {
            Token::ParseError(reason) => scan.errors.push(reason.into_owned()),
            Token::TagToken(tag) => {
                // Mirror the tree builder's content-model switches so element bodies
                // like `<script>if (a < b)</script>` are not read as markup.
                let next = match (tag.kind, &*tag.name) {
                    (TagKind::StartTag, "script") => TokenSinkResult::RawData(RawKind::ScriptData),
                    (TagKind::StartTag, "style" | "xmp" | "iframe" | "noembed" | "noframes") => {
                        TokenSinkResult::RawData(RawKind::Rawtext)
                    }
                    (TagKind::StartTag, "textarea" | "title") => {
                        TokenSinkResult::RawData(RawKind::Rcdata)
                    }
                    (TagKind::StartTag, "plaintext") => TokenSinkResult::Plaintext,
                    _ => TokenSinkResult::Continue,
                };
                scan.track(&tag);
                scan.significant.push(Significant::Tag(tag));
                return next;
            }
            Token::CharacterTokens(text) => {
                if !text.chars().all(char::is_whitespace) {
                    scan.significant.push(Significant::Other);
                }
            }
            Token::CommentToken(_) | Token::DoctypeToken(_) | Token::NullCharacterToken => {
                scan.significant.push(Significant::Other)
            }
            Token::EOFToken => {}
        }
        TokenSinkResult::Continue
    }
}

fn scan_fragment(fragment: &str) -> FragmentScan {
    let tokenizer = Tokenizer::new(ScanSink::default(), TokenizerOpts::default());
    let input = BufferQueue::default();
    input.push_back(StrTendril::from_slice(fragment));
    let _ = tokenizer.feed(&input);
    tokenizer.end();
    tokenizer.sink.scan.take()
}

// ---------------------------------------------------------------------------
// Tree building
// ---------------------------------------------------------------------------

/// Parse a fragment and return the nodes the parser placed in `<head>` and `<body>`.
fn parse_fragment(fragment: &str) -> Vec<Node> {
    let dom = parse_document(RcDom::default(), ParseOpts::default()).one(fragment);

    let mut nodes = Vec::new();
    for html in dom.document.children.borrow().iter() {
        if !is_element(html, "html") {
            continue;
        }
        for section in html.children.borrow().iter() {
            if is_element(section, "head") || is_element(section, "body") {
                nodes.extend(section.children.borrow().iter().filter_map(convert_handle));
            }
        }
    }
    nodes
}

fn is_element(handle: &Handle, local_name: &str) -> bool {
    matches!(&handle.data, NodeData::Element { name, .. } if &*name.local == local_name)
}

fn convert_handle(handle: &Handle) -> Option<Node> {
    match &handle.data {
        NodeData::Text { contents } => Some(Node::text(contents.borrow().to_string())),
        NodeData::Element { name, attrs, .. } => {
            let mut element = Element::new(name.local.to_string());
            set_attributes(&mut element, &attrs.borrow());
            element.children = handle
                .children
                .borrow()
                .iter()
                .filter_map(convert_handle)
                .collect();
            Some(element.into())
        }
        _ => None,
    }
}
