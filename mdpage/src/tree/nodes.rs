//! Core data structures for the element tree.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Property name under which the class list is stored, always as one space-joined string.
pub const CLASS_NAME: &str = "className";

/// Attribute map of an element. Ordering carries no meaning; a sorted map keeps the
/// serialized payload deterministic.
pub type Properties = BTreeMap<String, PropertyValue>;

/// A node of the element tree.
///
/// `Raw` only exists between lowering and the raw-markup pass; a finished tree holds
/// `Root`, `Element` and `Text` nodes. Node types this crate does not know about
/// deserialize to `Unknown` and are dropped by the runtime converter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    Root(Root),
    Element(Element),
    Text(Text),
    /// Verbatim embedded markup, same shape as a text node.
    Raw(Text),
    #[serde(other)]
    Unknown,
}

/// Top-level container whose children are the page body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Root {
    #[serde(default)]
    pub children: Vec<Node>,
}

/// A tagged element with attributes and ordered children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    #[serde(rename = "tagName")]
    pub tag_name: String,
    #[serde(default)]
    pub properties: Properties,
    #[serde(default)]
    pub children: Vec<Node>,
}

/// A string leaf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub value: String,
}

/// Value of a single attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Text(String),
    List(Vec<String>),
    Bool(bool),
    Number(f64),
}

impl PropertyValue {
    /// The value as a string if it is textual; lists are space-joined.
    pub fn joined(&self) -> Option<String> {
        match self {
            PropertyValue::Text(text) => Some(text.clone()),
            PropertyValue::List(items) => Some(items.join(" ")),
            PropertyValue::Bool(_) | PropertyValue::Number(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::Text(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::Text(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Bool(value)
    }
}

impl Node {
    pub fn text(value: impl Into<String>) -> Self {
        Node::Text(Text {
            value: value.into(),
        })
    }

    pub fn raw(value: impl Into<String>) -> Self {
        Node::Raw(Text {
            value: value.into(),
        })
    }

    pub fn root(children: Vec<Node>) -> Self {
        Node::Root(Root { children })
    }

    /// Children of a container node; leaves have none.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Root(root) => &root.children,
            Node::Element(element) => &element.children,
            Node::Text(_) | Node::Raw(_) | Node::Unknown => &[],
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Root(root) => Some(&mut root.children),
            Node::Element(element) => Some(&mut element.children),
            Node::Text(_) | Node::Raw(_) | Node::Unknown => None,
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl Element {
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            properties: Properties::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style attribute setter, see [`Element::set_attr`].
    pub fn with_attr(mut self, name: &str, value: impl Into<PropertyValue>) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    /// Set an attribute. A list assigned to the class attribute is joined on the way in.
    pub fn set_attr(&mut self, name: &str, value: impl Into<PropertyValue>) {
        let value = value.into();
        let value = match (name, value) {
            (CLASS_NAME, PropertyValue::List(items)) => PropertyValue::Text(items.join(" ")),
            (_, value) => value,
        };
        self.properties.insert(name.to_string(), value);
    }

    /// Textual value of an attribute.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.properties.get(name).and_then(PropertyValue::as_str)
    }

    /// Heading depth for `h1`..`h6`.
    pub fn heading_level(&self) -> Option<u8> {
        let digits = self.tag_name.strip_prefix('h')?;
        match digits.parse::<u8>() {
            Ok(level @ 1..=6) if digits.len() == 1 => Some(level),
            _ => None,
        }
    }
}
