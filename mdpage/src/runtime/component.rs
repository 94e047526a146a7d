//! Component tree handed to the renderer.

use crate::tree::{Properties, PropertyValue};
use serde::Serialize;

/// A renderable value: a string, an element invocation or a keyless group.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Component {
    Text { value: String },
    Element(ElementComponent),
    Fragment { children: Vec<Component> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementComponent {
    pub tag: String,
    pub props: Properties,
    /// Position among its siblings, set only when it has any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<usize>,
    pub children: Vec<Component>,
}

impl Component {
    /// Concatenated text of the subtree.
    pub fn text_content(&self) -> String {
        let mut output = String::new();
        self.collect_text(&mut output);
        output
    }

    fn collect_text(&self, output: &mut String) {
        match self {
            Component::Text { value } => output.push_str(value),
            Component::Element(element) => {
                element.children.iter().for_each(|c| c.collect_text(output))
            }
            Component::Fragment { children } => children.iter().for_each(|c| c.collect_text(output)),
        }
    }
}

/// Builds the host framework's values while the tree is converted.
///
/// The converter only decides *what* to build; a factory decides how a text, an element
/// or a group of siblings is represented.
pub trait ComponentFactory {
    type Output;

    fn text(&self, value: &str) -> Self::Output;

    fn element(
        &self,
        tag: &str,
        props: Properties,
        key: Option<usize>,
        children: Vec<Self::Output>,
    ) -> Self::Output;

    fn fragment(&self, children: Vec<Self::Output>) -> Self::Output;
}

/// Factory producing [`Component`] values.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComponentTree;

impl ComponentFactory for ComponentTree {
    type Output = Component;

    fn text(&self, value: &str) -> Component {
        Component::Text {
            value: value.to_string(),
        }
    }

    fn element(
        &self,
        tag: &str,
        props: Properties,
        key: Option<usize>,
        children: Vec<Component>,
    ) -> Component {
        Component::Element(ElementComponent {
            tag: tag.to_string(),
            props,
            key,
            children,
        })
    }

    fn fragment(&self, children: Vec<Component>) -> Component {
        Component::Fragment { children }
    }
}

impl ElementComponent {
    pub fn prop(&self, name: &str) -> Option<&str> {
        self.props.get(name).and_then(PropertyValue::as_str)
    }
}
