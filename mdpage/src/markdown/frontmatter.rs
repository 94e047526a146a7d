//! Page metadata extraction (frontmatter + title) from a parsed document.

use crate::error::TransformError;
use comrak::nodes::{AstNode, NodeValue};
use serde_json::{Map, Value};

/// Metadata read straight out of the syntax tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageMeta {
    pub frontmatter: Map<String, Value>,
    pub title: Option<String>,
}

/// Read the frontmatter block and the page title.
///
/// The title is the frontmatter `title` when it is a string, else the text of the first
/// level-1 heading.
pub fn extract_page_meta<'a>(root: &'a AstNode<'a>) -> Result<PageMeta, TransformError> {
    let mut frontmatter = Map::new();
    let mut first_heading: Option<String> = None;

    for node in root.children() {
        match &node.data.borrow().value {
            NodeValue::FrontMatter(block) => frontmatter = parse_frontmatter(block)?,
            NodeValue::Heading(heading) if heading.level == 1 && first_heading.is_none() => {
                let mut text = String::new();
                for child in node.children() {
                    collect_text_content(child, &mut text);
                }
                first_heading = Some(text.trim().to_string());
            }
            _ => {}
        }
    }

    let title = match frontmatter.get("title") {
        Some(Value::String(title)) => Some(title.clone()),
        _ => first_heading,
    };

    Ok(PageMeta { frontmatter, title })
}

/// Parse the YAML body of a `---` delimited block into a JSON-compatible map.
fn parse_frontmatter(block: &str) -> Result<Map<String, Value>, TransformError> {
    let yaml = block
        .trim()
        .trim_start_matches("---")
        .trim_end_matches("---")
        .trim();

    if yaml.is_empty() {
        return Ok(Map::new());
    }

    let value: Value =
        serde_yaml::from_str(yaml).map_err(|e| TransformError::Frontmatter(e.to_string()))?;

    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        other => Err(TransformError::Frontmatter(format!(
            "expected a key/value mapping, found {other}"
        ))),
    }
}

fn collect_text_content<'a>(node: &'a AstNode<'a>, output: &mut String) {
    match &node.data.borrow().value {
        NodeValue::Text(text) => output.push_str(text),
        NodeValue::Code(code) => output.push_str(&code.literal),
        NodeValue::SoftBreak | NodeValue::LineBreak => output.push(' '),
        _ => {
            for child in node.children() {
                collect_text_content(child, output);
            }
        }
    }
}
