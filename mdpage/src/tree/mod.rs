//! Element tree for lowered Markdown documents.
//!
//! This module defines the renderer-agnostic tree that the pipeline produces and the
//! runtime consumes. Its serialized shape is the hast-style JSON used at the build
//! boundary (`type`, `tagName`, `properties`, `children`, `value`).

pub mod nodes;
pub mod text;

pub use nodes::{Element, Node, Properties, PropertyValue, Root, Text, CLASS_NAME};
pub use text::text_content;
