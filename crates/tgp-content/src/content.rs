use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::node::HtmlElement;
use crate::tag::{ALLOWED_ATTRIBUTES, Tag};

/// A Telegraph content node: either a bare string or a tagged element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentNode {
    Text(String),
    Element(NodeElement),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeElement {
    pub tag: Tag,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attrs: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<ContentNode>>,
}

impl NodeElement {
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            attrs: None,
            children: None,
        }
    }

    pub fn with_children(tag: Tag, children: Vec<ContentNode>) -> Self {
        let mut node = Self::new(tag);
        node.set_children(children);
        node
    }

    /// Stores `children`, leaving the field absent when there are none.
    pub fn set_children(&mut self, children: Vec<ContentNode>) {
        self.children = if children.is_empty() {
            None
        } else {
            Some(children)
        };
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.as_ref()?.get(name).map(String::as_str)
    }
}

impl ContentNode {
    pub fn strong(text: impl Into<String>) -> Self {
        ContentNode::Element(NodeElement::with_children(
            Tag::Strong,
            vec![ContentNode::Text(text.into())],
        ))
    }

    pub fn is_text(&self) -> bool {
        matches!(self, ContentNode::Text(_))
    }
}

impl From<String> for ContentNode {
    fn from(value: String) -> Self {
        ContentNode::Text(value)
    }
}

impl From<&str> for ContentNode {
    fn from(value: &str) -> Self {
        ContentNode::Text(value.to_string())
    }
}

impl From<NodeElement> for ContentNode {
    fn from(value: NodeElement) -> Self {
        ContentNode::Element(value)
    }
}

/// Keeps `href` and `src` verbatim. Returns `None` rather than an empty map
/// when the element has neither.
pub fn filter_attributes(element: &HtmlElement) -> Option<BTreeMap<String, String>> {
    let attrs: BTreeMap<String, String> = element
        .attributes
        .iter()
        .filter(|(name, _)| ALLOWED_ATTRIBUTES.contains(&name.as_str()))
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect();

    if attrs.is_empty() { None } else { Some(attrs) }
}
