use rustc_hash::FxHashSet;

/// A node of a rendered document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlNode {
    Text(String),
    Element(HtmlElement),
    Comment(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlElement {
    pub tag_name: String,
    pub attributes: Vec<(String, String)>,
    pub classes: FxHashSet<String>,
    pub children: Vec<HtmlNode>,
}

impl HtmlElement {
    /// Creates an element, lowercasing the tag name and collecting class names
    /// from the `class` attribute.
    pub fn new(tag_name: &str, attributes: Vec<(String, String)>, children: Vec<HtmlNode>) -> Self {
        let classes = attributes
            .iter()
            .filter(|(name, _)| name == "class")
            .flat_map(|(_, value)| value.split_whitespace())
            .map(ToString::to_string)
            .collect();

        HtmlElement {
            tag_name: tag_name.to_lowercase(),
            attributes,
            classes,
            children,
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(attr_name, _)| attr_name == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn first_element_child(&self) -> Option<&HtmlElement> {
        self.children.iter().find_map(|child| match child {
            HtmlNode::Element(el) => Some(el),
            _ => None,
        })
    }
}

impl HtmlNode {
    pub fn text(value: impl Into<String>) -> Self {
        HtmlNode::Text(value.into())
    }

    pub fn element(tag_name: &str, children: Vec<HtmlNode>) -> Self {
        HtmlNode::Element(HtmlElement::new(tag_name, Vec::new(), children))
    }

    pub fn as_element(&self) -> Option<&HtmlElement> {
        match self {
            HtmlNode::Element(el) => Some(el),
            _ => None,
        }
    }
}
