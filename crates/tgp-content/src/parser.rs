use ego_tree::NodeRef;
use scraper::{ElementRef, Html, Node};

use super::node::{HtmlElement, HtmlNode};

fn map_node_to_html_node(node: NodeRef<'_, Node>) -> Option<HtmlNode> {
    match node.value() {
        Node::Text(text) => Some(HtmlNode::Text(text.to_string())),
        Node::Element(element) => {
            let attributes = element
                .attrs()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect();
            let children = map_nodes_to_html_nodes(node.children());

            Some(HtmlNode::Element(HtmlElement::new(
                element.name(),
                attributes,
                children,
            )))
        }
        Node::Comment(comment) => Some(HtmlNode::Comment(comment.to_string())),
        _ => None,
    }
}

pub fn map_nodes_to_html_nodes<'a>(
    nodes: impl Iterator<Item = NodeRef<'a, Node>>,
) -> Vec<HtmlNode> {
    nodes.filter_map(map_node_to_html_node).collect()
}

/// Parses an HTML document or fragment and returns the children of its
/// `<body>`.
pub fn parse_html(html_input: &str) -> Vec<HtmlNode> {
    if html_input.trim().is_empty() {
        return Vec::new();
    }

    let document = Html::parse_document(html_input);
    let body = document
        .root_element()
        .children()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "body");

    match body {
        Some(body) => map_nodes_to_html_nodes(body.children()),
        None => {
            tracing::warn!("Parsed document has no <body>; converting the whole tree");
            map_nodes_to_html_nodes(document.root_element().children())
        }
    }
}
