use itertools::Itertools;

use crate::content::{ContentNode, NodeElement, filter_attributes};
use crate::node::{HtmlElement, HtmlNode};
use crate::options::{ConversionOptions, ListItemMode};
use crate::tag::{Tag, is_demoted_heading, remap_tag};
use crate::text::{preformatted_text, rendered_text, text_content};

/// Converts every root node and concatenates the results.
pub fn convert_nodes(nodes: &[HtmlNode], options: &ConversionOptions) -> Vec<ContentNode> {
    nodes
        .iter()
        .flat_map(|node| convert_node(node, false, None, options))
        .collect()
}

/// Converts a single node.
///
/// `unwrap_block` forbids block-level output (set below list items), and
/// `parent_tag` is the original tag name of the closest enclosing element
/// that was not unwrapped. Never fails: unsupported markup is unwrapped or
/// dropped.
pub fn convert_node(
    node: &HtmlNode,
    unwrap_block: bool,
    parent_tag: Option<&str>,
    options: &ConversionOptions,
) -> Vec<ContentNode> {
    match node {
        HtmlNode::Text(text) => convert_text(text, parent_tag),
        HtmlNode::Element(el) => convert_element(el, unwrap_block, parent_tag, options),
        HtmlNode::Comment(_) => Vec::new(),
    }
}

fn convert_text(text: &str, parent_tag: Option<&str>) -> Vec<ContentNode> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let text = text.trim_matches('\n');
    if parent_tag.is_some_and(is_demoted_heading) {
        vec![ContentNode::strong(text)]
    } else {
        vec![ContentNode::Text(text.to_string())]
    }
}

fn convert_children(
    el: &HtmlElement,
    unwrap_block: bool,
    parent_tag: Option<&str>,
    options: &ConversionOptions,
) -> Vec<ContentNode> {
    el.children
        .iter()
        .flat_map(|child| convert_node(child, unwrap_block, parent_tag, options))
        .collect()
}

fn convert_element(
    el: &HtmlElement,
    unwrap_block: bool,
    parent_tag: Option<&str>,
    options: &ConversionOptions,
) -> Vec<ContentNode> {
    if options.skip_classes.iter().any(|class| el.has_class(class)) {
        tracing::debug!("Skipping <{}> with a marker class", el.tag_name);
        return Vec::new();
    }

    let original_tag = el.tag_name.as_str();
    let tag = match remap_tag(original_tag) {
        Some(tag) if !(unwrap_block && tag.is_block()) => tag,
        _ => return convert_children(el, unwrap_block, parent_tag, options),
    };

    let mut node = NodeElement::new(tag);
    node.attrs = filter_attributes(el);

    match tag {
        Tag::Li if options.list_items == ListItemMode::Flatten => {
            let text: String = el
                .children
                .iter()
                .map(|child| text_content(child, &options.skip_classes))
                .collect();
            node.set_children(non_empty_text(text.trim()));
            return vec![node.into()];
        }
        Tag::Pre => {
            let source = el.first_element_child().unwrap_or(el);
            node.set_children(non_empty_text(preformatted_text(source).trim()));
            return vec![node.into()];
        }
        Tag::Table => {
            node.tag = Tag::Pre;
            node.set_children(non_empty_text(rendered_text(el).trim()));
            return vec![node.into()];
        }
        Tag::Br if parent_tag == Some("li") => return Vec::new(),
        _ => {}
    }

    let children_unwrap_block = unwrap_block || tag == Tag::Li;
    let mut children = convert_children(el, children_unwrap_block, Some(original_tag), options);

    if is_demoted_heading(original_tag) {
        children = children
            .into_iter()
            .map(|child| match child {
                ContentNode::Text(text) => ContentNode::strong(text),
                element => element,
            })
            .collect();
    }

    if tag == Tag::Li {
        children = separate_text_runs(children);
    }

    node.set_children(children);
    vec![node.into()]
}

fn non_empty_text(text: &str) -> Vec<ContentNode> {
    if text.is_empty() {
        Vec::new()
    } else {
        vec![ContentNode::Text(text.to_string())]
    }
}

/// Appends a line feed to a text child followed by another text child, so
/// flattened runs inside a list item stay on separate lines.
fn separate_text_runs(children: Vec<ContentNode>) -> Vec<ContentNode> {
    let next_is_text = children
        .iter()
        .skip(1)
        .map(ContentNode::is_text)
        .chain(std::iter::once(false))
        .collect_vec();

    children
        .into_iter()
        .zip(next_is_text)
        .map(|(child, next_is_text)| match child {
            ContentNode::Text(mut text) if next_is_text && !text.ends_with('\n') => {
                text.push('\n');
                ContentNode::Text(text)
            }
            child => child,
        })
        .collect()
}
