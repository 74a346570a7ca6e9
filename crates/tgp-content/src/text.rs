//! Plain-text views of an input tree.
//!
//! [`text_content`] concatenates descendant text nodes verbatim, leaving out
//! hidden elements and elements carrying one of the given classes.
//! [`rendered_text`] approximates what a browser shows for a subtree: block
//! elements start new lines, table cells are tab separated, and whitespace is
//! collapsed outside preformatted content.
use crate::node::{HtmlElement, HtmlNode};

const PREFORMATTED_TAGS: [&str; 4] = ["pre", "textarea", "listing", "xmp"];
const HIDDEN_TAGS: [&str; 5] = ["head", "script", "style", "template", "noscript"];
const TABLE_STRUCTURE_TAGS: [&str; 6] = ["table", "thead", "tbody", "tfoot", "tr", "colgroup"];
const PARAGRAPH_TAGS: [&str; 7] = ["p", "h1", "h2", "h3", "h4", "h5", "h6"];
const BLOCK_TAGS: [&str; 29] = [
    "address",
    "article",
    "aside",
    "blockquote",
    "caption",
    "dd",
    "details",
    "dialog",
    "div",
    "dl",
    "dt",
    "fieldset",
    "figcaption",
    "figure",
    "footer",
    "form",
    "header",
    "hr",
    "li",
    "main",
    "nav",
    "ol",
    "pre",
    "section",
    "summary",
    "table",
    "tr",
    "ul",
    "body",
];

pub fn text_content(node: &HtmlNode, skip_classes: &[String]) -> String {
    let mut text = String::new();
    push_text_content(node, skip_classes, &mut text);
    text
}

fn push_text_content(node: &HtmlNode, skip_classes: &[String], text: &mut String) {
    match node {
        HtmlNode::Text(value) => text.push_str(value),
        HtmlNode::Element(el) => {
            if HIDDEN_TAGS.contains(&el.tag_name.as_str())
                || skip_classes.iter().any(|class| el.has_class(class))
            {
                return;
            }
            el.children
                .iter()
                .for_each(|child| push_text_content(child, skip_classes, text));
        }
        HtmlNode::Comment(_) => {}
    }
}

pub fn rendered_text(element: &HtmlElement) -> String {
    let mut items = Vec::new();
    collect_element(element, false, &mut items);
    assemble(&items)
}

/// Renders `element` as if it sat inside a `<pre>`: text is kept verbatim.
pub fn preformatted_text(element: &HtmlElement) -> String {
    let mut items = Vec::new();
    collect_element(element, true, &mut items);
    assemble(&items)
}

#[derive(Debug, PartialEq)]
enum Item {
    Text { value: String, collapsible: bool },
    Break(usize),
}

fn collect(node: &HtmlNode, preformatted: bool, in_table: bool, items: &mut Vec<Item>) {
    match node {
        HtmlNode::Text(value) if in_table && value.trim().is_empty() => {}
        HtmlNode::Text(value) if preformatted => items.push(Item::Text {
            value: value.clone(),
            collapsible: false,
        }),
        HtmlNode::Text(value) => items.push(Item::Text {
            value: collapse_whitespace(value),
            collapsible: true,
        }),
        HtmlNode::Element(el) => collect_element(el, preformatted, items),
        HtmlNode::Comment(_) => {}
    }
}

fn collect_element(el: &HtmlElement, preformatted: bool, items: &mut Vec<Item>) {
    let tag = el.tag_name.as_str();

    if HIDDEN_TAGS.contains(&tag) {
        return;
    }

    if tag == "br" {
        items.push(Item::Text {
            value: "\n".to_string(),
            collapsible: false,
        });
        return;
    }

    let breaks = if PARAGRAPH_TAGS.contains(&tag) {
        2
    } else if BLOCK_TAGS.contains(&tag) {
        1
    } else {
        0
    };

    if breaks > 0 {
        items.push(Item::Break(breaks));
    }

    let preformatted = preformatted || PREFORMATTED_TAGS.contains(&tag);
    let in_table = TABLE_STRUCTURE_TAGS.contains(&tag);

    if tag == "tr" {
        let cells = el.children.iter().filter(|child| {
            matches!(child, HtmlNode::Element(cell) if matches!(cell.tag_name.as_str(), "td" | "th"))
        });
        for (i, cell) in cells.enumerate() {
            if i > 0 {
                items.push(Item::Text {
                    value: "\t".to_string(),
                    collapsible: false,
                });
            }
            collect(cell, preformatted, false, items);
        }
    } else {
        for child in &el.children {
            collect(child, preformatted, in_table, items);
        }
    }

    if breaks > 0 {
        items.push(Item::Break(breaks));
    }
}

fn collapse_whitespace(value: &str) -> String {
    let mut collapsed = String::with_capacity(value.len());
    let mut in_whitespace = false;

    for c in value.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                collapsed.push(' ');
            }
            in_whitespace = true;
        } else {
            collapsed.push(c);
            in_whitespace = false;
        }
    }

    collapsed
}

fn assemble(items: &[Item]) -> String {
    let mut output = String::new();
    let mut pending_breaks = 0;
    // A trailing space that came from collapsed whitespace and may be dropped.
    let mut soft_space = false;

    for item in items {
        match item {
            Item::Break(n) => {
                if soft_space {
                    output.pop();
                    soft_space = false;
                }
                pending_breaks = pending_breaks.max(*n);
            }
            Item::Text { value, collapsible } => {
                let mut value = value.as_str();
                if *collapsible {
                    let at_line_start = output.is_empty() || output.ends_with('\n');
                    if (at_line_start || pending_breaks > 0 || soft_space) && value.starts_with(' ') {
                        value = &value[1..];
                    }
                }
                if value.is_empty() {
                    continue;
                }
                if pending_breaks > 0 && !output.is_empty() {
                    output.push_str(&"\n".repeat(pending_breaks));
                }
                pending_breaks = 0;
                output.push_str(value);
                soft_space = *collapsible && value.ends_with(' ');
            }
        }
    }

    if soft_space {
        output.pop();
    }

    output
}
