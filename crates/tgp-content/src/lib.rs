//! # tgp-content: rendered documents to Telegraph content nodes
//!
//! Telegraph pages are made of a small recursive node format: strings and
//! elements drawn from a short list of tags, carrying at most `href` and
//! `src` attributes. This crate rewrites a rendered document tree into that
//! format.
//!
//! - Headings are compressed: `h1`/`h2` become `h3`, `h3` becomes `h4`, and
//!   `h4`–`h6` become bold paragraphs.
//! - Unsupported elements are unwrapped, their children spliced into place.
//! - List items are flattened to text, since nested lists cannot be expressed.
//! - Code blocks and tables are published as preformatted text.
//!
//! Conversion never fails; markup the format cannot express degrades.
//!
//! ## Quick Start
//!
//! ```rust
//! use tgp_content::{ConversionOptions, convert_html};
//!
//! let nodes = convert_html("<h1>Hello</h1><div><p>world</p></div>", &ConversionOptions::default());
//! let json = serde_json::to_string(&nodes).unwrap();
//! assert_eq!(json, r#"[{"tag":"h3","children":["Hello"]},{"tag":"p","children":["world"]}]"#);
//! ```
mod content;
pub mod converter;
mod error;
mod node;
mod options;
pub mod parser;
mod render;
mod tag;
pub mod text;

pub use content::{ContentNode, NodeElement, filter_attributes};
pub use converter::{convert_node, convert_nodes};
pub use error::Error;
pub use node::{HtmlElement, HtmlNode};
pub use options::{ConversionOptions, ListItemMode};
pub use parser::parse_html;
pub use render::markdown_to_html;
pub use tag::{ALLOWED_ATTRIBUTES, Tag, is_demoted_heading, remap_tag};

/// Parses `html_input` and converts its body.
pub fn convert_html(html_input: &str, options: &ConversionOptions) -> Vec<ContentNode> {
    convert_nodes(&parse_html(html_input), options)
}

/// Renders `markdown_input` to HTML and converts the result.
pub fn convert_markdown(
    markdown_input: &str,
    options: &ConversionOptions,
) -> Result<Vec<ContentNode>, Error> {
    let html = markdown_to_html(markdown_input)?;
    Ok(convert_html(&html, options))
}
