use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Tags accepted by Telegraph's `NodeElement`, plus `table`, which the
/// converter accepts and re-emits as `pre`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    AsRefStr,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    A,
    Aside,
    B,
    Blockquote,
    Br,
    Code,
    Em,
    Figcaption,
    Figure,
    H3,
    H4,
    Hr,
    I,
    Iframe,
    Img,
    Li,
    Ol,
    P,
    Pre,
    S,
    Strong,
    U,
    Ul,
    Video,
    Table,
}

impl Tag {
    /// Inline tags never force a line break and are never unwrapped in a
    /// block-free context.
    pub fn is_inline(self) -> bool {
        matches!(
            self,
            Tag::A
                | Tag::Aside
                | Tag::B
                | Tag::Blockquote
                | Tag::Br
                | Tag::Code
                | Tag::Em
                | Tag::I
                | Tag::S
                | Tag::Strong
                | Tag::U
        )
    }

    pub fn is_block(self) -> bool {
        !self.is_inline()
    }
}

/// Attribute names carried over to the output.
pub const ALLOWED_ATTRIBUTES: [&str; 2] = ["href", "src"];

/// Maps an original (lowercase) tag name to its output tag, or `None` when
/// the element cannot be represented.
pub fn remap_tag(original_tag: &str) -> Option<Tag> {
    let rewritten = match original_tag {
        "h1" | "h2" => "h3",
        "h3" => "h4",
        "h4" | "h5" | "h6" => "p",
        tag => tag,
    };

    rewritten.parse::<Tag>().ok()
}

/// Headings that the remap table collapses to a plain paragraph.
pub fn is_demoted_heading(original_tag: &str) -> bool {
    matches!(original_tag, "h4" | "h5" | "h6")
}
