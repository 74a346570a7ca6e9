use strum::{Display, EnumString};

/// How `<li>` content is emitted. Telegraph has no nested lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ListItemMode {
    /// The item's whole subtree collapses into a single text child.
    #[default]
    Flatten,
    /// Inline children are kept; block descendants are unwrapped and
    /// adjacent text runs are separated by line feeds.
    Inline,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionOptions {
    pub list_items: ListItemMode,
    /// Elements carrying any of these classes are never published.
    pub skip_classes: Vec<String>,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        ConversionOptions {
            list_items: ListItemMode::default(),
            skip_classes: vec!["frontmatter".to_string(), "frontmatter-container".to_string()],
        }
    }
}
