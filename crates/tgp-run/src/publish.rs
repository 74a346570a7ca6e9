use std::fs;
use std::path::Path;

use miette::{IntoDiagnostic, WrapErr, miette};
use tgp_content::{ContentNode, ConversionOptions};
use tgp_telegraph::{Client, CreatePage, EditPage, Page};

pub const PAGE_PATH_KEY: &str = "telegraph_page_path";
pub const PAGE_URL_KEY: &str = "telegraph_page_url";

/// Body of a page whose content has been cleared.
pub const CLEARED_CONTENT: &str = "Deleted";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum InputFormat {
    #[default]
    Markdown,
    Html,
}

/// Converts a source document into content nodes. Markdown sources have
/// their frontmatter block removed before rendering.
pub fn render_content(
    source: &str,
    format: InputFormat,
    options: &ConversionOptions,
) -> miette::Result<Vec<ContentNode>> {
    match format {
        InputFormat::Markdown => {
            let (_, body) = tgp_frontmatter::split(source);
            Ok(tgp_content::convert_markdown(body, options)?)
        }
        InputFormat::Html => Ok(tgp_content::convert_html(source, options)),
    }
}

/// Page title derived from the file name, without its extension.
pub fn page_title(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| "Untitled".to_string())
}

fn read_source(path: &Path) -> miette::Result<String> {
    fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read {}", path.display()))
}

fn published_path(source: &str, path: &Path) -> miette::Result<Option<String>> {
    tgp_frontmatter::read_key(source, PAGE_PATH_KEY)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read frontmatter of {}", path.display()))
}

/// Publishes Markdown files and keeps the page location in their frontmatter.
#[derive(Debug)]
pub struct Publisher<'a> {
    client: &'a Client,
    author_name: String,
    options: ConversionOptions,
}

impl<'a> Publisher<'a> {
    pub fn new(client: &'a Client, author_name: impl Into<String>, options: ConversionOptions) -> Self {
        Self {
            client,
            author_name: author_name.into(),
            options,
        }
    }

    /// Edits the page recorded in the file's frontmatter, or creates one and
    /// records its URL and path in the file.
    pub async fn publish(&self, path: &Path, title: Option<&str>) -> miette::Result<Page> {
        let source = read_source(path)?;
        let content = render_content(&source, InputFormat::Markdown, &self.options)?;
        let title = title.map_or_else(|| page_title(path), ToString::to_string);

        if let Some(page_path) = published_path(&source, path)? {
            tracing::info!(page = %page_path, "Updating existing page");
            return self
                .client
                .edit_page(&EditPage::new(page_path, title, content))
                .await
                .into_diagnostic();
        }

        let mut data = CreatePage::new(title, content);
        data.author_name = Some(self.author_name.clone());
        let page = self.client.create_page(&data).await.into_diagnostic()?;
        tracing::info!(page = %page.path, "Created page");

        let updated = tgp_frontmatter::update_key(&source, PAGE_URL_KEY, &page.url);
        let updated = tgp_frontmatter::update_key(&updated, PAGE_PATH_KEY, &page.path);
        fs::write(path, updated)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to update {}", path.display()))?;

        Ok(page)
    }

    /// Replaces the content of the page recorded in the file's frontmatter.
    pub async fn clear(&self, path: &Path, title: Option<&str>) -> miette::Result<Page> {
        let source = read_source(path)?;
        let page_path = published_path(&source, path)?
            .ok_or_else(|| miette!("{} has not been published yet", path.display()))?;
        let title = title.map_or_else(|| page_title(path), ToString::to_string);

        tracing::info!(page = %page_path, "Clearing page");
        self.client
            .edit_page(&EditPage::new(
                page_path,
                title,
                vec![ContentNode::from(CLEARED_CONTENT)],
            ))
            .await
            .into_diagnostic()
    }
}
