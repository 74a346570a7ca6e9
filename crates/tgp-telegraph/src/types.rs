use serde::{Deserialize, Serialize};
use tgp_content::ContentNode;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Account {
    /// Only returned by `createAccount` and `revokeAccessToken`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    pub short_name: String,
    #[serde(default)]
    pub author_name: String,
    #[serde(default)]
    pub author_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Page {
    pub path: String,
    pub url: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Vec<ContentNode>>,
    #[serde(default)]
    pub views: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_edit: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PageList {
    pub total_count: u64,
    pub pages: Vec<Page>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatePage {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_url: Option<String>,
    pub content: Vec<ContentNode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_content: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditPage {
    pub path: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_url: Option<String>,
    pub content: Vec<ContentNode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_content: Option<bool>,
}

impl CreatePage {
    pub fn new(title: impl Into<String>, content: Vec<ContentNode>) -> Self {
        Self {
            title: title.into(),
            author_name: None,
            author_url: None,
            content,
            return_content: None,
        }
    }
}

impl EditPage {
    pub fn new(path: impl Into<String>, title: impl Into<String>, content: Vec<ContentNode>) -> Self {
        Self {
            path: path.into(),
            title: title.into(),
            author_name: None,
            author_url: None,
            content,
            return_content: None,
        }
    }
}

/// Envelope of every Telegraph response.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_page_omits_unset_fields() {
        let data = CreatePage::new("Title", vec!["Hello".into()]);
        assert_eq!(
            serde_json::to_value(&data).unwrap(),
            serde_json::json!({"title": "Title", "content": ["Hello"]})
        );
    }

    #[test]
    fn test_page_deserializes_without_content() {
        let page: Page = serde_json::from_str(
            r#"{"path":"Note-10-16","url":"https://telegra.ph/Note-10-16","title":"Note","description":"","views":3,"can_edit":true}"#,
        )
        .unwrap();

        assert_eq!(page.path, "Note-10-16");
        assert_eq!(page.views, 3);
        assert_eq!(page.content, None);
        assert_eq!(page.can_edit, Some(true));
    }
}
