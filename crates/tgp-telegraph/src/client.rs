use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use url::Url;

use crate::error::Error;
use crate::types::{Account, ApiResponse, CreatePage, EditPage, Page, PageList};

pub const DEFAULT_API_URL: &str = "https://api.telegra.ph/";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const ACCOUNT_FIELDS: [&str; 5] = [
    "short_name",
    "author_name",
    "author_url",
    "auth_url",
    "page_count",
];

/// Client for the Telegraph API. Every method is a JSON `POST` to
/// `{api_url}{method}`.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    api_url: Url,
    access_token: Option<String>,
}

impl Client {
    pub fn new(access_token: Option<String>) -> Result<Self, Error> {
        Self::with_options(DEFAULT_API_URL, access_token, DEFAULT_TIMEOUT)
    }

    pub fn with_options(
        api_url: &str,
        access_token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, Error> {
        // `Url::join` drops the last path segment unless it ends with a slash.
        let api_url = if api_url.ends_with('/') {
            Url::parse(api_url)?
        } else {
            Url::parse(&format!("{api_url}/"))?
        };

        let http = reqwest::Client::builder()
            .user_agent(format!("telegraph-publish/{}", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            http,
            api_url,
            access_token: access_token.filter(|token| !token.is_empty()),
        })
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    /// Creates an account. The returned [`Account`] carries the new access
    /// token; it is not stored on this client.
    pub async fn create_account(
        &self,
        short_name: &str,
        author_name: &str,
    ) -> Result<Account, Error> {
        self.request(
            "createAccount",
            json!({"short_name": short_name, "author_name": author_name}),
        )
        .await
    }

    pub async fn get_account_info(&self) -> Result<Account, Error> {
        self.require_access_token()?;
        self.request("getAccountInfo", json!({"fields": ACCOUNT_FIELDS}))
            .await
    }

    pub async fn get_page_list(&self, offset: u32, limit: u32) -> Result<PageList, Error> {
        self.require_access_token()?;
        self.request("getPageList", json!({"offset": offset, "limit": limit}))
            .await
    }

    pub async fn create_page(&self, data: &CreatePage) -> Result<Page, Error> {
        self.require_access_token()?;
        self.request("createPage", serde_json::to_value(data)?)
            .await
    }

    pub async fn edit_page(&self, data: &EditPage) -> Result<Page, Error> {
        self.require_access_token()?;
        self.request("editPage", serde_json::to_value(data)?).await
    }

    pub async fn get_page(&self, path: &str) -> Result<Page, Error> {
        self.request("getPage", json!({"path": path, "return_content": true}))
            .await
    }

    fn require_access_token(&self) -> Result<(), Error> {
        match self.access_token {
            Some(_) => Ok(()),
            None => Err(Error::MissingAccessToken),
        }
    }

    fn with_access_token(&self, mut data: Value) -> Value {
        if let (Some(token), Some(object)) = (&self.access_token, data.as_object_mut()) {
            object.insert("access_token".to_string(), Value::String(token.clone()));
        }
        data
    }

    async fn request<T: DeserializeOwned>(&self, method: &str, data: Value) -> Result<T, Error> {
        let url = self.api_url.join(method)?;
        tracing::debug!(%url, "Sending Telegraph request");

        let response = self
            .http
            .post(url)
            .json(&self.with_access_token(data))
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if status != reqwest::StatusCode::OK {
            tracing::warn!(method, %status, "Telegraph request failed");
            return Err(Error::Status {
                status: status.as_u16(),
                body,
            });
        }

        let response: ApiResponse<T> = serde_json::from_str(&body)?;
        match (response.ok, response.result) {
            (true, Some(result)) => Ok(result),
            (true, None) => Err(Error::Api(format!("{method} returned no result"))),
            (false, _) => Err(Error::Api(
                response
                    .error
                    .unwrap_or_else(|| "Unknown error".to_string()),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::Method::POST;
    use httpmock::MockServer;
    use rstest::rstest;
    use tgp_content::ContentNode;
    use tokio::runtime::Runtime;

    const PAGE: &str = r#"{"ok":true,"result":{"path":"Note-10-16","url":"https://telegra.ph/Note-10-16","title":"Note","description":"","views":0,"can_edit":true}}"#;

    fn client(server: &MockServer, access_token: Option<&str>) -> Client {
        Client::with_options(
            &format!("http://{}", server.address()),
            access_token.map(ToString::to_string),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn test_with_access_token_inserts_token() {
        let client = Client::new(Some("secret".to_string())).unwrap();
        assert_eq!(
            client.with_access_token(json!({"path": "Note"})),
            json!({"path": "Note", "access_token": "secret"})
        );
    }

    #[test]
    fn test_without_access_token_body_is_unchanged() {
        let client = Client::new(Some(String::new())).unwrap();
        assert_eq!(client.access_token(), None);
        assert_eq!(
            client.with_access_token(json!({"path": "Note"})),
            json!({"path": "Note"})
        );
    }

    #[rstest]
    #[case::with_slash("http://localhost:8080/api/", "http://localhost:8080/api/createPage")]
    #[case::without_slash("http://localhost:8080/api", "http://localhost:8080/api/createPage")]
    fn test_api_url_join(#[case] api_url: &str, #[case] expected: &str) {
        let client = Client::with_options(api_url, None, DEFAULT_TIMEOUT).unwrap();
        assert_eq!(client.api_url().join("createPage").unwrap().as_str(), expected);
    }

    #[test]
    fn test_invalid_api_url() {
        let result = Client::with_options("not a url", None, DEFAULT_TIMEOUT);
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn test_create_page() {
        Runtime::new().unwrap().block_on(async {
            let server = MockServer::start_async().await;
            let mock = server
                .mock_async(|when, then| {
                    when.method(POST).path("/createPage");
                    then.status(200).body(PAGE);
                })
                .await;

            let page = client(&server, Some("secret"))
                .create_page(&CreatePage::new("Note", vec![ContentNode::from("Hello")]))
                .await
                .unwrap();

            mock.assert_async().await;
            assert_eq!(page.path, "Note-10-16");
            assert_eq!(page.url, "https://telegra.ph/Note-10-16");
        });
    }

    #[test]
    fn test_edit_page() {
        Runtime::new().unwrap().block_on(async {
            let server = MockServer::start_async().await;
            let mock = server
                .mock_async(|when, then| {
                    when.method(POST).path("/editPage");
                    then.status(200).body(PAGE);
                })
                .await;

            let page = client(&server, Some("secret"))
                .edit_page(&EditPage::new("Note-10-16", "Note", vec!["Deleted".into()]))
                .await
                .unwrap();

            mock.assert_async().await;
            assert_eq!(page.title, "Note");
        });
    }

    #[test]
    fn test_create_account_without_token() {
        Runtime::new().unwrap().block_on(async {
            let server = MockServer::start_async().await;
            server
                .mock_async(|when, then| {
                    when.method(POST).path("/createAccount");
                    then.status(200).body(
                        r#"{"ok":true,"result":{"short_name":"notes","author_name":"me","author_url":"","access_token":"abc","auth_url":"https://edit.telegra.ph/auth/xyz"}}"#,
                    );
                })
                .await;

            let account = client(&server, None)
                .create_account("notes", "me")
                .await
                .unwrap();

            assert_eq!(account.access_token.as_deref(), Some("abc"));
            assert_eq!(account.short_name, "notes");
        });
    }

    #[test]
    fn test_get_page_list() {
        Runtime::new().unwrap().block_on(async {
            let server = MockServer::start_async().await;
            server
                .mock_async(|when, then| {
                    when.method(POST).path("/getPageList");
                    then.status(200).body(
                        r#"{"ok":true,"result":{"total_count":1,"pages":[{"path":"Note-10-16","url":"https://telegra.ph/Note-10-16","title":"Note","description":"","views":12}]}}"#,
                    );
                })
                .await;

            let list = client(&server, Some("secret"))
                .get_page_list(0, 50)
                .await
                .unwrap();

            assert_eq!(list.total_count, 1);
            assert_eq!(list.pages[0].views, 12);
        });
    }

    #[test]
    fn test_api_error_is_surfaced() {
        Runtime::new().unwrap().block_on(async {
            let server = MockServer::start_async().await;
            server
                .mock_async(|when, then| {
                    when.method(POST).path("/getAccountInfo");
                    then.status(200)
                        .body(r#"{"ok":false,"error":"ACCESS_TOKEN_INVALID"}"#);
                })
                .await;

            let result = client(&server, Some("bad")).get_account_info().await;

            match result {
                Err(Error::Api(message)) => assert_eq!(message, "ACCESS_TOKEN_INVALID"),
                other => panic!("unexpected result: {other:?}"),
            }
        });
    }

    #[test]
    fn test_non_200_status_is_error() {
        Runtime::new().unwrap().block_on(async {
            let server = MockServer::start_async().await;
            server
                .mock_async(|when, then| {
                    when.method(POST).path("/getPage");
                    then.status(502).body("bad gateway");
                })
                .await;

            let result = client(&server, None).get_page("Note-10-16").await;

            match result {
                Err(Error::Status { status, body }) => {
                    assert_eq!(status, 502);
                    assert_eq!(body, "bad gateway");
                }
                other => panic!("unexpected result: {other:?}"),
            }
        });
    }

    #[test]
    fn test_missing_token_fails_before_request() {
        Runtime::new().unwrap().block_on(async {
            let server = MockServer::start_async().await;
            let mock = server
                .mock_async(|when, then| {
                    when.method(POST);
                    then.status(200).body(PAGE);
                })
                .await;
            let client = client(&server, None);

            assert!(matches!(
                client.create_page(&CreatePage::new("Note", vec![])).await,
                Err(Error::MissingAccessToken)
            ));
            assert!(matches!(
                client
                    .edit_page(&EditPage::new("Note-10-16", "Note", vec![]))
                    .await,
                Err(Error::MissingAccessToken)
            ));
            assert!(matches!(
                client.get_account_info().await,
                Err(Error::MissingAccessToken)
            ));
            assert!(matches!(
                client.get_page_list(0, 50).await,
                Err(Error::MissingAccessToken)
            ));
            assert_eq!(mock.hits_async().await, 0);
        });
    }
}
