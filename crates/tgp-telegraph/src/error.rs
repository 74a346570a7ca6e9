use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Access token is required; create an account first or pass one explicitly")]
    MissingAccessToken,
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Telegraph responded with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Telegraph API error: {0}")]
    Api(String),
    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Invalid API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}
