//! Async client for the [Telegraph](https://telegra.ph/api) publishing API.
//!
//! ```rust,no_run
//! use tgp_telegraph::{Client, CreatePage};
//!
//! # async fn run() -> Result<(), tgp_telegraph::Error> {
//! let client = Client::new(Some("access-token".to_string()))?;
//! let page = client
//!     .create_page(&CreatePage::new("Hello", vec!["world".into()]))
//!     .await?;
//! println!("{}", page.url);
//! # Ok(())
//! # }
//! ```
mod client;
mod error;
mod types;

pub use client::{Client, DEFAULT_API_URL, DEFAULT_TIMEOUT};
pub use error::Error;
pub use types::{Account, CreatePage, EditPage, Page, PageList};
