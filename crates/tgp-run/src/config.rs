use std::env;
use std::time::Duration;

use tgp_telegraph::DEFAULT_API_URL;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub access_token: Option<String>,
    pub author_name: String,
    pub api_url: String,
    pub timeout: Duration,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            access_token: None,
            author_name: "telegraph-publish".to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(30),
            log_level: "warn".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a config from `lookup`, which resolves environment variable names.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(token) = lookup("TGP_ACCESS_TOKEN").filter(|token| !token.is_empty()) {
            config.access_token = Some(token);
        }

        if let Some(author_name) = lookup("TGP_AUTHOR_NAME") {
            config.author_name = author_name;
        }

        if let Some(api_url) = lookup("TGP_API_URL") {
            config.api_url = api_url;
        }

        if let Some(timeout_str) = lookup("TGP_TIMEOUT_SECS") {
            if let Ok(timeout) = timeout_str.parse::<u64>() {
                config.timeout = Duration::from_secs(timeout);
            } else {
                eprintln!(
                    "Warning: Invalid TGP_TIMEOUT_SECS value '{}', using default {}",
                    timeout_str,
                    config.timeout.as_secs()
                );
            }
        }

        if let Some(log_level) = lookup("RUST_LOG") {
            config.log_level = log_level;
        } else if let Some(log_level) = lookup("TGP_LOG_LEVEL") {
            config.log_level = log_level;
        }

        config
    }
}
