use std::time::Duration;

use crate::auth::ApiToken;

/// Base URL of the public Web API.
pub const DEFAULT_API_URL: &str = "https://webapi.teamviewer.com/api/v1";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for [`crate::WebApiClient`].
#[derive(Debug, Clone)]
pub struct WebApiConfig {
    /// Base URL, without trailing slash.
    pub api_url: String,

    pub api_token: ApiToken,

    /// Per-request timeout.
    pub timeout: Duration,
}

impl WebApiConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_reader(|key| std::env::var(key))
    }

    /// Load configuration from a custom variable reader.
    ///
    /// Lets callers layer command-line flags over the environment and lets
    /// tests supply variables without touching process-global state.
    pub fn from_reader<F>(reader: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Result<String, std::env::VarError>,
    {
        let api_token = reader("TEAMVIEWER_API_TOKEN")
            .map_err(|_| ConfigError::MissingVar("TEAMVIEWER_API_TOKEN".into()))?;
        if api_token.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "TEAMVIEWER_API_TOKEN".into(),
                "token is empty".into(),
            ));
        }

        let api_url = reader("TEAMVIEWER_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue(
                "TEAMVIEWER_API_URL".into(),
                format!("'{api_url}' is not an http(s) URL"),
            ));
        }

        let timeout_secs = reader("TEAMVIEWER_API_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidValue("TEAMVIEWER_API_TIMEOUT_SECS".into(), e.to_string())
            })?;

        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            api_token: ApiToken::new(api_token.trim()),
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingVar(String),

    #[error("invalid value for {0}: {1}")]
    InvalidValue(String, String),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}
