use std::env;

/// Environment variable holding the Lunch Money API token.
pub const API_TOKEN_ENV: &str = "LUNCHMONEY_API_TOKEN";

/// Base URL of the upstream Lunch Money API.
pub const DEFAULT_BASE_URL: &str = "https://dev.lunchmoney.app/v1";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(
        "Failed to get the LUNCHMONEY_API_TOKEN. Probably it wasn't added during the server configuration."
    )]
    MissingToken,
}

/// Immutable process configuration, built once at startup.
#[derive(Clone)]
pub struct Config {
    api_token: String,
    base_url: String,
}

impl Config {
    /// Build a configuration from an optional token. A missing or blank token is fatal.
    pub fn new(api_token: Option<String>) -> Result<Self, ConfigError> {
        let api_token = api_token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::MissingToken)?;

        Ok(Self {
            api_token,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::new(env::var(API_TOKEN_ENV).ok())
    }

    /// Point the client at a different upstream. Used by tests to target a stub server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn api_token(&self) -> &str {
        &self.api_token
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

// Keep the token out of logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_token", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_token_is_rejected() {
        let err = Config::new(None).unwrap_err();
        assert!(err.to_string().contains("LUNCHMONEY_API_TOKEN"));
    }

    #[test]
    fn test_blank_token_is_rejected() {
        assert!(matches!(
            Config::new(Some("   ".to_string())),
            Err(ConfigError::MissingToken)
        ));
    }

    #[test]
    fn test_defaults_to_v1_base_url() {
        let config = Config::new(Some("tok".to_string())).unwrap();
        assert_eq!(config.api_token(), "tok");
        assert_eq!(config.base_url(), "https://dev.lunchmoney.app/v1");
    }

    #[test]
    fn test_with_base_url_strips_trailing_slash() {
        let config = Config::new(Some("tok".to_string()))
            .unwrap()
            .with_base_url("http://127.0.0.1:9000/");
        assert_eq!(config.base_url(), "http://127.0.0.1:9000");
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = Config::new(Some("secret-token".to_string())).unwrap();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("<redacted>"));
    }
}
