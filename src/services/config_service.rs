use std::env;

use url::Url;

use crate::error::ConfigError;

/// Environment variable holding the backend base URL.
pub const API_BASE_ENV: &str = "PAPERCHAT_API_BASE";

#[derive(Debug, Clone)]
pub struct Config {
    /// Backend base URL without a trailing slash.
    pub api_base: String,
}

impl Config {
    /// Validate and normalize a base URL. Endpoint paths are appended to
    /// it directly, so the trailing slash is stripped here once.
    pub fn new(api_base: &str) -> Result<Self, ConfigError> {
        Url::parse(api_base).map_err(|source| ConfigError::InvalidApiBase {
            raw: api_base.to_string(),
            source,
        })?;

        Ok(Self {
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    /// Read the base URL from the environment. Callers are expected to
    /// fail fast on an error here; nothing works without a backend.
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw = env::var(API_BASE_ENV).map_err(|_| ConfigError::MissingApiBase)?;
        Self::new(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_stripped() {
        let config = Config::new("https://api.example.com/").unwrap();
        assert_eq!(config.api_base, "https://api.example.com");
    }

    #[test]
    fn relative_url_is_rejected() {
        assert!(matches!(
            Config::new("not a url"),
            Err(ConfigError::InvalidApiBase { .. })
        ));
    }
}
