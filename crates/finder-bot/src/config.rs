//! Process Configuration

use std::fmt;

use thiserror::Error;
use wallet_finder::FinderConfig;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("TELEGRAM_TOKEN not set")]
    MissingToken,
}

/// Everything the binary needs, read once at startup
#[derive(Clone)]
pub struct BotConfig {
    /// Bot API token
    pub telegram_token: String,

    /// Serve the HTTP surface when set, e.g. `0.0.0.0:3000`
    pub bind_addr: Option<String>,

    /// Bearer token for `POST /api/command`; the endpoint is disabled without it
    pub command_api_token: Option<String>,

    pub finder: FinderConfig,
}

impl fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotConfig")
            .field("telegram_token", &"<redacted>")
            .field("bind_addr", &self.bind_addr)
            .field("command_api_token", &self.command_api_token.as_ref().map(|_| "<redacted>"))
            .field("finder", &self.finder)
            .finish()
    }
}

impl BotConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let telegram_token = lookup("TELEGRAM_TOKEN")
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigError::MissingToken)?;

        Ok(Self {
            telegram_token,
            bind_addr: lookup("BIND_ADDR").filter(|a| !a.trim().is_empty()),
            command_api_token: lookup("COMMAND_API_TOKEN").filter(|t| !t.trim().is_empty()),
            finder: FinderConfig::from_lookup(&lookup),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_required() {
        let err = BotConfig::from_lookup(|_| None).unwrap_err();
        assert!(matches!(err, ConfigError::MissingToken));

        let err = BotConfig::from_lookup(|key| (key == "TELEGRAM_TOKEN").then(String::new)).unwrap_err();
        assert!(matches!(err, ConfigError::MissingToken));
    }

    #[test]
    fn test_from_lookup() {
        let config = BotConfig::from_lookup(|key| match key {
            "TELEGRAM_TOKEN" => Some("123:abc".into()),
            "BIND_ADDR" => Some("127.0.0.1:8080".into()),
            "DATABASE_URL" => Some("sqlite://test.db".into()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.telegram_token, "123:abc");
        assert_eq!(config.bind_addr.as_deref(), Some("127.0.0.1:8080"));
        assert_eq!(config.finder.database_url, "sqlite://test.db");
        assert!(!config.finder.scoped_delete);
        assert!(config.command_api_token.is_none());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = BotConfig::from_lookup(|key| match key {
            "TELEGRAM_TOKEN" => Some("123:abc".into()),
            "COMMAND_API_TOKEN" => Some("s3cret".into()),
            "ETHERSCAN_API_KEY" => Some("ethkey".into()),
            _ => None,
        })
        .unwrap();

        let printed = format!("{:?}", config);
        assert_eq!(config.command_api_token.as_deref(), Some("s3cret"));
        for secret in ["123:abc", "s3cret", "ethkey"] {
            assert!(!printed.contains(secret), "{} leaked: {}", secret, printed);
        }
    }
}
