//! Configuration
//!
//! Read from the process environment (`.env` is loaded by the binary).

use std::fmt;

use serde::{Deserialize, Serialize};

pub const DEFAULT_DATABASE_URL: &str = "sqlite://wallets.db";
pub const DEFAULT_BLOCKCYPHER_URL: &str = "https://api.blockcypher.com";
pub const DEFAULT_ETHERSCAN_URL: &str = "https://api.etherscan.io";
pub const DEFAULT_LOOKUP_TIMEOUT_SECS: u64 = 10;

/// Explorer gateway configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct ExplorerConfig {
    /// BlockCypher API root (BTC balances)
    pub blockcypher_url: String,

    /// Etherscan API root (ETH balances)
    pub etherscan_url: String,

    /// Without a key ETH lookups are skipped entirely
    #[serde(skip_serializing)]
    pub etherscan_api_key: Option<String>,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl fmt::Debug for ExplorerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExplorerConfig")
            .field("blockcypher_url", &self.blockcypher_url)
            .field("etherscan_url", &self.etherscan_url)
            .field("etherscan_api_key", &self.etherscan_api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            blockcypher_url: DEFAULT_BLOCKCYPHER_URL.into(),
            etherscan_url: DEFAULT_ETHERSCAN_URL.into(),
            etherscan_api_key: None,
            timeout_secs: DEFAULT_LOOKUP_TIMEOUT_SECS,
        }
    }
}

impl ExplorerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key/value source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            blockcypher_url: lookup("BLOCKCYPHER_BASE_URL").unwrap_or(defaults.blockcypher_url),
            etherscan_url: lookup("ETHERSCAN_BASE_URL").unwrap_or(defaults.etherscan_url),
            etherscan_api_key: lookup("ETHERSCAN_API_KEY").filter(|k| !k.trim().is_empty()),
            timeout_secs: lookup("LOOKUP_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(defaults.timeout_secs),
        }
    }
}

/// Wallet finder configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FinderConfig {
    pub database_url: String,

    pub explorer: ExplorerConfig,

    /// Restrict `/delete_wallet` to the caller's own records
    pub scoped_delete: bool,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.into(),
            explorer: ExplorerConfig::default(),
            scoped_delete: false,
        }
    }
}

impl FinderConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into()),
            scoped_delete: lookup("SCOPED_DELETE")
                .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            explorer: ExplorerConfig::from_lookup(&lookup),
        }
    }
}
