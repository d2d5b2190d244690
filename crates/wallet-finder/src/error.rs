//! Error Types for Wallet Finder

use finder_core::CommandError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, WalletError>;

#[derive(Error, Debug)]
pub enum WalletError {
    #[error("Explorer error: {0}")]
    Explorer(String),

    #[error("Network not supported: {0}")]
    UnsupportedNetwork(String),

    #[error("Explorer API key missing for {0}")]
    MissingApiKey(String),

    #[error("Balance out of range: {0}")]
    BalanceOverflow(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl WalletError {
    /// Storage faults are fatal for the command that hit them
    pub fn is_persistence(&self) -> bool {
        matches!(self, WalletError::Database(_) | WalletError::Migration(_))
    }
}

impl From<WalletError> for CommandError {
    fn from(err: WalletError) -> Self {
        if err.is_persistence() {
            return CommandError::Persistence(err.to_string());
        }
        match err {
            WalletError::Config(msg) => CommandError::Config(msg),
            other => CommandError::Lookup(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_error_maps_to_persistence() {
        let err = WalletError::Database(sqlx::Error::PoolClosed);
        assert!(err.is_persistence());
        assert!(matches!(CommandError::from(err), CommandError::Persistence(_)));
    }

    #[test]
    fn test_explorer_error_maps_to_lookup() {
        let err = WalletError::UnsupportedNetwork("DOGE".into());
        assert!(!err.is_persistence());
        assert!(matches!(CommandError::from(err), CommandError::Lookup(_)));
    }
}
