//! Error Types

use thiserror::Error;

/// Result type alias for command handling
pub type Result<T> = std::result::Result<T, CommandError>;

/// Reply sent when a command fails for a reason the user cannot fix
pub const GENERIC_FAILURE_REPLY: &str =
    "⚠️ Something went wrong on our side. Please try again later.";

/// Command error types
#[derive(Error, Debug)]
pub enum CommandError {
    /// Wrong number or type of command arguments
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// External lookup failed (explorer API, network)
    #[error("Lookup failed: {0}")]
    Lookup(String),

    /// Durable store failed
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Anything else, including a handler panic
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CommandError {
    /// Faults on our side, logged at error level
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            CommandError::Persistence(_) | CommandError::Internal(_)
        )
    }

    /// Stable label for structured logging
    pub fn kind(&self) -> &'static str {
        match self {
            CommandError::InvalidArguments(_) => "invalid_arguments",
            CommandError::Lookup(_) => "lookup",
            CommandError::Persistence(_) => "persistence",
            CommandError::Config(_) => "config",
            CommandError::Internal(_) => "internal",
        }
    }

    /// Convert to the reply shown to the user. Only a store failure gets the
    /// generic reply; everything else, a caught panic included, is answered
    /// with the command's usage line.
    pub fn user_message(&self, usage: &str) -> String {
        if matches!(self, CommandError::Persistence(_)) {
            GENERIC_FAILURE_REPLY.into()
        } else {
            format!("❌ Usage: {}", usage)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persistence_gets_generic_reply() {
        let err = CommandError::Persistence("disk I/O error".into());
        assert!(err.is_internal());
        assert_eq!(err.user_message("/add_address <network>"), GENERIC_FAILURE_REPLY);
    }

    #[test]
    fn test_internal_gets_usage_reply() {
        let err = CommandError::Internal("handler panicked".into());
        assert!(err.is_internal());
        assert_eq!(
            err.user_message("/scan_address <network> <wallet_address>"),
            "❌ Usage: /scan_address <network> <wallet_address>"
        );
    }

    #[test]
    fn test_lookup_gets_usage_reply() {
        let err = CommandError::Lookup("timeout".into());
        assert!(!err.is_internal());
        assert_eq!(
            err.user_message("/scan_address <network> <wallet_address>"),
            "❌ Usage: /scan_address <network> <wallet_address>"
        );
    }
}
