//! Application State

use std::sync::Arc;

use finder_core::CommandRegistry;
use wallet_finder::{ExplorerClient, SqliteWalletStore};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Every bot command, immutable after startup
    pub registry: Arc<CommandRegistry>,

    /// Durable wallet store (also held by the commands)
    pub store: Arc<SqliteWalletStore>,

    /// Balance lookups (also held by `/scan_address`)
    pub explorer: Arc<dyn ExplorerClient>,

    /// ETH lookups are live
    pub etherscan_configured: bool,

    /// Bearer token guarding `/api/command`; `None` disables the endpoint
    pub command_api_token: Option<Arc<str>>,
}
