//! Bot Commands
//!
//! Domain commands implementing `finder_core::Command`.

mod greeting;
mod scan;
mod wallets;

pub use greeting::{HelpCommand, StartCommand, WELCOME_REPLY};
pub use scan::ScanAddressCommand;
pub use wallets::{AddAddressCommand, DeleteWalletCommand, ListWalletsCommand, NO_WALLETS_REPLY};

use std::sync::Arc;

use finder_core::CommandRegistry;

use crate::explorer::ExplorerClient;
use crate::store::WalletStore;

/// Behaviour switches for the command set
#[derive(Clone, Copy, Debug, Default)]
pub struct CommandOptions {
    /// `/delete_wallet` only removes the caller's own records
    pub scoped_delete: bool,
}

/// Register every bot command against the given store and explorer.
///
/// `/help` lists the wallet commands in registration order.
pub fn build_registry(
    store: Arc<dyn WalletStore>,
    explorer: Arc<dyn ExplorerClient>,
    options: CommandOptions,
) -> CommandRegistry {
    let mut registry = CommandRegistry::new();

    registry.register(AddAddressCommand::new(store.clone()));
    registry.register(ListWalletsCommand::new(store.clone()));
    registry.register(ScanAddressCommand::new(explorer));
    registry.register(DeleteWalletCommand::new(store, options.scoped_delete));

    let help = HelpCommand::new(registry.help_text());
    registry.register(StartCommand);
    registry.register(help);

    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use finder_core::{CommandCall, GENERIC_FAILURE_REPLY};
    use rust_decimal_macros::dec;

    use crate::error::{Result, WalletError};
    use crate::explorer::MockExplorerClient;
    use crate::model::{Network, OwnerId, WalletId, WalletRecord};
    use crate::store::{MemoryWalletStore, SqliteWalletStore};

    const ALICE: i64 = 1001;
    const BOB: i64 = 2002;

    /// Store whose backing database is gone
    struct BrokenStore;

    #[async_trait]
    impl WalletStore for BrokenStore {
        async fn insert(&self, _: OwnerId, _: &Network, _: &str) -> Result<WalletId> {
            Err(WalletError::Database(sqlx::Error::PoolClosed))
        }

        async fn list_by_owner(&self, _: OwnerId) -> Result<Vec<WalletRecord>> {
            Err(WalletError::Database(sqlx::Error::PoolClosed))
        }

        async fn delete_by_id(&self, _: WalletId) -> Result<bool> {
            Err(WalletError::Database(sqlx::Error::PoolClosed))
        }

        async fn delete_owned(&self, _: OwnerId, _: WalletId) -> Result<bool> {
            Err(WalletError::Database(sqlx::Error::PoolClosed))
        }

        fn name(&self) -> &str {
            "broken"
        }
    }

    fn call(text: &str, caller: i64) -> CommandCall {
        CommandCall::parse(text, caller).unwrap()
    }

    fn setup(store: Arc<dyn WalletStore>, options: CommandOptions) -> CommandRegistry {
        let explorer = MockExplorerClient::new().with_balance("BTC", "1A1zP1", dec!(68.5));
        build_registry(store, Arc::new(explorer), options)
    }

    #[tokio::test]
    async fn test_start_and_help() {
        let registry = setup(Arc::new(MemoryWalletStore::new()), CommandOptions::default());

        assert_eq!(
            registry.dispatch(&call("/start", ALICE)).await.as_deref(),
            Some(WELCOME_REPLY)
        );
        assert_eq!(
            registry.dispatch(&call("/help", ALICE)).await.unwrap(),
            "/add_address <network> <wallet_address> - Add wallet\n\
             /list_wallets - List your wallets\n\
             /scan_address <network> <wallet_address> - Scan a wallet\n\
             /delete_wallet <wallet_id> - Remove a wallet"
        );
    }

    #[tokio::test]
    async fn test_add_then_list() {
        let store = Arc::new(SqliteWalletStore::open("sqlite::memory:").await.unwrap());
        let registry = setup(store, CommandOptions::default());

        let reply = registry.dispatch(&call("/add_address btc 1A1zP1", ALICE)).await;
        assert_eq!(reply.as_deref(), Some("✅ Wallet 1A1zP1 on BTC added!"));

        let reply = registry.dispatch(&call("/list_wallets", ALICE)).await.unwrap();
        assert_eq!(reply, "💼 Your wallets:\n1. [BTC] 1A1zP1");
    }

    #[tokio::test]
    async fn test_list_only_shows_own_wallets() {
        let registry = setup(Arc::new(MemoryWalletStore::new()), CommandOptions::default());

        registry.dispatch(&call("/add_address eth 0xalice", ALICE)).await;
        registry.dispatch(&call("/add_address eth 0xbob", BOB)).await;

        let reply = registry.dispatch(&call("/list_wallets", BOB)).await.unwrap();
        assert!(reply.contains("0xbob"));
        assert!(!reply.contains("0xalice"));
    }

    #[tokio::test]
    async fn test_list_empty() {
        let registry = setup(Arc::new(MemoryWalletStore::new()), CommandOptions::default());
        assert_eq!(
            registry.dispatch(&call("/list_wallets", ALICE)).await.as_deref(),
            Some(NO_WALLETS_REPLY)
        );
    }

    #[tokio::test]
    async fn test_add_with_one_argument_inserts_nothing() {
        let store = Arc::new(MemoryWalletStore::new());
        let registry = setup(store.clone(), CommandOptions::default());

        let reply = registry.dispatch(&call("/add_address btc", ALICE)).await;
        assert_eq!(
            reply.as_deref(),
            Some("❌ Usage: /add_address <network> <wallet_address>")
        );
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_delete_unknown_id_still_confirms() {
        let registry = setup(Arc::new(MemoryWalletStore::new()), CommandOptions::default());
        assert_eq!(
            registry.dispatch(&call("/delete_wallet 999", ALICE)).await.as_deref(),
            Some("🗑 Wallet 999 deleted.")
        );
    }

    #[tokio::test]
    async fn test_delete_rejects_bad_id() {
        let registry = setup(Arc::new(MemoryWalletStore::new()), CommandOptions::default());
        let usage = Some("❌ Usage: /delete_wallet <wallet_id>");

        assert_eq!(registry.dispatch(&call("/delete_wallet", ALICE)).await.as_deref(), usage);
        assert_eq!(registry.dispatch(&call("/delete_wallet abc", ALICE)).await.as_deref(), usage);
        assert_eq!(registry.dispatch(&call("/delete_wallet 1.5", ALICE)).await.as_deref(), usage);
    }

    #[tokio::test]
    async fn test_delete_is_unscoped_by_default() {
        let store = Arc::new(MemoryWalletStore::new());
        let registry = setup(store.clone(), CommandOptions::default());

        registry.dispatch(&call("/add_address btc 1A1zP1", ALICE)).await;
        registry.dispatch(&call("/delete_wallet 1", BOB)).await;

        assert!(store.list_by_owner(OwnerId(ALICE)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_scoped_delete_protects_other_owners() {
        let store = Arc::new(MemoryWalletStore::new());
        let registry = setup(store.clone(), CommandOptions { scoped_delete: true });

        registry.dispatch(&call("/add_address btc 1A1zP1", ALICE)).await;
        let reply = registry.dispatch(&call("/delete_wallet 1", BOB)).await;
        assert_eq!(reply.as_deref(), Some("🗑 Wallet 1 deleted."));
        assert_eq!(store.list_by_owner(OwnerId(ALICE)).await.unwrap().len(), 1);

        registry.dispatch(&call("/delete_wallet 1", ALICE)).await;
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_scan_report() {
        let registry = setup(Arc::new(MemoryWalletStore::new()), CommandOptions::default());

        let reply = registry.dispatch(&call("/scan_address btc 1A1zP1", ALICE)).await.unwrap();
        assert_eq!(
            reply,
            "📊 Wallet Report:\nNetwork: BTC\nAddress: 1A1zP1\nBalance: 68.5\nTransactions: 0\nAbandonment Score: 1.00"
        );
    }

    #[tokio::test]
    async fn test_scan_with_failing_provider_reports_absent_balance() {
        let registry = build_registry(
            Arc::new(MemoryWalletStore::new()),
            Arc::new(MockExplorerClient::offline()),
            CommandOptions::default(),
        );

        let reply = registry.dispatch(&call("/scan_address eth 0xabc", ALICE)).await.unwrap();
        assert!(reply.starts_with("📊 Wallet Report:"));
        assert!(reply.contains("Network: ETH"));
        assert!(reply.contains("Balance: unavailable"));
    }

    #[tokio::test]
    async fn test_scan_missing_address() {
        let registry = setup(Arc::new(MemoryWalletStore::new()), CommandOptions::default());
        assert_eq!(
            registry.dispatch(&call("/scan_address eth", ALICE)).await.as_deref(),
            Some("❌ Usage: /scan_address <network> <wallet_address>")
        );
    }

    #[tokio::test]
    async fn test_persistence_fault_gets_generic_reply() {
        let registry = setup(Arc::new(BrokenStore), CommandOptions::default());

        for text in ["/add_address btc 1A1zP1", "/list_wallets", "/delete_wallet 3"] {
            assert_eq!(
                registry.dispatch(&call(text, ALICE)).await.as_deref(),
                Some(GENERIC_FAILURE_REPLY),
                "{}",
                text
            );
        }
    }

    #[tokio::test]
    async fn test_unknown_command_is_ignored() {
        let registry = setup(Arc::new(MemoryWalletStore::new()), CommandOptions::default());
        assert!(registry.dispatch(&call("/balance btc x", ALICE)).await.is_none());
        assert_eq!(registry.len(), 6);
    }
}
