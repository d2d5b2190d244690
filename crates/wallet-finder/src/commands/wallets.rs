//! Wallet registry commands: add, list, delete

use std::sync::Arc;

use async_trait::async_trait;
use finder_core::{ArgSpec, Command, CommandCall, CommandSpec, Result};

use crate::model::{Network, OwnerId, WalletId};
use crate::store::WalletStore;

pub const NO_WALLETS_REPLY: &str = "You have no wallets saved.";

/// `/add_address <network> <wallet_address>`
pub struct AddAddressCommand {
    store: Arc<dyn WalletStore>,
}

impl AddAddressCommand {
    pub fn new(store: Arc<dyn WalletStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Command for AddAddressCommand {
    fn spec(&self) -> CommandSpec {
        CommandSpec {
            name: "add_address".into(),
            description: "Add wallet".into(),
            args: vec![ArgSpec::text("network"), ArgSpec::text("wallet_address")],
            listed: true,
        }
    }

    async fn execute(&self, call: &CommandCall) -> Result<String> {
        let network = Network::new(call.arg(0)?);
        let address = call.arg(1)?;
        let owner = OwnerId(call.caller_id);

        let id = self.store.insert(owner, &network, address).await?;
        tracing::info!(wallet_id = %id, owner = %owner, network = %network, "Wallet added");

        Ok(format!("✅ Wallet {} on {} added!", address, network))
    }
}

/// `/list_wallets`
pub struct ListWalletsCommand {
    store: Arc<dyn WalletStore>,
}

impl ListWalletsCommand {
    pub fn new(store: Arc<dyn WalletStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Command for ListWalletsCommand {
    fn spec(&self) -> CommandSpec {
        CommandSpec {
            name: "list_wallets".into(),
            description: "List your wallets".into(),
            args: vec![],
            listed: true,
        }
    }

    async fn execute(&self, call: &CommandCall) -> Result<String> {
        let records = self.store.list_by_owner(OwnerId(call.caller_id)).await?;

        if records.is_empty() {
            return Ok(NO_WALLETS_REPLY.into());
        }

        let mut output = String::from("💼 Your wallets:");
        for record in &records {
            output.push('\n');
            output.push_str(&record.to_string());
        }
        Ok(output)
    }
}

/// `/delete_wallet <wallet_id>`
///
/// By default any id can be deleted by anyone; with `scoped` set only the
/// caller's own records are touched. The reply is the same either way.
pub struct DeleteWalletCommand {
    store: Arc<dyn WalletStore>,
    scoped: bool,
}

impl DeleteWalletCommand {
    pub fn new(store: Arc<dyn WalletStore>, scoped: bool) -> Self {
        Self { store, scoped }
    }
}

#[async_trait]
impl Command for DeleteWalletCommand {
    fn spec(&self) -> CommandSpec {
        CommandSpec {
            name: "delete_wallet".into(),
            description: "Remove a wallet".into(),
            args: vec![ArgSpec::integer("wallet_id")],
            listed: true,
        }
    }

    async fn execute(&self, call: &CommandCall) -> Result<String> {
        let id = WalletId(call.arg_i64(0)?);
        let owner = OwnerId(call.caller_id);

        let removed = if self.scoped {
            self.store.delete_owned(owner, id).await?
        } else {
            self.store.delete_by_id(id).await?
        };
        tracing::info!(wallet_id = %id, owner = %owner, removed, scoped = self.scoped, "Wallet delete");

        Ok(format!("🗑 Wallet {} deleted.", id))
    }
}
