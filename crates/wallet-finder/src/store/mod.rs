//! Wallet Record Store
//!
//! Durable mapping from record id to (owner, network, address).

mod memory;
mod sqlite;

pub use memory::MemoryWalletStore;
pub use sqlite::SqliteWalletStore;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{Network, OwnerId, WalletId, WalletRecord};

/// Wallet storage trait
///
/// Implementations must serialise writes so ids stay unique under
/// concurrent commands. Ids are never reused, even after deletion.
#[async_trait]
pub trait WalletStore: Send + Sync {
    /// Append a record and return its fresh id
    async fn insert(&self, owner: OwnerId, network: &Network, address: &str) -> Result<WalletId>;

    /// All records of one owner, in insertion order
    async fn list_by_owner(&self, owner: OwnerId) -> Result<Vec<WalletRecord>>;

    /// Remove a record regardless of owner. Unknown ids are a no-op;
    /// returns whether a record was removed.
    async fn delete_by_id(&self, id: WalletId) -> Result<bool>;

    /// Remove a record only if `owner` owns it
    async fn delete_owned(&self, owner: OwnerId, id: WalletId) -> Result<bool>;

    /// Backend name for logs
    fn name(&self) -> &str;
}
