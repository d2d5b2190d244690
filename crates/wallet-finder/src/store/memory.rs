//! In-memory wallet store (for development/testing)

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::WalletStore;
use crate::error::Result;
use crate::model::{Network, OwnerId, WalletId, WalletRecord};

#[derive(Default)]
struct Inner {
    records: Vec<WalletRecord>,
    last_id: i64,
}

#[derive(Default)]
pub struct MemoryWalletStore {
    inner: RwLock<Inner>,
}

impl MemoryWalletStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl WalletStore for MemoryWalletStore {
    async fn insert(&self, owner: OwnerId, network: &Network, address: &str) -> Result<WalletId> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let id = WalletId(inner.last_id);
        inner.records.push(WalletRecord {
            id,
            owner,
            network: network.clone(),
            address: address.to_string(),
        });
        Ok(id)
    }

    async fn list_by_owner(&self, owner: OwnerId) -> Result<Vec<WalletRecord>> {
        let inner = self.inner.read().await;
        Ok(inner
            .records
            .iter()
            .filter(|r| r.owner == owner)
            .cloned()
            .collect())
    }

    async fn delete_by_id(&self, id: WalletId) -> Result<bool> {
        let mut inner = self.inner.write().await;
        let before = inner.records.len();
        inner.records.retain(|r| r.id != id);
        Ok(inner.records.len() < before)
    }

    async fn delete_owned(&self, owner: OwnerId, id: WalletId) -> Result<bool> {
        let mut inner = self.inner.write().await;
        let before = inner.records.len();
        inner.records.retain(|r| !(r.id == id && r.owner == owner));
        Ok(inner.records.len() < before)
    }

    fn name(&self) -> &str {
        "memory"
    }
}
