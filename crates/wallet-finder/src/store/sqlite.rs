//! SQLite-backed wallet store

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tokio::sync::Mutex;

use super::WalletStore;
use crate::error::Result;
use crate::model::{Network, OwnerId, WalletId, WalletRecord};

const MAX_CONNECTIONS: u32 = 5;

pub struct SqliteWalletStore {
    pool: SqlitePool,
    /// Held for the duration of every insert/delete
    write_lock: Mutex<()>,
}

impl SqliteWalletStore {
    /// Open (creating if missing) and apply migrations.
    ///
    /// `sqlite::memory:` is supported for tests; it is pinned to a single
    /// connection since every in-memory connection is its own database.
    pub async fn open(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5));

        let max_connections = if database_url.contains(":memory:") {
            1
        } else {
            MAX_CONNECTIONS
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        sqlx::migrate!().run(&pool).await?;

        tracing::info!(database = database_url, "Wallet store ready");

        Ok(Self {
            pool,
            write_lock: Mutex::new(()),
        })
    }

    /// Cheap connectivity probe
    pub async fn ping(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl WalletStore for SqliteWalletStore {
    async fn insert(&self, owner: OwnerId, network: &Network, address: &str) -> Result<WalletId> {
        let _guard = self.write_lock.lock().await;

        let result = sqlx::query("INSERT INTO wallets (user_id, address, network) VALUES (?, ?, ?)")
            .bind(owner.0)
            .bind(address)
            .bind(network.as_str())
            .execute(&self.pool)
            .await?;

        Ok(WalletId(result.last_insert_rowid()))
    }

    async fn list_by_owner(&self, owner: OwnerId) -> Result<Vec<WalletRecord>> {
        let rows: Vec<(i64, String, String)> =
            sqlx::query_as("SELECT id, network, address FROM wallets WHERE user_id = ? ORDER BY id")
                .bind(owner.0)
                .fetch_all(&self.pool)
                .await?;

        Ok(rows
            .into_iter()
            .map(|(id, network, address)| WalletRecord {
                id: WalletId(id),
                owner,
                network: Network::new(network),
                address,
            })
            .collect())
    }

    async fn delete_by_id(&self, id: WalletId) -> Result<bool> {
        let _guard = self.write_lock.lock().await;

        let result = sqlx::query("DELETE FROM wallets WHERE id = ?")
            .bind(id.0)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_owned(&self, owner: OwnerId, id: WalletId) -> Result<bool> {
        let _guard = self.write_lock.lock().await;

        let result = sqlx::query("DELETE FROM wallets WHERE id = ? AND user_id = ?")
            .bind(id.0)
            .bind(owner.0)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    fn name(&self) -> &str {
        "sqlite"
    }
}
