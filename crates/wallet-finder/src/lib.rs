//! # wallet-finder
//!
//! Register wallet addresses per chat user and scan any address for its
//! balance and an abandonment score.
//!
//! ```text
//! ┌──────────────┐      ┌─────────────────────┐
//! │  commands    │─────▶│ WalletStore         │  SQLite (durable)
//! │  add/list/   │      └─────────────────────┘
//! │  delete/scan │      ┌─────────────────────┐
//! │              │─────▶│ ExplorerClient      │  BlockCypher (BTC)
//! │              │      └─────────────────────┘  Etherscan (ETH)
//! │              │      ┌─────────────────────┐
//! │              │─────▶│ abandonment_score   │  pure
//! └──────────────┘      └─────────────────────┘
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod explorer;
pub mod model;
pub mod scoring;
pub mod store;

pub use commands::{build_registry, CommandOptions};
pub use config::{ExplorerConfig, FinderConfig};
pub use error::{Result, WalletError};
pub use explorer::{ExplorerClient, ExplorerGateway, MockExplorerClient};
pub use model::{Chain, Network, OwnerId, WalletId, WalletRecord, WalletReport};
pub use scoring::{abandonment_score, abandonment_score_at, WalletActivity};
pub use store::{MemoryWalletStore, SqliteWalletStore, WalletStore};
