//! Explorer Integration
//!
//! Balance lookups against public block explorers, one provider per chain.

mod blockcypher;
mod etherscan;
mod gateway;
mod mock;

pub use blockcypher::BlockCypherClient;
pub use etherscan::EtherscanClient;
pub use gateway::ExplorerGateway;
pub use mock::MockExplorerClient;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::error::{Result, WalletError};
use crate::model::{Chain, Network};

/// Explorer client trait (Strategy pattern)
#[async_trait]
pub trait ExplorerClient: Send + Sync {
    /// Balance in whole coins (BTC, ETH)
    async fn get_balance(&self, network: &Network, address: &str) -> Result<Decimal>;

    /// Balance, or `None` on any failure. Failures are logged, never returned.
    async fn lookup_balance(&self, network: &Network, address: &str) -> Option<Decimal> {
        match self.get_balance(network, address).await {
            Ok(balance) => Some(balance),
            Err(e @ (WalletError::UnsupportedNetwork(_) | WalletError::MissingApiKey(_))) => {
                tracing::debug!(network = %network, "Skipping balance lookup: {}", e);
                None
            }
            Err(e) => {
                tracing::warn!(network = %network, address, explorer = self.name(), "Balance lookup failed: {}", e);
                None
            }
        }
    }

    /// Networks this client can currently answer for
    fn supported_networks(&self) -> Vec<Network>;

    /// Explorer name
    fn name(&self) -> &str;
}

/// Convert a smallest-unit integer (satoshi, wei) into whole coins
pub fn from_smallest_unit(amount: i128, chain: Chain) -> Result<Decimal> {
    Decimal::try_from_i128_with_scale(amount, chain.decimals())
        .map(|d| d.normalize())
        .map_err(|e| WalletError::BalanceOverflow(format!("{} {}: {}", amount, chain.ticker(), e)))
}
