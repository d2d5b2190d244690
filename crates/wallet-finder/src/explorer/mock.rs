//! Mock Explorer Client
//!
//! For testing and demo purposes. Answers from a fixed balance table.

use std::collections::HashMap;

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::ExplorerClient;
use crate::error::{Result, WalletError};
use crate::model::{Chain, Network};

/// Mock explorer with static balances
#[derive(Default)]
pub struct MockExplorerClient {
    balances: HashMap<(Network, String), Decimal>,
    /// Simulate a provider outage for every lookup
    offline: bool,
}

impl MockExplorerClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every lookup fails as if the provider were down
    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }

    pub fn with_balance(mut self, network: &str, address: &str, balance: Decimal) -> Self {
        self.balances
            .insert((Network::new(network), address.to_string()), balance);
        self
    }
}

#[async_trait]
impl ExplorerClient for MockExplorerClient {
    async fn get_balance(&self, network: &Network, address: &str) -> Result<Decimal> {
        if network.chain().is_none() {
            return Err(WalletError::UnsupportedNetwork(network.to_string()));
        }
        if self.offline {
            return Err(WalletError::Explorer("mock explorer offline".into()));
        }

        // Unknown addresses exist on-chain with nothing in them
        Ok(self
            .balances
            .get(&(network.clone(), address.to_string()))
            .copied()
            .unwrap_or(Decimal::ZERO))
    }

    fn supported_networks(&self) -> Vec<Network> {
        vec![Network::from(Chain::Bitcoin), Network::from(Chain::Ethereum)]
    }

    fn name(&self) -> &str {
        "MockExplorer"
    }
}
