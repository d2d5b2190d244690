//! HTTP explorer gateway: routes each network to its provider.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;

use super::{BlockCypherClient, EtherscanClient, ExplorerClient};
use crate::config::ExplorerConfig;
use crate::error::{Result, WalletError};
use crate::model::{Chain, Network};

pub struct ExplorerGateway {
    bitcoin: BlockCypherClient,
    ethereum: EtherscanClient,
}

impl ExplorerGateway {
    /// Both providers share one HTTP client with a bounded timeout
    pub fn new(config: &ExplorerConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("wallet-finder/", env!("CARGO_PKG_VERSION")))
            .build()?;

        if config.etherscan_api_key.is_none() {
            tracing::warn!("ETHERSCAN_API_KEY not set - ETH balances will be unavailable");
        }

        Ok(Self {
            bitcoin: BlockCypherClient::new(http.clone(), &config.blockcypher_url),
            ethereum: EtherscanClient::new(
                http,
                &config.etherscan_url,
                config.etherscan_api_key.clone(),
            ),
        })
    }
}

#[async_trait]
impl ExplorerClient for ExplorerGateway {
    async fn get_balance(&self, network: &Network, address: &str) -> Result<Decimal> {
        match network.chain() {
            Some(Chain::Bitcoin) => self.bitcoin.balance(address).await,
            Some(Chain::Ethereum) => self.ethereum.balance(address).await,
            None => Err(WalletError::UnsupportedNetwork(network.to_string())),
        }
    }

    fn supported_networks(&self) -> Vec<Network> {
        let mut networks = vec![Network::from(Chain::Bitcoin)];
        if self.ethereum.has_api_key() {
            networks.push(Network::from(Chain::Ethereum));
        }
        networks
    }

    fn name(&self) -> &str {
        "explorer-gateway"
    }
}
