//! BlockCypher (BTC)

use reqwest::{Client, Url};
use rust_decimal::Decimal;
use serde::Deserialize;

use super::from_smallest_unit;
use crate::error::{Result, WalletError};
use crate::model::Chain;

/// `GET /v1/btc/main/addrs/{address}/balance`
#[derive(Debug, Deserialize)]
struct AddressBalance {
    /// Confirmed plus unconfirmed, in satoshi
    final_balance: i64,
}

pub struct BlockCypherClient {
    http: Client,
    base_url: String,
}

impl BlockCypherClient {
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    fn balance_url(&self, address: &str) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| WalletError::Config(format!("invalid BlockCypher URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|()| WalletError::Config("BlockCypher URL cannot be a base".into()))?
            .pop_if_empty()
            .extend(["v1", "btc", "main", "addrs", address, "balance"]);
        Ok(url)
    }

    /// Balance in BTC
    pub async fn balance(&self, address: &str) -> Result<Decimal> {
        let url = self.balance_url(address)?;
        tracing::debug!(%url, "Querying BlockCypher");

        let body = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let parsed: AddressBalance = serde_json::from_str(&body)?;
        from_smallest_unit(i128::from(parsed.final_balance), Chain::Bitcoin)
    }
}
