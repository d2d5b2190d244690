//! Etherscan (ETH)

use reqwest::{Client, Url};
use rust_decimal::Decimal;
use serde::Deserialize;

use super::from_smallest_unit;
use crate::error::{Result, WalletError};
use crate::model::Chain;

/// `GET /api?module=account&action=balance`
///
/// `result` carries the wei balance as a decimal string on success and an
/// error description otherwise.
#[derive(Debug, Deserialize)]
struct BalanceResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
    result: String,
}

pub struct EtherscanClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

impl EtherscanClient {
    pub fn new(http: Client, base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            api_key,
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn balance_url(&self, address: &str, api_key: &str) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| WalletError::Config(format!("invalid Etherscan URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|()| WalletError::Config("Etherscan URL cannot be a base".into()))?
            .pop_if_empty()
            .push("api");
        url.query_pairs_mut()
            .append_pair("module", "account")
            .append_pair("action", "balance")
            .append_pair("address", address)
            .append_pair("tag", "latest")
            .append_pair("apikey", api_key);
        Ok(url)
    }

    /// Balance in ETH. Fails without sending anything when no API key is set.
    pub async fn balance(&self, address: &str) -> Result<Decimal> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| WalletError::MissingApiKey("Etherscan".into()))?;
        let url = self.balance_url(address, api_key)?;
        tracing::debug!(address, "Querying Etherscan");

        // The query string carries the API key; keep it out of error text
        let body = self
            .http
            .get(url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(reqwest::Error::without_url)?
            .text()
            .await
            .map_err(reqwest::Error::without_url)?;

        let parsed: BalanceResponse = serde_json::from_str(&body)?;
        if parsed.status.as_deref() == Some("0") {
            return Err(WalletError::Explorer(format!(
                "Etherscan: {} ({})",
                parsed.message.unwrap_or_default(),
                parsed.result
            )));
        }

        let wei: i128 = parsed
            .result
            .trim()
            .parse()
            .map_err(|_| WalletError::Explorer(format!("Etherscan: unexpected result {:?}", parsed.result)))?;

        from_smallest_unit(wei, Chain::Ethereum)
    }
}
