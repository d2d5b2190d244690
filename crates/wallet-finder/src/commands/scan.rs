//! `/scan_address <network> <wallet_address>`

use std::sync::Arc;

use async_trait::async_trait;
use finder_core::{ArgSpec, Command, CommandCall, CommandSpec, Result};

use crate::explorer::ExplorerClient;
use crate::model::{Network, WalletReport};
use crate::scoring::{abandonment_score, WalletActivity};

/// Balance lookup plus abandonment score for any address
pub struct ScanAddressCommand {
    explorer: Arc<dyn ExplorerClient>,
}

impl ScanAddressCommand {
    pub fn new(explorer: Arc<dyn ExplorerClient>) -> Self {
        Self { explorer }
    }

    pub async fn report(&self, network: Network, address: &str) -> WalletReport {
        let balance = self.explorer.lookup_balance(&network, address).await;

        // Transaction history is not fetched yet
        let activity = WalletActivity::unknown();

        WalletReport {
            network,
            address: address.to_string(),
            balance,
            transaction_count: activity.transaction_count,
            abandonment_score: abandonment_score(&activity),
        }
    }
}

#[async_trait]
impl Command for ScanAddressCommand {
    fn spec(&self) -> CommandSpec {
        CommandSpec {
            name: "scan_address".into(),
            description: "Scan a wallet".into(),
            args: vec![ArgSpec::text("network"), ArgSpec::text("wallet_address")],
            listed: true,
        }
    }

    async fn execute(&self, call: &CommandCall) -> Result<String> {
        let network = Network::new(call.arg(0)?);
        let address = call.arg(1)?;

        let report = self.report(network, address).await;
        tracing::info!(
            network = %report.network,
            balance_known = report.balance.is_some(),
            score = report.abandonment_score,
            "Wallet scanned"
        );

        Ok(report.to_string())
    }
}
