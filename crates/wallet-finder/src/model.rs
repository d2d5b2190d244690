//! Domain Models
//!
//! Wallet records owned by chat users, and the ephemeral scan report.
//! Balances use `rust_decimal` - never use f64 for money!

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Store-assigned record identifier. Never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WalletId(pub i64);

impl fmt::Display for WalletId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of the chat user, supplied by the transport
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnerId(pub i64);

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Chains the explorer gateway knows how to query
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Chain {
    Bitcoin,
    Ethereum,
}

impl Chain {
    /// Smallest-unit exponent (satoshi, wei)
    pub fn decimals(&self) -> u32 {
        match self {
            Chain::Bitcoin => 8,
            Chain::Ethereum => 18,
        }
    }

    pub fn ticker(&self) -> &'static str {
        match self {
            Chain::Bitcoin => "BTC",
            Chain::Ethereum => "ETH",
        }
    }
}

/// Network token as typed by the user, uppercased (e.g. "BTC", "ETH").
///
/// Any non-empty token is accepted; only the gateway cares whether it
/// maps to a known [`Chain`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Network(String);

impl Network {
    pub fn new(token: impl AsRef<str>) -> Self {
        Self(token.as_ref().trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn chain(&self) -> Option<Chain> {
        match self.0.as_str() {
            "BTC" => Some(Chain::Bitcoin),
            "ETH" => Some(Chain::Ethereum),
            _ => None,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Chain> for Network {
    fn from(chain: Chain) -> Self {
        Self::new(chain.ticker())
    }
}

/// A wallet address registered by a user
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletRecord {
    pub id: WalletId,
    pub owner: OwnerId,
    pub network: Network,
    pub address: String,
}

impl fmt::Display for WalletRecord {
    /// `1. [BTC] 1A1zP1...`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. [{}] {}", self.id, self.network, self.address)
    }
}

/// Result of an on-demand wallet scan
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WalletReport {
    pub network: Network,
    pub address: String,

    /// `None` when the explorer lookup failed or the network is unsupported
    pub balance: Option<Decimal>,

    pub transaction_count: u64,

    /// 0.0 (active) ..= 1.0 (abandoned)
    pub abandonment_score: f64,
}

impl fmt::Display for WalletReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let balance = self
            .balance
            .map(|b| b.normalize().to_string())
            .unwrap_or_else(|| "unavailable".into());

        writeln!(f, "📊 Wallet Report:")?;
        writeln!(f, "Network: {}", self.network)?;
        writeln!(f, "Address: {}", self.address)?;
        writeln!(f, "Balance: {}", balance)?;
        writeln!(f, "Transactions: {}", self.transaction_count)?;
        write!(f, "Abandonment Score: {:.2}", self.abandonment_score)
    }
}
