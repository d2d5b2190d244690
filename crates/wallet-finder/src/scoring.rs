//! Abandonment Scoring
//!
//! Heuristic for how likely a wallet is dormant: a year without a
//! transaction saturates the score.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Days of inactivity at which a wallet counts as fully abandoned
pub const ABANDONMENT_HORIZON_DAYS: f64 = 365.0;

/// Activity metadata fed to the scorer
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletActivity {
    pub transaction_count: u64,

    /// Unix seconds of the most recent transaction
    pub last_tx_timestamp: i64,
}

impl WalletActivity {
    pub fn new(transaction_count: u64, last_tx_timestamp: i64) -> Self {
        Self {
            transaction_count,
            last_tx_timestamp,
        }
    }

    /// Placeholder used until transaction history is fetched
    pub fn unknown() -> Self {
        Self::default()
    }
}

/// Score against the wall clock
pub fn abandonment_score(activity: &WalletActivity) -> f64 {
    abandonment_score_at(activity, Utc::now())
}

/// Score in `[0, 1]`, rounded to two decimals.
///
/// No transactions at all is exactly `1`.
pub fn abandonment_score_at(activity: &WalletActivity, now: DateTime<Utc>) -> f64 {
    if activity.transaction_count == 0 {
        return 1.0;
    }

    let now_secs = now.timestamp_millis() as f64 / 1000.0;
    let days_since_last_tx = (now_secs - activity.last_tx_timestamp as f64) / SECONDS_PER_DAY;
    let score = (days_since_last_tx / ABANDONMENT_HORIZON_DAYS).clamp(0.0, 1.0);

    (score * 100.0).round() / 100.0
}
