use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Coarse state of a running balance, used to color ledger output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceHealth {
    Healthy,
    Low,
    Overdrawn,
}

impl BalanceHealth {
    pub fn classify(balance: Decimal, low_threshold: Decimal) -> Self {
        if balance > low_threshold {
            Self::Healthy
        } else if balance > Decimal::ZERO {
            Self::Low
        } else {
            Self::Overdrawn
        }
    }
}
