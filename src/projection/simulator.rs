use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::adjustment::AdjustmentIndex;
use super::aggregator::{aggregate, ContributionMode, LABEL_SEPARATOR};
use super::window::ProjectionWindow;
use crate::errors::Result;
use crate::ledger::{dates::iso_date, LedgerInputs, SavingsContribution};
use crate::money::{checked_add, checked_sum};

/// A dated row of a projected ledger.
pub trait BalancePoint {
    fn date(&self) -> NaiveDate;
    fn label(&self) -> &str;
    fn net_amount(&self) -> Decimal;
    fn balance(&self) -> Decimal;
}

/// One day of the checking ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayRecord {
    #[serde(with = "iso_date")]
    pub date: NaiveDate,
    pub label: String,
    pub net_amount: Decimal,
    pub balance: Decimal,
}

/// One day of a savings ledger: the checking record shape plus the day's
/// contribution. With no adjustments here, `net_amount` always equals `contribution`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsDayRecord {
    #[serde(with = "iso_date")]
    pub date: NaiveDate,
    pub label: String,
    pub net_amount: Decimal,
    pub contribution: Decimal,
    pub balance: Decimal,
}

impl BalancePoint for DayRecord {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn net_amount(&self) -> Decimal {
        self.net_amount
    }

    fn balance(&self) -> Decimal {
        self.balance
    }
}

impl BalancePoint for SavingsDayRecord {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn net_amount(&self) -> Decimal {
        self.net_amount
    }

    fn balance(&self) -> Decimal {
        self.balance
    }
}

/// Day-by-day projection of a single savings account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsLedger {
    pub account_name: String,
    pub opening_balance: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<Decimal>,
    pub records: Vec<SavingsDayRecord>,
}

impl SavingsLedger {
    /// Balance after the last projected day, or the opening balance when empty.
    pub fn closing_balance(&self) -> Decimal {
        self.records
            .last()
            .map_or(self.opening_balance, |record| record.balance)
    }

    pub fn total_contributed(&self) -> Result<Decimal> {
        checked_sum(
            self.records.iter().map(|record| record.contribution),
            "total contributed",
        )
    }
}

/// Walks the window day by day and returns the checking ledger.
pub fn simulate_checking(
    inputs: &LedgerInputs,
    window: &ProjectionWindow,
    mode: ContributionMode,
) -> Result<Vec<DayRecord>> {
    let adjustments = AdjustmentIndex::build(&inputs.adjustments);
    let mut records = Vec::with_capacity(window.len_days());
    let mut running_balance = inputs.account_balance;

    for date in window.days() {
        let computed = aggregate(date, inputs, mode)?;
        let overlaid = adjustments.apply(date, &computed, running_balance)?;
        running_balance = overlaid.balance;
        records.push(DayRecord {
            date,
            label: overlaid.label,
            net_amount: overlaid.net_amount,
            balance: overlaid.balance,
        });
    }

    tracing::debug!(
        start = %window.start,
        end = %window.end,
        days = records.len(),
        adjustments = adjustments.len(),
        "simulated checking ledger"
    );
    Ok(records)
}

/// Projects every savings account in input order. Adjustments never apply here.
pub fn simulate_savings(
    inputs: &LedgerInputs,
    window: &ProjectionWindow,
) -> Result<Vec<SavingsLedger>> {
    let grouped = inputs.contributions_by_account();
    inputs
        .savings_accounts
        .iter()
        .map(|account| {
            let contributions = grouped
                .get(account.name.as_str())
                .map(Vec::as_slice)
                .unwrap_or_default();
            Ok(SavingsLedger {
                account_name: account.name.clone(),
                opening_balance: account.balance,
                goal: account.goal,
                records: simulate_savings_account(account.balance, contributions, window)?,
            })
        })
        .collect()
}

fn simulate_savings_account(
    opening_balance: Decimal,
    contributions: &[&SavingsContribution],
    window: &ProjectionWindow,
) -> Result<Vec<SavingsDayRecord>> {
    let mut running_balance = opening_balance;
    window
        .days()
        .map(|date| {
            let due: Vec<&SavingsContribution> = contributions
                .iter()
                .copied()
                .filter(|contribution| contribution.is_due(date))
                .collect();
            let contribution = checked_sum(
                due.iter().map(|contribution| contribution.amount()),
                "daily contributions",
            )?;
            running_balance = checked_add(running_balance, contribution, "savings balance")?;
            Ok(SavingsDayRecord {
                date,
                label: due
                    .iter()
                    .map(|contribution| contribution.rule.name.as_str())
                    .collect::<Vec<_>>()
                    .join(LABEL_SEPARATOR),
                net_amount: contribution,
                contribution,
                balance: running_balance,
            })
        })
        .collect()
}
