use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::ledger::LedgerInputs;
use crate::money::{checked_add, checked_sub};

pub const LABEL_SEPARATOR: &str = " + ";
pub const SAVINGS_CONTRIBUTIONS_LABEL: &str = "Savings Contributions";

/// Whether savings contributions also leave the checking ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributionMode {
    /// Contributions only grow their savings ledgers.
    #[default]
    Separate,
    /// Contributions are also deducted from checking on the day they fire.
    DeductFromChecking,
}

/// Everything that happened to the checking ledger on one date, before any
/// adjustment is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DailyEvents {
    pub income: Decimal,
    pub expense: Decimal,
    pub contributions: Decimal,
    pub net_amount: Decimal,
    /// Matched names joined with `" + "`; empty when nothing matched.
    pub label: String,
}

impl DailyEvents {
    pub fn is_empty(&self) -> bool {
        self.label.is_empty()
    }
}

/// Sums every occurrence due on `date`.
///
/// Labels list bills first, then income, then ad-hoc expenses, each in input
/// order. With [`ContributionMode::DeductFromChecking`] a trailing
/// `"Savings Contributions"` marks days where a contribution fired.
pub fn aggregate(
    date: NaiveDate,
    inputs: &LedgerInputs,
    mode: ContributionMode,
) -> Result<DailyEvents> {
    let mut names: Vec<&str> = Vec::new();
    let mut income = Decimal::ZERO;
    let mut expense = Decimal::ZERO;

    for bill in inputs.bills.iter().filter(|bill| bill.is_due(date)) {
        expense = checked_add(expense, bill.amount, "daily expenses")?;
        names.push(&bill.name);
    }
    for entry in inputs.income_entries.iter().filter(|entry| entry.is_due(date)) {
        income = checked_add(income, entry.amount, "daily income")?;
        names.push(&entry.name);
    }
    for item in inputs.adhoc_expenses.iter().filter(|item| item.is_due(date)) {
        expense = checked_add(expense, item.amount, "daily expenses")?;
        names.push(&item.name);
    }

    let mut contributions = Decimal::ZERO;
    if mode == ContributionMode::DeductFromChecking {
        let mut matched = false;
        for contribution in inputs
            .savings_contributions
            .iter()
            .filter(|contribution| contribution.is_due(date))
        {
            contributions =
                checked_add(contributions, contribution.amount(), "daily contributions")?;
            matched = true;
        }
        if matched {
            names.push(SAVINGS_CONTRIBUTIONS_LABEL);
        }
    }

    let net_amount = checked_sub(income, expense, "daily net")
        .and_then(|net| checked_sub(net, contributions, "daily net"))?;
    Ok(DailyEvents {
        income,
        expense,
        contributions,
        net_amount,
        label: names.join(LABEL_SEPARATOR),
    })
}
