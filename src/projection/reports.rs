//! Window-level totals computed straight from the inputs, independent of the
//! day-by-day simulation.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::window::ProjectionWindow;
use crate::errors::Result;
use crate::ledger::{categories::category_or_misc, LedgerInputs};
use crate::money::{checked_add, checked_mul, checked_sum};

/// How a recurring bill contributes to the window total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillTotalPolicy {
    /// `amount × length_months`, regardless of how often the bill lands in the window.
    #[default]
    FlatMultiplier,
    /// `amount ×` the number of days inside the window the bill actually fires on.
    OccurrenceCount,
}

/// Totals keyed by item name or category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Totals(HashMap<String, Decimal>);

impl Totals {
    pub fn get(&self, key: &str) -> Option<Decimal> {
        self.0.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.0.iter().map(|(key, total)| (key.as_str(), *total))
    }

    pub fn grand_total(&self) -> Result<Decimal> {
        checked_sum(self.0.values().copied(), "grand total")
    }

    /// Largest total first; equal totals are ordered by key.
    pub fn sorted_descending(&self) -> Vec<(&str, Decimal)> {
        let mut rows: Vec<_> = self.iter().collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        rows
    }

    /// Accumulates `(key, amount)` pairs; repeated keys are summed.
    pub fn try_from_amounts<I, K>(amounts: I) -> Result<Self>
    where
        I: IntoIterator<Item = Result<(K, Decimal)>>,
        K: Into<String>,
    {
        let mut totals = Totals::default();
        for entry in amounts {
            let (key, amount) = entry?;
            let slot = totals.0.entry(key.into()).or_insert(Decimal::ZERO);
            *slot = checked_add(*slot, amount, "expense totals")?;
        }
        Ok(totals)
    }
}

/// Bill and ad-hoc expense totals keyed by item name.
pub fn totals_by_name(
    inputs: &LedgerInputs,
    policy: BillTotalPolicy,
    window: Option<&ProjectionWindow>,
) -> Result<Totals> {
    Totals::try_from_amounts(
        expense_totals(inputs, policy, window)
            .map(|entry| entry.map(|(name, _, total)| (name, total))),
    )
}

/// Bill and ad-hoc expense totals keyed by category; uncategorised items land in
/// `"Misc/Other"`.
pub fn totals_by_category(
    inputs: &LedgerInputs,
    policy: BillTotalPolicy,
    window: Option<&ProjectionWindow>,
) -> Result<Totals> {
    Totals::try_from_amounts(expense_totals(inputs, policy, window).map(|entry| {
        entry.map(|(_, category, total)| (category_or_misc(category), total))
    }))
}

fn expense_totals<'a>(
    inputs: &'a LedgerInputs,
    policy: BillTotalPolicy,
    window: Option<&'a ProjectionWindow>,
) -> impl Iterator<Item = Result<(&'a str, Option<&'a str>, Decimal)>> {
    let multiplier = Decimal::from(inputs.projection.length_months.max(0));
    let bills = inputs.bills.iter().map(move |bill| {
        let times = match policy {
            BillTotalPolicy::FlatMultiplier => multiplier,
            BillTotalPolicy::OccurrenceCount => Decimal::from(window.map_or(0, |window| {
                window.days().filter(|date| bill.is_due(*date)).count()
            })),
        };
        let total = checked_mul(bill.amount, times, "bill totals")?;
        Ok((bill.name.as_str(), bill.category.as_deref(), total))
    });
    let adhoc = inputs.adhoc_expenses.iter().map(move |item| {
        let total = match policy {
            BillTotalPolicy::FlatMultiplier => item.amount,
            BillTotalPolicy::OccurrenceCount => {
                if window.is_some_and(|window| window.contains(item.date)) {
                    item.amount
                } else {
                    Decimal::ZERO
                }
            }
        };
        Ok((item.name.as_str(), item.category.as_deref(), total))
    });
    bills.chain(adhoc)
}
