//! The immutable snapshot every projection run is computed from.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::categories::default_categories;
use super::dates::iso_date;
use super::entries::{AdhocExpense, Adjustment, RecurringBill, SavingsAccount, SavingsContribution};
use super::recurrence::IncomeEntry;
use crate::errors::{ProjectionError, Result};

pub const DEFAULT_PROJECTION_MONTHS: i64 = 1;

/// Where the projection window starts and how many calendar months it spans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionConfig {
    #[serde(default, with = "iso_date::option")]
    pub start_date: Option<NaiveDate>,
    #[serde(rename = "projectionLength", default = "ProjectionConfig::default_length")]
    pub length_months: i64,
}

impl ProjectionConfig {
    pub fn new(start_date: NaiveDate, length_months: i64) -> Self {
        Self {
            start_date: Some(start_date),
            length_months,
        }
    }

    pub fn unconfigured() -> Self {
        Self {
            start_date: None,
            length_months: DEFAULT_PROJECTION_MONTHS,
        }
    }

    fn default_length() -> i64 {
        DEFAULT_PROJECTION_MONTHS
    }
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self::unconfigured()
    }
}

/// Every input collection for one projection. Field names on the wire follow the
/// exported snapshot format so existing exports load unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerInputs {
    #[serde(default)]
    pub account_name: String,
    #[serde(default)]
    pub account_balance: Decimal,
    #[serde(flatten)]
    pub projection: ProjectionConfig,
    #[serde(default)]
    pub bills: Vec<RecurringBill>,
    #[serde(default)]
    pub income_entries: Vec<IncomeEntry>,
    #[serde(default)]
    pub adhoc_expenses: Vec<AdhocExpense>,
    #[serde(default)]
    pub savings_accounts: Vec<SavingsAccount>,
    #[serde(default)]
    pub savings_contributions: Vec<SavingsContribution>,
    #[serde(default, rename = "runningBudgetAdjustments")]
    pub adjustments: Vec<Adjustment>,
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,
}

impl Default for LedgerInputs {
    fn default() -> Self {
        Self {
            account_name: String::new(),
            account_balance: Decimal::ZERO,
            projection: ProjectionConfig::default(),
            bills: Vec::new(),
            income_entries: Vec::new(),
            adhoc_expenses: Vec::new(),
            savings_accounts: Vec::new(),
            savings_contributions: Vec::new(),
            adjustments: Vec::new(),
            categories: default_categories(),
        }
    }
}

impl LedgerInputs {
    pub fn new(account_balance: Decimal) -> Self {
        Self {
            account_balance,
            ..Self::default()
        }
    }

    pub fn with_window(mut self, start_date: NaiveDate, length_months: i64) -> Self {
        self.projection = ProjectionConfig::new(start_date, length_months);
        self
    }

    pub fn with_account_name(mut self, name: impl Into<String>) -> Self {
        self.account_name = name.into();
        self
    }

    pub fn with_bill(mut self, bill: RecurringBill) -> Self {
        self.bills.push(bill);
        self
    }

    pub fn with_income(mut self, income: IncomeEntry) -> Self {
        self.income_entries.push(income);
        self
    }

    pub fn with_adhoc_expense(mut self, expense: AdhocExpense) -> Self {
        self.adhoc_expenses.push(expense);
        self
    }

    pub fn with_savings_account(mut self, account: SavingsAccount) -> Self {
        self.savings_accounts.push(account);
        self
    }

    pub fn with_contribution(mut self, contribution: SavingsContribution) -> Self {
        self.savings_contributions.push(contribution);
        self
    }

    pub fn with_adjustment(mut self, adjustment: Adjustment) -> Self {
        self.adjustments.push(adjustment);
        self
    }

    pub fn savings_account(&self, name: &str) -> Option<&SavingsAccount> {
        self.savings_accounts
            .iter()
            .find(|account| account.name == name)
    }

    /// Contributions grouped by the account they feed, preserving input order.
    pub fn contributions_by_account(&self) -> HashMap<&str, Vec<&SavingsContribution>> {
        let mut grouped: HashMap<&str, Vec<&SavingsContribution>> = HashMap::new();
        for contribution in &self.savings_contributions {
            grouped
                .entry(contribution.account_name.as_str())
                .or_default()
                .push(contribution);
        }
        grouped
    }

    /// Rejects inputs the engine cannot project meaningfully.
    ///
    /// Duplicate adjustment dates are allowed: the first one in input order wins
    /// and the rest are reported when the adjustment index is built.
    pub fn validate(&self) -> Result<()> {
        if let Some(bill) = self.bills.iter().find(|bill| !bill.has_valid_day()) {
            return Err(ProjectionError::InvalidDayOfMonth {
                name: bill.name.clone(),
                day: bill.day_of_month,
            });
        }

        let mut names = HashSet::new();
        for account in &self.savings_accounts {
            if !names.insert(account.name.as_str()) {
                return Err(ProjectionError::DuplicateSavingsAccount(account.name.clone()));
            }
        }

        for contribution in &self.savings_contributions {
            if !names.contains(contribution.account_name.as_str()) {
                return Err(ProjectionError::UnknownSavingsAccount {
                    contribution: contribution.rule.name.clone(),
                    account: contribution.account_name.clone(),
                });
            }
        }

        Ok(())
    }
}
