use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::dates::iso_date;
use super::recurrence::RecurrenceRule;

pub const MIN_DAY_OF_MONTH: u32 = 1;
pub const MAX_DAY_OF_MONTH: u32 = 31;

/// A bill that fires on the same numeric day of every month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringBill {
    pub name: String,
    #[serde(rename = "date", alias = "dayOfMonth")]
    pub day_of_month: u32,
    pub amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl RecurringBill {
    pub fn new(name: impl Into<String>, day_of_month: u32, amount: Decimal) -> Self {
        Self {
            name: name.into(),
            day_of_month,
            amount,
            category: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn has_valid_day(&self) -> bool {
        (MIN_DAY_OF_MONTH..=MAX_DAY_OF_MONTH).contains(&self.day_of_month)
    }

    /// Months shorter than `day_of_month` are skipped; there is no rollover.
    pub fn is_due(&self, date: NaiveDate) -> bool {
        self.has_valid_day() && self.day_of_month == date.day()
    }
}

/// A one-off expense on a specific date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdhocExpense {
    pub name: String,
    #[serde(with = "iso_date")]
    pub date: NaiveDate,
    pub amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl AdhocExpense {
    pub fn new(name: impl Into<String>, date: NaiveDate, amount: Decimal) -> Self {
        Self {
            name: name.into(),
            date,
            amount,
            category: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn is_due(&self, date: NaiveDate) -> bool {
        self.date == date
    }
}

/// A named savings ledger. `name` is the key contributions refer to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsAccount {
    pub name: String,
    #[serde(default)]
    pub balance: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<Decimal>,
}

impl SavingsAccount {
    pub fn new(name: impl Into<String>, balance: Decimal) -> Self {
        Self {
            name: name.into(),
            balance,
            goal: None,
        }
    }

    pub fn with_goal(mut self, goal: Decimal) -> Self {
        self.goal = Some(goal);
        self
    }
}

/// Recurring transfer into the savings account named by `account_name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsContribution {
    pub account_name: String,
    #[serde(flatten)]
    pub rule: RecurrenceRule,
}

impl SavingsContribution {
    pub fn new(account_name: impl Into<String>, rule: RecurrenceRule) -> Self {
        Self {
            account_name: account_name.into(),
            rule,
        }
    }

    pub fn amount(&self) -> Decimal {
        self.rule.amount
    }

    pub fn is_due(&self, date: NaiveDate) -> bool {
        self.rule.is_due(date)
    }
}

/// Manual override for a single day of the checking ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Adjustment {
    #[serde(with = "iso_date")]
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
}

impl Adjustment {
    pub fn amount(date: NaiveDate, amount: Decimal) -> Self {
        Self {
            date,
            amount: Some(amount),
            event: None,
        }
    }

    pub fn event(date: NaiveDate, event: impl Into<String>) -> Self {
        Self {
            date,
            amount: None,
            event: Some(event.into()),
        }
    }

    pub fn with_event(mut self, event: impl Into<String>) -> Self {
        self.event = Some(event.into());
        self
    }

    /// Event text that should replace the computed label, if any.
    pub fn label_override(&self) -> Option<&str> {
        self.event
            .as_deref()
            .filter(|event| !event.trim().is_empty())
    }
}
