//! Input domain models: recurrence rules, bills, expenses, savings, and adjustments.

pub mod categories;
pub mod dates;
pub mod entries;
pub mod inputs;
pub mod recurrence;

pub use categories::{default_categories, MISC_CATEGORY};
pub use dates::{parse_date, DateParseError, YearMonth};
pub use entries::{AdhocExpense, Adjustment, RecurringBill, SavingsAccount, SavingsContribution};
pub use inputs::{LedgerInputs, ProjectionConfig};
pub use recurrence::{Frequency, IncomeEntry, RecurrenceRule};
