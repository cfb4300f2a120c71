#![doc(test(attr(deny(warnings))))]

//! Cashflow Core projects a checking balance and any number of savings balances
//! day by day from recurring bills, income, one-off expenses, and manual
//! adjustments, then summarises the result.
//!
//! ```
//! use cashflow_core::ledger::{LedgerInputs, RecurringBill};
//! use cashflow_core::projection::{project, ProjectionOptions};
//! use chrono::NaiveDate;
//! use rust_decimal::Decimal;
//!
//! let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
//! let inputs = LedgerInputs::new(Decimal::from(1000))
//!     .with_window(start, 1)
//!     .with_bill(RecurringBill::new("Rent", 5, Decimal::from(600)));
//! let report = project(&inputs, &ProjectionOptions::default()).unwrap();
//! assert_eq!(report.checking.len(), 32);
//! assert_eq!(report.closing_balance(), Some(Decimal::from(400)));
//! ```

pub mod cli;
pub mod config;
pub mod errors;
pub mod ledger;
pub mod money;
pub mod projection;
pub mod storage;
pub mod utils;

pub use errors::{ProjectionError, Result};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Cashflow Core tracing initialized.");
    });
}
