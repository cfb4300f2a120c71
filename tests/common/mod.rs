#![allow(dead_code)]

use cashflow_core::{
    ledger::{Frequency, LedgerInputs, RecurrenceRule, RecurringBill},
    projection::DayRecord,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// $1000 opening balance, rent of $200 on the 15th, and $1500 salary monthly from Jan 1.
pub fn scenario_a() -> LedgerInputs {
    LedgerInputs::new(dec!(1000))
        .with_account_name("Checking")
        .with_window(date(2025, 1, 1), 1)
        .with_bill(RecurringBill::new("Rent", 15, dec!(200)))
        .with_income(RecurrenceRule::new(
            "Salary",
            dec!(1500),
            Frequency::Monthly,
            date(2025, 1, 1),
        ))
}

pub fn record_on(records: &[DayRecord], day: NaiveDate) -> &DayRecord {
    records
        .iter()
        .find(|record| record.date == day)
        .unwrap_or_else(|| panic!("no record for {day}"))
}

/// Replays a ledger from its opening balance and checks every running total.
pub fn assert_balances_replay(opening: Decimal, records: &[DayRecord]) {
    let mut expected = opening;
    for record in records {
        expected += record.net_amount;
        assert_eq!(record.balance, expected, "balance drifted on {}", record.date);
    }
}

/// A snapshot in the shape the browser export produced.
pub const EXPORTED_SNAPSHOT: &str = r#"{
  "bills": [
    { "name": "Rent", "date": 15, "amount": 200, "category": "Housing" },
    { "name": "Streaming", "date": 31, "amount": 12.5, "category": "" }
  ],
  "incomeEntries": [
    { "name": "Salary", "amount": 1500, "frequency": "Monthly", "startDate": "2025-01-01" }
  ],
  "adhocExpenses": [
    { "name": "Car repair", "date": "2025-01-20", "amount": 300, "category": "Transportation" }
  ],
  "accountBalance": 1000,
  "accountName": "Everyday",
  "startDate": "2025-01-01T00:00:00.000Z",
  "projectionLength": 2,
  "runningBudgetAdjustments": [
    { "date": "2025-01-10", "amount": -50, "event": "Dentist" },
    { "date": "2025-01-12", "event": "" }
  ]
}"#;
