use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::simulator::BalancePoint;
use crate::ledger::{dates::iso_date, YearMonth};

/// Lowest balance seen in one calendar month and the day it happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyMinimum {
    pub year_month: YearMonth,
    #[serde(with = "iso_date")]
    pub date: NaiveDate,
    pub balance: Decimal,
}

/// Groups records by calendar month, ordered chronologically.
///
/// Ties keep the earliest record of the month.
pub fn monthly_minimums<R: BalancePoint>(records: &[R]) -> Vec<MonthlyMinimum> {
    let mut lowest: BTreeMap<YearMonth, (NaiveDate, Decimal)> = BTreeMap::new();
    for record in records {
        let key = YearMonth::of(record.date());
        let candidate = (record.date(), record.balance());
        lowest
            .entry(key)
            .and_modify(|current| {
                if candidate.1 < current.1 {
                    *current = candidate;
                }
            })
            .or_insert(candidate);
    }
    lowest
        .into_iter()
        .map(|(year_month, (date, balance))| MonthlyMinimum {
            year_month,
            date,
            balance,
        })
        .collect()
}
