use std::collections::{hash_map::Entry, HashMap};

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::aggregator::DailyEvents;
use crate::errors::Result;
use crate::ledger::Adjustment;
use crate::money::checked_add;

/// Result of laying an adjustment (if any) over one day's computed events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlaid {
    pub net_amount: Decimal,
    pub balance: Decimal,
    pub label: String,
    pub adjusted: bool,
}

/// Applies `adjustment` to the computed events for a day.
///
/// A defined amount replaces the computed net outright, a non-blank event
/// replaces the label, and the balance always advances by the final net.
pub fn apply_adjustment(
    adjustment: Option<&Adjustment>,
    computed: &DailyEvents,
    previous_balance: Decimal,
) -> Result<Overlaid> {
    let mut net_amount = computed.net_amount;
    let mut label = computed.label.clone();
    if let Some(adjustment) = adjustment {
        if let Some(amount) = adjustment.amount {
            net_amount = amount;
        }
        if let Some(event) = adjustment.label_override() {
            label = event.to_string();
        }
    }
    Ok(Overlaid {
        net_amount,
        balance: checked_add(previous_balance, net_amount, "checking balance")?,
        label,
        adjusted: adjustment.is_some(),
    })
}

/// Date-keyed view over the adjustment list.
///
/// When several adjustments share a date the first one in input order wins;
/// the others are ignored and logged.
#[derive(Debug, Default)]
pub struct AdjustmentIndex<'a> {
    by_date: HashMap<NaiveDate, &'a Adjustment>,
}

impl<'a> AdjustmentIndex<'a> {
    pub fn build(adjustments: &'a [Adjustment]) -> Self {
        let mut by_date = HashMap::with_capacity(adjustments.len());
        for adjustment in adjustments {
            match by_date.entry(adjustment.date) {
                Entry::Vacant(slot) => {
                    slot.insert(adjustment);
                }
                Entry::Occupied(_) => {
                    tracing::warn!(
                        date = %adjustment.date,
                        "ignoring duplicate adjustment; the first one for this date wins"
                    );
                }
            }
        }
        Self { by_date }
    }

    pub fn get(&self, date: NaiveDate) -> Option<&'a Adjustment> {
        self.by_date.get(&date).copied()
    }

    pub fn apply(
        &self,
        date: NaiveDate,
        computed: &DailyEvents,
        previous_balance: Decimal,
    ) -> Result<Overlaid> {
        apply_adjustment(self.get(date), computed, previous_balance)
    }

    pub fn len(&self) -> usize {
        self.by_date.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_date.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn computed() -> DailyEvents {
        DailyEvents {
            income: dec!(1500),
            expense: dec!(200),
            contributions: dec!(0),
            net_amount: dec!(1300),
            label: "Rent + Salary".into(),
        }
    }

    #[test]
    fn no_adjustment_passes_computed_values_through() {
        let overlaid = apply_adjustment(None, &computed(), dec!(100)).unwrap();
        assert_eq!(overlaid.net_amount, dec!(1300));
        assert_eq!(overlaid.balance, dec!(1400));
        assert_eq!(overlaid.label, "Rent + Salary");
        assert!(!overlaid.adjusted);
    }

    #[test]
    fn amount_replaces_rather_than_adds() {
        let adjustment = Adjustment::amount(date(2025, 1, 10), dec!(-50));
        let overlaid = apply_adjustment(Some(&adjustment), &computed(), dec!(100)).unwrap();
        assert_eq!(overlaid.net_amount, dec!(-50));
        assert_eq!(overlaid.balance, dec!(50));
        assert_eq!(overlaid.label, "Rent + Salary");
        assert!(overlaid.adjusted);
    }

    #[test]
    fn event_only_keeps_computed_net() {
        let adjustment = Adjustment::event(date(2025, 1, 10), "Paid early");
        let overlaid = apply_adjustment(Some(&adjustment), &computed(), dec!(100)).unwrap();
        assert_eq!(overlaid.net_amount, dec!(1300));
        assert_eq!(overlaid.balance, dec!(1400));
        assert_eq!(overlaid.label, "Paid early");
    }

    #[test]
    fn balance_overflow_is_reported() {
        let adjustment = Adjustment::amount(date(2025, 1, 10), Decimal::MAX);
        let err = apply_adjustment(Some(&adjustment), &computed(), dec!(1)).unwrap_err();
        assert!(matches!(err, crate::ProjectionError::AmountOutOfRange(_)));
    }

    #[test]
    fn first_adjustment_for_a_date_wins() {
        let day = date(2025, 1, 10);
        let adjustments = vec![
            Adjustment::amount(day, dec!(-50)),
            Adjustment::amount(day, dec!(-75)),
            Adjustment::amount(date(2025, 1, 11), dec!(5)),
        ];
        let index = AdjustmentIndex::build(&adjustments);
        assert_eq!(index.len(), 2);
        assert_eq!(index.get(day).and_then(|adj| adj.amount), Some(dec!(-50)));
        assert!(index.get(date(2025, 1, 12)).is_none());
    }
}
