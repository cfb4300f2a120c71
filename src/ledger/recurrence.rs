use std::{fmt, str::FromStr};

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use super::dates::iso_date;
use crate::errors::ProjectionError;

/// How often a recurrence rule produces an occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frequency {
    Weekly,
    BiWeekly,
    Monthly,
    OneTime,
}

impl Frequency {
    /// Spelling used in exported snapshots.
    pub fn label(&self) -> &'static str {
        match self {
            Frequency::Weekly => "Weekly",
            Frequency::BiWeekly => "Bi-weekly",
            Frequency::Monthly => "Monthly",
            Frequency::OneTime => "One-time",
        }
    }

    fn interval_days(&self) -> Option<i64> {
        match self {
            Frequency::Weekly => Some(7),
            Frequency::BiWeekly => Some(14),
            Frequency::Monthly | Frequency::OneTime => None,
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Frequency {
    type Err = ProjectionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized: String = value
            .trim()
            .chars()
            .filter(|ch| !matches!(ch, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "weekly" => Ok(Frequency::Weekly),
            "biweekly" => Ok(Frequency::BiWeekly),
            "monthly" => Ok(Frequency::Monthly),
            "onetime" | "once" => Ok(Frequency::OneTime),
            _ => Err(ProjectionError::UnknownFrequency(value.to_string())),
        }
    }
}

impl Serialize for Frequency {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Frequency {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Frequency::from_str(&value).map_err(de::Error::custom)
    }
}

/// A named amount that recurs from `start_date` onwards. Income entries and
/// savings contributions share this shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrenceRule {
    pub name: String,
    pub amount: Decimal,
    pub frequency: Frequency,
    #[serde(with = "iso_date")]
    pub start_date: NaiveDate,
}

pub type IncomeEntry = RecurrenceRule;

impl RecurrenceRule {
    pub fn new(
        name: impl Into<String>,
        amount: Decimal,
        frequency: Frequency,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            name: name.into(),
            amount,
            frequency,
            start_date,
        }
    }

    /// Returns true when the rule produces an occurrence on `date`.
    ///
    /// Monthly rules match on the exact day of month only, so a rule started on
    /// the 31st skips every month without a 31st day.
    pub fn is_due(&self, date: NaiveDate) -> bool {
        if self.start_date > date {
            return false;
        }
        match self.frequency {
            Frequency::Weekly | Frequency::BiWeekly => {
                let diff_days = date.signed_duration_since(self.start_date).num_days();
                self.frequency
                    .interval_days()
                    .map_or(false, |interval| diff_days % interval == 0)
            }
            Frequency::Monthly => self.start_date.day() == date.day(),
            Frequency::OneTime => self.start_date == date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn rule(frequency: Frequency, start: NaiveDate) -> RecurrenceRule {
        RecurrenceRule::new("Paycheck", dec!(100), frequency, start)
    }

    #[test]
    fn never_due_before_start() {
        let start = date(2025, 3, 10);
        for frequency in [
            Frequency::Weekly,
            Frequency::BiWeekly,
            Frequency::Monthly,
            Frequency::OneTime,
        ] {
            let rule = rule(frequency, start);
            for offset in 1..=60 {
                assert!(
                    !rule.is_due(start - Duration::days(offset)),
                    "{frequency} due {offset} days early"
                );
            }
        }
    }

    #[test]
    fn weekly_and_biweekly_fire_on_fixed_intervals() {
        let start = date(2025, 1, 1);
        let weekly = rule(Frequency::Weekly, start);
        let biweekly = rule(Frequency::BiWeekly, start);
        for offset in 0..60 {
            let day = start + Duration::days(offset);
            assert_eq!(weekly.is_due(day), offset % 7 == 0, "weekly offset {offset}");
            assert_eq!(
                biweekly.is_due(day),
                offset % 14 == 0,
                "biweekly offset {offset}"
            );
        }
    }

    #[test]
    fn monthly_matches_day_of_month_only() {
        let rule = rule(Frequency::Monthly, date(2025, 1, 31));
        assert!(rule.is_due(date(2025, 1, 31)));
        assert!(!rule.is_due(date(2025, 2, 28)));
        assert!(rule.is_due(date(2025, 3, 31)));
        assert!(!rule.is_due(date(2025, 4, 30)));
        assert!(!rule.is_due(date(2025, 5, 1)));
    }

    #[test]
    fn one_time_fires_once() {
        let start = date(2025, 6, 15);
        let rule = rule(Frequency::OneTime, start);
        assert!(rule.is_due(start));
        assert!(!rule.is_due(start + Duration::days(7)));
        assert!(!rule.is_due(date(2025, 7, 15)));
    }

    #[test]
    fn parses_legacy_and_canonical_spellings() {
        assert_eq!("Weekly".parse::<Frequency>().unwrap(), Frequency::Weekly);
        assert_eq!("Bi-weekly".parse::<Frequency>().unwrap(), Frequency::BiWeekly);
        assert_eq!("BiWeekly".parse::<Frequency>().unwrap(), Frequency::BiWeekly);
        assert_eq!("One-time".parse::<Frequency>().unwrap(), Frequency::OneTime);
        assert_eq!("monthly".parse::<Frequency>().unwrap(), Frequency::Monthly);
    }

    #[test]
    fn unknown_frequency_is_rejected_at_construction() {
        let err = "Quarterly".parse::<Frequency>().unwrap_err();
        assert!(matches!(err, ProjectionError::UnknownFrequency(ref raw) if raw == "Quarterly"));

        let json = r#"{"name":"Bonus","amount":10,"frequency":"Yearly","startDate":"2025-01-01"}"#;
        let parsed: Result<RecurrenceRule, _> = serde_json::from_str(json);
        assert!(parsed.is_err());
    }
}
