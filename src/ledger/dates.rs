//! Calendar helpers shared by every dated input: parsing, month arithmetic, and
//! the `YearMonth` grouping key.

use std::fmt;

use chrono::{DateTime, Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Raised when text cannot be converted into a calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid date `{value}`: expected YYYY-MM-DD")]
pub struct DateParseError {
    pub value: String,
}

/// Parses a calendar date.
///
/// Accepts plain `YYYY-MM-DD` values as well as RFC 3339 timestamps such as
/// `2025-01-01T00:00:00.000Z`, in which case the time of day is discarded.
pub fn parse_date(raw: &str) -> Result<NaiveDate, DateParseError> {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, ISO_DATE_FORMAT) {
        return Ok(date);
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(stamp.date_naive());
    }
    Err(DateParseError {
        value: raw.to_string(),
    })
}

/// Adds whole calendar months, clamping the day to the target month's length
/// (Jan 31 + 1 month is Feb 28/29). Non-positive counts return `date` unchanged.
pub fn add_months(date: NaiveDate, months: i64) -> Option<NaiveDate> {
    if months <= 0 {
        return Some(date);
    }
    let months = u32::try_from(months).ok()?;
    date.checked_add_months(Months::new(months))
}

/// Calendar month key. Ordering is chronological because `year` is compared first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn label(&self) -> String {
        match NaiveDate::from_ymd_opt(self.year, self.month, 1) {
            Some(first) => first.format("%B %Y").to_string(),
            None => self.to_string(),
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

/// `#[serde(with = "iso_date")]` for `NaiveDate` fields that must reject malformed text.
pub mod iso_date {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    use super::{parse_date, ISO_DATE_FORMAT};

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(ISO_DATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_date(&raw).map_err(de::Error::custom)
    }

    /// Optional variant; `null` and empty strings both mean "unset".
    pub mod option {
        use chrono::NaiveDate;
        use serde::{de, Deserialize, Deserializer, Serializer};

        use super::super::{parse_date, ISO_DATE_FORMAT};

        pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match date {
                Some(value) => serializer.serialize_str(&value.format(ISO_DATE_FORMAT).to_string()),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
        where
            D: Deserializer<'de>,
        {
            let raw = Option::<String>::deserialize(deserializer)?;
            match raw {
                Some(text) if !text.trim().is_empty() => {
                    parse_date(&text).map(Some).map_err(de::Error::custom)
                }
                _ => Ok(None),
            }
        }
    }
}
