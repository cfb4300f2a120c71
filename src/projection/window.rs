use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::{ProjectionError, Result};
use crate::ledger::{dates::add_months, ProjectionConfig};

/// Inclusive range of calendar days covered by a projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ProjectionWindow {
    /// Builds the window for `config`.
    ///
    /// Returns `Ok(None)` while no start date is configured. A length of zero or
    /// less collapses the window to the start date alone; lengths above
    /// `max_months` are rejected.
    pub fn from_config(config: &ProjectionConfig, max_months: i64) -> Result<Option<Self>> {
        let Some(start) = config.start_date else {
            return Ok(None);
        };
        if config.length_months > max_months {
            return Err(ProjectionError::WindowTooLarge {
                requested: config.length_months,
                max: max_months,
            });
        }
        let end = add_months(start, config.length_months).ok_or(
            ProjectionError::WindowTooLarge {
                requested: config.length_months,
                max: max_months,
            },
        )?;
        Ok(Some(Self { start, end }))
    }

    pub fn single_day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn len_days(&self) -> usize {
        (self.end.signed_duration_since(self.start).num_days() + 1).max(0) as usize
    }

    /// Every date in the window, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        std::iter::successors(Some(self.start), |day| day.checked_add_days(Days::new(1)))
            .take_while(move |day| *day <= end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn unconfigured_start_yields_no_window() {
        let window = ProjectionWindow::from_config(&ProjectionConfig::unconfigured(), 12).unwrap();
        assert!(window.is_none());
    }

    #[test]
    fn one_month_window_is_inclusive_of_end() {
        let config = ProjectionConfig::new(date(2025, 1, 1), 1);
        let window = ProjectionWindow::from_config(&config, 12).unwrap().unwrap();
        assert_eq!(window.end, date(2025, 2, 1));
        assert_eq!(window.len_days(), 32);
        let days: Vec<_> = window.days().collect();
        assert_eq!(days.first(), Some(&date(2025, 1, 1)));
        assert_eq!(days.last(), Some(&date(2025, 2, 1)));
        assert_eq!(days.len(), 32);
    }

    #[test]
    fn window_length_follows_calendar_months() {
        let february = ProjectionWindow::from_config(&ProjectionConfig::new(date(2025, 2, 1), 1), 12)
            .unwrap()
            .unwrap();
        assert_eq!(february.len_days(), 29);
        let leap = ProjectionWindow::from_config(&ProjectionConfig::new(date(2024, 2, 1), 1), 12)
            .unwrap()
            .unwrap();
        assert_eq!(leap.len_days(), 30);
    }

    #[test]
    fn non_positive_length_collapses_to_single_day() {
        for months in [0, -3] {
            let config = ProjectionConfig::new(date(2025, 4, 10), months);
            let window = ProjectionWindow::from_config(&config, 12).unwrap().unwrap();
            assert_eq!(window, ProjectionWindow::single_day(date(2025, 4, 10)));
            assert_eq!(window.days().count(), 1);
        }
    }

    #[test]
    fn oversized_window_is_rejected() {
        let config = ProjectionConfig::new(date(2025, 1, 1), 10_000);
        let err = ProjectionWindow::from_config(&config, 600).unwrap_err();
        assert!(matches!(
            err,
            ProjectionError::WindowTooLarge {
                requested: 10_000,
                max: 600
            }
        ));
    }
}
