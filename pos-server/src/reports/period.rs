//! Report Periods
//!
//! Date predicates for the reporting engine. Components are range-checked
//! only (day 1-31, month 1-12, year >= 1970); a date that passes the range
//! check but does not exist on the calendar (Feb 30) produces an empty
//! period rather than an error.

use chrono::{Datelike, Duration, Local, NaiveDate, TimeZone};

use crate::utils::{AppError, AppResult};

/// A reporting window over local calendar time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportPeriod {
    /// One exact calendar day
    Day { day: u32, month: u32, year: i32 },
    /// A whole calendar month
    Month { month: u32, year: i32 },
}

impl ReportPeriod {
    pub fn day(day: u32, month: u32, year: i32) -> AppResult<Self> {
        if !(1..=31).contains(&day) || !(1..=12).contains(&month) || year < 1970 {
            return Err(AppError::validation("invalid dd/mm/yyyy"));
        }
        Ok(Self::Day { day, month, year })
    }

    pub fn month(month: u32, year: i32) -> AppResult<Self> {
        if !(1..=12).contains(&month) || year < 1970 {
            return Err(AppError::validation("invalid month/year"));
        }
        Ok(Self::Month { month, year })
    }

    /// The current local calendar day
    pub fn today() -> Self {
        let now = Local::now();
        Self::Day {
            day: now.day(),
            month: now.month(),
            year: now.year(),
        }
    }

    /// Half-open `[start, end)` range in Unix milliseconds, local timezone.
    /// `None` when the components do not form a real calendar date.
    pub fn range(&self) -> Option<(i64, i64)> {
        let (start_date, end_date) = match *self {
            Self::Day { day, month, year } => {
                let date = NaiveDate::from_ymd_opt(year, month, day)?;
                (date, date + Duration::days(1))
            }
            Self::Month { month, year } => {
                let start = NaiveDate::from_ymd_opt(year, month, 1)?;
                let end = if month == 12 {
                    NaiveDate::from_ymd_opt(year + 1, 1, 1)?
                } else {
                    NaiveDate::from_ymd_opt(year, month + 1, 1)?
                };
                (start, end)
            }
        };

        let start = Local
            .from_local_datetime(&start_date.and_hms_opt(0, 0, 0)?)
            .single()?;
        let end = Local
            .from_local_datetime(&end_date.and_hms_opt(0, 0, 0)?)
            .single()?;
        Some((start.timestamp_millis(), end.timestamp_millis()))
    }

    /// `YYYY-MM-DD` label for day periods
    pub fn date_label(&self) -> Option<String> {
        match *self {
            Self::Day { day, month, year } => Some(format!("{year:04}-{month:02}-{day:02}")),
            Self::Month { .. } => None,
        }
    }
}
