//! Deterministic milestone calendar generation.
//!
//! Produces the "desired" milestone set for a cadence and horizon. The core is
//! pure in the reference date, so tests pin `today` and the CLI supplies the
//! local date.

use std::str::FromStr;

use chrono::{Datelike, Days, Local, NaiveDate, Weekday};
use thiserror::Error;

use crate::milestone::{DueDateFormat, Milestone, MilestoneMap};

/// Errors from calendar generation.
#[derive(Debug, Error)]
pub enum CalendarError {
    #[error("invalid cadence: {0} (expected daily, weekly or monthly)")]
    InvalidCadence(String),
}

/// The periodic interval used to generate a milestone schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cadence {
    Daily,
    Weekly,
    Monthly,
}

impl FromStr for Cadence {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            other => Err(CalendarError::InvalidCadence(other.to_string())),
        }
    }
}

/// Generate the desired schedule for `advance` periods of `interval` starting
/// from today's local date.
///
/// Fails on an unknown interval string and returns no partial data.
pub fn generate(
    advance: u32,
    interval: &str,
    format: DueDateFormat,
) -> Result<MilestoneMap, CalendarError> {
    let cadence = interval.parse()?;
    Ok(generate_with(
        Local::now().date_naive(),
        advance,
        cadence,
        format,
    ))
}

/// Typed core of [`generate`], deterministic given `today`.
///
/// Titles are provider-independent (`YYYY-MM-DD`, `{year}-w{week}` or
/// `{year}-{month:02}`); only the due date is rendered in the provider's wire
/// format. Generation stops early once a date would leave chrono's supported
/// range, so an oversized `advance` yields a truncated schedule rather than
/// a panic.
pub fn generate_with(
    today: NaiveDate,
    advance: u32,
    cadence: Cadence,
    format: DueDateFormat,
) -> MilestoneMap {
    let mut milestones = MilestoneMap::new();
    match cadence {
        Cadence::Daily => {
            for i in 0..advance {
                let Some(day) = today.checked_add_days(Days::new(u64::from(i))) else {
                    break;
                };
                let title = day.format("%Y-%m-%d").to_string();
                milestones.insert(title.clone(), Milestone::desired(title, format.format(day)));
            }
        }
        Cadence::Weekly => {
            // Weeks are chained: each iteration advances from the previous
            // week's Sunday rather than recomputing from today. The forward
            // walk to Sunday decides which ISO week the title lands in.
            let mut cursor = Some(today);
            for _ in 0..advance {
                let Some(sunday) = cursor.and_then(next_sunday) else {
                    break;
                };
                let iso = sunday.iso_week();
                let title = format!("{}-w{}", iso.year(), iso.week());
                milestones.insert(
                    title.clone(),
                    Milestone::desired(title, format.format(sunday)),
                );
                cursor = sunday.checked_add_days(Days::new(7));
            }
        }
        Cadence::Monthly => {
            for i in 0..advance {
                let months = i64::from(today.month0()) + i64::from(i);
                let Ok(year) = i32::try_from(i64::from(today.year()) + months / 12) else {
                    break;
                };
                let month = (months % 12 + 1) as u32;
                let Some(due) = last_day_of_month(year, month) else {
                    break;
                };
                let title = format!("{year:04}-{month:02}");
                milestones.insert(title.clone(), Milestone::desired(title, format.format(due)));
            }
        }
    }
    milestones
}

/// Walk forward one day at a time to the next Sunday; a Sunday stays put.
/// `None` once the walk would leave the supported date range.
fn next_sunday(mut day: NaiveDate) -> Option<NaiveDate> {
    while day.weekday() != Weekday::Sun {
        day = day.checked_add_days(Days::new(1))?;
    }
    Some(day)
}

/// Last calendar day of a month: the day before the first of the following
/// month. `None` when the month falls outside the supported date range.
fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year.checked_add(1)?, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1).and_then(|first| first.pred_opt())
}
