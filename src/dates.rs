//! Calendar-date helpers.
//!
//! Workout dates are plain `YYYY-MM-DD` strings read by their literal
//! components. They never pass through a timezone-aware parser, so the same
//! digits always mean the same day on every device.

use chrono::{Datelike, Days, Local, NaiveDate};

/// Parse a `YYYY-MM-DD` string into a calendar date.
///
/// Requires exactly three integer components. A component combination that is
/// not a real calendar date (`2026-02-30`) is rejected rather than rolled over.
pub fn parse_local_date(value: &str) -> Option<NaiveDate> {
  let mut parts = value.split('-');
  let year = parts.next()?.trim().parse::<i32>().ok()?;
  let month = parts.next()?.trim().parse::<u32>().ok()?;
  let day = parts.next()?.trim().parse::<u32>().ok()?;
  if parts.next().is_some() {
    return None;
  }
  NaiveDate::from_ymd_opt(year, month, day)
}

/// Zero-padded `YYYY-MM-DD` key for a date.
pub fn date_key(date: NaiveDate) -> String {
  date.format("%Y-%m-%d").to_string()
}

/// Normalize any parseable date string to its canonical key.
pub fn normalize_key(value: &str) -> Option<String> {
  parse_local_date(value).map(date_key)
}

/// The Sunday on or before `date`.
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
  let offset = date.weekday().num_days_from_sunday() as u64;
  date.checked_sub_days(Days::new(offset)).unwrap_or(date)
}

pub fn start_of_month(date: NaiveDate) -> NaiveDate {
  date.checked_sub_days(Days::new(date.day0() as u64)).unwrap_or(date)
}

/// `"{year}-{zero-based month}"`, e.g. `"2026-9"` for October 2026.
pub fn month_key(date: NaiveDate) -> String {
  format!("{}-{}", date.year(), date.month0())
}

/// Move `date` by whole calendar months, keeping the day of month.
///
/// When the target month is too short for that day, the surplus days roll
/// forward into the following month (Jul 31 minus 5 months is Mar 3 in a
/// non-leap year), matching a calendar "set month" rather than a clamp.
pub fn shift_months(date: NaiveDate, months: i32) -> Option<NaiveDate> {
  let total = date.year() * 12 + date.month0() as i32 + months;
  let first = NaiveDate::from_ymd_opt(total.div_euclid(12), total.rem_euclid(12) as u32 + 1, 1)?;
  first.checked_add_days(Days::new(date.day0() as u64))
}

/// Subtract whole days, saturating at the earliest representable date.
pub fn days_before(date: NaiveDate, days: u64) -> NaiveDate {
  date.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN)
}

/// Start of the current local day.
pub fn today() -> NaiveDate {
  Local::now().date_naive()
}
