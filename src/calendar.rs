//! Month calendar: a fixed 6x7 grid with per-day workout counts and the
//! details for one selected day.

use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;
use std::collections::HashMap;

use crate::dates::{date_key, normalize_key, parse_local_date, shift_months, start_of_month, start_of_week};
use crate::metrics::{self, WorkoutTotals};
use crate::models::WorkoutRecord;

const GRID_CELLS: u64 = 42;

pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarCell {
  pub key: String,
  pub day: u32,
  pub in_month: bool,
  pub selected: bool,
  pub workout_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalendarMonth {
  /// `"October 2026"`
  pub label: String,
  pub month_start: NaiveDate,
  pub cells: Vec<CalendarCell>,
}

impl CalendarMonth {
  /// Grid for the month containing `cursor`, starting on the Sunday on or
  /// before the 1st.
  pub fn build(workouts: &[WorkoutRecord], cursor: NaiveDate, selected: Option<&str>) -> Self {
    let month_start = start_of_month(cursor);
    let first_cell = start_of_week(month_start);

    let mut counts: HashMap<String, usize> = HashMap::new();
    for workout in workouts {
      if let Some(key) = normalize_key(&workout.date) {
        *counts.entry(key).or_default() += 1;
      }
    }

    let cells = (0..GRID_CELLS)
      .filter_map(|offset| first_cell.checked_add_days(Days::new(offset)))
      .map(|date| {
        let key = date_key(date);
        CalendarCell {
          day: date.day(),
          in_month: date.month() == month_start.month(),
          selected: selected == Some(key.as_str()),
          workout_count: counts.get(&key).copied().unwrap_or(0),
          key,
        }
      })
      .collect();

    Self {
      label: month_start.format("%B %Y").to_string(),
      month_start,
      cells,
    }
  }
}

/// Move the calendar cursor by whole months; the result is always a 1st.
pub fn shift_cursor(cursor: NaiveDate, offset: i32) -> NaiveDate {
  let month_start = start_of_month(cursor);
  shift_months(month_start, offset).unwrap_or(month_start)
}

/// Workouts on the day `key` names, alphabetical by name.
pub fn workouts_on<'a>(workouts: &'a [WorkoutRecord], key: &str) -> Vec<&'a WorkoutRecord> {
  let Some(wanted) = normalize_key(key) else {
    return Vec::new();
  };
  let mut day: Vec<&WorkoutRecord> = workouts
    .iter()
    .filter(|w| normalize_key(&w.date).as_deref() == Some(wanted.as_str()))
    .collect();
  day.sort_by(|a, b| {
    a.name
      .to_lowercase()
      .cmp(&b.name.to_lowercase())
      .then_with(|| a.name.cmp(&b.name))
  });
  day
}

#[derive(Debug, Clone, Serialize)]
pub struct DayDetail {
  pub name: String,
  /// `"3 sets x 10 reps • 20 kg"`
  pub headline: String,
  /// `"Set 1: 3x10 @ 20 kg"`; empty when no pyramid was logged
  pub rows: Vec<String>,
  pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalendarDay {
  pub key: String,
  pub display_date: String,
  pub workouts: Vec<DayDetail>,
}

impl CalendarDay {
  pub fn build(workouts: &[WorkoutRecord], key: &str) -> Option<Self> {
    let date = parse_local_date(key)?;
    let details = workouts_on(workouts, key)
      .into_iter()
      .map(|w| DayDetail {
        name: w.name.clone(),
        headline: WorkoutTotals::resolve(w).headline(),
        rows: metrics::pyramid_rows(w),
        notes: (!w.notes.is_empty()).then(|| w.notes.clone()),
      })
      .collect();

    Some(Self {
      key: date_key(date),
      display_date: crate::schedule::format_display_date(date),
      workouts: details,
    })
  }
}

#[derive(Debug, Clone, Serialize)]
pub struct CalendarView {
  pub weekdays: [&'static str; 7],
  pub month: CalendarMonth,
  pub selected: Option<CalendarDay>,
}

impl CalendarView {
  pub fn build(workouts: &[WorkoutRecord], cursor: NaiveDate, selected: Option<&str>) -> Self {
    Self {
      weekdays: WEEKDAY_LABELS,
      month: CalendarMonth::build(workouts, cursor, selected),
      selected: selected.and_then(|key| CalendarDay::build(workouts, key)),
    }
  }
}
