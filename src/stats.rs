//! Statistics aggregation for the training chart
//!
//! Buckets the workout collection into a fixed run of consecutive windows
//! anchored at today and reduces each bucket's workouts into summed
//! sets/reps/weight/volume plus a workout count.
//!
//! | range   | buckets | bucket key               | overall window                  |
//! |---------|---------|--------------------------|---------------------------------|
//! | daily   | 7       | `YYYY-MM-DD`             | today-6 days ..= today          |
//! | weekly  | 6       | Sunday of the week       | today-35 days ..= today         |
//! | monthly | 6       | `"{year}-{month0}"`      | today-5 calendar months ..= today |
//!
//! The weekly window counts days while the monthly window counts calendar
//! months, so the oldest weekly/monthly bucket is usually only partly covered.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use chrono::NaiveDate;

use crate::dates::{date_key, days_before, month_key, parse_local_date, shift_months, start_of_week};
use crate::metrics::WorkoutTotals;
use crate::models::WorkoutRecord;

const DAILY_BUCKETS: u64 = 7;
const WEEKLY_BUCKETS: u64 = 6;
const MONTHLY_BUCKETS: i32 = 6;

/// Filter value that selects every workout name.
pub const ALL_WORKOUTS: &str = "all";

/// ---------------------------------------------------------------------------
/// Range: bucket granularity
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatsRange {
  #[default]
  Daily,
  Weekly,
  Monthly,
}

impl std::fmt::Display for StatsRange {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Daily => write!(f, "daily"),
      Self::Weekly => write!(f, "weekly"),
      Self::Monthly => write!(f, "monthly"),
    }
  }
}

impl std::str::FromStr for StatsRange {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "daily" => Ok(Self::Daily),
      "weekly" => Ok(Self::Weekly),
      "monthly" => Ok(Self::Monthly),
      _ => Err(format!("Unknown stats range: {}", s)),
    }
  }
}

impl StatsRange {
  pub fn bucket_count(&self) -> usize {
    match self {
      Self::Daily => DAILY_BUCKETS as usize,
      Self::Weekly => WEEKLY_BUCKETS as usize,
      Self::Monthly => MONTHLY_BUCKETS as usize,
    }
  }

  /// Inclusive lower bound of the overall window. The upper bound is `today`.
  pub fn window_start(&self, today: NaiveDate) -> NaiveDate {
    match self {
      Self::Daily => days_before(today, DAILY_BUCKETS - 1),
      Self::Weekly => days_before(today, (WEEKLY_BUCKETS - 1) * 7),
      Self::Monthly => shift_months(today, -(MONTHLY_BUCKETS - 1)).unwrap_or(NaiveDate::MIN),
    }
  }

  /// Key of the bucket a date belongs to under this range.
  pub fn bucket_key(&self, date: NaiveDate) -> String {
    match self {
      Self::Daily => date_key(date),
      Self::Weekly => date_key(start_of_week(date)),
      Self::Monthly => month_key(date),
    }
  }

  /// Buckets oldest first, ending with the one containing `today`.
  pub fn buckets(&self, today: NaiveDate) -> Vec<StatsBucket> {
    match self {
      Self::Daily => (0..DAILY_BUCKETS)
        .rev()
        .map(|back| {
          let day = days_before(today, back);
          StatsBucket::new(date_key(day), day.format("%a").to_string(), day)
        })
        .collect(),
      Self::Weekly => {
        let this_week = start_of_week(today);
        (0..WEEKLY_BUCKETS)
          .rev()
          .map(|back| {
            let week_start = days_before(this_week, back * 7);
            StatsBucket::new(date_key(week_start), week_start.format("%b %-d").to_string(), week_start)
          })
          .collect()
      }
      Self::Monthly => {
        let this_month = crate::dates::start_of_month(today);
        (0..MONTHLY_BUCKETS)
          .rev()
          .map(|back| {
            let month = shift_months(this_month, -back).unwrap_or(NaiveDate::MIN);
            StatsBucket::new(month_key(month), month.format("%b").to_string(), month)
          })
          .collect()
      }
    }
  }
}

/// ---------------------------------------------------------------------------
/// Name filter
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NameFilter {
  #[default]
  All,
  /// Exact, case-sensitive workout name
  Named(String),
}

impl NameFilter {
  pub fn matches(&self, name: &str) -> bool {
    match self {
      Self::All => true,
      Self::Named(wanted) => wanted == name,
    }
  }

  /// `None`, an empty string and `"all"` all mean no filter.
  pub fn from_option(value: Option<&str>) -> Self {
    match value {
      None => Self::All,
      Some(name) => Self::from(name.to_string()),
    }
  }
}

impl From<String> for NameFilter {
  fn from(value: String) -> Self {
    if value.is_empty() || value == ALL_WORKOUTS {
      Self::All
    } else {
      Self::Named(value)
    }
  }
}

impl From<NameFilter> for String {
  fn from(filter: NameFilter) -> Self {
    match filter {
      NameFilter::All => ALL_WORKOUTS.to_string(),
      NameFilter::Named(name) => name,
    }
  }
}

/// ---------------------------------------------------------------------------
/// Buckets and totals
/// ---------------------------------------------------------------------------

/// Summed metrics for a set of workouts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsTotals {
  pub workouts: usize,
  pub sets: f64,
  pub reps: f64,
  pub weight: f64,
  pub volume: f64,
}

impl StatsTotals {
  fn add_workout(&mut self, totals: &WorkoutTotals) {
    self.workouts += 1;
    self.sets += totals.sets;
    self.reps += totals.reps;
    self.weight += totals.weight;
    self.volume += totals.volume;
  }

  fn absorb(&mut self, other: &StatsTotals) {
    self.workouts += other.workouts;
    self.sets += other.sets;
    self.reps += other.reps;
    self.weight += other.weight;
    self.volume += other.volume;
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsBucket {
  pub key: String,
  pub label: String,
  /// First day the bucket covers
  pub start: NaiveDate,
  pub totals: StatsTotals,
}

impl StatsBucket {
  fn new(key: String, label: String, start: NaiveDate) -> Self {
    Self {
      key,
      label,
      start,
      totals: StatsTotals::default(),
    }
  }
}

/// Chart-ready output: parallel series, one element per bucket, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsReport {
  pub range: StatsRange,
  pub labels: Vec<String>,
  pub sets: Vec<f64>,
  pub reps: Vec<f64>,
  pub weight: Vec<f64>,
  pub volume: Vec<f64>,
  pub workouts: Vec<usize>,
  pub totals: StatsTotals,
}

impl StatsReport {
  fn from_buckets(range: StatsRange, buckets: &[StatsBucket]) -> Self {
    let mut totals = StatsTotals::default();
    for bucket in buckets {
      totals.absorb(&bucket.totals);
    }

    Self {
      range,
      labels: buckets.iter().map(|b| b.label.clone()).collect(),
      sets: buckets.iter().map(|b| b.totals.sets).collect(),
      reps: buckets.iter().map(|b| b.totals.reps).collect(),
      weight: buckets.iter().map(|b| b.totals.weight).collect(),
      volume: buckets.iter().map(|b| b.totals.volume).collect(),
      workouts: buckets.iter().map(|b| b.totals.workouts).collect(),
      totals,
    }
  }
}

/// ---------------------------------------------------------------------------
/// Aggregation
/// ---------------------------------------------------------------------------

/// Fill the buckets for `range` from `workouts`.
///
/// A workout counts when its date parses, lies inside the range's overall
/// window and its name passes `filter`; it then lands in exactly one bucket.
pub fn aggregate_buckets(
  workouts: &[WorkoutRecord],
  range: StatsRange,
  filter: &NameFilter,
  today: NaiveDate,
) -> Vec<StatsBucket> {
  let mut buckets = range.buckets(today);
  let window_start = range.window_start(today);
  let index: HashMap<String, usize> = buckets
    .iter()
    .enumerate()
    .map(|(i, bucket)| (bucket.key.clone(), i))
    .collect();

  for workout in workouts {
    let Some(date) = parse_local_date(&workout.date) else {
      continue;
    };
    if date < window_start || date > today {
      continue;
    }
    if !filter.matches(&workout.name) {
      continue;
    }
    if let Some(&slot) = index.get(&range.bucket_key(date)) {
      buckets[slot].totals.add_workout(&WorkoutTotals::resolve(workout));
    }
  }

  buckets
}

pub fn build_stats(
  workouts: &[WorkoutRecord],
  range: StatsRange,
  filter: &NameFilter,
  today: NaiveDate,
) -> StatsReport {
  let buckets = aggregate_buckets(workouts, range, filter, today);
  let report = StatsReport::from_buckets(range, &buckets);

  tracing::debug!(
    range = %range,
    buckets = buckets.len(),
    workouts = report.totals.workouts,
    "Built workout stats"
  );

  report
}

/// [`build_stats`] anchored at the local clock's current day.
pub fn build_stats_for_today(
  workouts: &[WorkoutRecord],
  range: StatsRange,
  filter: &NameFilter,
) -> StatsReport {
  build_stats(workouts, range, filter, crate::dates::today())
}
