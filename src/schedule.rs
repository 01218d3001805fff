//! Reminder list and workout log views
//!
//! Pure functions over the collection: ordering, schedule badges and the
//! reminder wording shown next to each workout.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::dates::parse_local_date;
use crate::metrics::{self, WorkoutTotals};
use crate::models::{MediaSource, WorkoutRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleLabel {
  Completed,
  Today,
  Upcoming,
  Past,
}

impl ScheduleLabel {
  pub fn for_workout(workout: &WorkoutRecord, today: NaiveDate) -> Self {
    if workout.completed {
      return Self::Completed;
    }
    match parse_local_date(&workout.date) {
      Some(date) if date == today => Self::Today,
      Some(date) if date > today => Self::Upcoming,
      _ => Self::Past,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Completed => "Completed",
      Self::Today => "Today",
      Self::Upcoming => "Upcoming",
      Self::Past => "Past",
    }
  }
}

impl std::fmt::Display for ScheduleLabel {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Today or later.
pub fn is_upcoming(date: &str, today: NaiveDate) -> bool {
  parse_local_date(date).is_some_and(|d| d >= today)
}

/// The day the reminder for `workout` is due.
pub fn reminder_date(workout: &WorkoutRecord) -> Option<NaiveDate> {
  parse_local_date(&workout.date)?.checked_sub_days(Days::new(workout.reminder_offset as u64))
}

pub fn describe_reminder(offset: u8) -> String {
  match offset {
    0 => "Reminder on workout day".to_string(),
    1 => "Reminder 1 day before".to_string(),
    n => format!("Reminder {} days before", n),
  }
}

/// `"Thu, Oct 15"`
pub fn format_display_date(date: NaiveDate) -> String {
  date.format("%a, %b %-d").to_string()
}

/// Soonest first. Workouts with unreadable dates lead the list.
pub fn reminder_order(workouts: &[WorkoutRecord]) -> Vec<&WorkoutRecord> {
  let mut sorted: Vec<&WorkoutRecord> = workouts.iter().collect();
  sorted.sort_by_key(|w| parse_local_date(&w.date));
  sorted
}

/// Most recent first. Workouts with unreadable dates trail the list.
pub fn log_order(workouts: &[WorkoutRecord]) -> Vec<&WorkoutRecord> {
  let mut sorted: Vec<&WorkoutRecord> = workouts.iter().collect();
  sorted.sort_by_key(|w| std::cmp::Reverse(parse_local_date(&w.date)));
  sorted
}

/// ---------------------------------------------------------------------------
/// Reminder list entries
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ReminderItem {
  pub id: String,
  pub name: String,
  pub label: ScheduleLabel,
  pub display_date: String,
  /// `"3 sets x 10 reps • 20 kg"`
  pub headline: String,
  pub reminder_text: String,
  pub reminder_date: Option<String>,
  pub notes: String,
  pub media: Option<MediaSource>,
  pub completed: bool,
}

impl ReminderItem {
  pub fn from_record(workout: &WorkoutRecord, today: NaiveDate) -> Self {
    Self {
      id: workout.id.clone(),
      name: workout.name.clone(),
      label: ScheduleLabel::for_workout(workout, today),
      display_date: parse_local_date(&workout.date)
        .map(format_display_date)
        .unwrap_or_else(|| workout.date.clone()),
      headline: WorkoutTotals::resolve(workout).headline(),
      reminder_text: describe_reminder(workout.reminder_offset),
      reminder_date: reminder_date(workout).map(format_display_date),
      notes: if workout.notes.is_empty() {
        "No notes".to_string()
      } else {
        workout.notes.clone()
      },
      media: metrics::resolve_media(workout),
      completed: workout.completed,
    }
  }
}

pub fn reminder_items(workouts: &[WorkoutRecord], today: NaiveDate) -> Vec<ReminderItem> {
  reminder_order(workouts)
    .into_iter()
    .map(|w| ReminderItem::from_record(w, today))
    .collect()
}

/// ---------------------------------------------------------------------------
/// Workout log entries
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
  pub id: String,
  pub name: String,
  pub display_date: String,
  pub status: ScheduleLabel,
  pub totals: WorkoutTotals,
  pub weight_label: String,
  pub volume_label: String,
  /// One line per pyramid row, e.g. `"Set 1: 3x10 @ 20 kg"`; empty for legacy records
  pub rows: Vec<String>,
  pub summary: String,
  pub notes: String,
}

impl LogEntry {
  pub fn from_record(workout: &WorkoutRecord, today: NaiveDate) -> Self {
    let totals = WorkoutTotals::resolve(workout);
    // The log has no "Today" badge: anything not yet done from today on is upcoming
    let status = if workout.completed {
      ScheduleLabel::Completed
    } else if is_upcoming(&workout.date, today) {
      ScheduleLabel::Upcoming
    } else {
      ScheduleLabel::Past
    };

    Self {
      id: workout.id.clone(),
      name: workout.name.clone(),
      display_date: parse_local_date(&workout.date)
        .map(format_display_date)
        .unwrap_or_else(|| workout.date.clone()),
      status,
      totals,
      weight_label: metrics::weight_label(totals.weight),
      volume_label: format!("Volume {}", metrics::format_number(totals.volume)),
      rows: metrics::pyramid_rows(workout),
      summary: metrics::summarize_pyramid(workout),
      notes: workout.notes.clone(),
    }
  }
}

pub fn log_entries(workouts: &[WorkoutRecord], today: NaiveDate) -> Vec<LogEntry> {
  log_order(workouts)
    .into_iter()
    .map(|w| LogEntry::from_record(w, today))
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_utils::{mock_legacy_workout, mock_workout, ymd};

  fn today() -> NaiveDate {
    ymd(2026, 10, 15)
  }

  #[test]
  fn test_schedule_labels() {
    let mut workout = mock_workout("Bench", "2026-10-15", &[(3.0, 10.0, 20.0)]);
    assert_eq!(ScheduleLabel::for_workout(&workout, today()), ScheduleLabel::Today);

    workout.date = "2026-10-20".to_string();
    assert_eq!(ScheduleLabel::for_workout(&workout, today()), ScheduleLabel::Upcoming);

    workout.date = "2026-10-01".to_string();
    assert_eq!(ScheduleLabel::for_workout(&workout, today()), ScheduleLabel::Past);

    workout.date = "garbage".to_string();
    assert_eq!(ScheduleLabel::for_workout(&workout, today()), ScheduleLabel::Past);

    workout.completed = true;
    assert_eq!(ScheduleLabel::for_workout(&workout, today()), ScheduleLabel::Completed);
  }

  #[test]
  fn test_reminder_wording_and_date() {
    assert_eq!(describe_reminder(0), "Reminder on workout day");
    assert_eq!(describe_reminder(1), "Reminder 1 day before");
    assert_eq!(describe_reminder(3), "Reminder 3 days before");

    let mut workout = mock_workout("Bench", "2026-10-01", &[]);
    workout.reminder_offset = 2;
    assert_eq!(reminder_date(&workout), Some(ymd(2026, 9, 29)));
    workout.date = String::new();
    assert_eq!(reminder_date(&workout), None);
  }

  #[test]
  fn test_orderings() {
    let workouts = vec![
      mock_workout("B", "2026-10-10", &[]),
      mock_workout("C", "bad", &[]),
      mock_workout("A", "2026-09-01", &[]),
      mock_workout("D", "2026-11-01", &[]),
    ];

    let reminders: Vec<_> = reminder_order(&workouts).iter().map(|w| w.name.as_str()).collect();
    assert_eq!(reminders, vec!["C", "A", "B", "D"]);

    let log: Vec<_> = log_order(&workouts).iter().map(|w| w.name.as_str()).collect();
    assert_eq!(log, vec!["D", "B", "A", "C"]);
  }

  #[test]
  fn test_reminder_item() {
    let mut workout = mock_workout("Bench Press", "2026-10-16", &[(3.0, 10.0, 20.0)]);
    workout.reminder_offset = 1;
    let item = ReminderItem::from_record(&workout, today());

    assert_eq!(item.label, ScheduleLabel::Upcoming);
    assert_eq!(item.display_date, "Fri, Oct 16");
    assert_eq!(item.headline, "3 sets x 10 reps • 20 kg");
    assert_eq!(item.reminder_text, "Reminder 1 day before");
    assert_eq!(item.reminder_date.as_deref(), Some("Thu, Oct 15"));
    assert_eq!(item.notes, "No notes");
  }

  #[test]
  fn test_log_entry_for_pyramid_and_legacy() {
    let workout = mock_workout("Squat", "2026-10-15", &[(5.0, 5.0, 100.0), (3.0, 3.0, 120.0)]);
    let entry = LogEntry::from_record(&workout, today());
    assert_eq!(entry.status, ScheduleLabel::Upcoming);
    assert_eq!(entry.weight_label, "220 kg");
    assert_eq!(entry.volume_label, "Volume 860");
    assert_eq!(entry.rows, vec!["Set 1: 5x5 @ 100 kg", "Set 2: 3x3 @ 120 kg"]);

    let legacy = mock_legacy_workout("Pushups", "2026-10-01", 4.0, 8.0);
    let entry = LogEntry::from_record(&legacy, today());
    assert_eq!(entry.status, ScheduleLabel::Past);
    assert!(entry.rows.is_empty());
    assert_eq!(entry.summary, "4x8");
    assert_eq!(entry.weight_label, "Bodyweight");
  }
}
