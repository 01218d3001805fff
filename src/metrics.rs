//! Derived metrics for a single workout
//!
//! Every consumer (reminder list, log, calendar, stats) reads totals through
//! this module so the legacy fallback order lives in exactly one place.
//!
//! Precedence, per metric:
//! 1. a non-empty `pyramid_sets` is summed row by row
//! 2. otherwise the stored `total_*` scalar, when it is a number
//! 3. otherwise the bare legacy scalar (`sets`, `reps`, `weight`/`media_weight`)
//! 4. otherwise 0
//!
//! Volume is the exception at step 3: it falls back to
//! `total_weight * total_reps` as resolved above.

use serde::{Deserialize, Serialize};

use crate::models::{MediaSource, WorkoutRecord};

/// ---------------------------------------------------------------------------
/// Per-metric resolution
/// ---------------------------------------------------------------------------

pub fn total_sets(record: &WorkoutRecord) -> f64 {
  if record.has_pyramid() {
    return record.pyramid_sets.iter().map(|entry| entry.sets).sum();
  }
  record.total_sets.or(record.sets).unwrap_or(0.0)
}

pub fn total_reps(record: &WorkoutRecord) -> f64 {
  if record.has_pyramid() {
    return record.pyramid_sets.iter().map(|entry| entry.reps).sum();
  }
  record.total_reps.or(record.reps).unwrap_or(0.0)
}

pub fn total_weight(record: &WorkoutRecord) -> f64 {
  if record.has_pyramid() {
    return record.pyramid_sets.iter().map(|entry| entry.weight).sum();
  }
  record
    .total_weight
    .or(record.weight)
    .or(record.media_weight)
    .unwrap_or(0.0)
}

/// Sum of weight x reps per row, not total weight x total reps.
pub fn total_volume(record: &WorkoutRecord) -> f64 {
  if record.has_pyramid() {
    return record.pyramid_sets.iter().map(|entry| entry.volume()).sum();
  }
  record
    .total_volume
    .unwrap_or_else(|| total_weight(record) * total_reps(record))
}

/// ---------------------------------------------------------------------------
/// Bundled totals
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkoutTotals {
  pub sets: f64,
  pub reps: f64,
  pub weight: f64,
  pub volume: f64,
}

impl WorkoutTotals {
  pub fn resolve(record: &WorkoutRecord) -> Self {
    Self {
      sets: total_sets(record),
      reps: total_reps(record),
      weight: total_weight(record),
      volume: total_volume(record),
    }
  }

  /// `"3 sets x 10 reps • 20 kg"`
  pub fn headline(&self) -> String {
    format!(
      "{} sets x {} reps • {}",
      self.sets,
      self.reps,
      weight_label(self.weight)
    )
  }
}

/// ---------------------------------------------------------------------------
/// Display strings
/// ---------------------------------------------------------------------------

/// `"S1:3x10@20 kg • S2:2x6@Bodyweight"` for pyramids, `"4x8"` for legacy
/// records, `"-"` when nothing is known.
pub fn summarize_pyramid(record: &WorkoutRecord) -> String {
  if record.has_pyramid() {
    return record
      .pyramid_sets
      .iter()
      .enumerate()
      .map(|(index, entry)| {
        format!(
          "S{}:{}x{}@{}",
          index + 1,
          entry.sets_text(),
          entry.reps_text(),
          weight_label(entry.display_weight())
        )
      })
      .collect::<Vec<_>>()
      .join(" • ");
  }

  match (record.total_sets, record.total_reps, record.sets, record.reps) {
    (Some(sets), Some(reps), _, _) | (_, _, Some(sets), Some(reps)) => format!("{}x{}", sets, reps),
    _ => "-".to_string(),
  }
}

/// One line per pyramid row, `"Set 1: 3x10 @ 20 kg"`; empty for records
/// without a pyramid.
pub fn pyramid_rows(record: &WorkoutRecord) -> Vec<String> {
  record
    .pyramid_sets
    .iter()
    .enumerate()
    .map(|(index, entry)| {
      format!(
        "Set {}: {}x{} @ {}",
        index + 1,
        entry.sets_text(),
        entry.reps_text(),
        weight_label(entry.display_weight())
      )
    })
    .collect()
}

/// `"Bodyweight"` for anything that is not a positive finite weight,
/// otherwise one decimal place with a trailing `.0` dropped.
pub fn weight_label(value: f64) -> String {
  if !value.is_finite() || value <= 0.0 {
    return "Bodyweight".to_string();
  }
  format!("{} kg", trim_decimal(format!("{:.1}", value)))
}

/// Whole-number rendering with thousands separators: `1234.6` -> `"1,235"`.
pub fn format_number(value: f64) -> String {
  if !value.is_finite() {
    return "0".to_string();
  }
  let rounded = value.round();
  let digits = format!("{}", rounded.abs());
  let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
  for (i, ch) in digits.chars().enumerate() {
    if i > 0 && (digits.len() - i) % 3 == 0 {
      grouped.push(',');
    }
    grouped.push(ch);
  }
  if rounded < 0.0 {
    format!("-{}", grouped)
  } else {
    grouped
  }
}

fn trim_decimal(text: String) -> String {
  match text.strip_suffix(".0") {
    Some(whole) => whole.to_string(),
    None => text,
  }
}

/// ---------------------------------------------------------------------------
/// Media
/// ---------------------------------------------------------------------------

/// The record's media, synthesizing a URL source from the legacy
/// `media_url`/`media_type` pair when no `media_source` is stored.
pub fn resolve_media(record: &WorkoutRecord) -> Option<MediaSource> {
  if let Some(source) = &record.media_source {
    return Some(source.clone());
  }
  if record.media_url.is_empty() {
    return None;
  }
  Some(MediaSource::Url {
    url: record.media_url.clone(),
    kind: record.media_type.unwrap_or_default(),
  })
}
