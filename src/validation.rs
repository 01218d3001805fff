//! Workout form validation
//!
//! Turns raw form input into a validated draft. Messages are user-facing and
//! keyed by the form field they belong to.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use url::Url;

use crate::dates::parse_local_date;
use crate::models::{MediaKind, MediaSource, PyramidSet};

const MIN_NAME_LEN: usize = 3;
const MAX_REMINDER_OFFSET: i64 = 3;
const MAX_SETS: f64 = 20.0;
const MAX_REPS: f64 = 100.0;
const MAX_WEIGHT_KG: f64 = 500.0;
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
  Name,
  Date,
  MediaUrl,
  MediaFile,
  ReminderOffset,
  Pyramid,
}

/// Field-level errors; the summary message is what the form banner shows.
#[derive(Debug, Clone, Default, PartialEq, Error, Serialize)]
#[error("Please fix the highlighted fields.")]
pub struct ValidationErrors {
  pub fields: BTreeMap<FormField, String>,
}

impl ValidationErrors {
  pub fn is_empty(&self) -> bool {
    self.fields.is_empty()
  }

  pub fn get(&self, field: FormField) -> Option<&str> {
    self.fields.get(&field).map(String::as_str)
  }

  fn set(&mut self, field: FormField, message: &str) {
    self.fields.entry(field).or_insert_with(|| message.to_string());
  }
}

/// One pyramid row as typed into the form. `None` means the box was blank.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PyramidRowInput {
  pub sets: Option<f64>,
  pub reps: Option<f64>,
  pub weight: Option<f64>,
}

impl PyramidRowInput {
  pub fn from_text(sets: &str, reps: &str, weight: &str) -> Self {
    Self {
      sets: parse_field(sets),
      reps: parse_field(reps),
      weight: parse_field(weight),
    }
  }

  fn is_blank(&self) -> bool {
    self.sets.is_none() && self.reps.is_none() && self.weight.is_none()
  }
}

/// Blank or non-numeric input is `None`.
pub fn parse_field(value: &str) -> Option<f64> {
  let trimmed = value.trim();
  if trimmed.is_empty() {
    return None;
  }
  trimmed.parse::<f64>().ok().filter(|n| !n.is_nan())
}

/// Raw form submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutDraft {
  pub name: String,
  pub date: String,
  #[serde(default)]
  pub media_url: String,
  #[serde(default)]
  pub media_type: MediaKind,
  /// A file already read into a data URL, which takes precedence over `media_url`
  #[serde(default)]
  pub media_upload: Option<MediaSource>,
  #[serde(default)]
  pub notes: String,
  #[serde(default)]
  pub reminder_offset: i64,
  #[serde(default)]
  pub completed: bool,
  #[serde(default)]
  pub pyramid_rows: Vec<PyramidRowInput>,
}

/// Pyramid rows that passed validation, with their totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidatedPyramid {
  pub entries: Vec<PyramidSet>,
  pub total_sets: f64,
  pub total_reps: f64,
  pub total_weight: f64,
  pub total_volume: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidatedWorkout {
  pub name: String,
  pub date: NaiveDate,
  pub notes: String,
  pub reminder_offset: u8,
  pub completed: bool,
  pub media: Option<MediaSource>,
  pub media_type: MediaKind,
  pub pyramid: ValidatedPyramid,
}

/// Check the non-pyramid fields.
pub fn validate_form_fields(draft: &WorkoutDraft) -> ValidationErrors {
  let mut errors = ValidationErrors::default();
  let name = draft.name.trim();

  if name.is_empty() {
    errors.set(FormField::Name, "Workout name is required.");
  } else if name.chars().count() < MIN_NAME_LEN {
    errors.set(FormField::Name, "Name must be at least 3 characters.");
  }

  if parse_local_date(draft.date.trim()).is_none() {
    errors.set(FormField::Date, "Pick a workout date.");
  }

  let media_url = draft.media_url.trim();
  if !media_url.is_empty() && Url::parse(media_url).is_err() {
    errors.set(FormField::MediaUrl, "Enter a valid URL (include https://).");
  }

  if let Some(upload) = &draft.media_upload {
    if upload_size(upload.url()) > MAX_UPLOAD_BYTES {
      errors.set(FormField::MediaFile, "File too large. Please select a file under 10MB.");
    }
  }

  if !(0..=MAX_REMINDER_OFFSET).contains(&draft.reminder_offset) {
    errors.set(FormField::ReminderOffset, "Choose a reminder offset between 0-3 days.");
  }

  errors
}

/// Size in bytes of the file behind a data URL. A base64 payload is measured
/// decoded; anything else by its length.
pub fn upload_size(data_url: &str) -> usize {
  let Some((header, payload)) = data_url.split_once(',') else {
    return data_url.len();
  };
  if !header.ends_with(";base64") {
    return payload.len();
  }
  let padding = payload.bytes().rev().take_while(|&b| b == b'=').count();
  (payload.len() / 4 * 3 + payload.len() % 4 * 3 / 4).saturating_sub(padding)
}

/// Validate pyramid rows. Blank rows are skipped, the first problem found is
/// the one reported, and at least one complete row is required.
pub fn validate_pyramid(rows: &[PyramidRowInput]) -> Result<ValidatedPyramid, String> {
  let mut pyramid = ValidatedPyramid::default();
  let mut first_error: Option<&str> = None;

  for row in rows {
    if row.is_blank() {
      continue;
    }

    let (Some(sets), Some(reps), Some(weight)) = (row.sets, row.reps, row.weight) else {
      first_error.get_or_insert("Complete sets, reps, and weight for each row used.");
      continue;
    };

    let whole_in = |value: f64, max: f64| value.fract() == 0.0 && (1.0..=max).contains(&value);
    if !whole_in(sets, MAX_SETS) || !whole_in(reps, MAX_REPS) {
      first_error.get_or_insert("Sets must be 1-20 and reps 1-100.");
      continue;
    }

    if !(0.0..=MAX_WEIGHT_KG).contains(&weight) {
      first_error.get_or_insert("Weight must be between 0 and 500 kg.");
      continue;
    }

    let entry = PyramidSet::new(sets, reps, weight);
    pyramid.total_sets += entry.sets;
    pyramid.total_reps += entry.reps;
    pyramid.total_weight += entry.weight;
    pyramid.total_volume += entry.volume();
    pyramid.entries.push(entry);
  }

  if pyramid.entries.is_empty() {
    first_error.get_or_insert("Enter at least one pyramid set with weight.");
  }

  match first_error {
    Some(message) => Err(message.to_string()),
    None => Ok(pyramid),
  }
}

/// Media chosen on the form: an upload wins, then a typed URL.
pub fn build_media_source(draft: &WorkoutDraft) -> Option<MediaSource> {
  if let Some(upload) = draft.media_upload.as_ref().filter(|m| !m.url().is_empty()) {
    return Some(upload.clone());
  }
  let url = draft.media_url.trim();
  if url.is_empty() {
    return None;
  }
  Some(MediaSource::Url {
    url: url.to_string(),
    kind: draft.media_type,
  })
}

pub fn validate_draft(draft: &WorkoutDraft) -> Result<ValidatedWorkout, ValidationErrors> {
  let mut errors = validate_form_fields(draft);
  let pyramid = validate_pyramid(&draft.pyramid_rows);
  if let Err(message) = &pyramid {
    errors.set(FormField::Pyramid, message);
  }

  let (Ok(pyramid), Some(date), true) = (pyramid, parse_local_date(draft.date.trim()), errors.is_empty()) else {
    tracing::debug!(fields = errors.fields.len(), "Workout form rejected");
    return Err(errors);
  };

  let media = build_media_source(draft);
  Ok(ValidatedWorkout {
    name: draft.name.trim().to_string(),
    date,
    notes: draft.notes.trim().to_string(),
    reminder_offset: draft.reminder_offset as u8,
    completed: draft.completed,
    media_type: media.as_ref().map(MediaSource::kind).unwrap_or(draft.media_type),
    media,
    pyramid,
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  fn row(sets: f64, reps: f64, weight: f64) -> PyramidRowInput {
    PyramidRowInput {
      sets: Some(sets),
      reps: Some(reps),
      weight: Some(weight),
    }
  }

  fn draft() -> WorkoutDraft {
    WorkoutDraft {
      name: "  Bench Press ".to_string(),
      date: "2026-10-15".to_string(),
      notes: " paused reps ".to_string(),
      reminder_offset: 1,
      pyramid_rows: vec![row(3.0, 10.0, 60.0), PyramidRowInput::default(), row(2.0, 6.0, 80.0)],
      ..Default::default()
    }
  }

  #[test]
  fn test_valid_draft() {
    let workout = validate_draft(&draft()).unwrap();
    assert_eq!(workout.name, "Bench Press");
    assert_eq!(workout.notes, "paused reps");
    assert_eq!(workout.reminder_offset, 1);
    assert_eq!(workout.pyramid.entries.len(), 2);
    assert_eq!(workout.pyramid.total_sets, 5.0);
    assert_eq!(workout.pyramid.total_reps, 16.0);
    assert_eq!(workout.pyramid.total_weight, 140.0);
    assert_eq!(workout.pyramid.total_volume, 1080.0);
    assert!(workout.media.is_none());
  }

  #[test]
  fn test_form_field_errors() {
    let mut bad = draft();
    bad.name = " ab ".to_string();
    bad.date = "".to_string();
    bad.media_url = "example.com/pic.png".to_string();
    bad.reminder_offset = 5;

    let errors = validate_draft(&bad).unwrap_err();
    assert_eq!(errors.get(FormField::Name), Some("Name must be at least 3 characters."));
    assert_eq!(errors.get(FormField::Date), Some("Pick a workout date."));
    assert_eq!(errors.get(FormField::MediaUrl), Some("Enter a valid URL (include https://)."));
    assert_eq!(errors.get(FormField::ReminderOffset), Some("Choose a reminder offset between 0-3 days."));
    assert_eq!(errors.get(FormField::Pyramid), None);
    assert_eq!(errors.to_string(), "Please fix the highlighted fields.");

    bad.name = "   ".to_string();
    let errors = validate_draft(&bad).unwrap_err();
    assert_eq!(errors.get(FormField::Name), Some("Workout name is required."));
  }

  #[test]
  fn test_pyramid_rules() {
    let partial = PyramidRowInput { sets: Some(3.0), reps: None, weight: Some(20.0) };
    assert_eq!(
      validate_pyramid(&[partial, row(3.0, 10.0, 20.0)]).unwrap_err(),
      "Complete sets, reps, and weight for each row used."
    );
    assert_eq!(
      validate_pyramid(&[row(21.0, 10.0, 20.0)]).unwrap_err(),
      "Sets must be 1-20 and reps 1-100."
    );
    assert_eq!(
      validate_pyramid(&[row(2.5, 10.0, 20.0)]).unwrap_err(),
      "Sets must be 1-20 and reps 1-100."
    );
    assert_eq!(
      validate_pyramid(&[row(3.0, 10.0, 501.0)]).unwrap_err(),
      "Weight must be between 0 and 500 kg."
    );
    assert_eq!(
      validate_pyramid(&[PyramidRowInput::default()]).unwrap_err(),
      "Enter at least one pyramid set with weight."
    );
    // Bodyweight rows are fine
    assert!(validate_pyramid(&[row(3.0, 12.0, 0.0)]).is_ok());
  }

  #[test]
  fn test_first_pyramid_error_wins() {
    let rows = [row(3.0, 200.0, 20.0), row(3.0, 10.0, -1.0)];
    assert_eq!(validate_pyramid(&rows).unwrap_err(), "Sets must be 1-20 and reps 1-100.");
  }

  #[test]
  fn test_parse_field() {
    assert_eq!(parse_field(""), None);
    assert_eq!(parse_field("  "), None);
    assert_eq!(parse_field("12"), Some(12.0));
    assert_eq!(parse_field("7.5"), Some(7.5));
    assert_eq!(parse_field("ten"), None);
    assert_eq!(PyramidRowInput::from_text("3", "", "x"), PyramidRowInput { sets: Some(3.0), reps: None, weight: None });
  }

  #[test]
  fn test_upload_size() {
    assert_eq!(upload_size("data:image/png;base64,AAAA"), 3);
    assert_eq!(upload_size("data:image/png;base64,AAA="), 2);
    assert_eq!(upload_size("data:image/png;base64,AA=="), 1);
    assert_eq!(upload_size("data:text/plain,hello"), 5);
  }

  #[test]
  fn test_oversized_upload_is_rejected() {
    let payload = "A".repeat((MAX_UPLOAD_BYTES / 3 + 1) * 4);
    let mut form = draft();
    form.media_upload = Some(MediaSource::Upload {
      url: format!("data:video/mp4;base64,{}", payload),
      kind: MediaKind::Video,
      name: "long-set.mp4".to_string(),
    });

    let errors = validate_draft(&form).unwrap_err();
    assert_eq!(errors.get(FormField::MediaFile), Some("File too large. Please select a file under 10MB."));

    // Exactly at the limit is accepted
    let at_limit = "A".repeat(MAX_UPLOAD_BYTES / 3 * 4) + "AA==";
    form.media_upload = Some(MediaSource::Upload {
      url: format!("data:video/mp4;base64,{}", at_limit),
      kind: MediaKind::Video,
      name: "set.mp4".to_string(),
    });
    assert!(validate_draft(&form).is_ok());
  }

  #[test]
  fn test_media_source_precedence() {
    let mut form = draft();
    form.media_url = "https://example.com/bench.mp4".to_string();
    form.media_type = MediaKind::Video;
    let workout = validate_draft(&form).unwrap();
    assert_eq!(
      workout.media,
      Some(MediaSource::Url { url: "https://example.com/bench.mp4".to_string(), kind: MediaKind::Video })
    );

    let upload = MediaSource::Upload {
      url: "data:image/png;base64,AAAA".to_string(),
      kind: MediaKind::Image,
      name: "form.png".to_string(),
    };
    form.media_upload = Some(upload.clone());
    let workout = validate_draft(&form).unwrap();
    assert_eq!(workout.media, Some(upload));
    assert_eq!(workout.media_type, MediaKind::Image);
  }
}
