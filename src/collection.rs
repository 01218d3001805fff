//! In-memory workout collection and the edits the app makes to it.
//!
//! Callers own the state explicitly: load it from storage, apply edits here,
//! save it back.

use uuid::Uuid;

use crate::dates::date_key;
use crate::error::{Result, TrackerError};
use crate::models::{MediaSource, WorkoutRecord};
use crate::stats::NameFilter;
use crate::validation::{validate_draft, ValidatedWorkout, WorkoutDraft};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkoutCollection {
  workouts: Vec<WorkoutRecord>,
}

impl WorkoutCollection {
  pub fn new(workouts: Vec<WorkoutRecord>) -> Self {
    Self { workouts }
  }

  pub fn workouts(&self) -> &[WorkoutRecord] {
    &self.workouts
  }

  pub fn into_inner(self) -> Vec<WorkoutRecord> {
    self.workouts
  }

  pub fn get(&self, id: &str) -> Option<&WorkoutRecord> {
    self.workouts.iter().find(|w| w.id == id)
  }

  /// Validate a form submission and either append it as a new workout or,
  /// with `editing_id`, merge it over the existing one.
  pub fn save_draft(&mut self, draft: &WorkoutDraft, editing_id: Option<&str>) -> Result<&WorkoutRecord> {
    let validated = validate_draft(draft)?;
    match editing_id {
      Some(id) => self.update(id, validated),
      None => Ok(self.add(validated)),
    }
  }

  pub fn add(&mut self, validated: ValidatedWorkout) -> &WorkoutRecord {
    let record = record_from_validated(Uuid::new_v4().to_string(), validated);
    tracing::info!(id = %record.id, name = %record.name, "Workout added");
    self.workouts.push(record);
    &self.workouts[self.workouts.len() - 1]
  }

  /// Replace every form-owned field of the workout with `id`. Legacy
  /// fields the form never writes (`weight`, `media_weight`) are kept.
  pub fn update(&mut self, id: &str, validated: ValidatedWorkout) -> Result<&WorkoutRecord> {
    let slot = self
      .workouts
      .iter()
      .position(|w| w.id == id)
      .ok_or_else(|| TrackerError::NotFound(id.to_string()))?;

    let existing = &self.workouts[slot];
    let mut record = record_from_validated(existing.id.clone(), validated);
    record.weight = existing.weight;
    record.media_weight = existing.media_weight;
    self.workouts[slot] = record;

    tracing::info!(id = %id, "Workout updated");
    Ok(&self.workouts[slot])
  }

  /// Flip `completed`; returns the new value.
  pub fn toggle_complete(&mut self, id: &str) -> Result<bool> {
    let workout = self
      .workouts
      .iter_mut()
      .find(|w| w.id == id)
      .ok_or_else(|| TrackerError::NotFound(id.to_string()))?;
    workout.completed = !workout.completed;
    Ok(workout.completed)
  }

  /// Remove the workout with `id`; returns whether anything was removed.
  pub fn delete(&mut self, id: &str) -> bool {
    let before = self.workouts.len();
    self.workouts.retain(|w| w.id != id);
    let removed = self.workouts.len() < before;
    if removed {
      tracing::info!(id = %id, "Workout deleted");
    }
    removed
  }

  /// Distinct workout names, sorted case-insensitively. These are the
  /// choices for the stats filter besides "all".
  pub fn names(&self) -> Vec<String> {
    let mut names: Vec<String> = self.workouts.iter().map(|w| w.name.clone()).collect();
    names.sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b)));
    names.dedup();
    names
  }

  /// Drop a name filter whose workout no longer exists.
  pub fn reconcile_filter(&self, filter: NameFilter) -> NameFilter {
    match filter {
      NameFilter::Named(name) if !self.workouts.iter().any(|w| w.name == name) => NameFilter::All,
      other => other,
    }
  }
}

/// Stored shape of a validated form: the pyramid plus its denormalized
/// totals, mirrored into `sets`/`reps` for older readers.
fn record_from_validated(id: String, validated: ValidatedWorkout) -> WorkoutRecord {
  let pyramid = validated.pyramid;
  let media_url = match &validated.media {
    Some(source @ MediaSource::Url { .. }) => source.url().to_string(),
    _ => String::new(),
  };

  WorkoutRecord {
    id,
    name: validated.name,
    date: date_key(validated.date),
    notes: validated.notes,
    reminder_offset: validated.reminder_offset,
    completed: validated.completed,
    media_source: validated.media,
    media_url,
    media_type: Some(validated.media_type),
    media_weight: None,
    pyramid_sets: pyramid.entries,
    sets: Some(pyramid.total_sets),
    reps: Some(pyramid.total_reps),
    weight: None,
    total_sets: Some(pyramid.total_sets),
    total_reps: Some(pyramid.total_reps),
    total_weight: Some(pyramid.total_weight),
    total_volume: Some(pyramid.total_volume),
  }
}
