use crate::dates;
use crate::db::AppState;
use crate::models::WorkoutRecord;
use crate::schedule::{self, LogEntry, ReminderItem};
use crate::validation::WorkoutDraft;

use super::{load_collection, persist};

/// ---------------------------------------------------------------------------
/// Queries
/// ---------------------------------------------------------------------------

pub async fn get_workouts(state: &AppState) -> Result<Vec<WorkoutRecord>, String> {
  Ok(load_collection(state).await?.into_inner())
}

/// Reminder list, soonest first.
pub async fn get_reminders(state: &AppState) -> Result<Vec<ReminderItem>, String> {
  let collection = load_collection(state).await?;
  Ok(schedule::reminder_items(collection.workouts(), dates::today()))
}

/// Workout log, most recent first.
pub async fn get_workout_log(state: &AppState) -> Result<Vec<LogEntry>, String> {
  let collection = load_collection(state).await?;
  Ok(schedule::log_entries(collection.workouts(), dates::today()))
}

/// Distinct names for the stats filter.
pub async fn get_workout_names(state: &AppState) -> Result<Vec<String>, String> {
  Ok(load_collection(state).await?.names())
}

/// ---------------------------------------------------------------------------
/// Mutations
/// ---------------------------------------------------------------------------

/// Create a workout, or update the one named by `editing_id`.
pub async fn save_workout(
  state: &AppState,
  draft: WorkoutDraft,
  editing_id: Option<String>,
) -> Result<WorkoutRecord, String> {
  let mut collection = load_collection(state).await?;
  let record = collection
    .save_draft(&draft, editing_id.as_deref())
    .map_err(|e| e.to_string())?
    .clone();
  persist(state, &collection).await?;
  Ok(record)
}

/// Flip a workout's completed flag; returns the new value.
pub async fn toggle_workout(state: &AppState, id: String) -> Result<bool, String> {
  let mut collection = load_collection(state).await?;
  let completed = collection.toggle_complete(&id).map_err(|e| e.to_string())?;
  persist(state, &collection).await?;
  Ok(completed)
}

pub async fn delete_workout(state: &AppState, id: String) -> Result<(), String> {
  let mut collection = load_collection(state).await?;
  if !collection.delete(&id) {
    return Err(format!("Workout not found: {}", id));
  }
  persist(state, &collection).await
}
