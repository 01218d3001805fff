//! Application-facing operations over the shared [`AppState`].
//!
//! Each command loads the stored collection, works on it and saves it back
//! when it changed. Errors are flattened to display strings for the UI.

pub mod calendar;
pub mod stats;
pub mod workouts;

use crate::collection::WorkoutCollection;
use crate::db::AppState;
use crate::storage;

async fn load_collection(state: &AppState) -> Result<WorkoutCollection, String> {
  storage::load_workouts(&state.db)
    .await
    .map(WorkoutCollection::new)
    .map_err(|e| format!("Failed to load workouts: {}", e))
}

async fn persist(state: &AppState, collection: &WorkoutCollection) -> Result<(), String> {
  storage::save_workouts(&state.db, collection.workouts())
    .await
    .map_err(|e| format!("Failed to save workouts: {}", e))
}
