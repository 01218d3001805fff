//! Test utilities and helpers for integration and unit testing
//!
//! This module provides common test infrastructure including:
//! - Database setup/teardown
//! - Mock data factories
//! - Helper assertions

use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::config::AppConfig;
use crate::db::AppState;
use crate::models::{PyramidSet, WorkoutRecord};
use crate::storage;
use crate::validation::{PyramidRowInput, WorkoutDraft};

/// ---------------------------------------------------------------------------
/// Database Test Utilities
/// ---------------------------------------------------------------------------

/// Create an in-memory SQLite database for testing
/// Runs all migrations and returns a ready-to-use pool
///
/// Uses max_connections(1) to prevent multiple pool connections from creating
/// isolated in-memory databases, which would cause intermittent test failures
pub async fn setup_test_db() -> SqlitePool {
  let pool = sqlx::sqlite::SqlitePoolOptions::new()
    .max_connections(1)
    .connect("sqlite::memory:")
    .await
    .expect("Failed to create in-memory database");

  sqlx::migrate!("./migrations")
    .run(&pool)
    .await
    .expect("Failed to run migrations");

  pool
}

/// Close a test database pool
pub async fn teardown_test_db(pool: SqlitePool) {
  pool.close().await;
}

/// App state backed by a fresh in-memory database
pub async fn setup_test_state() -> AppState {
  AppState {
    db: setup_test_db().await,
    config: AppConfig::default(),
  }
}

/// Store `workouts` as the whole collection
pub async fn seed_test_workouts(pool: &SqlitePool, workouts: &[WorkoutRecord]) {
  storage::save_workouts(pool, workouts)
    .await
    .expect("Failed to seed workouts");
}

/// ---------------------------------------------------------------------------
/// Mock Data Factories
/// ---------------------------------------------------------------------------

pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

/// A workout carrying only a pyramid breakdown
pub fn mock_workout(name: &str, date: &str, rows: &[(f64, f64, f64)]) -> WorkoutRecord {
  WorkoutRecord {
    id: format!("test_{}_{}", name.to_lowercase().replace(' ', "_"), date),
    name: name.to_string(),
    date: date.to_string(),
    pyramid_sets: rows
      .iter()
      .map(|&(sets, reps, weight)| PyramidSet::new(sets, reps, weight))
      .collect(),
    ..Default::default()
  }
}

/// An old-style workout with bare `sets`/`reps` and no pyramid
pub fn mock_legacy_workout(name: &str, date: &str, sets: f64, reps: f64) -> WorkoutRecord {
  WorkoutRecord {
    id: format!("legacy_{}_{}", name.to_lowercase().replace(' ', "_"), date),
    name: name.to_string(),
    date: date.to_string(),
    sets: Some(sets),
    reps: Some(reps),
    ..Default::default()
  }
}

/// A form submission that passes validation when its name and date do
pub fn mock_draft(name: &str, date: &str, rows: &[(f64, f64, f64)]) -> WorkoutDraft {
  WorkoutDraft {
    name: name.to_string(),
    date: date.to_string(),
    pyramid_rows: rows
      .iter()
      .map(|&(sets, reps, weight)| PyramidRowInput {
        sets: Some(sets),
        reps: Some(reps),
        weight: Some(weight),
      })
      .collect(),
    ..Default::default()
  }
}

/// ---------------------------------------------------------------------------
/// Test Macros
/// ---------------------------------------------------------------------------

/// Assert two floats are approximately equal within a tolerance
#[macro_export]
macro_rules! assert_approx_eq {
  ($left:expr, $right:expr, $tolerance:expr) => {
    let diff = ($left - $right).abs();
    assert!(
      diff < $tolerance,
      "Values not approximately equal: {} vs {} (diff: {}, tolerance: {})",
      $left,
      $right,
      diff,
      $tolerance
    );
  };
}

/// ---------------------------------------------------------------------------
/// Tests for Test Utilities
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_setup_db_creates_schema() {
    let pool = setup_test_db().await;

    let tables: Vec<(String,)> = sqlx::query_as(
      "SELECT name FROM sqlite_master WHERE type='table' AND name = 'kv_store'"
    )
    .fetch_all(&pool)
    .await
    .expect("Failed to query tables");

    assert_eq!(tables.len(), 1);

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_seed_workouts_roundtrip() {
    let pool = setup_test_db().await;

    let workouts = vec![
      mock_workout("Bench Press", "2026-10-15", &[(3.0, 10.0, 20.0)]),
      mock_legacy_workout("Pushups", "2026-10-14", 4.0, 8.0),
    ];
    seed_test_workouts(&pool, &workouts).await;

    let loaded = storage::load_workouts(&pool).await.expect("Failed to load");
    assert_eq!(loaded, workouts);

    teardown_test_db(pool).await;
  }

  #[test]
  fn test_mock_factories_create_valid_data() {
    let workout = mock_workout("Bench Press", "2026-10-15", &[(3.0, 10.0, 20.0)]);
    assert_eq!(workout.id, "test_bench_press_2026-10-15");
    assert!(workout.has_pyramid());

    let legacy = mock_legacy_workout("Pushups", "2026-10-14", 4.0, 8.0);
    assert!(!legacy.has_pyramid());
    assert_eq!(legacy.sets, Some(4.0));

    let draft = mock_draft("Squat", "2026-10-15", &[(5.0, 5.0, 100.0)]);
    assert!(crate::validation::validate_draft(&draft).is_ok());
  }
}
