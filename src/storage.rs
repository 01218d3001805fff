//! Workout collection persistence
//!
//! The whole collection is serialized as one JSON array under a single fixed
//! key in the `kv_store` table. Reads are forgiving: missing, malformed or
//! non-array data loads as an empty collection, and records that cannot be
//! decoded are dropped.

use serde_json::Value;
use sqlx::SqlitePool;

use crate::error::Result;
use crate::models::WorkoutRecord;

pub const STORAGE_KEY: &str = "gymTracker.workouts";

pub async fn read_key(pool: &SqlitePool, key: &str) -> Result<Option<String>> {
  let value: Option<String> = sqlx::query_scalar("SELECT value FROM kv_store WHERE key = ?1")
    .bind(key)
    .fetch_optional(pool)
    .await?;
  Ok(value)
}

pub async fn write_key(pool: &SqlitePool, key: &str, value: &str) -> Result<()> {
  sqlx::query(
    r#"
    INSERT INTO kv_store (key, value, updated_at)
    VALUES (?1, ?2, CURRENT_TIMESTAMP)
    ON CONFLICT(key) DO UPDATE SET
      value = excluded.value,
      updated_at = excluded.updated_at
    "#,
  )
  .bind(key)
  .bind(value)
  .execute(pool)
  .await?;
  Ok(())
}

/// Decode a stored collection. Never fails.
pub fn decode_workouts(raw: &str) -> Vec<WorkoutRecord> {
  let items = match serde_json::from_str::<Value>(raw) {
    Ok(Value::Array(items)) => items,
    Ok(_) => {
      tracing::warn!("Stored workouts are not a list, starting empty");
      return Vec::new();
    }
    Err(e) => {
      tracing::warn!(error = %e, "Stored workouts are not valid JSON, starting empty");
      return Vec::new();
    }
  };

  let total = items.len();
  let workouts: Vec<WorkoutRecord> = items
    .into_iter()
    .filter_map(|item| serde_json::from_value(item).ok())
    .collect();

  if workouts.len() < total {
    tracing::warn!(skipped = total - workouts.len(), "Dropped unreadable workout records");
  }

  workouts
}

pub async fn load_workouts(pool: &SqlitePool) -> Result<Vec<WorkoutRecord>> {
  let workouts = match read_key(pool, STORAGE_KEY).await? {
    Some(raw) => decode_workouts(&raw),
    None => Vec::new(),
  };
  tracing::debug!(count = workouts.len(), "Loaded workouts");
  Ok(workouts)
}

pub async fn save_workouts(pool: &SqlitePool, workouts: &[WorkoutRecord]) -> Result<()> {
  let raw = serde_json::to_string(workouts)?;
  write_key(pool, STORAGE_KEY, &raw).await?;
  tracing::debug!(count = workouts.len(), "Saved workouts");
  Ok(())
}
