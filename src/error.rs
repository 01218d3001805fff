use serde::Serialize;

use crate::config::ConfigError;
use crate::validation::ValidationErrors;

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),

  #[error("Migration failed: {0}")]
  Migration(#[from] sqlx::migrate::MigrateError),

  #[error("Serialization error: {0}")]
  Serialization(#[from] serde_json::Error),

  #[error("Configuration error: {0}")]
  Config(#[from] ConfigError),

  #[error("Storage error: {0}")]
  Storage(#[from] std::io::Error),

  #[error(transparent)]
  Validation(#[from] ValidationErrors),

  #[error("Workout not found: {0}")]
  NotFound(String),
}

impl Serialize for TrackerError {
  fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    serializer.serialize_str(&self.to_string())
  }
}

pub type Result<T> = std::result::Result<T, TrackerError>;
