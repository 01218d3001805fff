use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::fs;

use crate::config::AppConfig;
use crate::error::Result;

pub type DbPool = SqlitePool;

/// Application state holding the database connection pool
pub struct AppState {
  pub db: DbPool,
  pub config: AppConfig,
}

impl AppState {
  pub async fn initialize(config: AppConfig) -> Result<Self> {
    let db = initialize_db(&config).await?;
    Ok(Self { db, config })
  }
}

/// Initialize the database connection pool and run migrations
pub async fn initialize_db(config: &AppConfig) -> Result<DbPool> {
  // Create directory if it doesn't exist
  if let Some(parent) = config.db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
    fs::create_dir_all(parent)?;
  }

  tracing::info!(path = %config.db_path.display(), "Initializing database");

  let pool = SqlitePoolOptions::new()
    .max_connections(config.max_connections)
    .connect(&config.database_url())
    .await?;

  sqlx::migrate!("./migrations").run(&pool).await?;

  tracing::info!("Database initialized successfully");

  Ok(pool)
}
