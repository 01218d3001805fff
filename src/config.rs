//! Runtime configuration from the environment (and `.env` when present).

use std::env;
use std::path::PathBuf;

const DEFAULT_DB_PATH: &str = "gym-tracker.db";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  #[error("Invalid value for {key}: {value}")]
  Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
  /// SQLite file holding the workout collection
  pub db_path: PathBuf,
  pub max_connections: u32,
  /// `tracing` filter directive, e.g. `info` or `gym_tracker=debug`
  pub log_filter: String,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      db_path: PathBuf::from(DEFAULT_DB_PATH),
      max_connections: DEFAULT_MAX_CONNECTIONS,
      log_filter: DEFAULT_LOG_FILTER.to_string(),
    }
  }
}

impl AppConfig {
  pub fn from_env() -> Result<Self, ConfigError> {
    dotenvy::dotenv().ok();

    let max_connections = match env::var("GYM_TRACKER_MAX_CONNECTIONS") {
      Ok(raw) => raw
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or(ConfigError::Invalid {
          key: "GYM_TRACKER_MAX_CONNECTIONS",
          value: raw,
        })?,
      Err(_) => DEFAULT_MAX_CONNECTIONS,
    };

    Ok(Self {
      db_path: env::var("GYM_TRACKER_DB_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_DB_PATH)),
      max_connections,
      log_filter: env::var("GYM_TRACKER_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string()),
    })
  }

  pub fn database_url(&self) -> String {
    format!("sqlite://{}?mode=rwc", self.db_path.display())
  }
}
