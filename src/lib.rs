pub mod calendar;
pub mod collection;
pub mod commands;
pub mod config;
pub mod dates;
pub mod db;
pub mod error;
pub mod metrics;
pub mod models;
pub mod schedule;
pub mod stats;
pub mod storage;
pub mod validation;

#[cfg(test)]
mod test_utils;

pub use collection::WorkoutCollection;
pub use config::AppConfig;
pub use db::AppState;
pub use error::TrackerError;
pub use metrics::WorkoutTotals;
pub use models::{MediaKind, MediaSource, PyramidSet, WorkoutRecord};
pub use stats::{build_stats, NameFilter, StatsRange, StatsReport};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global `tracing` subscriber. Safe to call more than once; only
/// the first call takes effect.
pub fn init_logging(config: &AppConfig) {
  let filter = tracing_subscriber::EnvFilter::try_new(&config.log_filter)
    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

  let _ = tracing_subscriber::registry()
    .with(filter)
    .with(tracing_subscriber::fmt::layer().with_target(false))
    .try_init();
}

/// Load configuration, start logging and open the workout store.
pub async fn bootstrap() -> Result<AppState, TrackerError> {
  let config = AppConfig::from_env()?;
  init_logging(&config);

  let state = AppState::initialize(config).await?;
  tracing::info!("Workout store ready");
  Ok(state)
}
