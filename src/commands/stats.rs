use crate::db::AppState;
use crate::stats::{build_stats_for_today, NameFilter, StatsRange, StatsReport};

use super::load_collection;

/// Chart data for `range` (`daily`, `weekly` or `monthly`), optionally
/// limited to one workout name. A filter naming a workout that no longer
/// exists falls back to all workouts.
pub async fn get_stats(
  state: &AppState,
  range: String,
  filter: Option<String>,
) -> Result<StatsReport, String> {
  let range: StatsRange = range.parse()?;
  let collection = load_collection(state).await?;
  let filter = collection.reconcile_filter(NameFilter::from_option(filter.as_deref()));

  Ok(build_stats_for_today(collection.workouts(), range, &filter))
}
