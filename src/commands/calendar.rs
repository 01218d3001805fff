use crate::calendar::{shift_cursor, CalendarView};
use crate::db::AppState;
use crate::dates::{parse_local_date, today};

use super::load_collection;

/// Calendar for the month containing `cursor` (defaults to this month),
/// shifted by `offset` months, with `selected` (a `YYYY-MM-DD` key) expanded.
pub async fn get_calendar(
  state: &AppState,
  cursor: Option<String>,
  offset: Option<i32>,
  selected: Option<String>,
) -> Result<CalendarView, String> {
  let cursor = match cursor.as_deref() {
    Some(raw) => parse_local_date(raw).ok_or_else(|| format!("Invalid calendar date: {}", raw))?,
    None => today(),
  };
  let cursor = shift_cursor(cursor, offset.unwrap_or(0));

  let collection = load_collection(state).await?;
  Ok(CalendarView::build(collection.workouts(), cursor, selected.as_deref()))
}
