use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use super::lenient;

/// One row of a pyramid breakdown: `sets` x `reps` at `weight` kg.
///
/// The numeric fields are the coerced values used for totals. An entry read
/// from storage also keeps the stored JSON, which is written back unchanged
/// and drives the display strings.
#[derive(Debug, Clone, Default)]
pub struct PyramidSet {
  pub sets: f64,
  pub reps: f64,
  pub weight: f64,
  raw: Option<Value>,
}

impl PyramidSet {
  pub fn new(sets: f64, reps: f64, weight: f64) -> Self {
    Self {
      sets,
      reps,
      weight,
      raw: None,
    }
  }

  /// Build an entry from an arbitrary stored value. Missing or non-numeric
  /// fields count as 0, and a non-object entry is an all-zero row.
  pub fn from_value(value: &Value) -> Self {
    let field = |key: &str| value.get(key).map(lenient::coerce_number).unwrap_or(0.0);
    Self {
      sets: field("sets"),
      reps: field("reps"),
      weight: field("weight"),
      raw: Some(value.clone()),
    }
  }

  /// Weight moved by this row: weight x reps.
  pub fn volume(&self) -> f64 {
    self.weight * self.reps
  }

  /// Weight to label this row with. A stored weight that is not a JSON
  /// number reads as 0, which labels as bodyweight.
  pub fn display_weight(&self) -> f64 {
    match &self.raw {
      Some(raw) => raw.get("weight").and_then(Value::as_f64).unwrap_or(0.0),
      None => self.weight,
    }
  }

  pub fn sets_text(&self) -> String {
    self.count_text("sets", self.sets)
  }

  pub fn reps_text(&self) -> String {
    self.count_text("reps", self.reps)
  }

  // Stored text is shown as written; anything else shows the coerced number
  fn count_text(&self, key: &str, coerced: f64) -> String {
    match self.raw.as_ref().and_then(|raw| raw.get(key)) {
      Some(Value::String(text)) => text.clone(),
      _ => coerced.to_string(),
    }
  }
}

/// Rows compare by their coerced numbers.
impl PartialEq for PyramidSet {
  fn eq(&self, other: &Self) -> bool {
    self.sets == other.sets && self.reps == other.reps && self.weight == other.weight
  }
}

impl Serialize for PyramidSet {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    if let Some(raw) = &self.raw {
      return raw.serialize(serializer);
    }
    let mut entry = serializer.serialize_struct("PyramidSet", 3)?;
    entry.serialize_field("sets", &lenient::number_value(self.sets))?;
    entry.serialize_field("reps", &lenient::number_value(self.reps))?;
    entry.serialize_field("weight", &lenient::number_value(self.weight))?;
    entry.end()
  }
}

impl<'de> Deserialize<'de> for PyramidSet {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: Deserializer<'de>,
  {
    let value = Value::deserialize(deserializer)?;
    Ok(Self::from_value(&value))
  }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
  #[default]
  Image,
  Video,
}

impl MediaKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      MediaKind::Image => "image",
      MediaKind::Video => "video",
    }
  }
}

/// Attached media: either a remote link or an uploaded file kept inline as a data URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum MediaSource {
  Url {
    url: String,
    #[serde(rename = "type", default, deserialize_with = "lenient::or_default")]
    kind: MediaKind,
  },
  Upload {
    url: String,
    #[serde(rename = "type", default, deserialize_with = "lenient::or_default")]
    kind: MediaKind,
    #[serde(default, deserialize_with = "lenient::or_default")]
    name: String,
  },
}

impl MediaSource {
  pub fn url(&self) -> &str {
    match self {
      MediaSource::Url { url, .. } | MediaSource::Upload { url, .. } => url,
    }
  }

  pub fn kind(&self) -> MediaKind {
    match self {
      MediaSource::Url { kind, .. } | MediaSource::Upload { kind, .. } => *kind,
    }
  }
}

/// A persisted workout.
///
/// Field names follow the stored JSON (camelCase). Besides the canonical
/// `pyramid_sets`, older records may only carry the scalar `sets`/`reps`/
/// `total_*` fields; see [`crate::metrics`] for how those are resolved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutRecord {
  #[serde(default, deserialize_with = "lenient::or_default")]
  pub id: String,
  #[serde(default, deserialize_with = "lenient::or_default")]
  pub name: String,
  /// `YYYY-MM-DD`, kept verbatim and parsed on use
  #[serde(default, deserialize_with = "lenient::or_default")]
  pub date: String,
  #[serde(default, deserialize_with = "lenient::or_default")]
  pub notes: String,
  /// Days before `date` the reminder is due (0-3)
  #[serde(default, deserialize_with = "lenient::or_default")]
  pub reminder_offset: u8,
  #[serde(default, deserialize_with = "lenient::or_default")]
  pub completed: bool,

  #[serde(default, deserialize_with = "lenient::or_default", skip_serializing_if = "Option::is_none")]
  pub media_source: Option<MediaSource>,
  #[serde(default, deserialize_with = "lenient::or_default")]
  pub media_url: String,
  #[serde(default, deserialize_with = "lenient::or_default", skip_serializing_if = "Option::is_none")]
  pub media_type: Option<MediaKind>,
  #[serde(
    default,
    deserialize_with = "lenient::strict_number",
    serialize_with = "lenient::compact_number",
    skip_serializing_if = "Option::is_none"
  )]
  pub media_weight: Option<f64>,

  #[serde(default, deserialize_with = "lenient::or_default")]
  pub pyramid_sets: Vec<PyramidSet>,

  // Legacy / denormalized scalars
  #[serde(
    default,
    deserialize_with = "lenient::strict_number",
    serialize_with = "lenient::compact_number",
    skip_serializing_if = "Option::is_none"
  )]
  pub sets: Option<f64>,
  #[serde(
    default,
    deserialize_with = "lenient::strict_number",
    serialize_with = "lenient::compact_number",
    skip_serializing_if = "Option::is_none"
  )]
  pub reps: Option<f64>,
  #[serde(
    default,
    deserialize_with = "lenient::strict_number",
    serialize_with = "lenient::compact_number",
    skip_serializing_if = "Option::is_none"
  )]
  pub weight: Option<f64>,
  #[serde(
    default,
    deserialize_with = "lenient::strict_number",
    serialize_with = "lenient::compact_number",
    skip_serializing_if = "Option::is_none"
  )]
  pub total_sets: Option<f64>,
  #[serde(
    default,
    deserialize_with = "lenient::strict_number",
    serialize_with = "lenient::compact_number",
    skip_serializing_if = "Option::is_none"
  )]
  pub total_reps: Option<f64>,
  #[serde(
    default,
    deserialize_with = "lenient::strict_number",
    serialize_with = "lenient::compact_number",
    skip_serializing_if = "Option::is_none"
  )]
  pub total_weight: Option<f64>,
  #[serde(
    default,
    deserialize_with = "lenient::strict_number",
    serialize_with = "lenient::compact_number",
    skip_serializing_if = "Option::is_none"
  )]
  pub total_volume: Option<f64>,
}

impl WorkoutRecord {
  pub fn has_pyramid(&self) -> bool {
    !self.pyramid_sets.is_empty()
  }
}
