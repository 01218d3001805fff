//! Field codecs for stored workout JSON.
//!
//! Stored collections may come from older app versions or be edited by hand,
//! so a single odd field must never make a whole record unreadable.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Number, Value};

/// Largest integer an `f64` holds exactly.
const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

/// Decode into `T`, falling back to `T::default()` when the stored value has
/// the wrong shape.
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
  D: Deserializer<'de>,
  T: DeserializeOwned + Default,
{
  let value = Value::deserialize(deserializer)?;
  Ok(T::deserialize(value).unwrap_or_default())
}

/// Only a real JSON number counts; strings, booleans and null read as absent.
pub fn strict_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
  D: Deserializer<'de>,
{
  let value = Option::<Value>::deserialize(deserializer)?;
  Ok(value.and_then(|v| v.as_f64()))
}

/// Numeric coercion for pyramid entries: numbers pass through, numeric strings
/// are parsed, booleans are 1/0 and anything else is 0.
pub fn coerce_number(value: &Value) -> f64 {
  let number = match value {
    Value::Number(n) => n.as_f64().unwrap_or(0.0),
    Value::String(s) => {
      let trimmed = s.trim();
      if trimmed.is_empty() {
        0.0
      } else {
        trimmed.parse::<f64>().unwrap_or(0.0)
      }
    }
    Value::Bool(true) => 1.0,
    _ => 0.0,
  };

  if number.is_finite() {
    number
  } else {
    0.0
  }
}

/// Serde adapter around [`coerce_number`].
pub fn coerced_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
  D: Deserializer<'de>,
{
  let value = Value::deserialize(deserializer)?;
  Ok(coerce_number(&value))
}

/// JSON for a number: whole values are written as integers (`3`, not `3.0`).
/// Non-finite values have no JSON form and become `null`.
pub fn number_value(value: f64) -> Value {
  if value.fract() == 0.0 && value.abs() <= MAX_EXACT_INT {
    return Value::from(value as i64);
  }
  Number::from_f64(value).map(Value::Number).unwrap_or(Value::Null)
}

/// Serde adapter writing an optional scalar through [`number_value`].
pub fn compact_number<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
  S: Serializer,
{
  match value {
    Some(number) => number_value(*number).serialize(serializer),
    None => serializer.serialize_none(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[derive(Debug, Deserialize)]
  struct Probe {
    #[serde(default, deserialize_with = "strict_number")]
    strict: Option<f64>,
    #[serde(default, deserialize_with = "coerced_number")]
    coerced: f64,
    #[serde(default, deserialize_with = "or_default")]
    flag: bool,
  }

  #[test]
  fn test_strict_number_rejects_non_numbers() {
    let probe: Probe = serde_json::from_value(json!({ "strict": "12" })).unwrap();
    assert_eq!(probe.strict, None);

    let probe: Probe = serde_json::from_value(json!({ "strict": 12 })).unwrap();
    assert_eq!(probe.strict, Some(12.0));

    let probe: Probe = serde_json::from_value(json!({ "strict": null })).unwrap();
    assert_eq!(probe.strict, None);
  }

  #[test]
  fn test_coerce_number_variants() {
    assert_eq!(coerce_number(&json!(4)), 4.0);
    assert_eq!(coerce_number(&json!(" 7.5 ")), 7.5);
    assert_eq!(coerce_number(&json!("")), 0.0);
    assert_eq!(coerce_number(&json!("heavy")), 0.0);
    assert_eq!(coerce_number(&json!(true)), 1.0);
    assert_eq!(coerce_number(&json!(false)), 0.0);
    assert_eq!(coerce_number(&json!(null)), 0.0);
    assert_eq!(coerce_number(&json!([1, 2])), 0.0);
    assert_eq!(coerce_number(&json!("inf")), 0.0);
  }

  #[test]
  fn test_number_value_writes_whole_numbers_as_integers() {
    assert_eq!(number_value(3.0).to_string(), "3");
    assert_eq!(number_value(-4.0).to_string(), "-4");
    assert_eq!(number_value(62.5).to_string(), "62.5");
    assert_eq!(number_value(f64::NAN), Value::Null);
    assert_eq!(number_value(f64::INFINITY), Value::Null);
  }

  #[test]
  fn test_or_default_swallows_bad_shapes() {
    let probe: Probe = serde_json::from_value(json!({ "flag": "yes", "coerced": "3" })).unwrap();
    assert!(!probe.flag);
    assert_eq!(probe.coerced, 3.0);
  }
}
