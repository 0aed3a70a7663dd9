//! Tolerant deserializers for stored enum values
//!
//! Stored maps may carry values written by older builds (an empty timing
//! meaning "unassigned", statuses that no longer exist). Those entries are
//! dropped with a warning instead of failing the whole record.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::str::FromStr;

/// Deserialize a text-keyed map, keeping only values that parse as `V`
pub(crate) fn map<'de, D, V>(deserializer: D) -> Result<IndexMap<String, V>, D::Error>
where
    D: Deserializer<'de>,
    V: FromStr,
{
    let raw = Option::<IndexMap<String, Value>>::deserialize(deserializer)?.unwrap_or_default();
    let mut parsed = IndexMap::with_capacity(raw.len());
    for (key, value) in raw {
        match value.as_str().map(|s| s.parse::<V>()) {
            Some(Ok(v)) => {
                parsed.insert(key, v);
            }
            _ => tracing::warn!(key = %key, value = %value, "dropping unrecognised stored value"),
        }
    }
    Ok(parsed)
}

/// Deserialize a single enum value, falling back to the default
pub(crate) fn value<'de, D, V>(deserializer: D) -> Result<V, D::Error>
where
    D: Deserializer<'de>,
    V: FromStr + Default,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    let parsed = raw
        .as_ref()
        .and_then(Value::as_str)
        .and_then(|s| s.parse().ok());
    if parsed.is_none() && raw.as_ref().is_some_and(|v| !v.is_null()) {
        tracing::warn!(value = ?raw, "unrecognised stored value, using default");
    }
    Ok(parsed.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use crate::{ActionStatus, Timing};
    use indexmap::IndexMap;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "super::map")]
        timings: IndexMap<String, Timing>,
        #[serde(default, deserialize_with = "super::value")]
        status: ActionStatus,
    }

    #[test]
    fn drops_invalid_map_entries_and_keeps_order() {
        let holder: Holder = serde_json::from_str(
            r#"{"timings": {"b": "q2", "x": "", "a": "might", "y": 3}, "status": "complete"}"#,
        )
        .unwrap();
        let keys: Vec<_> = holder.timings.keys().cloned().collect();
        assert_eq!(keys, vec!["b", "a"]);
        assert_eq!(holder.timings["a"], Timing::Might);
        assert_eq!(holder.status, ActionStatus::Complete);
    }

    #[test]
    fn missing_or_null_fields_default() {
        let holder: Holder = serde_json::from_str(r#"{"timings": null, "status": null}"#).unwrap();
        assert!(holder.timings.is_empty());
        assert_eq!(holder.status, ActionStatus::NotStarted);

        let holder: Holder = serde_json::from_str("{}").unwrap();
        assert!(holder.timings.is_empty());
    }

    #[test]
    fn unknown_single_value_defaults() {
        let holder: Holder = serde_json::from_str(r#"{"status": "abandoned"}"#).unwrap();
        assert_eq!(holder.status, ActionStatus::NotStarted);
    }
}
