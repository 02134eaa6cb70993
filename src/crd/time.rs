//! # Timestamp Serialization
//!
//! Condition timestamps are kept as `DateTime<Utc>` in memory and written as
//! RFC3339 with second precision, the format Kubernetes uses for `metav1.Time`.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Format a timestamp the way it appears on the wire
pub fn format_rfc3339(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub fn serialize_optional<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(time) => serializer.serialize_some(&format_rfc3339(time)),
        None => serializer.serialize_none(),
    }
}

/// Empty strings are accepted as "never transitioned"
pub fn deserialize_optional<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    raw.filter(|s| !s.is_empty())
        .map(|s| {
            DateTime::parse_from_rfc3339(&s)
                .map(|t| t.with_timezone(&Utc))
                .map_err(|e| serde::de::Error::custom(format!("invalid RFC3339 timestamp {s:?}: {e}")))
        })
        .transpose()
}
