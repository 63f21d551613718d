// Data models for solar flare events

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::timestamp;

/// Flare intensity class, ordered A < B < C < M < X.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FlareClass {
    A,
    B,
    C,
    M,
    X,
}

impl FlareClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlareClass::A => "A",
            FlareClass::B => "B",
            FlareClass::C => "C",
            FlareClass::M => "M",
            FlareClass::X => "X",
        }
    }

    /// Derive the class from the upstream class-type string, e.g.
    /// `"M5.2"` -> `M`. Absent, empty or unrecognized input maps to `A`.
    pub fn from_class_type(class_type: Option<&str>) -> Self {
        match class_type.and_then(|value| value.chars().next()) {
            Some('B') => FlareClass::B,
            Some('C') => FlareClass::C,
            Some('M') => FlareClass::M,
            Some('X') => FlareClass::X,
            _ => FlareClass::A,
        }
    }
}

impl std::str::FromStr for FlareClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" | "a" => Ok(FlareClass::A),
            "B" | "b" => Ok(FlareClass::B),
            "C" | "c" => Ok(FlareClass::C),
            "M" | "m" => Ok(FlareClass::M),
            "X" | "x" => Ok(FlareClass::X),
            other => Err(format!("unknown flare class '{other}'")),
        }
    }
}

impl std::fmt::Display for FlareClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored solar flare event, unique by external flare id.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct SolarFlare {
    pub id: Uuid,
    pub flare_id: String,
    /// Single intensity letter, see [`FlareClass`]
    pub flare_class: String,
    pub begin_time: DateTime<Utc>,
    pub peak_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub source_location: String,
    pub active_region: String,
    /// Linked event ids, stored verbatim as reported upstream
    pub linked_events: serde_json::Value,
    /// Observing instrument names, stored verbatim
    pub instruments: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One flare entry from the upstream feed.
#[derive(Debug, Clone, Deserialize)]
pub struct FlarePayload {
    #[serde(rename = "flrID")]
    pub flr_id: Option<String>,
    #[serde(rename = "classType", default)]
    pub class_type: Option<String>,
    #[serde(rename = "beginTime", default)]
    pub begin_time: Option<String>,
    #[serde(rename = "peakTime", default)]
    pub peak_time: Option<String>,
    #[serde(rename = "endTime", default)]
    pub end_time: Option<String>,
    #[serde(rename = "sourceLocation", default)]
    pub source_location: Option<String>,
    /// Number or string upstream, normalized to text
    #[serde(rename = "activeRegionNum", default)]
    pub active_region_num: Option<serde_json::Value>,
    #[serde(rename = "linkedEvents", default)]
    pub linked_events: Option<serde_json::Value>,
    #[serde(default)]
    pub instruments: Option<serde_json::Value>,
}

/// Row values for a flare about to be inserted.
#[derive(Debug, Clone)]
pub struct NewSolarFlare {
    pub flare_id: String,
    pub flare_class: FlareClass,
    pub begin_time: DateTime<Utc>,
    pub peak_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub source_location: String,
    pub active_region: String,
    pub linked_events: serde_json::Value,
    pub instruments: serde_json::Value,
}

impl NewSolarFlare {
    /// Normalize a payload, rejecting it whole when any of the three
    /// timing fields fails every known format.
    pub fn from_payload(flare_id: &str, payload: &FlarePayload) -> Option<Self> {
        let begin_time = parse_time(&payload.begin_time)?;
        let peak_time = parse_time(&payload.peak_time)?;
        let end_time = parse_time(&payload.end_time)?;

        Some(Self {
            flare_id: flare_id.to_string(),
            flare_class: FlareClass::from_class_type(payload.class_type.as_deref()),
            begin_time,
            peak_time,
            end_time,
            source_location: payload.source_location.clone().unwrap_or_default(),
            active_region: normalize_active_region(payload.active_region_num.as_ref()),
            linked_events: verbatim_list(payload.linked_events.clone()),
            instruments: verbatim_list(payload.instruments.clone()),
        })
    }
}

fn parse_time(value: &Option<String>) -> Option<DateTime<Utc>> {
    timestamp::parse_utc(value.as_deref()?, timestamp::FLARE_FORMATS)
}

/// The upstream sends the active region as a number, string or null.
fn normalize_active_region(value: Option<&serde_json::Value>) -> String {
    match value {
        Some(serde_json::Value::String(text)) => text.clone(),
        Some(serde_json::Value::Number(number)) => number.to_string(),
        _ => String::new(),
    }
}

/// Lists are passed through verbatim; null collapses to an empty list.
fn verbatim_list(value: Option<serde_json::Value>) -> serde_json::Value {
    match value {
        Some(value @ serde_json::Value::Array(_)) => value,
        _ => serde_json::Value::Array(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn flare_payload(value: serde_json::Value) -> FlarePayload {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn class_derivation_takes_first_character() {
        assert_eq!(FlareClass::from_class_type(Some("M5.2")), FlareClass::M);
        assert_eq!(FlareClass::from_class_type(Some("X1.0")), FlareClass::X);
        assert_eq!(FlareClass::from_class_type(Some("C")), FlareClass::C);
    }

    #[test]
    fn class_derivation_defaults_to_a() {
        assert_eq!(FlareClass::from_class_type(None), FlareClass::A);
        assert_eq!(FlareClass::from_class_type(Some("")), FlareClass::A);
        assert_eq!(FlareClass::from_class_type(Some("Q9")), FlareClass::A);
    }

    #[test]
    fn class_ordering_follows_intensity() {
        assert!(FlareClass::A < FlareClass::B);
        assert!(FlareClass::C < FlareClass::M);
        assert!(FlareClass::M < FlareClass::X);
    }

    #[test]
    fn missing_any_timestamp_rejects_the_flare() {
        let payload = flare_payload(json!({
            "flrID": "2024-01-15T10:30:00-FLR-001",
            "beginTime": "2024-01-15T10:30Z",
            "peakTime": "2024-01-15T11:00Z"
        }));
        assert!(NewSolarFlare::from_payload("2024-01-15T10:30:00-FLR-001", &payload).is_none());

        let payload = flare_payload(json!({
            "flrID": "x",
            "beginTime": "garbage",
            "peakTime": "2024-01-15T11:00Z",
            "endTime": "2024-01-15T12:00Z"
        }));
        assert!(NewSolarFlare::from_payload("x", &payload).is_none());
    }

    #[test]
    fn complete_payload_normalizes() {
        let payload = flare_payload(json!({
            "flrID": "2024-01-15T10:30:00-FLR-001",
            "classType": "M5.2",
            "beginTime": "2024-01-15T10:30Z",
            "peakTime": "2024-01-15T11:00Z",
            "endTime": "2024-01-15T12:00Z",
            "sourceLocation": "N15W30",
            "activeRegionNum": 13536,
            "linkedEvents": [{"activityID": "2024-01-15T11:12:00-CME-001"}],
            "instruments": [{"displayName": "GOES-P: EXIS 1.0-8.0"}]
        }));

        let new = NewSolarFlare::from_payload("2024-01-15T10:30:00-FLR-001", &payload).unwrap();
        assert_eq!(new.flare_class, FlareClass::M);
        assert_eq!(new.source_location, "N15W30");
        assert_eq!(new.active_region, "13536");
        assert!(new.begin_time <= new.peak_time && new.peak_time <= new.end_time);
        assert_eq!(new.linked_events.as_array().unwrap().len(), 1);
    }

    #[test]
    fn null_attachments_collapse_to_empty_lists() {
        let payload = flare_payload(json!({
            "flrID": "y",
            "beginTime": "2024-01-15T10:30Z",
            "peakTime": "2024-01-15T11:00Z",
            "endTime": "2024-01-15T12:00Z",
            "linkedEvents": null
        }));

        let new = NewSolarFlare::from_payload("y", &payload).unwrap();
        assert_eq!(new.linked_events, json!([]));
        assert_eq!(new.instruments, json!([]));
        assert_eq!(new.active_region, "");
    }
}
