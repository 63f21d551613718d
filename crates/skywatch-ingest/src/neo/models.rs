// Data models for near-Earth objects and their close approaches

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored near-Earth object, unique by external reference id.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Asteroid {
    pub id: Uuid,
    pub neo_reference_id: String,
    pub name: String,
    pub nasa_jpl_url: String,
    pub absolute_magnitude_h: f64,
    /// Estimated diameter in kilometers
    pub estimated_diameter_min: f64,
    pub estimated_diameter_max: f64,
    pub is_potentially_hazardous: bool,
    pub is_sentry_object: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A stored close-approach event, unique per (asteroid, timestamp).
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CloseApproach {
    pub id: Uuid,
    pub asteroid_id: Uuid,
    pub close_approach_time: DateTime<Utc>,
    pub relative_velocity_km_per_sec: f64,
    pub relative_velocity_km_per_hour: f64,
    pub miss_distance_astronomical: f64,
    pub miss_distance_lunar: f64,
    pub miss_distance_kilometers: f64,
    pub orbiting_body: String,
    pub created_at: DateTime<Utc>,
}

/// Close approach joined with the owning asteroid's display fields,
/// the shape the query helpers return.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CloseApproachWithAsteroid {
    pub id: Uuid,
    pub asteroid_id: Uuid,
    pub asteroid_name: String,
    pub neo_reference_id: String,
    pub is_potentially_hazardous: bool,
    pub close_approach_time: DateTime<Utc>,
    pub relative_velocity_km_per_sec: f64,
    pub relative_velocity_km_per_hour: f64,
    pub miss_distance_astronomical: f64,
    pub miss_distance_lunar: f64,
    pub miss_distance_kilometers: f64,
    pub orbiting_body: String,
}

/// Raw feed response: a mapping from ISO date string to that date's
/// asteroid payloads. Entries stay raw JSON so one malformed asteroid is
/// skipped instead of failing the batch.
#[derive(Debug, Clone, Deserialize)]
pub struct NeoFeedPayload {
    #[serde(default)]
    pub near_earth_objects: BTreeMap<String, Vec<serde_json::Value>>,
}

/// One asteroid entry from the feed.
#[derive(Debug, Clone, Deserialize)]
pub struct AsteroidPayload {
    pub neo_reference_id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub nasa_jpl_url: String,
    #[serde(default)]
    pub absolute_magnitude_h: f64,
    #[serde(default)]
    pub estimated_diameter: DiameterPayload,
    #[serde(default)]
    pub is_potentially_hazardous_asteroid: bool,
    #[serde(default)]
    pub is_sentry_object: bool,
    #[serde(default)]
    pub close_approach_data: Vec<ApproachPayload>,
}

/// Nested diameter payload; any missing nesting level collapses to 0.0.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiameterPayload {
    #[serde(default)]
    pub kilometers: DiameterRange,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiameterRange {
    #[serde(default)]
    pub estimated_diameter_min: f64,
    #[serde(default)]
    pub estimated_diameter_max: f64,
}

/// One close-approach entry nested under an asteroid.
#[derive(Debug, Clone, Deserialize)]
pub struct ApproachPayload {
    #[serde(default)]
    pub close_approach_date_full: Option<String>,
    #[serde(default)]
    pub relative_velocity: VelocityPayload,
    #[serde(default)]
    pub miss_distance: MissDistancePayload,
    #[serde(default)]
    pub orbiting_body: Option<String>,
}

/// Velocity figures arrive as decimal strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VelocityPayload {
    #[serde(default)]
    pub kilometers_per_second: Option<String>,
    #[serde(default)]
    pub kilometers_per_hour: Option<String>,
}

/// Miss distances arrive as decimal strings in three units.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MissDistancePayload {
    #[serde(default)]
    pub astronomical: Option<String>,
    #[serde(default)]
    pub lunar: Option<String>,
    #[serde(default)]
    pub kilometers: Option<String>,
}

/// Row values for an asteroid about to be inserted.
#[derive(Debug, Clone)]
pub struct NewAsteroid {
    pub neo_reference_id: String,
    pub name: String,
    pub nasa_jpl_url: String,
    pub absolute_magnitude_h: f64,
    pub estimated_diameter_min: f64,
    pub estimated_diameter_max: f64,
    pub is_potentially_hazardous: bool,
    pub is_sentry_object: bool,
}

impl NewAsteroid {
    pub fn from_payload(reference_id: &str, payload: &AsteroidPayload) -> Self {
        Self {
            neo_reference_id: reference_id.to_string(),
            name: payload.name.clone(),
            nasa_jpl_url: payload.nasa_jpl_url.clone(),
            absolute_magnitude_h: payload.absolute_magnitude_h,
            estimated_diameter_min: payload.estimated_diameter.kilometers.estimated_diameter_min,
            estimated_diameter_max: payload.estimated_diameter.kilometers.estimated_diameter_max,
            is_potentially_hazardous: payload.is_potentially_hazardous_asteroid,
            is_sentry_object: payload.is_sentry_object,
        }
    }
}

/// Row values for a close approach about to be inserted.
#[derive(Debug, Clone)]
pub struct NewCloseApproach {
    pub asteroid_id: Uuid,
    pub close_approach_time: DateTime<Utc>,
    pub relative_velocity_km_per_sec: f64,
    pub relative_velocity_km_per_hour: f64,
    pub miss_distance_astronomical: f64,
    pub miss_distance_lunar: f64,
    pub miss_distance_kilometers: f64,
    pub orbiting_body: String,
}

impl NewCloseApproach {
    pub fn from_payload(
        asteroid_id: Uuid,
        close_approach_time: DateTime<Utc>,
        payload: &ApproachPayload,
    ) -> Self {
        Self {
            asteroid_id,
            close_approach_time,
            relative_velocity_km_per_sec: parse_float(&payload.relative_velocity.kilometers_per_second),
            relative_velocity_km_per_hour: parse_float(&payload.relative_velocity.kilometers_per_hour),
            miss_distance_astronomical: parse_float(&payload.miss_distance.astronomical),
            miss_distance_lunar: parse_float(&payload.miss_distance.lunar),
            miss_distance_kilometers: parse_float(&payload.miss_distance.kilometers),
            orbiting_body: payload
                .orbiting_body
                .clone()
                .unwrap_or_else(|| "Earth".to_string()),
        }
    }
}

/// Decimal-string field to float, 0.0 when missing or unparseable.
fn parse_float(value: &Option<String>) -> f64 {
    value
        .as_deref()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(0.0)
}
