// Data models for the astronomy picture of the day

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored picture-of-the-day record, one per calendar date.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct DailyPicture {
    pub id: Uuid,
    pub picture_date: NaiveDate,
    pub title: String,
    pub explanation: String,
    /// Primary media URL (image or video embed)
    pub url: String,
    /// High-definition URL, empty when the upstream omits it
    pub hdurl: String,
    /// "image" or "video"
    pub media_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw APOD payload as served by the upstream API.
///
/// Every field is defaulted so a sparse payload maps cleanly instead of
/// failing the fetch.
#[derive(Debug, Clone, Deserialize)]
pub struct ApodPayload {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_media_type")]
    pub media_type: String,
    #[serde(default)]
    pub hdurl: String,
}

fn default_media_type() -> String {
    "image".to_string()
}

/// Row values for a picture about to be inserted.
#[derive(Debug, Clone)]
pub struct NewDailyPicture {
    pub picture_date: NaiveDate,
    pub title: String,
    pub explanation: String,
    pub url: String,
    pub hdurl: String,
    pub media_type: String,
}

impl NewDailyPicture {
    pub fn from_payload(picture_date: NaiveDate, payload: ApodPayload) -> Self {
        Self {
            picture_date,
            title: payload.title,
            explanation: payload.explanation,
            url: payload.url,
            hdurl: payload.hdurl,
            media_type: payload.media_type,
        }
    }
}
