// Storage layer for daily pictures

use chrono::NaiveDate;
use sqlx::PgPool;

use super::models::{DailyPicture, NewDailyPicture};

const COLUMNS: &str =
    "id, picture_date, title, explanation, url, hdurl, media_type, created_at, updated_at";

/// Look up the picture stored for a calendar date.
pub async fn get_by_date(pool: &PgPool, date: NaiveDate) -> sqlx::Result<Option<DailyPicture>> {
    sqlx::query_as::<_, DailyPicture>(&format!(
        "SELECT {COLUMNS} FROM daily_pictures WHERE picture_date = $1"
    ))
    .bind(date)
    .fetch_optional(pool)
    .await
}

/// Most recently dated picture, if any are stored.
pub async fn latest(pool: &PgPool) -> sqlx::Result<Option<DailyPicture>> {
    sqlx::query_as::<_, DailyPicture>(&format!(
        "SELECT {COLUMNS} FROM daily_pictures ORDER BY picture_date DESC LIMIT 1"
    ))
    .fetch_optional(pool)
    .await
}

/// Stored pictures, newest date first, bounded by `limit`.
pub async fn list_recent(pool: &PgPool, limit: i64) -> sqlx::Result<Vec<DailyPicture>> {
    sqlx::query_as::<_, DailyPicture>(&format!(
        "SELECT {COLUMNS} FROM daily_pictures ORDER BY picture_date DESC LIMIT $1"
    ))
    .bind(limit)
    .fetch_all(pool)
    .await
}

/// Insert a new picture and return the stored row.
pub async fn insert(pool: &PgPool, new: &NewDailyPicture) -> sqlx::Result<DailyPicture> {
    sqlx::query_as::<_, DailyPicture>(&format!(
        "INSERT INTO daily_pictures (picture_date, title, explanation, url, hdurl, media_type)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING {COLUMNS}"
    ))
    .bind(new.picture_date)
    .bind(&new.title)
    .bind(&new.explanation)
    .bind(&new.url)
    .bind(&new.hdurl)
    .bind(&new.media_type)
    .fetch_one(pool)
    .await
}
