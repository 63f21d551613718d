// Storage layer for asteroids and close approaches

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::models::{
    Asteroid, CloseApproachWithAsteroid, NewAsteroid, NewCloseApproach,
};

const ASTEROID_COLUMNS: &str = "id, neo_reference_id, name, nasa_jpl_url, absolute_magnitude_h, \
     estimated_diameter_min, estimated_diameter_max, is_potentially_hazardous, is_sentry_object, \
     created_at, updated_at";

const APPROACH_JOIN: &str = "SELECT ca.id, ca.asteroid_id, a.name AS asteroid_name, \
     a.neo_reference_id, a.is_potentially_hazardous, ca.close_approach_time, \
     ca.relative_velocity_km_per_sec, ca.relative_velocity_km_per_hour, \
     ca.miss_distance_astronomical, ca.miss_distance_lunar, ca.miss_distance_kilometers, \
     ca.orbiting_body \
     FROM close_approaches ca JOIN asteroids a ON a.id = ca.asteroid_id";

/// Look up an asteroid by its external reference id.
pub async fn get_by_reference_id(
    pool: &PgPool,
    reference_id: &str,
) -> sqlx::Result<Option<Asteroid>> {
    sqlx::query_as::<_, Asteroid>(&format!(
        "SELECT {ASTEROID_COLUMNS} FROM asteroids WHERE neo_reference_id = $1"
    ))
    .bind(reference_id)
    .fetch_optional(pool)
    .await
}

/// Insert a new asteroid and return the stored row.
pub async fn insert_asteroid(pool: &PgPool, new: &NewAsteroid) -> sqlx::Result<Asteroid> {
    sqlx::query_as::<_, Asteroid>(&format!(
        "INSERT INTO asteroids (neo_reference_id, name, nasa_jpl_url, absolute_magnitude_h,
             estimated_diameter_min, estimated_diameter_max, is_potentially_hazardous,
             is_sentry_object)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
         RETURNING {ASTEROID_COLUMNS}"
    ))
    .bind(&new.neo_reference_id)
    .bind(&new.name)
    .bind(&new.nasa_jpl_url)
    .bind(new.absolute_magnitude_h)
    .bind(new.estimated_diameter_min)
    .bind(new.estimated_diameter_max)
    .bind(new.is_potentially_hazardous)
    .bind(new.is_sentry_object)
    .fetch_one(pool)
    .await
}

/// Whether an approach is already stored for this (asteroid, timestamp).
pub async fn approach_exists(
    pool: &PgPool,
    asteroid_id: Uuid,
    close_approach_time: DateTime<Utc>,
) -> sqlx::Result<bool> {
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS (
             SELECT 1 FROM close_approaches
             WHERE asteroid_id = $1 AND close_approach_time = $2
         )",
    )
    .bind(asteroid_id)
    .bind(close_approach_time)
    .fetch_one(pool)
    .await
}

/// Insert a new close approach.
pub async fn insert_approach(pool: &PgPool, new: &NewCloseApproach) -> sqlx::Result<()> {
    sqlx::query(
        "INSERT INTO close_approaches (asteroid_id, close_approach_time,
             relative_velocity_km_per_sec, relative_velocity_km_per_hour,
             miss_distance_astronomical, miss_distance_lunar, miss_distance_kilometers,
             orbiting_body)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
    )
    .bind(new.asteroid_id)
    .bind(new.close_approach_time)
    .bind(new.relative_velocity_km_per_sec)
    .bind(new.relative_velocity_km_per_hour)
    .bind(new.miss_distance_astronomical)
    .bind(new.miss_distance_lunar)
    .bind(new.miss_distance_kilometers)
    .bind(&new.orbiting_body)
    .execute(pool)
    .await?;

    Ok(())
}

/// Approaches within the last `days` days, chronological.
pub async fn recent_approaches(
    pool: &PgPool,
    days: u32,
) -> sqlx::Result<Vec<CloseApproachWithAsteroid>> {
    let cutoff = Utc::now() - chrono::Duration::days(i64::from(days));

    sqlx::query_as::<_, CloseApproachWithAsteroid>(&format!(
        "{APPROACH_JOIN} WHERE ca.close_approach_time >= $1 ORDER BY ca.close_approach_time"
    ))
    .bind(cutoff)
    .fetch_all(pool)
    .await
}

/// Approaches from now through now + `days`, chronological.
pub async fn upcoming_approaches(
    pool: &PgPool,
    days: u32,
) -> sqlx::Result<Vec<CloseApproachWithAsteroid>> {
    let now = Utc::now();
    let horizon = now + chrono::Duration::days(i64::from(days));

    sqlx::query_as::<_, CloseApproachWithAsteroid>(&format!(
        "{APPROACH_JOIN} WHERE ca.close_approach_time >= $1 AND ca.close_approach_time <= $2
         ORDER BY ca.close_approach_time"
    ))
    .bind(now)
    .bind(horizon)
    .fetch_all(pool)
    .await
}

/// Potentially hazardous asteroids, newest-created first.
pub async fn hazardous_asteroids(pool: &PgPool) -> sqlx::Result<Vec<Asteroid>> {
    sqlx::query_as::<_, Asteroid>(&format!(
        "SELECT {ASTEROID_COLUMNS} FROM asteroids
         WHERE is_potentially_hazardous ORDER BY created_at DESC"
    ))
    .fetch_all(pool)
    .await
}
