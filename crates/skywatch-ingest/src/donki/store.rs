// Storage layer for solar flares

use chrono::Utc;
use sqlx::PgPool;

use super::models::{FlareClass, NewSolarFlare, SolarFlare};

const COLUMNS: &str = "id, flare_id, flare_class, begin_time, peak_time, end_time, \
     source_location, active_region, linked_events, instruments, created_at, updated_at";

/// Whether a flare with this external id is already stored.
pub async fn exists(pool: &PgPool, flare_id: &str) -> sqlx::Result<bool> {
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS (SELECT 1 FROM solar_flares WHERE flare_id = $1)",
    )
    .bind(flare_id)
    .fetch_one(pool)
    .await
}

/// Insert a new flare.
pub async fn insert(pool: &PgPool, new: &NewSolarFlare) -> sqlx::Result<()> {
    sqlx::query(
        "INSERT INTO solar_flares (flare_id, flare_class, begin_time, peak_time, end_time,
             source_location, active_region, linked_events, instruments)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
    )
    .bind(&new.flare_id)
    .bind(new.flare_class.as_str())
    .bind(new.begin_time)
    .bind(new.peak_time)
    .bind(new.end_time)
    .bind(&new.source_location)
    .bind(&new.active_region)
    .bind(&new.linked_events)
    .bind(&new.instruments)
    .execute(pool)
    .await?;

    Ok(())
}

/// Flares peaking within the last `days` days, newest first.
pub async fn recent_flares(pool: &PgPool, days: u32) -> sqlx::Result<Vec<SolarFlare>> {
    let cutoff = Utc::now() - chrono::Duration::days(i64::from(days));

    sqlx::query_as::<_, SolarFlare>(&format!(
        "SELECT {COLUMNS} FROM solar_flares WHERE peak_time >= $1 ORDER BY peak_time DESC"
    ))
    .bind(cutoff)
    .fetch_all(pool)
    .await
}

/// Flares of a single class, newest first.
pub async fn flares_by_class(pool: &PgPool, class: FlareClass) -> sqlx::Result<Vec<SolarFlare>> {
    sqlx::query_as::<_, SolarFlare>(&format!(
        "SELECT {COLUMNS} FROM solar_flares WHERE flare_class = $1 ORDER BY peak_time DESC"
    ))
    .bind(class.as_str())
    .fetch_all(pool)
    .await
}
