//! Daily picture API routes
//!
//! - `GET /api/v1/apod/latest` - Most recent picture, fetching today's if absent
//! - `GET /api/v1/apod/recent?limit=20` - Stored pictures, newest first
//! - `GET /api/v1/apod/:date` - Picture for a calendar date, fetched on demand
//! - `POST /api/v1/apod/refresh` - Force a fetch of today's picture

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

use skywatch_ingest::apod::{self, ApodPipeline, DailyPicture};

use crate::api::{ApiResponse, RefreshReport};
use crate::error::AppError;
use crate::AppState;

const DEFAULT_LIMIT: i64 = 20;
const MAX_LIMIT: i64 = 100;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/latest", get(latest_picture))
        .route("/recent", get(recent_pictures))
        .route("/refresh", post(refresh))
        .route("/:date", get(picture_by_date))
}

#[derive(Debug, Deserialize)]
struct RecentQuery {
    limit: Option<i64>,
}

/// Most recent picture. Serves today's stored record when present,
/// otherwise attempts a fetch; 404 only when both fail.
#[tracing::instrument(skip(state))]
async fn latest_picture(
    State(state): State<AppState>,
) -> Result<ApiResponse<DailyPicture>, AppError> {
    let pipeline = ApodPipeline::new(state.db.clone(), state.client.clone());

    match pipeline.latest_picture().await {
        Some(picture) => Ok(ApiResponse::success(picture)),
        None => Err(AppError::NotFound("no picture available".to_string())),
    }
}

/// Stored pictures, newest date first.
#[tracing::instrument(skip(state))]
async fn recent_pictures(
    State(state): State<AppState>,
    Query(query): Query<RecentQuery>,
) -> Result<ApiResponse<Vec<DailyPicture>>, AppError> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let pictures = apod::store::list_recent(&state.db, limit).await?;

    let meta = json!({ "count": pictures.len() });
    Ok(ApiResponse::success_with_meta(pictures, meta))
}

/// Picture for one calendar date, fetched from upstream when not yet stored.
#[tracing::instrument(skip(state), fields(date = %date))]
async fn picture_by_date(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<ApiResponse<DailyPicture>, AppError> {
    let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
        .map_err(|_| AppError::BadRequest(format!("invalid date '{date}', expected YYYY-MM-DD")))?;

    let pipeline = ApodPipeline::new(state.db.clone(), state.client.clone());
    match pipeline.fetch_picture(Some(date)).await {
        Ok(picture) => Ok(ApiResponse::success(picture)),
        Err(error) => {
            tracing::warn!(%date, %error, "picture unavailable");
            Err(AppError::NotFound(format!("no picture available for {date}")))
        },
    }
}

/// Force-fetch today's picture. Always 200; failure is reported in the body.
#[tracing::instrument(skip(state))]
async fn refresh(State(state): State<AppState>) -> RefreshReport {
    let pipeline = ApodPipeline::new(state.db.clone(), state.client.clone());

    match pipeline.fetch_picture(None).await {
        Ok(picture) => RefreshReport::created(
            1,
            format!("fetched picture for {}: {}", picture.picture_date, picture.title),
        ),
        Err(error) => {
            tracing::error!(%error, "picture refresh failed");
            RefreshReport::failed(error.to_string())
        },
    }
}
