//! Asteroid and close-approach API routes
//!
//! - `GET /api/v1/asteroids/hazardous` - Potentially hazardous asteroids
//! - `GET /api/v1/asteroids/approaches/recent?days=30` - Approaches in the past window
//! - `GET /api/v1/asteroids/approaches/upcoming?days=7` - Approaches ahead
//! - `POST /api/v1/asteroids/refresh` - Force a feed ingestion for the default window

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use skywatch_ingest::neo::{self, Asteroid, CloseApproachWithAsteroid, NeoPipeline};

use crate::api::{ApiResponse, RefreshReport};
use crate::error::AppError;
use crate::AppState;

const MAX_WINDOW_DAYS: u32 = 365;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/hazardous", get(hazardous_asteroids))
        .route("/approaches/recent", get(recent_approaches))
        .route("/approaches/upcoming", get(upcoming_approaches))
        .route("/refresh", post(refresh))
}

#[derive(Debug, Deserialize)]
struct WindowQuery {
    days: Option<u32>,
}

impl WindowQuery {
    fn days_or(&self, default: u32) -> u32 {
        self.days.unwrap_or(default).clamp(1, MAX_WINDOW_DAYS)
    }
}

/// Potentially hazardous asteroids, newest first.
#[tracing::instrument(skip(state))]
async fn hazardous_asteroids(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<Asteroid>>, AppError> {
    let asteroids = neo::store::hazardous_asteroids(&state.db).await?;

    let meta = json!({ "count": asteroids.len() });
    Ok(ApiResponse::success_with_meta(asteroids, meta))
}

/// Close approaches within the past `days` days, chronological.
#[tracing::instrument(skip(state))]
async fn recent_approaches(
    State(state): State<AppState>,
    Query(query): Query<WindowQuery>,
) -> Result<ApiResponse<Vec<CloseApproachWithAsteroid>>, AppError> {
    let days = query.days_or(30);
    let approaches = neo::store::recent_approaches(&state.db, days).await?;

    let meta = json!({ "count": approaches.len(), "days": days });
    Ok(ApiResponse::success_with_meta(approaches, meta))
}

/// Close approaches from now through `days` days ahead, chronological.
#[tracing::instrument(skip(state))]
async fn upcoming_approaches(
    State(state): State<AppState>,
    Query(query): Query<WindowQuery>,
) -> Result<ApiResponse<Vec<CloseApproachWithAsteroid>>, AppError> {
    let days = query.days_or(7);
    let approaches = neo::store::upcoming_approaches(&state.db, days).await?;

    let meta = json!({ "count": approaches.len(), "days": days });
    Ok(ApiResponse::success_with_meta(approaches, meta))
}

/// Force a feed ingestion for the default window (today through +7 days).
/// Always 200; failure is reported in the body.
#[tracing::instrument(skip(state))]
async fn refresh(State(state): State<AppState>) -> RefreshReport {
    let pipeline = NeoPipeline::new(state.db.clone(), state.client.clone());

    match pipeline.fetch_feed(None, None).await {
        Ok(summary) => RefreshReport::created(
            summary.asteroids_created,
            format!(
                "fetched {} new asteroids and {} close approaches",
                summary.asteroids_created, summary.approaches_created
            ),
        ),
        Err(error) => {
            tracing::error!(%error, "asteroid feed refresh failed");
            RefreshReport::failed(error.to_string())
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_build() {
        let router = routes();
        assert!(format!("{:?}", router).contains("Router"));
    }

    #[test]
    fn window_defaults_and_clamps() {
        assert_eq!(WindowQuery { days: None }.days_or(30), 30);
        assert_eq!(WindowQuery { days: Some(0) }.days_or(30), 1);
        assert_eq!(WindowQuery { days: Some(4000) }.days_or(7), MAX_WINDOW_DAYS);
    }
}
