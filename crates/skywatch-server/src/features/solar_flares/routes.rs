//! Solar flare API routes
//!
//! - `GET /api/v1/solar-flares/recent?days=7` - Flares peaking in the past window
//! - `GET /api/v1/solar-flares/class/:class` - Flares of one class (A/B/C/M/X)
//! - `POST /api/v1/solar-flares/refresh` - Force an ingestion of the last 30 days

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use skywatch_ingest::donki::{self, FlareClass, FlarePipeline, SolarFlare};

use crate::api::{ApiResponse, RefreshReport};
use crate::error::AppError;
use crate::AppState;

const MAX_WINDOW_DAYS: u32 = 365;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/recent", get(recent_flares))
        .route("/class/:class", get(flares_by_class))
        .route("/refresh", post(refresh))
}

#[derive(Debug, Deserialize)]
struct WindowQuery {
    days: Option<u32>,
}

/// Flares peaking within the past `days` days, newest first.
#[tracing::instrument(skip(state))]
async fn recent_flares(
    State(state): State<AppState>,
    Query(query): Query<WindowQuery>,
) -> Result<ApiResponse<Vec<SolarFlare>>, AppError> {
    let days = query.days.unwrap_or(7).clamp(1, MAX_WINDOW_DAYS);
    let flares = donki::store::recent_flares(&state.db, days).await?;

    let meta = json!({ "count": flares.len(), "days": days });
    Ok(ApiResponse::success_with_meta(flares, meta))
}

/// Flares of a single class, newest first. The class letter is
/// case-insensitive.
#[tracing::instrument(skip(state), fields(class = %class))]
async fn flares_by_class(
    State(state): State<AppState>,
    Path(class): Path<String>,
) -> Result<ApiResponse<Vec<SolarFlare>>, AppError> {
    let class: FlareClass = class
        .parse()
        .map_err(|_| AppError::BadRequest(format!("unknown flare class '{class}'")))?;

    let flares = donki::store::flares_by_class(&state.db, class).await?;

    let meta = json!({ "count": flares.len(), "class": class.as_str() });
    Ok(ApiResponse::success_with_meta(flares, meta))
}

/// Force an ingestion of the last 30 days of flare events.
/// Always 200; failure is reported in the body.
#[tracing::instrument(skip(state))]
async fn refresh(State(state): State<AppState>) -> RefreshReport {
    let pipeline = FlarePipeline::new(state.db.clone(), state.client.clone());

    match pipeline.fetch_flares(None, None).await {
        Ok(created) => {
            RefreshReport::created(created, format!("fetched {created} new solar flares"))
        },
        Err(error) => {
            tracing::error!(%error, "solar flare refresh failed");
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
}
