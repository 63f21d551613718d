//! Feature modules, one per data domain
//!
//! Each feature owns its router: read-only query endpoints over the
//! stored records plus one force-refresh endpoint that passes through to
//! the domain's ingestion pipeline.

pub mod apod;
pub mod asteroids;
pub mod solar_flares;

use axum::Router;

use crate::AppState;

/// Assemble all feature routes under one router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .nest("/apod", apod::routes())
        .nest("/asteroids", asteroids::routes())
        .nest("/solar-flares", solar_flares::routes())
        .with_state(state)
}
