//! Skywatch Server Library
//!
//! HTTP server over the ingested space datasets.
//!
//! # Overview
//!
//! The server exposes a small read-mostly REST API:
//!
//! - **Query endpoints** (GET): read-only, filtered and sorted views over
//!   already-persisted records; they never trigger a network fetch except
//!   for the latest-picture accessor's stored-first contract
//! - **Refresh endpoints** (POST): one fresh fetch per call, reporting a
//!   success flag plus a count or an error string; pipeline failures never
//!   escape as unhandled errors
//!
//! # Framework Stack
//!
//! - **Axum**: web framework
//! - **SQLx**: PostgreSQL access
//! - **Tower / tower-http**: CORS and request tracing middleware

pub mod api;
pub mod config;
pub mod error;
pub mod features;
pub mod middleware;

use skywatch_ingest::NasaClient;
use sqlx::PgPool;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub client: NasaClient,
}
