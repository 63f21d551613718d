//! Skywatch Ingest Library
//!
//! Ingestion pipelines for space datasets served by NASA's public APIs.
//!
//! # Supported Data Sources
//!
//! - **APOD**: Astronomy Picture of the Day, one record per calendar date
//! - **NeoWs**: near-Earth asteroid feed with nested close-approach events
//! - **DONKI**: solar flare events with begin/peak/end timing
//!
//! Each pipeline fetches JSON for a date or date range, normalizes the
//! payload into flat relational rows, and skips records already present
//! under their natural key, so re-running a fetch over already-processed
//! data never creates duplicates.
//!
//! # Example
//!
//! ```no_run
//! use skywatch_ingest::{apod::ApodPipeline, client::NasaClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let pool = sqlx::PgPool::connect("postgresql://localhost/skywatch").await?;
//!     let client = NasaClient::new(None);
//!     let pipeline = ApodPipeline::new(pool, client);
//!     let pictures = pipeline.fetch_recent(7).await;
//!     println!("{} pictures available", pictures.len());
//!     Ok(())
//! }
//! ```

pub mod apod;
pub mod client;
pub mod donki;
pub mod neo;
pub mod timestamp;

pub use client::NasaClient;
