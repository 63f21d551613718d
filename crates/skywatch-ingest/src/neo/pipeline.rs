// Fetch/normalize pipeline for the near-Earth object feed

use chrono::{Duration, NaiveDate, Utc};
use sqlx::PgPool;
use tracing::{info, warn};

use skywatch_common::{IngestError, Result};

use super::models::{AsteroidPayload, NewAsteroid, NewCloseApproach};
use super::store;
use crate::client::NasaClient;
use crate::timestamp;

/// Outcome of one feed ingestion. The asteroid count is the primary
/// figure; approaches are tracked for the logs.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeedSummary {
    pub asteroids_created: u64,
    pub approaches_created: u64,
}

/// Ingestion of the asteroid feed with nested close-approach extraction.
#[derive(Debug, Clone)]
pub struct NeoPipeline {
    db: PgPool,
    client: NasaClient,
}

impl NeoPipeline {
    pub fn new(db: PgPool, client: NasaClient) -> Self {
        Self { db, client }
    }

    /// Ingest the feed for an inclusive date range, defaulting to today
    /// through today + 7 days.
    ///
    /// One call covers the whole range; all dates' asteroid lists are
    /// flattened. A malformed asteroid or approach is logged and skipped,
    /// never aborting the batch. Asteroids already stored under their
    /// reference id are reused unchanged (first write wins).
    #[tracing::instrument(skip(self))]
    pub async fn fetch_feed(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<FeedSummary> {
        let start = start.unwrap_or_else(|| Utc::now().date_naive());
        let end = end.unwrap_or(start + Duration::days(7));

        let feed = self.client.neo_feed(start, end).await?;

        let mut summary = FeedSummary::default();
        for (feed_date, entries) in feed.near_earth_objects {
            for entry in entries {
                match self.ingest_asteroid(entry).await {
                    Ok((created, approaches)) => {
                        if created {
                            summary.asteroids_created += 1;
                        }
                        summary.approaches_created += approaches;
                    },
                    Err(error) => {
                        warn!(%feed_date, %error, "skipping malformed asteroid entry");
                    },
                }
            }
        }

        info!(
            asteroids = summary.asteroids_created,
            approaches = summary.approaches_created,
            "asteroid feed ingested"
        );
        Ok(summary)
    }

    /// Returns whether a new asteroid row was created and how many of its
    /// approaches were persisted.
    async fn ingest_asteroid(&self, entry: serde_json::Value) -> Result<(bool, u64)> {
        let payload: AsteroidPayload =
            serde_json::from_value(entry).map_err(|error| IngestError::payload(error.to_string()))?;
        let reference_id = payload
            .neo_reference_id
            .clone()
            .ok_or_else(|| IngestError::payload("asteroid entry without neo_reference_id"))?;

        let (asteroid, created) = match store::get_by_reference_id(&self.db, &reference_id).await? {
            // First write wins; upstream revisions are not re-synced.
            Some(existing) => (existing, false),
            None => {
                let new = NewAsteroid::from_payload(&reference_id, &payload);
                (store::insert_asteroid(&self.db, &new).await?, true)
            },
        };

        let mut approaches_created = 0;
        for approach in &payload.close_approach_data {
            let Some(raw) = approach.close_approach_date_full.as_deref() else {
                warn!(asteroid = %reference_id, "approach without timestamp, dropping entry");
                continue;
            };
            let Some(when) = timestamp::parse_utc(raw, timestamp::APPROACH_FORMATS) else {
                warn!(asteroid = %reference_id, value = raw, "unparseable approach timestamp, dropping entry");
                continue;
            };

            if store::approach_exists(&self.db, asteroid.id, when).await? {
                continue;
            }

            let new = NewCloseApproach::from_payload(asteroid.id, when, approach);
            store::insert_approach(&self.db, &new).await?;
            approaches_created += 1;
        }

        Ok((created, approaches_created))
    }
}
