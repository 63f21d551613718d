// Fetch/normalize pipeline for solar flare events

use chrono::{Duration, NaiveDate, Utc};
use sqlx::PgPool;
use tracing::{debug, info, warn};

use skywatch_common::{IngestError, Result};

use super::models::{FlarePayload, NewSolarFlare};
use super::store;
use crate::client::NasaClient;

/// Ingestion of solar flare events.
#[derive(Debug, Clone)]
pub struct FlarePipeline {
    db: PgPool,
    client: NasaClient,
}

impl FlarePipeline {
    pub fn new(db: PgPool, client: NasaClient) -> Self {
        Self { db, client }
    }

    /// Ingest flares for an inclusive date range, defaulting to the last
    /// 30 days through today. Returns the count of newly created flares.
    ///
    /// A flare already stored under its id is skipped; one missing any of
    /// begin/peak/end timing is dropped whole with a logged warning.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_flares(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<u64> {
        let end = end.unwrap_or_else(|| Utc::now().date_naive());
        let start = start.unwrap_or(end - Duration::days(30));

        let entries = self.client.donki_flares(start, end).await?;

        let mut created = 0u64;
        for entry in entries {
            match self.ingest_flare(entry).await {
                Ok(true) => created += 1,
                Ok(false) => {},
                Err(error) => warn!(%error, "skipping malformed flare entry"),
            }
        }

        info!(flares = created, "solar flare feed ingested");
        Ok(created)
    }

    /// Returns whether a new flare row was created.
    async fn ingest_flare(&self, entry: serde_json::Value) -> Result<bool> {
        let payload: FlarePayload =
            serde_json::from_value(entry).map_err(|error| IngestError::payload(error.to_string()))?;
        let flare_id = payload
            .flr_id
            .clone()
            .ok_or_else(|| IngestError::payload("flare entry without flrID"))?;

        if store::exists(&self.db, &flare_id).await? {
            debug!(%flare_id, "flare already stored");
            return Ok(false);
        }

        let Some(new) = NewSolarFlare::from_payload(&flare_id, &payload) else {
            warn!(%flare_id, "missing or unparseable timing data, dropping flare");
            return Ok(false);
        };

        store::insert(&self.db, &new).await?;
        Ok(true)
    }
}
