// Fetch/normalize pipeline for the astronomy picture of the day

use chrono::{Duration, NaiveDate, Utc};
use sqlx::PgPool;
use tracing::{debug, info, warn};

use skywatch_common::Result;

use super::models::{DailyPicture, NewDailyPicture};
use super::store;
use crate::client::NasaClient;

/// Stored-first ingestion of daily pictures.
#[derive(Debug, Clone)]
pub struct ApodPipeline {
    db: PgPool,
    client: NasaClient,
}

impl ApodPipeline {
    pub fn new(db: PgPool, client: NasaClient) -> Self {
        Self { db, client }
    }

    /// Return the stored picture for `date`, fetching and persisting it
    /// when absent. `None` means today.
    ///
    /// Transport and payload failures surface as `Err`; batch and latest
    /// accessors below translate that into absence.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_picture(&self, date: Option<NaiveDate>) -> Result<DailyPicture> {
        let date = date.unwrap_or_else(|| Utc::now().date_naive());

        if let Some(existing) = store::get_by_date(&self.db, date).await? {
            debug!(%date, "daily picture already stored");
            return Ok(existing);
        }

        let payload = self.client.apod(date).await?;
        let created = store::insert(&self.db, &NewDailyPicture::from_payload(date, payload)).await?;
        info!(%date, title = %created.title, "stored new daily picture");
        Ok(created)
    }

    /// Fetch the last `days` pictures, today inclusive, walking backward.
    ///
    /// Failed days are logged and skipped; partial results are a valid
    /// success and the caller cannot tell a short month from a flaky
    /// network without the logs.
    pub async fn fetch_recent(&self, days: u32) -> Vec<DailyPicture> {
        let today = Utc::now().date_naive();
        let mut pictures = Vec::new();

        for offset in 0..days {
            let date = today - Duration::days(i64::from(offset));
            match self.fetch_picture(Some(date)).await {
                Ok(picture) => pictures.push(picture),
                Err(error) => warn!(%date, %error, "skipping day after failed fetch"),
            }
        }

        pictures
    }

    /// Most recent picture, preferring the store over the network.
    ///
    /// When the latest stored record is already today's, it is returned
    /// without a network call; otherwise a fresh fetch for today is
    /// attempted, with failure mapped to `None`.
    pub async fn latest_picture(&self) -> Option<DailyPicture> {
        let today = Utc::now().date_naive();

        match store::latest(&self.db).await {
            Ok(Some(latest)) if latest.picture_date == today => {
                debug!("returning cached picture for today");
                return Some(latest);
            },
            Ok(_) => {},
            Err(error) => warn!(%error, "failed to read latest stored picture"),
        }

        match self.fetch_picture(Some(today)).await {
            Ok(picture) => Some(picture),
            Err(error) => {
                warn!(%error, "failed to fetch today's picture");
                None
            },
        }
    }
}
