//! HTTP client for NASA's public APIs
//!
//! One client is shared by all three pipelines. The API key is injected at
//! construction with the public demo key as the fallback, applied at this
//! boundary rather than read from global state. The base URL is overridable
//! so tests can point the client at a mock server.

use std::time::Duration;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use skywatch_common::{IngestError, Result};

use crate::apod::models::ApodPayload;
use crate::neo::models::NeoFeedPayload;

/// Production API host.
pub const DEFAULT_BASE_URL: &str = "https://api.nasa.gov";

/// Rate-limited public key accepted by all NASA endpoints.
pub const DEMO_API_KEY: &str = "DEMO_KEY";

/// Single-date lookups get a short timeout; failure is soft for callers.
const APOD_TIMEOUT: Duration = Duration::from_secs(10);

/// Range feeds return larger payloads and get a little longer.
const FEED_TIMEOUT: Duration = Duration::from_secs(15);

/// Client for the NASA APOD, NeoWs and DONKI endpoints.
#[derive(Debug, Clone)]
pub struct NasaClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl NasaClient {
    /// Create a client against the production host. A missing key falls
    /// back to [`DEMO_API_KEY`].
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, api_key)
    }

    /// Create a client against an explicit host, used by tests.
    pub fn with_base_url(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.unwrap_or_else(|| DEMO_API_KEY.to_string()),
        }
    }

    /// Fetch the astronomy picture of the day for a single date.
    pub async fn apod(&self, date: NaiveDate) -> Result<ApodPayload> {
        let endpoint = format!("{}/planetary/apod", self.base_url);
        self.get_json(
            &endpoint,
            &[("date", date.format("%Y-%m-%d").to_string())],
            APOD_TIMEOUT,
        )
        .await
    }

    /// Fetch the near-Earth object feed for an inclusive date range.
    pub async fn neo_feed(&self, start: NaiveDate, end: NaiveDate) -> Result<NeoFeedPayload> {
        let endpoint = format!("{}/neo/rest/v1/feed", self.base_url);
        self.get_json(
            &endpoint,
            &[
                ("start_date", start.format("%Y-%m-%d").to_string()),
                ("end_date", end.format("%Y-%m-%d").to_string()),
            ],
            FEED_TIMEOUT,
        )
        .await
    }

    /// Fetch solar flare events for an inclusive date range.
    ///
    /// Entries are returned raw so one malformed flare cannot fail the
    /// whole batch; the pipeline decodes them one by one.
    pub async fn donki_flares(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<serde_json::Value>> {
        let endpoint = format!("{}/DONKI/FLR", self.base_url);
        self.get_json(
            &endpoint,
            &[
                ("startDate", start.format("%Y-%m-%d").to_string()),
                ("endDate", end.format("%Y-%m-%d").to_string()),
            ],
            FEED_TIMEOUT,
        )
        .await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
        timeout: Duration,
    ) -> Result<T> {
        let response = self
            .http
            .get(endpoint)
            .query(&[("api_key", self.api_key.as_str())])
            .query(params)
            .timeout(timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(IngestError::UnexpectedStatus {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.json::<T>().await?)
    }
}
