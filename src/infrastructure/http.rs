use crate::domain::{
    errors::{FetchError, FetchResult},
    gex::{Currency, Snapshot, SnapshotRepository},
    logging::{LogComponent, get_logger, get_time_provider},
};
use crate::infrastructure::dto::parse_snapshot;
use gloo::net::http::Request;

/// HTTP client for the GEX provider
#[derive(Debug, Clone)]
pub struct GexHttpClient {
    base_url: String,
}

impl GexHttpClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into() }
    }

    pub fn snapshot_url(&self, currency: Currency) -> String {
        format!("{}/gex?currency={}", self.base_url.trim_end_matches('/'), currency.code())
    }

    pub async fn get_snapshot(&self, currency: Currency) -> FetchResult<Snapshot> {
        let url = self.snapshot_url(currency);
        get_logger().debug(LogComponent::Infrastructure("GexHttpClient"), &format!("GET {url}"));

        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Network(format!("Failed to send request: {e}")))?;

        if !response.ok() {
            return Err(FetchError::Http {
                status: response.status(),
                message: response.status_text(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Network(format!("Failed to read body: {e}")))?;

        let snapshot = parse_snapshot(&body, get_time_provider().current_timestamp())?;
        get_logger().debug(
            LogComponent::Infrastructure("GexHttpClient"),
            &format!("{} strikes received for {}", snapshot.records.len(), currency),
        );
        Ok(snapshot)
    }
}

impl SnapshotRepository for GexHttpClient {
    async fn fetch_snapshot(&self, currency: Currency) -> FetchResult<Snapshot> {
        self.get_snapshot(currency).await
    }
}
