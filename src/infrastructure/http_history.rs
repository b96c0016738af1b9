// HTTP history repository - historical readings from the sensor data endpoint
use crate::application::history_repository::HistoryRepository;
use crate::domain::reading::HistoricalRecord;
use crate::infrastructure::config::{history_url, HistorySettings};
use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("failed to send history request: {0}")]
    Request(#[source] reqwest::Error),
    #[error("history request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("failed to parse history response: {0}")]
    Decode(#[source] reqwest::Error),
}

#[derive(Debug, Clone)]
pub struct HttpHistoryRepository {
    client: reqwest::Client,
    settings: HistorySettings,
}

impl HttpHistoryRepository {
    pub fn new(settings: HistorySettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            settings,
        }
    }

    async fn execute_query(&self, scale: &str) -> Result<Vec<HistoricalRecord>, HistoryError> {
        let url = history_url(&self.settings, scale);
        tracing::debug!("Requesting history: {}", url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(HistoryError::Request)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(HistoryError::Status { status, body });
        }

        response
            .json::<Vec<HistoricalRecord>>()
            .await
            .map_err(HistoryError::Decode)
    }
}

#[async_trait]
impl HistoryRepository for HttpHistoryRepository {
    async fn fetch_history(&self, scale: &str) -> anyhow::Result<Vec<HistoricalRecord>> {
        Ok(self.execute_query(scale).await?)
    }
}
