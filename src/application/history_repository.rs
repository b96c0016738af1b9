// Repository trait for historical sensor data
use crate::domain::reading::HistoricalRecord;
use async_trait::async_trait;

#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Fetch every historical record for the given time scale
    /// (e.g. "realtime"), in the order the source returns them.
    async fn fetch_history(&self, scale: &str) -> anyhow::Result<Vec<HistoricalRecord>>;
}
