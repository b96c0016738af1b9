// Event loop - the single task that owns the dashboard and applies events in order
use crate::application::dashboard::Dashboard;
use crate::application::history_repository::HistoryRepository;
use crate::application::live_ingest::ingest_message;
use crate::application::render_sink::RenderSink;
use crate::application::replace_all::replace_all;
use crate::domain::reading::HistoricalRecord;
use chrono::Utc;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEvent {
    /// A raw message from the pub/sub transport.
    Message { topic: String, payload: Vec<u8> },
    /// A completed historical fetch.
    HistoryLoaded {
        scale: String,
        records: Vec<HistoricalRecord>,
    },
}

#[derive(Debug, Error)]
#[error("dashboard event loop has stopped")]
pub struct LoopClosed;

/// Cloneable entry point for everything that feeds the event loop.
#[derive(Clone)]
pub struct DashboardHandle {
    tx: mpsc::Sender<DashboardEvent>,
    history: Arc<dyn HistoryRepository>,
}

impl DashboardHandle {
    pub async fn publish(&self, topic: String, payload: Vec<u8>) -> Result<(), LoopClosed> {
        self.tx
            .send(DashboardEvent::Message { topic, payload })
            .await
            .map_err(|_| LoopClosed)
    }

    /// Fetch history for `scale` in the background and queue the result.
    ///
    /// Requests are neither cancelled nor ordered: each one that succeeds is
    /// applied when it completes. Failures are logged and change nothing.
    pub fn request_history(&self, scale: String) -> JoinHandle<()> {
        let tx = self.tx.clone();
        let history = self.history.clone();

        tokio::spawn(async move {
            tracing::debug!("Fetching history for scale {}", scale);
            match history.fetch_history(&scale).await {
                Ok(records) => {
                    tracing::debug!("History for {} returned {} records", scale, records.len());
                    if tx
                        .send(DashboardEvent::HistoryLoaded { scale, records })
                        .await
                        .is_err()
                    {
                        tracing::debug!("Event loop stopped before history could be applied");
                    }
                }
                Err(e) => {
                    tracing::error!("Error fetching history for scale {}: {:#}", scale, e);
                }
            }
        })
    }
}

pub struct EventLoop<S: RenderSink> {
    dashboard: Dashboard,
    sink: S,
    rx: mpsc::Receiver<DashboardEvent>,
}

impl<S: RenderSink> EventLoop<S> {
    pub fn new(
        dashboard: Dashboard,
        sink: S,
        history: Arc<dyn HistoryRepository>,
        queue_size: usize,
    ) -> (Self, DashboardHandle) {
        let (tx, rx) = mpsc::channel(queue_size);
        let event_loop = Self {
            dashboard,
            sink,
            rx,
        };
        (event_loop, DashboardHandle { tx, history })
    }

    /// Apply one event to completion, including its render calls.
    pub fn handle_event(&mut self, event: DashboardEvent) {
        match event {
            DashboardEvent::Message { topic, payload } => {
                ingest_message(&mut self.dashboard, &mut self.sink, &topic, &payload, Utc::now());
            }
            DashboardEvent::HistoryLoaded { scale, records } => {
                tracing::info!("Applying {} historical records for scale {}", records.len(), scale);
                replace_all(&mut self.dashboard, &mut self.sink, &records);
            }
        }
    }

    /// Run until every handle (and every in-flight history request) is gone.
    pub async fn run(mut self) -> (Dashboard, S) {
        tracing::info!(
            "Dashboard event loop started with {} channels",
            self.dashboard.registry().len()
        );

        while let Some(event) = self.rx.recv().await {
            self.handle_event(event);
        }

        tracing::info!("Dashboard event loop stopped");
        (self.dashboard, self.sink)
    }
}
